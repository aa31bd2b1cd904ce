use anyhow::{Context, Result};
use serde::Deserialize;

/// Fallback clip metadata for manifest entries that omit it. The manifest
/// is the metadata source because decoding clips is out of scope.
pub const DEFAULT_CLIP_WIDTH: u32 = 1920;
pub const DEFAULT_CLIP_HEIGHT: u32 = 1080;
pub const DEFAULT_CLIP_DURATION: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Document,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tactic {
    pub name: String,
    pub file: String,
    #[serde(default = "default_clip_width")]
    pub width: u32,
    #[serde(default = "default_clip_height")]
    pub height: u32,
    #[serde(default = "default_clip_duration")]
    pub duration: f64,
}

fn default_clip_width() -> u32 {
    DEFAULT_CLIP_WIDTH
}

fn default_clip_height() -> u32 {
    DEFAULT_CLIP_HEIGHT
}

fn default_clip_duration() -> f64 {
    DEFAULT_CLIP_DURATION
}

impl Tactic {
    /// Clip extensions play in the annotated viewer; everything else is
    /// handed to the system document handler.
    pub fn media_kind(&self) -> MediaKind {
        let extension = self
            .file
            .rsplit('.')
            .next()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "mp4" | "webm" | "mov" => MediaKind::Video,
            _ => MediaKind::Document,
        }
    }
}

/// The tactics manifest: category name -> tactics, with category and tactic
/// order preserved exactly as authored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TacticsLibrary {
    categories: Vec<(String, Vec<Tactic>)>,
}

impl TacticsLibrary {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read tactics manifest {path}"))?;
        Self::from_json(&content).with_context(|| format!("parse tactics manifest {path}"))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        // serde_json's preserve_order feature keeps the authored category
        // order; a plain map type would sort or scramble it.
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut categories = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let tactics: Vec<Tactic> = serde_json::from_value(value)
                .with_context(|| format!("category {name:?} is not a tactic list"))?;
            categories.push((name, tactics));
        }
        Ok(Self { categories })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn first_category(&self) -> Option<&str> {
        self.categories.first().map(|(name, _)| name.as_str())
    }

    pub fn tactics(&self, category: &str) -> Option<&[Tactic]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, tactics)| tactics.as_slice())
    }
}
