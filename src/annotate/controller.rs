use tracing::debug;

use crate::annotate::canvas::OverlayBitmap;
use crate::annotate::engine::StrokeEngine;
use crate::annotate::history::SnapshotHistory;
use crate::annotate::mapper::{self, DisplayRect};
use crate::annotate::model::{Color, Tool, ToolState};
use crate::playback::VideoSource;

/// Lifecycle owner for one clip's annotation overlay: composes the bitmap,
/// the tool state, the stroke engine and the snapshot history, and exposes
/// the command surface consumed by the control bar.
///
/// One instance per clip; nothing here is process-wide, so several overlays
/// can coexist independently.
#[derive(Debug, Default)]
pub struct OverlayController {
    canvas: OverlayBitmap,
    tools: ToolState,
    engine: StrokeEngine,
    history: SnapshotHistory,
    display_rect: DisplayRect,
    revision: u64,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the bitmap to the clip's intrinsic resolution once its
    /// metadata is known. Zero dimensions are ignored; the overlay stays
    /// unsized and every drawing operation remains a no-op. Any in-flight
    /// stroke is discarded and the history reseeded with a blank baseline.
    pub fn bind_clip_metadata(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.engine.abort();
        self.canvas.resize(width, height);
        self.history.reset(&mut self.canvas);
        self.revision += 1;
        debug!(width, height, "overlay bound to clip resolution");
    }

    /// Records the overlay's displayed bounds, used to map pointer
    /// positions back into bitmap space.
    pub fn set_display_rect(&mut self, rect: DisplayRect) {
        self.display_rect = rect;
    }

    pub fn pointer_down(&mut self, screen: (f32, f32), video: &dyn VideoSource) {
        if !self.display_rect.has_area() || !self.canvas.has_area() {
            return;
        }
        let pos = mapper::map_to_bitmap(self.display_rect, self.canvas.size(), screen);
        self.engine.pointer_down(pos, video.is_paused(), &self.canvas);
    }

    pub fn pointer_move(&mut self, screen: (f32, f32), video: &dyn VideoSource) {
        if !self.display_rect.has_area() || !self.canvas.has_area() {
            return;
        }
        let pos = mapper::map_to_bitmap(self.display_rect, self.canvas.size(), screen);
        if self
            .engine
            .pointer_move(pos, video.is_paused(), &self.tools, &mut self.canvas)
        {
            self.revision += 1;
        }
    }

    pub fn pointer_up(&mut self) {
        if self.engine.pointer_up(&mut self.history, &self.canvas) {
            debug!(entries = self.history.len(), "stroke captured");
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select_tool(tool);
    }

    pub fn select_color(&mut self, color: Color) {
        self.tools.select_color(color);
    }

    pub fn undo(&mut self) {
        self.history.undo(&mut self.canvas);
        self.revision += 1;
    }

    pub fn reset(&mut self) {
        self.history.reset(&mut self.canvas);
        self.revision += 1;
    }

    pub fn canvas(&self) -> &OverlayBitmap {
        &self.canvas
    }

    pub fn tool_state(&self) -> ToolState {
        self.tools
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_drawing(&self) -> bool {
        self.engine.is_drawing()
    }

    /// Bumped whenever the bitmap's content changes; renderers compare it
    /// to skip redundant texture uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
