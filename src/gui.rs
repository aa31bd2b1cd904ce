use anyhow::Context;
use eframe::egui;
use tracing::warn;

use crate::annotate::controller::OverlayController;
use crate::annotate::export::{self, ExportBackdrop};
use crate::annotate::mapper::DisplayRect;
use crate::annotate::model::{Tool, QUICK_COLORS};
use crate::playback::{PlaybackClock, VideoSource, SPEED_PRESETS};
use crate::settings::AppSettings;
use crate::tactics::{MediaKind, Tactic, TacticsLibrary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Tactics,
    About,
}

/// One clip open in the viewer: the simulated playback clock plus the
/// annotation overlay bound to the clip's intrinsic resolution.
struct ClipView {
    name: String,
    clock: PlaybackClock,
    controller: OverlayController,
    texture: Option<egui::TextureHandle>,
    uploaded_revision: u64,
}

enum ActiveMedia {
    Clip(ClipView),
    Document { name: String, file: String },
}

pub struct TacticBoardApp {
    library: TacticsLibrary,
    settings: AppSettings,
    page: Page,
    category: Option<String>,
    tactic_index: Option<usize>,
    active: Option<ActiveMedia>,
    status: Option<String>,
}

impl TacticBoardApp {
    pub fn new(library: TacticsLibrary, settings: AppSettings) -> Self {
        let mut app = Self {
            library,
            settings,
            page: Page::Tactics,
            category: None,
            tactic_index: None,
            active: None,
            status: None,
        };
        if let Some(first) = app.library.first_category().map(str::to_owned) {
            app.select_category(first);
        }
        app
    }

    /// Switching category auto-opens its first tactic, matching how the
    /// browser preselects one on load.
    fn select_category(&mut self, category: String) {
        let first = self
            .library
            .tactics(&category)
            .and_then(|tactics| tactics.first())
            .cloned();
        self.category = Some(category);
        match first {
            Some(tactic) => self.open_tactic(0, &tactic),
            None => {
                self.tactic_index = None;
                self.active = None;
            }
        }
    }

    fn open_tactic(&mut self, index: usize, tactic: &Tactic) {
        self.tactic_index = Some(index);
        self.status = None;
        self.active = Some(match tactic.media_kind() {
            MediaKind::Video => {
                let mut controller = OverlayController::new();
                // The manifest stands in for the decoder's metadata-ready
                // signal; this is the one sizing event per clip.
                controller.bind_clip_metadata(tactic.width, tactic.height);
                ActiveMedia::Clip(ClipView {
                    name: tactic.name.clone(),
                    clock: PlaybackClock::new((tactic.width, tactic.height), tactic.duration),
                    controller,
                    texture: None,
                    uploaded_revision: 0,
                })
            }
            MediaKind::Document => ActiveMedia::Document {
                name: tactic.name.clone(),
                file: tactic.file.clone(),
            },
        });
    }

    fn navbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Tactic Board");
            ui.separator();
            for (page, label) in [(Page::Tactics, "Tactics"), (Page::About, "About")] {
                if ui.selectable_label(self.page == page, label).clicked() {
                    self.page = page;
                }
            }
        });
    }

    fn browser_bar(&mut self, ui: &mut egui::Ui) {
        let categories: Vec<String> = self.library.category_names().map(str::to_owned).collect();
        let mut picked_category: Option<String> = None;
        let mut picked_tactic: Option<(usize, Tactic)> = None;

        ui.horizontal_wrapped(|ui| {
            let selected = self.category.clone().unwrap_or_default();
            egui::ComboBox::from_id_source("category_selector")
                .selected_text(selected.clone())
                .show_ui(ui, |ui| {
                    for name in &categories {
                        if ui
                            .selectable_label(selected == *name, name)
                            .clicked()
                        {
                            picked_category = Some(name.clone());
                        }
                    }
                });
            ui.separator();

            if let Some(tactics) = self
                .category
                .as_deref()
                .and_then(|category| self.library.tactics(category))
            {
                for (index, tactic) in tactics.iter().enumerate() {
                    let active = self.tactic_index == Some(index);
                    if ui.selectable_label(active, &tactic.name).clicked() {
                        picked_tactic = Some((index, tactic.clone()));
                    }
                }
            }
        });

        if let Some(category) = picked_category {
            self.select_category(category);
        } else if let Some((index, tactic)) = picked_tactic {
            self.open_tactic(index, &tactic);
        }
    }
}

impl eframe::App for TacticBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(ActiveMedia::Clip(view)) = &mut self.active {
            let dt = ctx.input(|i| i.stable_dt) as f64;
            view.clock.tick(dt);
            if !view.clock.is_paused() {
                ctx.request_repaint();
            }
        }

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| self.navbar(ui));

        if self.page == Page::About {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("About");
                ui.label(concat!(
                    "Browse tactic clips and documents by category, pause a ",
                    "clip on the frame you want, and draw on it. Undo keeps ",
                    "the last ten strokes."
                ));
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            });
            return;
        }

        egui::TopBottomPanel::top("browser").show(ctx, |ui| self.browser_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.active {
            Some(ActiveMedia::Clip(view)) => {
                clip_area(ui, view);
                control_bar(ui, view, &self.settings, &mut self.status);
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            }
            Some(ActiveMedia::Document { name, file }) => {
                document_card(ui, name, file, &mut self.status);
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            }
            None => {
                if self.library.is_empty() {
                    ui.label("No tactics manifest loaded.");
                } else {
                    ui.label("Pick a tactic to get started.");
                }
            }
        });
    }
}

/// Paints the clip placeholder and the annotation overlay on top of it, and
/// feeds drag events into the overlay controller as pointer down/move/up.
fn clip_area(ui: &mut egui::Ui, view: &mut ClipView) {
    let (clip_w, clip_h) = view.clock.intrinsic_size();
    if clip_w == 0 || clip_h == 0 {
        ui.label("Clip has no resolution.");
        return;
    }
    let aspect = clip_w as f32 / clip_h as f32;
    let avail = ui.available_size();
    let max_height = (avail.y - 64.0).max(120.0);
    let mut display = egui::vec2(avail.x, avail.x / aspect);
    if display.y > max_height {
        display = egui::vec2(max_height * aspect, max_height);
    }

    let (response, painter) = ui.allocate_painter(display, egui::Sense::drag());
    let rect = response.rect;

    painter.rect_filled(rect, 4.0, egui::Color32::from_gray(16));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!(
            "{}   {:.1}s / {:.1}s",
            view.name,
            view.clock.position(),
            view.clock.duration()
        ),
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(140),
    );
    if view.clock.duration() > 0.0 {
        let frac = (view.clock.position() / view.clock.duration()) as f32;
        let strip = egui::Rect::from_min_size(
            egui::pos2(rect.min.x, rect.max.y - 3.0),
            egui::vec2(rect.width() * frac, 3.0),
        );
        painter.rect_filled(strip, 0.0, egui::Color32::from_gray(90));
    }

    // The overlay stretches over the clip area; the controller maps pointer
    // positions back into bitmap pixels from this rectangle.
    view.controller.set_display_rect(DisplayRect::new(
        rect.min.x,
        rect.min.y,
        rect.width(),
        rect.height(),
    ));

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            view.controller.pointer_down((pos.x, pos.y), &view.clock);
        }
    }
    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            view.controller.pointer_move((pos.x, pos.y), &view.clock);
        }
    }
    if response.drag_stopped_by(egui::PointerButton::Primary) {
        view.controller.pointer_up();
    }

    if view.controller.revision() != view.uploaded_revision {
        let canvas = view.controller.canvas();
        if canvas.has_area() {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [canvas.width() as usize, canvas.height() as usize],
                canvas.pixels(),
            );
            match &mut view.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    view.texture = Some(ui.ctx().load_texture(
                        "annotation_overlay",
                        image,
                        egui::TextureOptions::NEAREST,
                    ))
                }
            }
        }
        view.uploaded_revision = view.controller.revision();
    }

    if let Some(texture) = &view.texture {
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

fn control_bar(
    ui: &mut egui::Ui,
    view: &mut ClipView,
    settings: &AppSettings,
    status: &mut Option<String>,
) {
    ui.horizontal(|ui| {
        let playing = !view.clock.is_paused();
        if ui.button(if playing { "⏸" } else { "▶" }).clicked() {
            view.clock.toggle();
        }

        for speed in SPEED_PRESETS {
            let active = (view.clock.rate() - speed).abs() < f64::EPSILON;
            if ui.selectable_label(active, format!("{speed}x")).clicked() {
                view.clock.set_rate(speed);
            }
        }

        if view.clock.duration() > 0.0 {
            let mut position = view.clock.position();
            let seek = ui.add(
                egui::Slider::new(&mut position, 0.0..=view.clock.duration()).show_value(false),
            );
            if seek.changed() {
                view.clock.seek(position);
            }
        }

        ui.separator();

        let tools = view.controller.tool_state();
        for color in QUICK_COLORS {
            let selected = tools.tool == Tool::Pen && tools.color == color;
            let mut button = egui::Button::new("  ")
                .fill(egui::Color32::from_rgb(color.r, color.g, color.b));
            if selected {
                button = button.stroke(egui::Stroke::new(2.0, ui.visuals().strong_text_color()));
            }
            if ui.add(button).clicked() {
                view.controller.select_color(color);
            }
        }
        if ui
            .selectable_label(tools.tool == Tool::Eraser, "Eraser")
            .clicked()
        {
            view.controller.select_tool(Tool::Eraser);
        }

        ui.separator();

        if ui.button("Undo").clicked() {
            view.controller.undo();
        }
        if ui.button("Reset").clicked() {
            view.controller.reset();
        }
        if ui.button("Export").clicked() {
            *status = Some(match export_overlay(view, settings) {
                Ok(path) => format!("Exported {}", path.display()),
                Err(err) => {
                    warn!("annotation export failed: {err:#}");
                    format!("Export failed: {err}")
                }
            });
        }
    });
}

fn export_overlay(view: &ClipView, settings: &AppSettings) -> anyhow::Result<std::path::PathBuf> {
    let dir = match &settings.export_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create export folder {dir}"))?;
            std::path::PathBuf::from(dir)
        }
        None => export::ensure_export_folder()?,
    };
    export::export_annotation(
        view.controller.canvas(),
        ExportBackdrop::Transparent,
        &dir,
        chrono::Local::now(),
    )
}

/// Documents have no inline viewer; they are handed to the platform's
/// default handler.
fn document_card(ui: &mut egui::Ui, name: &str, file: &str, status: &mut Option<String>) {
    ui.group(|ui| {
        ui.heading(name);
        ui.label(file);
        if ui.button("Open document").clicked() {
            if let Err(err) = open::that(file) {
                warn!("failed to open document {file}: {err}");
                *status = Some(format!("Could not open {file}: {err}"));
            }
        }
    });
}
