use eframe::egui;

use tactic_board::gui::TacticBoardApp;
use tactic_board::logging;
use tactic_board::settings::AppSettings;
use tactic_board::tactics::TacticsLibrary;

fn main() -> anyhow::Result<()> {
    let settings = AppSettings::load("settings.json")?;
    logging::init(settings.debug_logging);

    let library = match TacticsLibrary::load(&settings.tactics_path) {
        Ok(library) => library,
        Err(err) => {
            tracing::warn!("starting without tactics: {err:#}");
            TacticsLibrary::default()
        }
    };

    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tactic Board",
        native_options,
        Box::new(move |_cc| Box::new(TacticBoardApp::new(library, settings))),
    )
    .map_err(|err| anyhow::anyhow!("window loop failed: {err}"))
}
