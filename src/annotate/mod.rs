pub mod canvas;
pub mod controller;
pub mod engine;
pub mod export;
pub mod history;
pub mod mapper;
pub mod model;

pub use canvas::OverlayBitmap;
pub use controller::OverlayController;
pub use engine::StrokeEngine;
pub use history::{SnapshotHistory, HISTORY_CAPACITY};
pub use mapper::DisplayRect;
pub use model::{Color, Tool, ToolState, QUICK_COLORS};
