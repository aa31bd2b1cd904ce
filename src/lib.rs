pub mod annotate;
pub mod gui;
pub mod logging;
pub mod playback;
pub mod settings;
pub mod tactics;
