/// Playback speeds offered by the control bar, in display order.
pub const SPEED_PRESETS: [f64; 3] = [0.5, 1.0, 2.0];

/// The clip the overlay is bound to, as far as the core is concerned:
/// intrinsic resolution for sizing, paused state for gating, and timing for
/// the control bar. Decoding is out of scope, so implementations are free
/// to be clocks rather than decoders.
pub trait VideoSource {
    fn intrinsic_size(&self) -> (u32, u32);
    fn duration(&self) -> f64;
    fn position(&self) -> f64;
    fn rate(&self) -> f64;
    fn is_paused(&self) -> bool;
}

/// Simulated clip: autoplays, loops, and advances with UI frame time.
/// Metadata comes from the tactics manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    size: (u32, u32),
    duration: f64,
    position: f64,
    rate: f64,
    paused: bool,
}

impl PlaybackClock {
    pub fn new(size: (u32, u32), duration: f64) -> Self {
        Self {
            size,
            duration: duration.max(0.0),
            position: 0.0,
            rate: 1.0,
            paused: false,
        }
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    pub fn seek(&mut self, position: f64) {
        self.position = position.clamp(0.0, self.duration);
    }

    pub fn set_rate(&mut self, rate: f64) {
        if rate > 0.0 {
            self.rate = rate;
        }
    }

    /// Advances the clock by `dt` seconds of wall time, scaled by the
    /// playback rate, wrapping at the end of the clip.
    pub fn tick(&mut self, dt: f64) {
        if self.paused || self.duration <= 0.0 {
            return;
        }
        self.position += dt * self.rate;
        while self.position >= self.duration {
            self.position -= self.duration;
        }
    }
}

impl VideoSource for PlaybackClock {
    fn intrinsic_size(&self) -> (u32, u32) {
        self.size
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
