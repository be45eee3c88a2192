//! Tutorial video playback controls
//!
//! Mirrors the `<video>` element's state for the custom control bar so the
//! readout and seek math stay testable off the DOM.

use serde::{Deserialize, Serialize};

use crate::format_clock;

/// Speeds offered by the speed control
pub const PLAYBACK_SPEEDS: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Download name for a captured frame
pub const SCREENSHOT_FILE_NAME: &str = "tea-brewing-screenshot.png";

/// Canvas size for capturing a frame, None until the video has dimensions
pub fn screenshot_size(video_width: u32, video_height: u32) -> Option<(u32, u32)> {
    (video_width > 0 && video_height > 0).then_some((video_width, video_height))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Seconds
    pub current_time: f64,
    /// Seconds; 0 until metadata is known
    pub duration: f64,
    pub rate: f64,
    pub playing: bool,
    pub muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            rate: 1.0,
            playing: false,
            muted: false,
        }
    }
}

impl PlaybackState {
    /// Returns the new playing flag
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Only the preset speeds are accepted
    pub fn set_rate(&mut self, rate: f64) -> bool {
        if PLAYBACK_SPEEDS.contains(&rate) {
            self.rate = rate;
            true
        } else {
            log::debug!("unsupported playback rate {}", rate);
            false
        }
    }

    /// Seek to a slider position in `[0, 100]`; returns the target time
    pub fn seek_percent(&mut self, percent: f64) -> f64 {
        let percent = percent.clamp(0.0, 100.0);
        self.current_time = self.duration * percent / 100.0;
        self.current_time
    }

    /// Time update from the element
    pub fn sync(&mut self, current_time: f64, duration: f64) {
        self.duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.current_time = current_time.max(0.0);
    }

    /// Slider position in `[0, 100]`
    pub fn progress_percent(&self) -> f64 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        }
    }

    /// `MM:SS / MM:SS`
    pub fn time_display(&self) -> String {
        format!(
            "{} / {}",
            format_clock(self.current_time.max(0.0) as u64),
            format_clock(self.duration.max(0.0) as u64)
        )
    }
}
