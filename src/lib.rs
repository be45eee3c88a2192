//! Tea Museum - interactive widgets for a Song-dynasty tea culture site
//!
//! Core modules:
//! - `sim`: Pure widget state machines (whisking sequencer, tea contest,
//!   tea-ware gallery, tutorial step navigation, video playback)
//! - `color`: Hex colour parsing and shading for the gallery previews
//! - `bookmarks`: Video bookmarks persisted to LocalStorage
//! - `settings`: Widget settings persisted to LocalStorage
//! - `view`: DOM rendering and control wiring (wasm32 only)
//! - `audio`: Web Audio step cues (wasm32 only)

pub mod bookmarks;
pub mod color;
pub mod error;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod view;

pub use bookmarks::{Bookmark, Bookmarks};
pub use color::Rgb;
pub use error::SetupError;
pub use settings::Settings;

/// Widget configuration constants
pub mod consts {
    /// Score awarded for acknowledging a manual step
    pub const STEP_ACK_SCORE: u32 = 10;
    /// Upper bound of the foam quality metric
    pub const MAX_QUALITY: f32 = 100.0;

    /// Quality gained when entering a whisking or foam step (base + u * spread)
    pub const WHISK_QUALITY_BASE: f32 = 15.0;
    pub const WHISK_QUALITY_SPREAD: f32 = 10.0;
    /// Quality gained when an auto-played step completes (base + u * spread)
    pub const AUTO_QUALITY_BASE: f32 = 10.0;
    pub const AUTO_QUALITY_SPREAD: f32 = 15.0;

    /// Contest points: floor(u * SPREAD + WEIGHT_SCALE * weight)
    pub const CONTEST_POINT_SPREAD: f32 = 30.0;
    pub const CONTEST_WEIGHT_SCALE: f32 = 70.0;
    pub const DEFAULT_MAX_ROUNDS: u32 = 3;

    /// Gallery rotation per click (degrees)
    pub const ROTATION_STEP_DEG: f32 = 45.0;

    /// Tutorial cue pitch: base + index * step (Hz)
    pub const CUE_BASE_HZ: f32 = 600.0;
    pub const CUE_STEP_HZ: f32 = 50.0;
}

/// Wrap a signed offset from `index` into `0..len`.
///
/// Returns 0 for an empty range.
#[inline]
pub fn cyclic_index(index: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + offset).rem_euclid(len as isize) as usize
}

/// Format whole seconds as `MM:SS` (minutes are not capped at 59)
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
