//! Widget state machines
//!
//! Everything here is pure and deterministic:
//! - No DOM, no timers, no clock reads (time comes in as milliseconds)
//! - Randomness only through an injected `RandomSource`
//! - Timer work is returned as requests for the caller to schedule

pub mod contest;
pub mod gallery;
pub mod input;
pub mod playback;
pub mod random;
pub mod sequencer;
pub mod tutorial;

pub use contest::{Category, ContestGame, ContestPhase, Outcome, RoundReport, Side};
pub use gallery::{GalleryBrowser, GalleryState, Silhouette, TeaWare, song_tea_set};
pub use input::{KeyCommand, KeyContext, route_key};
pub use playback::{PLAYBACK_SPEEDS, PlaybackState, SCREENSHOT_FILE_NAME, screenshot_size};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use sequencer::{
    AutoTick, Grade, RunResult, SequencerPhase, SimulationState, Step, StepAck, StepKind,
    StepSequencer, Transition, WHISKING_STEPS,
};
pub use tutorial::{StepChange, VideoStepNav, cue_frequency};
