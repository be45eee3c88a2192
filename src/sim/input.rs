//! Global keyboard routing
//!
//! One listener serves every widget. Each key maps to at most one widget
//! command, and only when that widget's flags allow it.

use super::contest::Category;

/// Widget flags consulted when routing a key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// Manual whisking run with a step left to go
    pub sequencer_can_advance: bool,
    /// Contest accepting a round
    pub contest_can_play: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    AdvanceStep,
    PlayCategory(Category),
    NextWare,
    PreviousWare,
}

impl KeyCommand {
    /// Whether the browser default (page scroll on Space) should be suppressed
    pub fn prevents_default(self) -> bool {
        matches!(self, KeyCommand::AdvanceStep)
    }
}

/// Route a `KeyboardEvent.code` value
pub fn route_key(code: &str, ctx: KeyContext) -> Option<KeyCommand> {
    match code {
        "Space" if ctx.sequencer_can_advance => Some(KeyCommand::AdvanceStep),
        "Digit1" | "Digit2" | "Digit3" if ctx.contest_can_play => {
            let digit = code.as_bytes()[5] - b'0';
            Category::from_digit(digit).map(KeyCommand::PlayCategory)
        }
        "ArrowRight" => Some(KeyCommand::NextWare),
        "ArrowLeft" => Some(KeyCommand::PreviousWare),
        _ => None,
    }
}
