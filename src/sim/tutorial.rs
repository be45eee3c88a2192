//! Brewing tutorial step navigation
//!
//! Linear (non-wrapping) navigation over the tutorial's step cards, with a
//! completion flag per card.

use serde::{Deserialize, Serialize};

use crate::consts::{CUE_BASE_HZ, CUE_STEP_HZ};

/// Pitch of the audible cue for a step
pub fn cue_frequency(index: usize) -> f32 {
    CUE_BASE_HZ + index as f32 * CUE_STEP_HZ
}

/// Result of a successful navigation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepChange {
    pub previous: usize,
    pub current: usize,
    /// 1-based position for the readout
    pub position: usize,
    pub cue_hz: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStepNav {
    current: usize,
    completed: Vec<bool>,
}

impl VideoStepNav {
    pub fn new(step_count: usize) -> Self {
        Self {
            current: 0,
            completed: vec![false; step_count],
        }
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn completed(&self) -> &[bool] {
        &self.completed
    }

    /// "N/total" readout
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.current + 1, self.len())
    }

    pub fn go_to(&mut self, index: usize) -> Option<StepChange> {
        if index >= self.len() {
            return None;
        }
        let previous = self.current;
        self.current = index;
        Some(StepChange {
            previous,
            current: index,
            position: index + 1,
            cue_hz: cue_frequency(index),
        })
    }

    pub fn next(&mut self) -> Option<StepChange> {
        if self.current + 1 < self.len() {
            self.go_to(self.current + 1)
        } else {
            None
        }
    }

    pub fn previous(&mut self) -> Option<StepChange> {
        if self.current > 0 {
            self.go_to(self.current - 1)
        } else {
            None
        }
    }

    pub fn mark_all_complete(&mut self) {
        self.completed.iter_mut().for_each(|done| *done = true);
    }

    /// Flip one card's checkbox; returns the new value
    pub fn toggle_complete(&mut self, index: usize) -> Option<bool> {
        let done = self.completed.get_mut(index)?;
        *done = !*done;
        Some(*done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_to_reports_change() {
        let mut nav = VideoStepNav::new(5);
        let change = nav.go_to(3).unwrap();
        assert_eq!(change.previous, 0);
        assert_eq!(change.current, 3);
        assert_eq!(change.position, 4);
        assert_eq!(change.cue_hz, 750.0);
        assert_eq!(nav.position_label(), "4/5");
        assert!(nav.go_to(5).is_none());
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn test_next_previous_do_not_wrap() {
        let mut nav = VideoStepNav::new(2);
        assert!(nav.previous().is_none());
        assert_eq!(nav.next().unwrap().current, 1);
        assert!(nav.next().is_none());
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.previous().unwrap().previous, 1);
    }

    #[test]
    fn test_completion_flags() {
        let mut nav = VideoStepNav::new(3);
        assert_eq!(nav.toggle_complete(1), Some(true));
        assert_eq!(nav.toggle_complete(1), Some(false));
        assert_eq!(nav.toggle_complete(9), None);
        nav.toggle_complete(0);
        nav.mark_all_complete();
        assert_eq!(nav.completed(), &[true, true, true]);
    }

    #[test]
    fn test_empty_nav() {
        let mut nav = VideoStepNav::new(0);
        assert!(nav.is_empty());
        assert!(nav.next().is_none());
        assert!(nav.go_to(0).is_none());
    }

    #[test]
    fn test_cue_frequency() {
        assert_eq!(cue_frequency(0), 600.0);
        assert_eq!(cue_frequency(4), 800.0);
    }
}
