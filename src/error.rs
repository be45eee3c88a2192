//! Setup errors
//!
//! Only widget construction can fail hard. Visual updates after mounting are
//! best-effort and never surface errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("mount point `{0}` not found")]
    MissingContainer(String),
    #[error("gallery needs at least one item")]
    EmptyGallery,
    #[error("step list is empty")]
    NoSteps,
    #[error("DOM call failed while building `{0}`")]
    Dom(&'static str),
}
