#![allow(dead_code)]
//! Error taxonomy for the choreography core.
//!
//! Everything here is recoverable: the worst outcome of any of these is a
//! missing visual element, never an aborted timeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A geographic literal failed its expected `"<deg>°<NSEW>"` pattern.
    /// Policy: skip the single record, log, continue with the rest.
    #[error("malformed coordinate literal `{raw}`")]
    MalformedCoordinate { raw: String },

    /// A timeline index outside the loaded frame sequence.
    #[error("timeline index {index} out of range (last index {last})")]
    IndexOutOfRange { index: usize, last: usize },
}
