//! Frame source boundary
//!
//! Camera acquisition and permission handling live outside this crate; the
//! pipeline only needs the most recent frame on demand.

use crate::types::Frame;

/// Live video feed, shared read-only by the render and detection loops.
///
/// `current_frame` must return the most recent frame without blocking.
/// Returning `None` (camera not ready, permission pending) is a valid
/// transient state, not an error; the gate treats it as a bad sample.
pub trait FrameSource: Send {
    fn current_frame(&mut self) -> Option<Frame>;
}
