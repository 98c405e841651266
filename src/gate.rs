//! Capture gate state machine
//!
//! Fuses detector and quality outputs over consecutive detection ticks into
//! an accept/hold/reject decision. Streaks reset to zero on any bad sample:
//! a single blurry or off-frame sample is never masked by prior good ones.

use crate::config::GateConfig;
use crate::types::{FaceRegion, QualityScore};
use serde::{Deserialize, Serialize};

/// Gate state, owned exclusively by `CaptureGate`.
///
/// `Captured` and `Blocked` are terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    /// No face seen yet.
    Searching,
    /// Face found; framing/sharpness not yet consistently good.
    Aligning,
    /// Enough consecutive good samples; dwelling before commit.
    Stabilizing,
    /// Accept decision made; a capture result was emitted.
    Captured,
    /// The source never produced a frame within the configured window.
    Blocked,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Captured | GateState::Blocked)
    }
}

/// One detection tick's fused observation.
#[derive(Debug, Clone, Copy)]
pub struct GateSample {
    pub face: Option<FaceRegion>,
    pub quality: QualityScore,
}

impl GateSample {
    /// A good sample has a face present, acceptable framing, and sharpness
    /// at or above the gate threshold.
    pub fn is_good(&self, min_sharpness: f64) -> bool {
        self.face.is_some() && self.quality.framing_ok && self.quality.sharpness >= min_sharpness
    }
}

/// Accept/hold/reject decision authority, advanced once per executed
/// detection tick (never per render tick).
#[derive(Debug, Clone)]
pub struct CaptureGate {
    state: GateState,
    streak: u32,
    config: GateConfig,
}

impl CaptureGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            state: GateState::Searching,
            streak: 0,
            config,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Current consecutive-good-sample count within the active phase.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Reset to the initial state for a fresh capture session.
    pub fn reset(&mut self) {
        self.state = GateState::Searching;
        self.streak = 0;
    }

    /// Advance the state machine with one sample and return the new state.
    ///
    /// Terminal states absorb all further samples. The hold streak restarts
    /// at zero on entry into Stabilizing, so a capture requires
    /// `align_streak + hold_streak` good ticks in total.
    pub fn observe(&mut self, sample: &GateSample) -> GateState {
        if self.state.is_terminal() {
            return self.state;
        }

        if !sample.is_good(self.config.min_sharpness) {
            self.streak = 0;
            match self.state {
                GateState::Aligning if sample.face.is_none() => {
                    log::debug!("face lost, back to searching");
                    self.state = GateState::Searching;
                }
                GateState::Stabilizing => {
                    log::debug!("bad sample while stabilizing, back to aligning");
                    self.state = GateState::Aligning;
                }
                _ => {}
            }
            return self.state;
        }

        match self.state {
            GateState::Searching => {
                self.state = GateState::Aligning;
                self.streak = 1;
            }
            GateState::Aligning | GateState::Stabilizing => {
                self.streak += 1;
            }
            // Terminal states returned early above.
            GateState::Captured | GateState::Blocked => {}
        }

        if self.state == GateState::Aligning && self.streak >= self.config.align_streak {
            log::debug!("alignment held for {} samples, stabilizing", self.streak);
            self.state = GateState::Stabilizing;
            self.streak = 0;
        } else if self.state == GateState::Stabilizing && self.streak >= self.config.hold_streak {
            log::info!("hold threshold reached, capture accepted");
            self.state = GateState::Captured;
        }

        self.state
    }

    /// Force the terminal `Blocked` state (frame source never delivered).
    /// No-op once the gate is already terminal.
    pub fn mark_blocked(&mut self) {
        if !self.state.is_terminal() {
            log::warn!("frame source produced no frames, gate blocked");
            self.state = GateState::Blocked;
            self.streak = 0;
        }
    }
}
