//! Synthetic frames and deterministic fakes
//!
//! Frame patterns are chosen for their analyzer behavior: noise and
//! misaligned checkerboards score sharp, flat and gradient frames score
//! blurry. Checkerboard sizes should stay coprime with the sampling stride
//! so block boundaries land on sampled pixels.

use crate::config::DetectorConfig;
use crate::detector::FaceDetector;
use crate::errors::PipelineError;
use crate::overlay::{DrawSurface, OverlayPath};
use crate::scheduler::Clock;
use crate::source::FrameSource;
use crate::types::{FaceRegion, Frame, TimestampMs};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Uniform frame with no detail; scores sharpness 0.
pub fn flat_frame(width: u32, height: u32, level: u8) -> Frame {
    Frame::new(vec![level; (width * height * 3) as usize], width, height)
}

/// Checkerboard with the given check size; sharp when `check` is coprime
/// with the sampling stride.
pub fn checkerboard_frame(width: u32, height: u32, check: u32) -> Frame {
    let check = check.max(1);
    let mut data = vec![0u8; (width * height * 3) as usize];
    for y in 0..height {
        for x in 0..width {
            let white = ((x / check) + (y / check)) % 2 == 0;
            let v = if white { 255 } else { 0 };
            let idx = ((y * width + x) * 3) as usize;
            data[idx] = v;
            data[idx + 1] = v;
            data[idx + 2] = v;
        }
    }
    Frame::new(data, width, height)
}

/// Horizontal gradient; its second derivative is zero, so it scores blurry.
pub fn gradient_frame(width: u32, height: u32) -> Frame {
    let mut data = vec![0u8; (width * height * 3) as usize];
    for y in 0..height {
        for x in 0..width {
            let v = if width > 1 {
                (x * 255 / (width - 1)) as u8
            } else {
                0
            };
            let idx = ((y * width + x) * 3) as usize;
            data[idx] = v;
            data[idx + 1] = v;
            data[idx + 2] = v;
        }
    }
    Frame::new(data, width, height)
}

/// Deterministic pseudo-random noise (LCG); sharp at any sampling stride,
/// with its edge energy centered, so framing passes.
pub fn noise_frame(width: u32, height: u32) -> Frame {
    let mut data = vec![0u8; (width * height * 3) as usize];
    let mut state: u32 = 0x2545_f491;
    for byte in data.iter_mut() {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        *byte = (state >> 24) as u8;
    }
    Frame::new(data, width, height)
}

/// A confident, centered face region covering the middle of the frame.
pub fn centered_face(width: u32, height: u32) -> FaceRegion {
    FaceRegion {
        x: width as f32 * 0.25,
        y: height as f32 * 0.25,
        width: width as f32 * 0.5,
        height: height as f32 * 0.5,
        confidence: 0.9,
    }
}

/// Manually advanced clock for deterministic scheduler tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Mutex<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Mutex::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: f64) {
        *self.now_ms.lock().expect("lock poisoned") += delta_ms;
    }

    pub fn set(&self, now_ms: f64) {
        *self.now_ms.lock().expect("lock poisoned") = now_ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> TimestampMs {
        *self.now_ms.lock().expect("lock poisoned")
    }
}

/// Frame source backed by a shared slot the test can swap at any time.
///
/// Keep a handle from `slot()` before boxing the source into the pipeline.
pub struct FakeFrameSource {
    slot: Arc<Mutex<Option<Frame>>>,
    next_sequence: u64,
}

impl FakeFrameSource {
    pub fn new(frame: Option<Frame>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(frame)),
            next_sequence: 1,
        }
    }

    pub fn slot(&self) -> Arc<Mutex<Option<Frame>>> {
        self.slot.clone()
    }
}

impl FrameSource for FakeFrameSource {
    fn current_frame(&mut self) -> Option<Frame> {
        let frame = self.slot.lock().expect("lock poisoned").clone();
        frame.map(|frame| {
            let sequence = self.next_sequence;
            self.next_sequence += 1;
            frame.with_sequence(sequence)
        })
    }
}

/// One scripted detector response.
#[derive(Debug, Clone, Copy)]
pub enum DetectorScript {
    Face(FaceRegion),
    NoFace,
    Fail,
}

/// Detector that replays a script, then repeats a fallback response.
///
/// Keep a handle from `calls()` before boxing to observe the invocation
/// count after the pipeline takes ownership.
pub struct ScriptedDetector {
    script: VecDeque<DetectorScript>,
    fallback: DetectorScript,
    calls: Arc<AtomicUsize>,
}

impl ScriptedDetector {
    pub fn new(fallback: DetectorScript) -> Self {
        Self {
            script: VecDeque::new(),
            fallback,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn push(&mut self, step: DetectorScript) {
        self.script.push_back(step);
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = DetectorScript>) {
        self.script.extend(steps);
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl FaceDetector for ScriptedDetector {
    fn detect(
        &mut self,
        _frame: &Frame,
        config: &DetectorConfig,
    ) -> Result<Option<FaceRegion>, PipelineError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let step = self.script.pop_front().unwrap_or(self.fallback);
        match step {
            DetectorScript::Face(region) if region.confidence >= config.score_threshold => {
                Ok(Some(region))
            }
            DetectorScript::Face(_) | DetectorScript::NoFace => Ok(None),
            DetectorScript::Fail => Err(PipelineError::DetectorError(
                "scripted detector failure".to_string(),
            )),
        }
    }
}

/// Draw surface that records every composite path it receives.
///
/// Keep a handle from `draws()` before boxing to inspect submissions after
/// the pipeline takes ownership.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    draws: Arc<Mutex<Vec<OverlayPath>>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            draws: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn draws(&self) -> Arc<Mutex<Vec<OverlayPath>>> {
        self.draws.clone()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_path(&mut self, path: &OverlayPath) {
        self.draws.lock().expect("lock poisoned").push(path.clone());
    }
}
