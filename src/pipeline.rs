//! Capture pipeline session
//!
//! Wires the frame source, detector, quality analyzer, gate, and overlay
//! renderer behind one scheduler. The host pumps `tick` once per clock
//! signal; the pipeline stops itself on capture, on block, or when the
//! session's teardown flag is raised.

use crate::config::{DetectorConfig, FrameGateConfig};
use crate::detector::FaceDetector;
use crate::errors::PipelineError;
use crate::gate::{CaptureGate, GateSample, GateState};
use crate::lifecycle;
use crate::overlay::{corner_brackets, DrawSurface, GuideShape, OverlayRenderer, GUIDE_ARM, GUIDE_MARGIN};
use crate::quality::QualityAnalyzer;
use crate::scheduler::{Clock, LoopCommand, MonotonicClock, Scheduler, SchedulerDriver};
use crate::source::FrameSource;
use crate::types::{CaptureResult, FaceRegion, QualityScore, TimestampMs};
use std::sync::atomic::Ordering;
use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

/// One capture session: start, pump ticks, collect the result.
///
/// Dropping the pipeline stops the session; nothing keeps running after the
/// owner goes away.
pub struct CapturePipeline {
    scheduler: Scheduler,
    clock: Arc<dyn Clock>,
    inner: PipelineInner,
    session_id: String,
    stop_flag: Option<Arc<AtomicBool>>,
}

struct PipelineInner {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    analyzer: QualityAnalyzer,
    gate: CaptureGate,
    renderer: OverlayRenderer,
    surface: Option<Box<dyn DrawSurface>>,
    detector_config: DetectorConfig,
    guides: Vec<GuideShape>,
    /// Last detected region, kept for display only. Never fed back into
    /// detection or gating; overwritten or cleared every detection tick.
    overlay_face: Option<FaceRegion>,
    last_frame_seen_ms: Option<TimestampMs>,
    session_started_ms: TimestampMs,
    blocked_after_ms: f64,
    result: Option<CaptureResult>,
}

impl SchedulerDriver for PipelineInner {
    fn render_tick(&mut self, now_ms: TimestampMs) -> LoopCommand {
        // The surface presents the live feed itself; the render loop reads
        // the frame to track feed liveness and draws guidance on top.
        if self.source.current_frame().is_some() {
            self.last_frame_seen_ms = Some(now_ms);
        }

        if let Some(surface) = self.surface.as_mut() {
            let mut shapes = self.guides.clone();
            if let Some(region) = self.overlay_face {
                shapes.push(GuideShape::FaceBox { region });
            }
            self.renderer.render(surface.as_mut(), &shapes);
        }

        LoopCommand::Continue
    }

    fn detect_tick(&mut self, now_ms: TimestampMs) -> LoopCommand {
        let Some(frame) = self.source.current_frame() else {
            // Transient absence is a normal bad sample, until the blocked
            // window elapses with nothing seen at all.
            let waited = now_ms - self.last_frame_seen_ms.unwrap_or(self.session_started_ms);
            if waited >= self.blocked_after_ms {
                self.gate.mark_blocked();
                return LoopCommand::Stop;
            }
            self.overlay_face = None;
            self.gate.observe(&GateSample {
                face: None,
                quality: QualityScore::zero(),
            });
            return LoopCommand::Continue;
        };
        self.last_frame_seen_ms = Some(now_ms);

        let face = match self.detector.detect(&frame, &self.detector_config) {
            Ok(face) => face,
            Err(e) => {
                log::warn!("detector failed, tick treated as bad sample: {}", e);
                None
            }
        };
        let quality = self.analyzer.analyze(&frame);
        self.overlay_face = face;

        let sample = GateSample { face, quality };
        if self.gate.observe(&sample) == GateState::Captured {
            if let Some(region) = sample.face {
                log::info!(
                    "capture accepted at {:.1}ms (sharpness {:.1}, confidence {:.2})",
                    now_ms,
                    quality.sharpness,
                    region.confidence
                );
                self.result = Some(CaptureResult {
                    frame,
                    face: region,
                    quality,
                    timestamp_ms: now_ms,
                    captured_at: chrono::Utc::now(),
                });
            }
            return LoopCommand::Stop;
        }

        LoopCommand::Continue
    }
}

impl CapturePipeline {
    pub fn new(
        config: FrameGateConfig,
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::ConfigError)?;

        Ok(Self {
            scheduler: Scheduler::new(&config.scheduler),
            clock: Arc::new(MonotonicClock::new()),
            inner: PipelineInner {
                source,
                detector,
                analyzer: QualityAnalyzer::new(config.quality.clone()),
                gate: CaptureGate::new(config.gate.clone()),
                renderer: OverlayRenderer::new(),
                surface: None,
                detector_config: config.detector.clone(),
                guides: corner_brackets(GUIDE_MARGIN, GUIDE_ARM),
                overlay_face: None,
                last_frame_seen_ms: None,
                session_started_ms: 0.0,
                blocked_after_ms: config.gate.blocked_after_ms,
                result: None,
            },
            session_id: lifecycle::next_session_id(),
            stop_flag: None,
        })
    }

    /// Attach a display surface for guidance overlay rendering.
    pub fn with_surface(mut self, surface: Box<dyn DrawSurface>) -> Self {
        self.inner.surface = Some(surface);
        self
    }

    /// Substitute the clock; tests drive the pipeline with a manual clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Begin the session: register the teardown hook and start both loops.
    ///
    /// Restarting a stopped pipeline re-registers the same session id, which
    /// the registry handles idempotently.
    pub fn start(&mut self) -> Result<(), PipelineError> {
        if self.scheduler.is_running() {
            return Err(PipelineError::SessionError(
                "session is already started".to_string(),
            ));
        }

        self.stop_flag = Some(lifecycle::register_teardown(&self.session_id));
        self.inner.session_started_ms = self.clock.now_ms();
        self.inner.last_frame_seen_ms = None;
        self.inner.overlay_face = None;
        self.inner.result = None;
        self.inner.gate.reset();
        self.scheduler.start();

        log::info!("capture session {} started", self.session_id);
        Ok(())
    }

    /// Pump one clock tick. Returns whether the session is still running.
    ///
    /// While the tab is hidden all periodic work pauses; the session stays
    /// scheduled and resumes on the first tick after becoming visible.
    pub fn tick(&mut self) -> bool {
        if !self.scheduler.is_running() {
            return false;
        }

        if self
            .stop_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            log::info!("teardown flag raised for {}", self.session_id);
            self.stop();
            return false;
        }

        if !lifecycle::is_visible() {
            return true;
        }

        let now_ms = self.clock.now_ms();
        let running = self.scheduler.tick(now_ms, &mut self.inner);
        if !running {
            self.finish();
        }
        running
    }

    /// Stop the session. Idempotent: safe to call repeatedly or before
    /// `start`; no work function executes afterward.
    pub fn stop(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.stop();
            log::info!(
                "capture session {} stopped in state {:?}",
                self.session_id,
                self.inner.gate.state()
            );
        }
        self.finish();
    }

    fn finish(&mut self) {
        if self.stop_flag.take().is_some() {
            lifecycle::unregister(&self.session_id);
        }
    }

    /// Blocking convenience driver: pump ticks at `tick_period` until the
    /// session halts.
    pub fn run(&mut self, tick_period: Duration) {
        while self.tick() {
            std::thread::sleep(tick_period);
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn state(&self) -> GateState {
        self.inner.gate.state()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn capture_result(&self) -> Option<&CaptureResult> {
        self.inner.result.as_ref()
    }

    /// Hand the capture result off to the surrounding application.
    pub fn take_capture_result(&mut self) -> Option<CaptureResult> {
        self.inner.result.take()
    }
}

impl Drop for CapturePipeline {
    fn drop(&mut self) {
        self.stop();
    }
}
