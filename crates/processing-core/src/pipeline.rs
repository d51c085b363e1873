//! Per-frame driver: smoothing followed by kinematic analysis.
//!
//! A pipeline owns one smoother, one analyzer, and one frame clock. All three
//! carry state from frame to frame, so one pipeline serves exactly one
//! sequence, fed in temporal order.

use kinetrace_common::clock::FrameClock;
use kinetrace_common::config::PipelineConfig;
use kinetrace_common::error::KinetraceResult;
use kinetrace_pose_model::keypoint::{KeypointFrame, KeypointMap};
use kinetrace_pose_model::report::MotionReport;
use serde::Serialize;

use crate::motion::MotionAnalyzer;
use crate::smoothing::{SkeletonFrame, SmoothingConfig, TemporalSmoother};

/// Output of one pipeline step.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFrame {
    /// Zero-based position in the processed sequence.
    pub index: usize,
    /// Source timestamp, when the frame came with one.
    pub timestamp_secs: Option<f64>,
    /// Elapsed time used for the derivatives.
    pub delta_t: f64,
    pub skeleton: SkeletonFrame,
    pub report: MotionReport,
}

/// Receives each processed frame, e.g. a renderer or a report collector.
pub trait ReportSink {
    fn accept(&mut self, frame: &ProcessedFrame) -> KinetraceResult<()>;
}

/// Collects the motion reports of a run.
impl ReportSink for Vec<MotionReport> {
    fn accept(&mut self, frame: &ProcessedFrame) -> KinetraceResult<()> {
        self.push(frame.report.clone());
        Ok(())
    }
}

/// Smoothing + analysis for a single keypoint sequence.
#[derive(Debug)]
pub struct FramePipeline {
    smoother: TemporalSmoother,
    analyzer: MotionAnalyzer,
    clock: FrameClock,
    frames_processed: usize,
}

impl FramePipeline {
    /// Build a pipeline, failing fast on invalid configuration.
    pub fn new(config: &PipelineConfig) -> KinetraceResult<Self> {
        config.validate()?;
        let smoother = TemporalSmoother::with_config(SmoothingConfig::from(config))?;

        tracing::debug!(
            window = config.smoothing_window,
            visibility_threshold = config.visibility_threshold,
            fps = config.default_fps,
            "pipeline configured"
        );

        Ok(Self {
            smoother,
            analyzer: MotionAnalyzer::new(),
            clock: FrameClock::new(config.default_fps),
            frames_processed: 0,
        })
    }

    /// Create a pipeline with default configuration.
    pub fn with_defaults() -> Self {
        let config = PipelineConfig::default();
        Self {
            smoother: TemporalSmoother::with_defaults(),
            analyzer: MotionAnalyzer::new(),
            clock: FrameClock::new(config.default_fps),
            frames_processed: 0,
        }
    }

    /// Process one frame with a caller-supplied elapsed time.
    pub fn process(&mut self, keypoints: &KeypointMap, delta_t: f64) -> ProcessedFrame {
        self.step(keypoints, delta_t, None)
    }

    /// Process one timestamped frame, deriving the elapsed time from the
    /// previous frame's timestamp.
    pub fn process_timed(&mut self, frame: &KeypointFrame) -> ProcessedFrame {
        let delta_t = self.clock.tick(frame.timestamp_secs);
        self.step(&frame.keypoint_map(), delta_t, Some(frame.timestamp_secs))
    }

    /// Process a whole sequence, handing each result to `sink`.
    ///
    /// Returns the number of frames processed. Stops at the first sink error.
    pub fn run<'a, I, S>(&mut self, frames: I, sink: &mut S) -> KinetraceResult<usize>
    where
        I: IntoIterator<Item = &'a KeypointFrame>,
        S: ReportSink + ?Sized,
    {
        let mut count = 0;
        for frame in frames {
            let processed = self.process_timed(frame);
            sink.accept(&processed)?;
            count += 1;
        }
        tracing::info!(frames = count, "pipeline run finished");
        Ok(count)
    }

    fn step(
        &mut self,
        keypoints: &KeypointMap,
        delta_t: f64,
        timestamp_secs: Option<f64>,
    ) -> ProcessedFrame {
        let skeleton = self.smoother.build(keypoints);
        let report = self.analyzer.analyze(&skeleton.points_3d, delta_t);

        let index = self.frames_processed;
        self.frames_processed += 1;

        if skeleton.is_empty() {
            tracing::debug!(index, "frame has no keypoints");
        }

        ProcessedFrame {
            index,
            timestamp_secs,
            delta_t,
            skeleton,
            report,
        }
    }

    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    pub fn smoother(&self) -> &TemporalSmoother {
        &self.smoother
    }

    pub fn analyzer(&self) -> &MotionAnalyzer {
        &self.analyzer
    }
}
