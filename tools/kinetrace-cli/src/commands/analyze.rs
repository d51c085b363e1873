//! Run smoothing and kinematic analysis over a keypoint stream.

use std::path::PathBuf;

use kinetrace_common::clock::FrameDecimator;
use kinetrace_common::config::PipelineConfig;
use kinetrace_common::error::KinetraceResult;
use kinetrace_pose_model::keypoint::{parse_frames, parse_header};
use kinetrace_pose_model::math_report::MathReportDocument;
use kinetrace_pose_model::report::MotionReport;
use kinetrace_processing_core::overlay::OverlayPlan;
use kinetrace_processing_core::pipeline::{FramePipeline, ProcessedFrame, ReportSink};

/// Flags for `kinetrace analyze`. Unset values fall back to the config file.
pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub window: Option<usize>,
    pub fps: Option<f64>,
    pub target_fps: Option<f64>,
    pub visibility_threshold: Option<f64>,
    pub overlay: bool,
}

/// Collects reports and, optionally, overlay plans for the whole run.
struct RunCollector {
    reports: Vec<MotionReport>,
    overlays: Option<Vec<OverlayPlan>>,
}

impl ReportSink for RunCollector {
    fn accept(&mut self, frame: &ProcessedFrame) -> KinetraceResult<()> {
        if let Some(overlays) = self.overlays.as_mut() {
            overlays.push(OverlayPlan::from_frame(frame));
        }
        self.reports.accept(frame)
    }
}

pub fn run(options: AnalyzeOptions, defaults: &PipelineConfig) -> anyhow::Result<()> {
    println!("Analyzing keypoints from: {}", options.input.display());

    let content = super::read_stream(&options.input)?;
    let header = parse_header(&content);
    let frames =
        parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse keypoints: {e}"))?;

    println!("  Loaded {} frames", frames.len());

    if frames.is_empty() {
        println!("  No frames to analyze.");
        return Ok(());
    }

    let source_fps = options
        .fps
        .or(header.as_ref().map(|h| h.fps))
        .unwrap_or(defaults.default_fps);
    let mut decimator = FrameDecimator::new(source_fps, options.target_fps);

    let config = PipelineConfig {
        smoothing_window: options.window.unwrap_or(defaults.smoothing_window),
        visibility_threshold: options
            .visibility_threshold
            .unwrap_or(defaults.visibility_threshold),
        default_fps: decimator.effective_fps(source_fps),
    };
    let mut pipeline =
        FramePipeline::new(&config).map_err(|e| anyhow::anyhow!("Invalid settings: {e}"))?;

    if decimator.step() > 1 {
        tracing::info!(
            "Normalizing FPS from {:.2} to {:.2} using step {}",
            source_fps,
            config.default_fps,
            decimator.step()
        );
    }
    let selected: Vec<_> = frames
        .iter()
        .filter(|_| decimator.should_keep())
        .collect();

    println!(
        "  Running analysis (window={}, threshold={}, fps={:.2})...",
        config.smoothing_window, config.visibility_threshold, config.default_fps
    );

    let mut collector = RunCollector {
        reports: Vec::with_capacity(selected.len()),
        overlays: options.overlay.then(Vec::new),
    };
    let processed = pipeline.run(selected, &mut collector)?;
    println!("  Analyzed {processed} frames");

    std::fs::create_dir_all(&options.output)?;

    let document = MathReportDocument::from_reports(&collector.reports)
        .with_generated_at(chrono::Utc::now().to_rfc3339());

    let json_path = options.output.join("math_report.json");
    std::fs::write(&json_path, document.to_json_pretty()?)?;
    let text_path = options.output.join("math_report.txt");
    std::fs::write(&text_path, document.render_text())?;

    println!("  Math reports saved to: {}", options.output.display());

    if let Some(overlays) = collector.overlays {
        let overlay_path = options.output.join("overlay.jsonl");
        let mut lines = String::new();
        for plan in &overlays {
            lines.push_str(&serde_json::to_string(plan)?);
            lines.push('\n');
        }
        std::fs::write(&overlay_path, lines)?;
        println!("  Overlay plans saved to: {}", overlay_path.display());
    }

    println!("\nAnalysis complete.");

    Ok(())
}
