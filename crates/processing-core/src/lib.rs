//! Kinetrace Processing Core
//!
//! Turns per-frame joint detections into stable kinematics:
//! - **Smoothing:** Occlusion-aware moving average of each joint's position
//! - **Motion:** Segment lengths, joint angles, velocity, and acceleration
//! - **Pipeline:** Frame-sequential driver feeding a report sink
//! - **Overlay:** Speed-colored markers and bone lines for renderers
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod geometry;
pub mod motion;
pub mod overlay;
pub mod pipeline;
pub mod smoothing;

pub use motion::MotionAnalyzer;
pub use pipeline::{FramePipeline, ProcessedFrame, ReportSink};
pub use smoothing::{SkeletonFrame, TemporalSmoother};
