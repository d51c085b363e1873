//! Kinetrace Pose Model
//!
//! Defines the data contracts shared by the analysis core and its callers:
//! - **Points:** 3D joint positions and 2D image positions
//! - **Keypoints:** Raw per-frame detections and the JSONL frame stream
//! - **Skeleton:** Built-in joint vocabulary, bone, segment, and angle tables
//! - **Reports:** Per-frame motion reports and the run-level math report
//!
//! Coordinates are in source pixel units; depth is a relative proxy.

pub mod keypoint;
pub mod math_report;
pub mod point;
pub mod report;
pub mod skeleton;

pub use keypoint::*;
pub use math_report::*;
pub use point::*;
pub use report::*;
pub use skeleton::*;
