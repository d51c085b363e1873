//! Overlay planning for skeleton renderers.
//!
//! Computes what to draw (joint markers colored by speed, bone lines) from a
//! processed frame. Drawing pixels is the renderer's job.

use kinetrace_pose_model::point::Point2D;
use kinetrace_pose_model::skeleton::SKELETON_CONNECTIONS;
use serde::{Deserialize, Serialize};

use crate::pipeline::ProcessedFrame;

/// Speed (units per second) at which a marker reaches full red.
pub const SPEED_SATURATION: f64 = 50.0;

/// Bone line color.
pub const BONE_COLOR: Rgb = Rgb::new(255, 255, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Map speed to a blue (slow) to red (fast) ramp.
pub fn speed_color(speed: f64) -> Rgb {
    let t = (speed / SPEED_SATURATION).clamp(0.0, 1.0);
    let t = if t.is_nan() { 0.0 } else { t };
    Rgb::new((255.0 * t) as u8, 0, (255.0 * (1.0 - t)) as u8)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointMarker {
    pub joint: String,
    pub position: Point2D,
    pub speed: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneLine {
    pub from: String,
    pub to: String,
    pub start: Point2D,
    pub end: Point2D,
    pub color: Rgb,
}

/// Everything a renderer needs to draw one frame's skeleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlan {
    pub frame_index: usize,
    pub markers: Vec<JointMarker>,
    pub bones: Vec<BoneLine>,
}

impl OverlayPlan {
    pub fn from_frame(frame: &ProcessedFrame) -> Self {
        let points = &frame.skeleton.points_2d;

        let markers = frame
            .report
            .joint_metrics
            .iter()
            .filter_map(|(joint, metrics)| {
                let position = *points.get(joint)?;
                let speed = metrics.speed();
                Some(JointMarker {
                    joint: joint.clone(),
                    position,
                    speed,
                    color: speed_color(speed),
                })
            })
            .collect();

        let bones = SKELETON_CONNECTIONS
            .iter()
            .filter_map(|&(from, to)| {
                Some(BoneLine {
                    from: from.to_string(),
                    to: to.to_string(),
                    start: *points.get(from)?,
                    end: *points.get(to)?,
                    color: BONE_COLOR,
                })
            })
            .collect();

        Self {
            frame_index: frame.index,
            markers,
            bones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FramePipeline;
    use kinetrace_pose_model::keypoint::{KeypointFrame, RawKeypoint};

    #[test]
    fn test_speed_color_ramp() {
        assert_eq!(speed_color(0.0), Rgb::new(0, 0, 255));
        assert_eq!(speed_color(25.0), Rgb::new(127, 0, 127));
        assert_eq!(speed_color(50.0), Rgb::new(255, 0, 0));
        assert_eq!(speed_color(1_000.0), Rgb::new(255, 0, 0));
        assert_eq!(speed_color(f64::NAN), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_plan_only_draws_present_joints() {
        let mut pipeline = FramePipeline::with_defaults();
        let frame = KeypointFrame::new(
            0.0,
            vec![
                RawKeypoint::new("head", 50.0, 10.0, 0.0, 0.9),
                RawKeypoint::new("left_shoulder", 40.0, 30.0, 0.0, 0.9),
                RawKeypoint::new("left_knee", 40.0, 80.0, 0.0, 0.9),
            ],
        );
        let processed = pipeline.process_timed(&frame);
        let plan = OverlayPlan::from_frame(&processed);

        assert_eq!(plan.markers.len(), 3);
        assert!(plan.markers.iter().all(|m| m.color == Rgb::new(0, 0, 255)));
        assert_eq!(plan.bones.len(), 1);
        assert_eq!(plan.bones[0].from, "head");
        assert_eq!(plan.bones[0].to, "left_shoulder");
        assert_eq!(plan.bones[0].end, Point2D::new(40.0, 30.0));
    }
}
