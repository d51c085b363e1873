//! Per-frame motion reports.
//!
//! A report is built once per frame by the kinematic analyzer and is not
//! modified afterwards. Maps are ordered so serialized reports are stable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::Point3D;

/// Position and its first two time derivatives for one joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointKinematics {
    /// Smoothed position.
    pub position: Point3D,
    /// Units per second.
    pub velocity: Point3D,
    /// Units per second squared.
    pub acceleration: Point3D,
}

impl JointKinematics {
    /// State for a joint seen for the first time (no derivatives yet).
    pub fn at_rest(position: Point3D) -> Self {
        Self {
            position,
            velocity: Point3D::ZERO,
            acceleration: Point3D::ZERO,
        }
    }

    /// Magnitude of the velocity.
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// Which formula a [`MathOperation`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Segment,
    Angle,
    Velocity,
}

/// One entry of the explainability log: which formula produced which value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathOperation {
    pub kind: OperationKind,
    /// Segment, angle, or joint name the value belongs to.
    pub subject: String,
    pub formula: String,
}

impl MathOperation {
    pub fn segment(name: &str, from: &str, to: &str) -> Self {
        Self {
            kind: OperationKind::Segment,
            subject: name.to_string(),
            formula: format!("length = ||{to} - {from}|| = sqrt(sum((x_i^b - x_i^a)^2))"),
        }
    }

    pub fn angle(name: &str) -> Self {
        Self {
            kind: OperationKind::Angle,
            subject: name.to_string(),
            formula: "arccos( (v1·v2) / (||v1||*||v2||) )".to_string(),
        }
    }

    pub fn velocity(joint: &str) -> Self {
        Self {
            kind: OperationKind::Velocity,
            subject: joint.to_string(),
            formula: "v = (p_t - p_(t-1)) / Δt; Accel a = (v_t - v_(t-1)) / Δt".to_string(),
        }
    }
}

impl fmt::Display for MathOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            OperationKind::Segment => "Segment",
            OperationKind::Angle => "Angle",
            OperationKind::Velocity => "Velocity",
        };
        write!(f, "{label} {}: {}", self.subject, self.formula)
    }
}

/// Everything derived for a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionReport {
    /// Joint angles in degrees, keyed by angle name.
    pub angles_deg: BTreeMap<String, f64>,

    /// Segment lengths in source units, keyed by segment name.
    pub segment_lengths: BTreeMap<String, f64>,

    /// Kinematic state of every joint present in the frame.
    pub joint_metrics: BTreeMap<String, JointKinematics>,

    /// Formula log in emission order: segments, angles, then velocities.
    pub math_operations: Vec<MathOperation>,
}

impl MotionReport {
    /// Human-readable log lines, in emission order.
    pub fn operation_lines(&self) -> Vec<String> {
        self.math_operations.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_lines() {
        let seg = MathOperation::segment("left_upper_arm", "left_shoulder", "left_elbow");
        assert_eq!(
            seg.to_string(),
            "Segment left_upper_arm: length = ||left_elbow - left_shoulder|| = sqrt(sum((x_i^b - x_i^a)^2))"
        );
        assert_eq!(
            MathOperation::angle("left_knee").to_string(),
            "Angle left_knee: arccos( (v1·v2) / (||v1||*||v2||) )"
        );
        assert!(MathOperation::velocity("head")
            .to_string()
            .starts_with("Velocity head: v = (p_t - p_(t-1)) / Δt"));
    }

    #[test]
    fn test_at_rest_speed_is_zero() {
        let state = JointKinematics::at_rest(Point3D::new(3.0, 4.0, 0.0));
        assert_eq!(state.speed(), 0.0);
        assert!(state.acceleration.is_zero());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MathOperation::angle("left_elbow")).unwrap();
        assert!(json.contains("\"kind\":\"angle\""));
    }
}
