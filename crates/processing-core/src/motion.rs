//! Kinematic analysis of smoothed joint positions.
//!
//! For each frame the analyzer computes:
//! 1. **Segment lengths** for the limb segments whose endpoints are present.
//! 2. **Joint angles** at elbows and knees whose three joints are present.
//! 3. **Velocity and acceleration** of every present joint, by finite
//!    differences against the previous frame.
//!
//! The analyzer keeps each joint's previous position and velocity between
//! calls, so it must see frames exactly once and in temporal order.

use std::collections::{BTreeMap, HashMap};

use kinetrace_pose_model::point::Point3D;
use kinetrace_pose_model::report::{JointKinematics, MathOperation, MotionReport};
use kinetrace_pose_model::skeleton::{AngleDef, SegmentDef, ANGLES, SEGMENTS};

use crate::geometry;

/// What the analyzer remembers about a joint from the previous frame.
#[derive(Debug, Clone, Copy)]
struct JointMemory {
    position: Point3D,
    /// Stored even when it was a zero default, so acceleration is available
    /// from a joint's second observed frame on.
    velocity: Point3D,
}

/// Frame-by-frame kinematic analyzer.
#[derive(Debug)]
pub struct MotionAnalyzer {
    segments: &'static [SegmentDef],
    angles: &'static [AngleDef],
    memory: HashMap<String, JointMemory>,
}

impl MotionAnalyzer {
    /// Create an analyzer using the built-in segment and angle tables.
    pub fn new() -> Self {
        Self::with_tables(&SEGMENTS, &ANGLES)
    }

    /// Create an analyzer with custom segment and angle tables.
    pub fn with_tables(segments: &'static [SegmentDef], angles: &'static [AngleDef]) -> Self {
        Self {
            segments,
            angles,
            memory: HashMap::new(),
        }
    }

    /// Analyze one frame of smoothed positions.
    ///
    /// `delta_t` is the elapsed time since the previous frame in seconds. A
    /// non-positive value produces zero velocity and acceleration for the
    /// frame. Missing joints only cause entries to be omitted; this never
    /// fails.
    pub fn analyze(&mut self, positions: &BTreeMap<String, Point3D>, delta_t: f64) -> MotionReport {
        let mut report = MotionReport::default();

        self.compute_segments(positions, &mut report);
        self.compute_angles(positions, &mut report);
        self.compute_derivatives(positions, delta_t, &mut report);

        tracing::debug!(
            joints = report.joint_metrics.len(),
            segments = report.segment_lengths.len(),
            angles = report.angles_deg.len(),
            delta_t,
            "analyzed frame"
        );

        report
    }

    fn compute_segments(&self, positions: &BTreeMap<String, Point3D>, report: &mut MotionReport) {
        for seg in self.segments {
            let (Some(a), Some(b)) = (positions.get(seg.from), positions.get(seg.to)) else {
                continue;
            };
            report
                .segment_lengths
                .insert(seg.name.to_string(), geometry::segment_length(a, b));
            report
                .math_operations
                .push(MathOperation::segment(seg.name, seg.from, seg.to));
        }
    }

    fn compute_angles(&self, positions: &BTreeMap<String, Point3D>, report: &mut MotionReport) {
        for def in self.angles {
            let (Some(a), Some(vertex), Some(c)) = (
                positions.get(def.a),
                positions.get(def.vertex),
                positions.get(def.c),
            ) else {
                continue;
            };
            report
                .angles_deg
                .insert(def.name.to_string(), geometry::joint_angle(a, vertex, c));
            report.math_operations.push(MathOperation::angle(def.name));
        }
    }

    fn compute_derivatives(
        &mut self,
        positions: &BTreeMap<String, Point3D>,
        delta_t: f64,
        report: &mut MotionReport,
    ) {
        for (name, &position) in positions {
            let mut state = JointKinematics::at_rest(position);

            if let Some(prev) = self.memory.get(name.as_str()) {
                if delta_t > 0.0 {
                    state.velocity = (position - prev.position) / delta_t;
                    state.acceleration = (state.velocity - prev.velocity) / delta_t;
                    report.math_operations.push(MathOperation::velocity(name));
                }
            }

            report.joint_metrics.insert(name.clone(), state);
            self.memory.insert(
                name.clone(),
                JointMemory {
                    position,
                    velocity: state.velocity,
                },
            );
        }
    }

    /// Forget all per-joint state, as if no frame had been analyzed.
    pub fn reset(&mut self) {
        self.memory.clear();
    }

    /// Number of joints with carried state.
    pub fn tracked_joints(&self) -> usize {
        self.memory.len()
    }
}

impl Default for MotionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
