//! Built-in joint vocabulary and lookup tables.
//!
//! These are plain data. Producers may use any joint names; entries whose
//! joints are missing from a frame are simply skipped by consumers.

/// Joint names emitted by the default body-pose detector.
pub const DEFAULT_JOINTS: [&str; 13] = [
    "head",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// Bone lines drawn by overlay renderers.
pub const SKELETON_CONNECTIONS: [(&str, &str); 13] = [
    ("head", "left_shoulder"),
    ("head", "right_shoulder"),
    ("left_shoulder", "left_elbow"),
    ("left_elbow", "left_wrist"),
    ("right_shoulder", "right_elbow"),
    ("right_elbow", "right_wrist"),
    ("left_shoulder", "left_hip"),
    ("right_shoulder", "right_hip"),
    ("left_hip", "right_hip"),
    ("left_hip", "left_knee"),
    ("left_knee", "left_ankle"),
    ("right_hip", "right_knee"),
    ("right_knee", "right_ankle"),
];

/// A named limb segment between two joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDef {
    pub name: &'static str,
    /// Proximal joint.
    pub from: &'static str,
    /// Distal joint.
    pub to: &'static str,
}

/// A named joint angle: the angle at `vertex` between `a` and `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleDef {
    pub name: &'static str,
    pub a: &'static str,
    pub vertex: &'static str,
    pub c: &'static str,
}

/// Segments whose lengths are reported every frame.
pub const SEGMENTS: [SegmentDef; 8] = [
    SegmentDef {
        name: "left_upper_arm",
        from: "left_shoulder",
        to: "left_elbow",
    },
    SegmentDef {
        name: "left_lower_arm",
        from: "left_elbow",
        to: "left_wrist",
    },
    SegmentDef {
        name: "right_upper_arm",
        from: "right_shoulder",
        to: "right_elbow",
    },
    SegmentDef {
        name: "right_lower_arm",
        from: "right_elbow",
        to: "right_wrist",
    },
    SegmentDef {
        name: "left_upper_leg",
        from: "left_hip",
        to: "left_knee",
    },
    SegmentDef {
        name: "left_lower_leg",
        from: "left_knee",
        to: "left_ankle",
    },
    SegmentDef {
        name: "right_upper_leg",
        from: "right_hip",
        to: "right_knee",
    },
    SegmentDef {
        name: "right_lower_leg",
        from: "right_knee",
        to: "right_ankle",
    },
];

/// Angles reported every frame (elbows and knees).
pub const ANGLES: [AngleDef; 4] = [
    AngleDef {
        name: "left_elbow",
        a: "left_shoulder",
        vertex: "left_elbow",
        c: "left_wrist",
    },
    AngleDef {
        name: "right_elbow",
        a: "right_shoulder",
        vertex: "right_elbow",
        c: "right_wrist",
    },
    AngleDef {
        name: "left_knee",
        a: "left_hip",
        vertex: "left_knee",
        c: "left_ankle",
    },
    AngleDef {
        name: "right_knee",
        a: "right_hip",
        vertex: "right_knee",
        c: "right_ankle",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_only_reference_default_joints() {
        let known = |name: &str| DEFAULT_JOINTS.contains(&name);
        for (a, b) in SKELETON_CONNECTIONS {
            assert!(known(a) && known(b), "unknown joint in {a}-{b}");
        }
        for seg in SEGMENTS {
            assert!(known(seg.from) && known(seg.to));
        }
        for angle in ANGLES {
            assert!(known(angle.a) && known(angle.vertex) && known(angle.c));
        }
    }

    #[test]
    fn test_angle_names_match_vertex() {
        for angle in ANGLES {
            assert_eq!(angle.name, angle.vertex);
        }
    }
}
