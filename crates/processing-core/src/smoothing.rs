//! Temporal smoothing of joint positions.
//!
//! Turns noisy per-frame detections into stable 3D positions. Each joint
//! keeps its own short history; a frame's smoothed position is the mean of
//! the most recent entries. Low-confidence detections are replaced by the
//! joint's last smoothed position before they enter the history, so a brief
//! detector dropout does not yank the joint around.

use std::collections::{BTreeMap, HashMap, VecDeque};

use kinetrace_common::config::PipelineConfig;
use kinetrace_common::error::{KinetraceError, KinetraceResult};
use kinetrace_pose_model::keypoint::KeypointMap;
use kinetrace_pose_model::point::{Point2D, Point3D};
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Default number of observations averaged per joint.
pub const DEFAULT_WINDOW: usize = 5;

/// Default visibility below which a detection is not trusted.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Smoothing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    /// Number of most recent observations averaged.
    pub window: usize,
    /// Detections with visibility strictly below this reuse the last
    /// smoothed position.
    pub visibility_threshold: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl From<&PipelineConfig> for SmoothingConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            window: config.smoothing_window,
            visibility_threshold: config.visibility_threshold,
        }
    }
}

/// Smoothed positions for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonFrame {
    /// Smoothed 3D positions keyed by joint name.
    pub points_3d: BTreeMap<String, Point3D>,
    /// Image-plane projection of `points_3d`, for drawing.
    pub points_2d: BTreeMap<String, Point2D>,
}

impl SkeletonFrame {
    pub fn len(&self) -> usize {
        self.points_3d.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_3d.is_empty()
    }
}

#[derive(Debug)]
struct JointHistory {
    /// Accepted (possibly substituted) observations, oldest first.
    points: VecDeque<Point3D>,
    /// Output of the most recent smoothing step.
    last_smoothed: Point3D,
}

/// Per-joint moving-average smoother with occlusion handling.
#[derive(Debug)]
pub struct TemporalSmoother {
    config: SmoothingConfig,
    /// Largest window used so far; every joint retains this many entries.
    max_window: usize,
    histories: HashMap<String, JointHistory>,
}

impl TemporalSmoother {
    /// Create a smoother with the given window and the default threshold.
    ///
    /// Infallible: a window of 0 is clamped to 1, the same as a per-call
    /// window passed to [`smooth`](Self::smooth). Use [`try_new`](Self::try_new)
    /// to reject it instead.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            config: SmoothingConfig {
                window,
                ..SmoothingConfig::default()
            },
            max_window: window,
            histories: HashMap::new(),
        }
    }

    /// Create a smoother, rejecting a window of 0.
    pub fn try_new(window: usize) -> KinetraceResult<Self> {
        Self::with_config(SmoothingConfig {
            window,
            ..SmoothingConfig::default()
        })
    }

    /// Create a smoother from explicit parameters, validating them.
    pub fn with_config(config: SmoothingConfig) -> KinetraceResult<Self> {
        if config.window == 0 {
            return Err(KinetraceError::config(
                "smoothing window must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&config.visibility_threshold) {
            return Err(KinetraceError::config(format!(
                "visibility threshold {} is outside [0, 1]",
                config.visibility_threshold
            )));
        }
        Ok(Self {
            config,
            max_window: config.window,
            histories: HashMap::new(),
        })
    }

    /// Create a smoother with sensible defaults (window 5, threshold 0.5).
    pub fn with_defaults() -> Self {
        let config = SmoothingConfig::default();
        Self {
            config,
            max_window: config.window,
            histories: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Smooth one joint's detection using the configured window.
    pub fn smooth_joint(&mut self, name: &str, raw: Point3D, visibility: f64) -> Point3D {
        self.smooth(name, raw, visibility, self.config.window)
    }

    /// Smooth one joint's detection over an explicit window.
    ///
    /// The first observation of a joint is accepted as-is regardless of
    /// visibility. Afterwards, a detection below the visibility threshold is
    /// replaced by the joint's last smoothed position. The accepted point is
    /// appended to the joint's history and the mean of the last
    /// `min(window, history_len)` entries is returned.
    ///
    /// Histories keep as many entries as the largest window used so far, so
    /// a small window never discards points a later, larger window averages.
    pub fn smooth(&mut self, name: &str, raw: Point3D, visibility: f64, window: usize) -> Point3D {
        let window = window.max(1);
        self.max_window = self.max_window.max(window);
        let retain = self.max_window;
        let threshold = self.config.visibility_threshold;

        let history = match self.histories.get_mut(name) {
            Some(history) => history,
            None => {
                let mut points = VecDeque::with_capacity(retain);
                points.push_back(raw);
                self.histories.insert(
                    name.to_string(),
                    JointHistory {
                        points,
                        last_smoothed: raw,
                    },
                );
                return raw;
            }
        };

        let accepted = if visibility < threshold {
            tracing::trace!(
                joint = name,
                visibility,
                "low-confidence detection, reusing last smoothed position"
            );
            history.last_smoothed
        } else {
            raw
        };

        history.points.push_back(accepted);
        while history.points.len() > retain {
            history.points.pop_front();
        }

        let recent = history.points.len().saturating_sub(window);
        let smoothed = geometry::mean(history.points.iter().skip(recent)).unwrap_or(accepted);
        history.last_smoothed = smoothed;
        smoothed
    }

    /// Smooth every detection of a frame.
    ///
    /// Only joints present in `keypoints` appear in the result.
    pub fn build(&mut self, keypoints: &KeypointMap) -> SkeletonFrame {
        let mut frame = SkeletonFrame::default();
        for (name, kp) in keypoints {
            let smoothed = self.smooth_joint(name, kp.position(), kp.visibility);
            frame.points_2d.insert(name.clone(), smoothed.xy());
            frame.points_3d.insert(name.clone(), smoothed);
        }
        frame
    }

    /// Number of retained observations for a joint.
    pub fn history_len(&self, name: &str) -> usize {
        self.histories.get(name).map_or(0, |h| h.points.len())
    }

    /// Number of joints seen so far.
    pub fn tracked_joints(&self) -> usize {
        self.histories.len()
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::with_defaults()
    }
}
