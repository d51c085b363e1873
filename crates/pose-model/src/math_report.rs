//! Run-level math report: all frame reports plus the formula audit trail.
//!
//! This module only builds the document and its text rendering. Writing
//! files is left to the caller.

use serde::{Deserialize, Serialize};

use crate::report::MotionReport;

pub const SEGMENT_LENGTH_FORMULA: &str = "L = sqrt((x2-x1)^2 + (y2-y1)^2 + (z2-z1)^2)";
pub const ANGLE_FORMULA: &str = "theta = arccos( (v1·v2) / (||v1|| ||v2||) )";
pub const VELOCITY_FORMULA: &str = "v = (p_t - p_(t-1)) / Δt";
pub const ACCELERATION_FORMULA: &str = "a = (v_t - v_(t-1)) / Δt";

/// The formulas used by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaSet {
    pub segment_length: String,
    pub angle: String,
    pub velocity: String,
    pub acceleration: String,
}

impl Default for FormulaSet {
    fn default() -> Self {
        Self {
            segment_length: SEGMENT_LENGTH_FORMULA.to_string(),
            angle: ANGLE_FORMULA.to_string(),
            velocity: VELOCITY_FORMULA.to_string(),
            acceleration: ACCELERATION_FORMULA.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub formulas: FormulaSet,
    pub frame_count: usize,
    /// RFC 3339 timestamp, set by the tool that writes the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// Serializable report covering a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathReportDocument {
    pub summary: ReportSummary,
    pub frames: Vec<MotionReport>,
    /// Every frame's log lines, flattened in frame order.
    pub math_operations: Vec<String>,
}

impl MathReportDocument {
    pub fn from_reports(reports: &[MotionReport]) -> Self {
        let math_operations = reports
            .iter()
            .flat_map(|report| report.operation_lines())
            .collect();

        Self {
            summary: ReportSummary {
                formulas: FormulaSet::default(),
                frame_count: reports.len(),
                generated_at: None,
            },
            frames: reports.to_vec(),
            math_operations,
        }
    }

    pub fn with_generated_at(mut self, timestamp: impl Into<String>) -> Self {
        self.summary.generated_at = Some(timestamp.into());
        self
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering: formulas first, then the per-frame log.
    pub fn render_text(&self) -> String {
        let formulas = &self.summary.formulas;
        let mut lines = vec![
            "Math Report".to_string(),
            "===========".to_string(),
            String::new(),
        ];
        if let Some(ts) = &self.summary.generated_at {
            lines.push(format!("Generated: {ts}"));
        }
        lines.push(format!("Frames analyzed: {}", self.summary.frame_count));
        lines.push(String::new());
        lines.push("Formulas used:".to_string());
        lines.push(format!("1. Segment length: {}", formulas.segment_length));
        lines.push(format!("2. Angle between vectors: {}", formulas.angle));
        lines.push(format!("3. Velocity: {}", formulas.velocity));
        lines.push(format!("4. Acceleration: {}", formulas.acceleration));
        lines.push(String::new());
        lines.push("Per-frame computation log:".to_string());
        lines.extend(self.math_operations.iter().map(|op| format!("- {op}")));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MathOperation;

    fn report_with(ops: Vec<MathOperation>) -> MotionReport {
        MotionReport {
            math_operations: ops,
            ..Default::default()
        }
    }

    #[test]
    fn test_operations_flatten_in_frame_order() {
        let reports = vec![
            report_with(vec![MathOperation::angle("left_elbow")]),
            report_with(vec![]),
            report_with(vec![
                MathOperation::angle("left_knee"),
                MathOperation::velocity("head"),
            ]),
        ];
        let doc = MathReportDocument::from_reports(&reports);
        assert_eq!(doc.summary.frame_count, 3);
        assert_eq!(doc.math_operations.len(), 3);
        assert!(doc.math_operations[0].starts_with("Angle left_elbow"));
        assert!(doc.math_operations[1].starts_with("Angle left_knee"));
        assert!(doc.math_operations[2].starts_with("Velocity head"));
    }

    #[test]
    fn test_text_rendering() {
        let doc = MathReportDocument::from_reports(&[report_with(vec![MathOperation::angle(
            "right_knee",
        )])])
        .with_generated_at("2026-01-01T00:00:00Z");
        let text = doc.render_text();
        assert!(text.starts_with("Math Report"));
        assert!(text.contains("Generated: 2026-01-01T00:00:00Z"));
        assert!(text.contains("3. Velocity: v = (p_t - p_(t-1)) / Δt"));
        assert!(text.ends_with("- Angle right_knee: arccos( (v1·v2) / (||v1||*||v2||) )"));
    }

    #[test]
    fn test_json_omits_missing_timestamp() {
        let json = MathReportDocument::from_reports(&[]).to_json_pretty().unwrap();
        assert!(!json.contains("generated_at"));
        assert!(json.contains("\"segment_length\""));
    }
}
