//! Validate a keypoint stream before analysis.

use std::collections::BTreeMap;
use std::path::PathBuf;

use kinetrace_pose_model::keypoint::{parse_frames, parse_header};
use kinetrace_pose_model::skeleton::DEFAULT_JOINTS;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating keypoint stream at: {}", path.display());

    let content = super::read_stream(&path)?;
    let frames =
        parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse keypoints: {e}"))?;

    match parse_header(&content) {
        Some(header) => {
            let size = header
                .frame_size()
                .map(|(w, h)| format!(", {w}x{h}"))
                .unwrap_or_default();
            println!(
                "  Header: schema {} @ {}fps{size}",
                header.schema_version, header.fps
            );
        }
        None => println!("  Header: none (frame rate comes from config or --fps)"),
    }
    println!("  Frames: {}", frames.len());

    let mut issues = Vec::new();
    let mut coverage: BTreeMap<&str, usize> = BTreeMap::new();
    let mut prev_t: Option<f64> = None;

    for (index, frame) in frames.iter().enumerate() {
        if let Some(prev) = prev_t {
            if frame.timestamp_secs <= prev {
                issues.push(format!(
                    "frame {index}: timestamp {} does not increase (previous {prev})",
                    frame.timestamp_secs
                ));
            }
        }
        prev_t = Some(frame.timestamp_secs);

        for kp in &frame.keypoints {
            *coverage.entry(kp.name.as_str()).or_default() += 1;
            if !(0.0..=1.0).contains(&kp.visibility) {
                issues.push(format!(
                    "frame {index}: {} visibility {} outside [0, 1]",
                    kp.name, kp.visibility
                ));
            }
            if !(kp.x.is_finite() && kp.y.is_finite() && kp.z.is_finite()) {
                issues.push(format!("frame {index}: {} has non-finite position", kp.name));
            }
        }
        if frame.keypoint_map().len() != frame.keypoints.len() {
            issues.push(format!("frame {index}: duplicate joint names"));
        }
    }

    println!("  Joint coverage:");
    for (name, count) in &coverage {
        let marker = if DEFAULT_JOINTS.contains(name) { "" } else { " (custom)" };
        println!("    {name}: {count}/{}{marker}", frames.len());
    }

    if issues.is_empty() {
        println!("\nStream is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Analysis will still run; affected values may be skipped.",
            issues.len()
        );
    }

    Ok(())
}
