use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ScenarioError, ScenarioResult};

use super::FrameCapture;

/// Result of checking a capture against its stored reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineOutcome {
    Matched,
    Created,
    Updated,
}

/// Compares `capture` with the JSON reference at `path`.
///
/// A missing reference is written and reported as `Created`; `update` forces
/// a rewrite. Both sides are compared as parsed JSON with the frame counter
/// zeroed, so a scenario may wait a different number of frames without
/// invalidating its reference.
pub fn compare_with_baseline(
    capture: &FrameCapture,
    path: &Path,
    update: bool,
) -> ScenarioResult<BaselineOutcome> {
    let normalized = FrameCapture {
        frame: 0,
        ..capture.clone()
    };

    if update || !path.exists() {
        let outcome = if path.exists() {
            BaselineOutcome::Updated
        } else {
            BaselineOutcome::Created
        };
        write_baseline(&normalized, path)?;
        info!(path = %path.display(), ?outcome, "baseline written");
        return Ok(outcome);
    }

    let raw = fs::read_to_string(path).map_err(|err| baseline_error(path, &err))?;
    let expected = parse_value(&raw)?;
    let actual = parse_value(&normalized.to_json_pretty()?)?;
    if expected == actual {
        return Ok(BaselineOutcome::Matched);
    }

    let diff_path = first_difference(&expected, &actual, "$").unwrap_or_else(|| "$".to_owned());
    warn!(path = %path.display(), at = %diff_path, "capture differs from baseline");
    Err(ScenarioError::CaptureMismatch {
        path: diff_path,
        expected_digest: value_digest(&expected)?,
        actual_digest: value_digest(&actual)?,
    })
}

fn write_baseline(capture: &FrameCapture, path: &Path) -> ScenarioResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| baseline_error(parent, &err))?;
    }
    let mut json = capture.to_json_pretty()?;
    json.push('\n');
    fs::write(path, json).map_err(|err| baseline_error(path, &err))
}

fn baseline_error(path: &Path, err: &std::io::Error) -> ScenarioError {
    ScenarioError::Baseline {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn parse_value(json: &str) -> ScenarioResult<Value> {
    serde_json::from_str(json)
        .map_err(|e| ScenarioError::InvalidData(format!("failed to parse capture json: {e}")))
}

fn value_digest(value: &Value) -> ScenarioResult<String> {
    let bytes = serde_json::to_vec(value)
        .map_err(|e| ScenarioError::InvalidData(format!("failed to encode capture: {e}")))?;
    Ok(format!("blake3:{}", blake3::hash(&bytes).to_hex()))
}

/// JSON path of the first differing leaf, in document order.
#[must_use]
pub fn first_difference(expected: &Value, actual: &Value, path: &str) -> Option<String> {
    match (expected, actual) {
        (Value::Object(left), Value::Object(right)) => {
            for (key, left_value) in left {
                let child = format!("{path}.{key}");
                match right.get(key) {
                    Some(right_value) => {
                        if let Some(found) = first_difference(left_value, right_value, &child) {
                            return Some(found);
                        }
                    }
                    None => return Some(child),
                }
            }
            right
                .keys()
                .find(|key| !left.contains_key(*key))
                .map(|key| format!("{path}.{key}"))
        }
        (Value::Array(left), Value::Array(right)) => {
            for (index, (left_value, right_value)) in left.iter().zip(right).enumerate() {
                if let Some(found) =
                    first_difference(left_value, right_value, &format!("{path}[{index}]"))
                {
                    return Some(found);
                }
            }
            (left.len() != right.len()).then(|| format!("{path}.length"))
        }
        _ => (expected != actual).then(|| path.to_owned()),
    }
}
