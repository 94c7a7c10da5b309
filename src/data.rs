//! Labelled training data and its JSON file format.
//!
//! A training file is a JSON array of records:
//!
//! ```json
//! [
//!   { "input": [0, 0], "expectedOutput": [0] },
//!   { "input": [0, 1], "expectedOutput": [1] }
//! ]
//! ```

use crate::error::{Error, Result};

use std::fs;
use std::path::Path;

/// A single labelled example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub input: Vec<f64>,
    pub expected_output: Vec<f64>,
}

impl DataPoint {
    pub fn new<I, O>(input: I, expected_output: O) -> Self
    where
        I: Into<Vec<f64>>,
        O: Into<Vec<f64>>,
    {
        DataPoint {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// Parses and validates a training set from its JSON text.
pub fn parse_training_data(json: &str) -> Result<Vec<DataPoint>> {
    let points: Vec<DataPoint> = serde_json::from_str(json)
        .map_err(|e| Error::InvalidTrainingData(e.to_string()))?;
    validate_training_data(&points)?;
    Ok(points)
}

/// Reads, parses and validates a training set from a JSON file.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<DataPoint>> {
    let contents = fs::read_to_string(path)?;
    parse_training_data(&contents)
}

/// Checks that `points` is non-empty, that every value is a finite number,
/// and that every record agrees with the first one on its input and expected
/// output lengths.
pub fn validate_training_data(points: &[DataPoint]) -> Result<()> {
    let first = points
        .first()
        .ok_or_else(|| Error::InvalidTrainingData("no records".into()))?;
    for (n, point) in points.iter().enumerate() {
        let values = point.input.iter().chain(&point.expected_output);
        if let Some(value) = values.copied().find(|v| !v.is_finite()) {
            return Err(Error::InvalidTrainingData(format!(
                "record {} contains the non-numeric value {}",
                n, value
            )));
        }
        if point.input.len() != first.input.len() {
            return Err(Error::InvalidTrainingData(format!(
                "record {} has {} inputs, expected {}",
                n,
                point.input.len(),
                first.input.len()
            )));
        }
        if point.expected_output.len() != first.expected_output.len() {
            return Err(Error::InvalidTrainingData(format!(
                "record {} has {} expected outputs, expected {}",
                n,
                point.expected_output.len(),
                first.expected_output.len()
            )));
        }
    }
    Ok(())
}
