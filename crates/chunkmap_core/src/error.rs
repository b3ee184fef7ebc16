//! Error types for user-supplied coordinates

use crate::coords::{format_coordinate, Coordinate};

/// Why a "go to" input could not be used
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// The text contained no digits at all
    NoNumbers(String),
    /// The parsed plane is outside 0..=3
    InvalidPlane { input: String, parsed: Coordinate },
    /// The parsed tile lies outside the map bounds
    OutOfBounds { input: String, parsed: Coordinate },
}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateError::NoNumbers(input) => {
                write!(f, "{:?} does not contain a coordinate", input)
            }
            CoordinateError::InvalidPlane { input, parsed } => write!(
                f,
                "{:?} was parsed as {} which is not on a valid plane",
                input,
                format_coordinate(parsed)
            ),
            CoordinateError::OutOfBounds { input, parsed } => write!(
                f,
                "{:?} was parsed as {} which is not a valid coordinate",
                input,
                format_coordinate(parsed)
            ),
        }
    }
}

impl CoordinateError {
    /// Replace the recorded input text
    pub fn with_input(self, text: &str) -> Self {
        let input = text.to_string();
        match self {
            CoordinateError::NoNumbers(_) => CoordinateError::NoNumbers(input),
            CoordinateError::InvalidPlane { parsed, .. } => {
                CoordinateError::InvalidPlane { input, parsed }
            }
            CoordinateError::OutOfBounds { parsed, .. } => {
                CoordinateError::OutOfBounds { input, parsed }
            }
        }
    }
}

impl std::error::Error for CoordinateError {}
