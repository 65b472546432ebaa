//! Error handling for the kinematic model and its loaders

use std::io;

/// Unified error for dimension checks and for YAML / JSON loading.
#[derive(Debug)]
pub enum KinematicsError {
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
    InvalidParameter(String),
    /// Wrong number of DH entries, joints, rows or test case records.
    DimensionMismatch { what: &'static str, expected: usize, found: usize },
}

impl std::fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            KinematicsError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            KinematicsError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            KinematicsError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
            KinematicsError::InvalidParameter(ref msg) =>
                write!(f, "Invalid Parameter: {}", msg),
            KinematicsError::DimensionMismatch { what, expected, found } =>
                write!(f, "Dimension mismatch in {}: expected {}, found {}", what, expected, found),
        }
    }
}

impl std::error::Error for KinematicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KinematicsError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for KinematicsError {
    fn from(err: io::Error) -> Self {
        KinematicsError::IoError(err)
    }
}

/// Fails with `DimensionMismatch` unless `found == expected`.
pub(crate) fn check_length(what: &'static str, expected: usize, found: usize) -> Result<(), KinematicsError> {
    if expected != found {
        return Err(KinematicsError::DimensionMismatch { what, expected, found });
    }
    Ok(())
}
