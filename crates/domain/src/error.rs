use std::fmt::{Display, Formatter};

use crate::ParameterName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    UnknownParameter(String),
    UnknownPreset(String),
    NonFiniteParameter(ParameterName),
    MissingParameter(ParameterName),
    InvalidBitmap {
        width: u32,
        height: u32,
        byte_len: usize,
    },
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownParameter(name) => write!(f, "unknown filter parameter: {name}"),
            Self::UnknownPreset(name) => write!(f, "unknown preset: {name}"),
            Self::NonFiniteParameter(name) => {
                write!(f, "filter parameter {name} must be finite")
            }
            Self::MissingParameter(name) => {
                write!(f, "filter snapshot is missing parameter {name}")
            }
            Self::InvalidBitmap {
                width,
                height,
                byte_len,
            } => write!(
                f,
                "invalid bitmap {width}x{height} with {byte_len} bytes of RGBA data"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
