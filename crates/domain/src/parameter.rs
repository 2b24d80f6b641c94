use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// The fixed set of filter controls, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterName {
    Brightness,
    Contrast,
    Saturation,
    HueRotation,
    Blur,
    Grayscale,
    Sepia,
    Invert,
}

impl ParameterName {
    pub const ALL: [ParameterName; 8] = [
        ParameterName::Brightness,
        ParameterName::Contrast,
        ParameterName::Saturation,
        ParameterName::HueRotation,
        ParameterName::Blur,
        ParameterName::Grayscale,
        ParameterName::Sepia,
        ParameterName::Invert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::HueRotation => "hueRotation",
            Self::Blur => "blur",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Neutral value and bounds for this control.
    pub fn default_parameter(self) -> FilterParameter {
        let (value, min, max, unit) = match self {
            Self::Brightness | Self::Contrast | Self::Saturation => {
                (100.0, 0.0, 200.0, Unit::Percent)
            }
            Self::HueRotation => (0.0, 0.0, 360.0, Unit::Degrees),
            Self::Blur => (0.0, 0.0, 300.0, Unit::Pixels),
            Self::Grayscale | Self::Sepia | Self::Invert => (0.0, 0.0, 100.0, Unit::Percent),
        };
        FilterParameter {
            name: self,
            value,
            min,
            max,
            unit,
        }
    }
}

impl Display for ParameterName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == value)
            .ok_or_else(|| DomainError::UnknownParameter(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "px")]
    Pixels,
    #[serde(rename = "deg")]
    Degrees,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Pixels => "px",
            Self::Degrees => "deg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParameter {
    pub name: ParameterName,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub unit: Unit,
}

impl FilterParameter {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn is_neutral(&self) -> bool {
        self.value == self.name.default_parameter().value
    }
}

impl Display for FilterParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}
