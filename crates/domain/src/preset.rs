use crate::{DomainError, ParameterName};

use ParameterName::{Blur, Brightness, Contrast, Grayscale, HueRotation, Invert, Saturation, Sepia};

/// A named, immutable bundle of parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub values: &'static [(ParameterName, f32)],
}

impl Preset {
    pub fn value_of(&self, name: ParameterName) -> Option<f32> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| *value)
    }
}

// brightness, contrast, saturation, hueRotation, blur, grayscale, sepia, invert
const fn full(values: [f32; 8]) -> [(ParameterName, f32); 8] {
    [
        (Brightness, values[0]),
        (Contrast, values[1]),
        (Saturation, values[2]),
        (HueRotation, values[3]),
        (Blur, values[4]),
        (Grayscale, values[5]),
        (Sepia, values[6]),
        (Invert, values[7]),
    ]
}

const NORMAL: [(ParameterName, f32); 8] = full([100.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
const VINTAGE: [(ParameterName, f32); 8] = full([110.0, 120.0, 90.0, 10.0, 1.0, 10.0, 30.0, 0.0]);
const BW: [(ParameterName, f32); 8] = full([120.0, 140.0, 0.0, 0.0, 0.0, 100.0, 0.0, 0.0]);
const COLD: [(ParameterName, f32); 8] = full([95.0, 110.0, 80.0, 200.0, 0.0, 0.0, 0.0, 0.0]);
const WARM: [(ParameterName, f32); 8] = full([105.0, 110.0, 120.0, 20.0, 0.0, 0.0, 10.0, 0.0]);
const DRAMATIC: [(ParameterName, f32); 8] = full([90.0, 150.0, 130.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
const FADED: [(ParameterName, f32); 8] = full([115.0, 80.0, 70.0, 0.0, 0.0, 0.0, 20.0, 0.0]);
const SOFT: [(ParameterName, f32); 8] = full([110.0, 95.0, 90.0, 0.0, 2.0, 0.0, 0.0, 0.0]);
const NEON: [(ParameterName, f32); 8] = full([105.0, 160.0, 200.0, 90.0, 0.0, 0.0, 0.0, 0.0]);
const INVERT_COLORS: [(ParameterName, f32); 8] =
    full([100.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0, 100.0]);

pub static PRESETS: [Preset; 10] = [
    Preset { name: "normal", values: &NORMAL },
    Preset { name: "vintage", values: &VINTAGE },
    Preset { name: "bw", values: &BW },
    Preset { name: "cold", values: &COLD },
    Preset { name: "warm", values: &WARM },
    Preset { name: "dramatic", values: &DRAMATIC },
    Preset { name: "faded", values: &FADED },
    Preset { name: "soft", values: &SOFT },
    Preset { name: "neon", values: &NEON },
    Preset { name: "invertColors", values: &INVERT_COLORS },
];

pub fn find_preset(name: &str) -> Result<&'static Preset, DomainError> {
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| DomainError::UnknownPreset(name.to_string()))
}
