use std::fmt::{Display, Formatter};

use crate::{FilterState, ParameterName};

/// Parameters in the order their effects are applied. The effects do not commute, so this
/// order is part of the rendered output.
pub const COMPOSITION_ORDER: [ParameterName; 8] = [
    ParameterName::Brightness,
    ParameterName::Contrast,
    ParameterName::Saturation,
    ParameterName::Blur,
    ParameterName::Grayscale,
    ParameterName::Sepia,
    ParameterName::Invert,
    ParameterName::HueRotation,
];

/// One primitive effect and its amount in the parameter's own unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterEffect {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    Blur(f32),
    Grayscale(f32),
    Sepia(f32),
    Invert(f32),
    HueRotate(f32),
}

impl FilterEffect {
    pub fn from_parameter(name: ParameterName, value: f32) -> Self {
        match name {
            ParameterName::Brightness => Self::Brightness(value),
            ParameterName::Contrast => Self::Contrast(value),
            ParameterName::Saturation => Self::Saturate(value),
            ParameterName::Blur => Self::Blur(value),
            ParameterName::Grayscale => Self::Grayscale(value),
            ParameterName::Sepia => Self::Sepia(value),
            ParameterName::Invert => Self::Invert(value),
            ParameterName::HueRotation => Self::HueRotate(value),
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Saturate(_) => "saturate",
            Self::Blur(_) => "blur",
            Self::Grayscale(_) => "grayscale",
            Self::Sepia(_) => "sepia",
            Self::Invert(_) => "invert",
            Self::HueRotate(_) => "hue-rotate",
        }
    }

    pub fn amount(&self) -> f32 {
        match *self {
            Self::Brightness(value)
            | Self::Contrast(value)
            | Self::Saturate(value)
            | Self::Blur(value)
            | Self::Grayscale(value)
            | Self::Sepia(value)
            | Self::Invert(value)
            | Self::HueRotate(value) => value,
        }
    }

    fn unit_suffix(&self) -> &'static str {
        match self {
            Self::Blur(_) => "px",
            Self::HueRotate(_) => "deg",
            _ => "%",
        }
    }

    /// True when applying the effect leaves every pixel as it was.
    pub fn is_identity(&self) -> bool {
        match *self {
            Self::Brightness(value) | Self::Contrast(value) | Self::Saturate(value) => {
                value == 100.0
            }
            Self::HueRotate(value) => value % 360.0 == 0.0,
            Self::Blur(value) | Self::Grayscale(value) | Self::Sepia(value) | Self::Invert(value) => {
                value == 0.0
            }
        }
    }
}

impl Display for FilterEffect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}{})",
            self.function_name(),
            self.amount(),
            self.unit_suffix()
        )
    }
}

/// Ordered effect list built fresh from a [`FilterState`] for each render.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterComposition {
    effects: Vec<FilterEffect>,
}

impl FilterComposition {
    pub fn from_state(state: &FilterState) -> Self {
        let effects = COMPOSITION_ORDER
            .iter()
            .map(|&name| FilterEffect::from_parameter(name, state.get(name).value))
            .collect();
        Self { effects }
    }

    pub fn effects(&self) -> &[FilterEffect] {
        &self.effects
    }

    pub fn is_identity(&self) -> bool {
        self.effects.iter().all(FilterEffect::is_identity)
    }
}

impl Display for FilterComposition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, effect) in self.effects.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{effect}")?;
        }
        Ok(())
    }
}
