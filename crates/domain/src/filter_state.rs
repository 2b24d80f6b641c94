use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{DomainError, FilterComposition, FilterParameter, ParameterName, Preset, Unit};

/// Current value of every filter control for one edited image.
///
/// Values are always clamped into their declared bounds. The serialized form is a JSON object
/// keyed by parameter name, each holding `{value, min, max, unit}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredFilters", try_from = "StoredFilters")]
pub struct FilterState {
    params: [FilterParameter; 8],
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            params: ParameterName::ALL.map(ParameterName::default_parameter),
        }
    }
}

impl FilterState {
    pub fn get(&self, name: ParameterName) -> &FilterParameter {
        &self.params[name.index()]
    }

    pub fn lookup(&self, name: &str) -> Result<&FilterParameter, DomainError> {
        let name = name.parse::<ParameterName>()?;
        Ok(self.get(name))
    }

    /// Stores `value` clamped into the parameter's bounds and returns what was stored.
    pub fn set(&mut self, name: ParameterName, value: f32) -> Result<f32, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NonFiniteParameter(name));
        }
        let param = &mut self.params[name.index()];
        param.value = param.clamp(value);
        Ok(param.value)
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Applies every value of `preset`; other parameters keep their current value.
    /// Nothing is written if any preset value is rejected.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<(), DomainError> {
        if let Some((name, _)) = preset.values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(DomainError::NonFiniteParameter(*name));
        }
        for &(name, value) in preset.values {
            self.set(name, value)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterParameter> {
        self.params.iter()
    }

    pub fn is_neutral(&self) -> bool {
        self.params.iter().all(FilterParameter::is_neutral)
    }

    pub fn composition(&self) -> FilterComposition {
        FilterComposition::from_state(self)
    }
}

type StoredFilters = BTreeMap<ParameterName, StoredParameter>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredParameter {
    value: f32,
    min: f32,
    max: f32,
    unit: Unit,
}

impl From<FilterState> for StoredFilters {
    fn from(state: FilterState) -> Self {
        state
            .params
            .iter()
            .map(|param| {
                (
                    param.name,
                    StoredParameter {
                        value: param.value,
                        min: param.min,
                        max: param.max,
                        unit: param.unit,
                    },
                )
            })
            .collect()
    }
}

// Stored bounds are ignored; the canonical table is authoritative.
impl TryFrom<StoredFilters> for FilterState {
    type Error = DomainError;

    fn try_from(stored: StoredFilters) -> Result<Self, Self::Error> {
        let mut state = FilterState::default();
        for name in ParameterName::ALL {
            let entry = stored
                .get(&name)
                .ok_or(DomainError::MissingParameter(name))?;
            state.set(name, entry.value)?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find_preset;

    #[test]
    fn set_clamps_into_bounds() {
        let mut state = FilterState::default();
        assert_eq!(state.set(ParameterName::Blur, 9999.0), Ok(300.0));
        assert_eq!(state.get(ParameterName::Blur).value, 300.0);

        assert_eq!(state.set(ParameterName::Brightness, -20.0), Ok(0.0));
        assert_eq!(state.set(ParameterName::HueRotation, 180.5), Ok(180.5));
    }

    #[test]
    fn set_rejects_non_finite_values_without_writing() {
        let mut state = FilterState::default();
        assert_eq!(
            state.set(ParameterName::Sepia, f32::NAN),
            Err(DomainError::NonFiniteParameter(ParameterName::Sepia))
        );
        assert_eq!(state.get(ParameterName::Sepia).value, 0.0);
    }

    #[test]
    fn lookup_by_unknown_name_fails() {
        let state = FilterState::default();
        assert!(matches!(
            state.lookup("exposure"),
            Err(DomainError::UnknownParameter(_))
        ));
        assert_eq!(state.lookup("contrast").map(|p| p.value), Ok(100.0));
    }

    #[test]
    fn reset_all_restores_defaults() {
        let mut state = FilterState::default();
        state.set(ParameterName::Invert, 100.0).expect("set");
        state.set(ParameterName::Contrast, 150.0).expect("set");
        assert!(!state.is_neutral());

        state.reset_all();
        assert_eq!(state, FilterState::default());
        assert!(state.is_neutral());
    }

    #[test]
    fn vintage_preset_sets_its_values() {
        let mut state = FilterState::default();
        state
            .apply_preset(find_preset("vintage").expect("preset"))
            .expect("apply");
        assert_eq!(state.get(ParameterName::Brightness).value, 110.0);
        assert_eq!(state.get(ParameterName::Contrast).value, 120.0);
        assert_eq!(state.get(ParameterName::Saturation).value, 90.0);
        assert_eq!(state.get(ParameterName::HueRotation).value, 10.0);
        assert_eq!(state.get(ParameterName::Blur).value, 1.0);
        assert_eq!(state.get(ParameterName::Grayscale).value, 10.0);
        assert_eq!(state.get(ParameterName::Sepia).value, 30.0);
        assert_eq!(state.get(ParameterName::Invert).value, 0.0);
    }

    #[test]
    fn partial_preset_leaves_other_parameters_alone() {
        static VALUES: [(ParameterName, f32); 1] = [(ParameterName::Sepia, 40.0)];
        let preset = Preset {
            name: "tone",
            values: &VALUES,
        };
        let mut state = FilterState::default();
        state.set(ParameterName::Blur, 3.0).expect("set");

        state.apply_preset(&preset).expect("apply");
        assert_eq!(state.get(ParameterName::Sepia).value, 40.0);
        assert_eq!(state.get(ParameterName::Blur).value, 3.0);
    }

    #[test]
    fn reads_gallery_snapshot_format() {
        let json = r#"{
            "brightness": { "value": 110, "min": 0, "max": 200, "unit": "%" },
            "contrast": { "value": 120, "min": 0, "max": 200, "unit": "%" },
            "saturation": { "value": 90, "min": 0, "max": 200, "unit": "%" },
            "hueRotation": { "value": 10, "min": 0, "max": 360, "unit": "deg" },
            "blur": { "value": 1, "min": 0, "max": 300, "unit": "px" },
            "grayscale": { "value": 10, "min": 0, "max": 100, "unit": "%" },
            "sepia": { "value": 30, "min": 0, "max": 100, "unit": "%" },
            "invert": { "value": 0, "min": 0, "max": 100, "unit": "%" }
        }"#;

        let state: FilterState = serde_json::from_str(json).expect("parse");
        assert_eq!(state.get(ParameterName::HueRotation).value, 10.0);
        assert_eq!(state.get(ParameterName::Blur).unit, Unit::Pixels);

        let written = serde_json::to_value(&state).expect("serialize");
        assert_eq!(written["hueRotation"]["unit"], "deg");
        assert_eq!(written["sepia"]["value"], 30.0);
    }

    #[test]
    fn snapshot_with_out_of_range_value_is_clamped() {
        let mut stored: StoredFilters = FilterState::default().into();
        if let Some(entry) = stored.get_mut(&ParameterName::Grayscale) {
            entry.value = 250.0;
            entry.max = 1000.0;
        }
        let state = FilterState::try_from(stored).expect("convert");
        assert_eq!(state.get(ParameterName::Grayscale).value, 100.0);
        assert_eq!(state.get(ParameterName::Grayscale).max, 100.0);
    }

    #[test]
    fn snapshot_missing_a_parameter_is_rejected() {
        let mut stored: StoredFilters = FilterState::default().into();
        stored.remove(&ParameterName::Invert);
        assert_eq!(
            FilterState::try_from(stored),
            Err(DomainError::MissingParameter(ParameterName::Invert))
        );
    }
}
