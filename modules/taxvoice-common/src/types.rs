use serde::{Deserialize, Serialize};

use crate::error::TaxVoiceError;
use crate::funding::{FundingAction, FundingLevel};

// --- User concerns ---

/// One spending item the user selected, with the direction they want it to go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConcern {
    pub id: String,
    pub description: String,
    pub category: String,
    /// Signed: negative cuts, zero reviews, positive funds.
    pub funding_level: f64,
}

impl UserConcern {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        funding_level: f64,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            category: category.into(),
            funding_level,
        }
    }

    pub fn action(&self) -> FundingAction {
        FundingAction::from_level(self.funding_level)
    }
}

// --- Wire input ---

/// A selected item as it arrives from the dashboard.
///
/// Callers send either a signed `fundingLevel` or a 0-100 `sliderValue`,
/// never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub funding_level: Option<f64>,
    #[serde(default)]
    pub slider_value: Option<f64>,
}

impl SelectedItem {
    /// Validate and convert into a concern the engine can consume.
    pub fn into_concern(self) -> Result<UserConcern, TaxVoiceError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(TaxVoiceError::Validation(
                "selected item is missing an id".to_string(),
            ));
        }

        let funding_level = match (self.funding_level, self.slider_value) {
            (Some(level), None) => {
                if !level.is_finite() {
                    return Err(TaxVoiceError::Validation(format!(
                        "fundingLevel for '{id}' must be a finite number"
                    )));
                }
                level
            }
            (None, Some(slider)) => {
                validate_percent(&format!("sliderValue for '{id}'"), slider)?;
                f64::from(FundingLevel::from_slider(slider).value())
            }
            (Some(_), Some(_)) => {
                return Err(TaxVoiceError::Validation(format!(
                    "'{id}' has both fundingLevel and sliderValue; send one"
                )))
            }
            (None, None) => {
                return Err(TaxVoiceError::Validation(format!(
                    "'{id}' needs a fundingLevel or a sliderValue"
                )))
            }
        };

        let description = if self.description.trim().is_empty() {
            id.clone()
        } else {
            self.description.trim().to_string()
        };

        Ok(UserConcern {
            id,
            description,
            category: self.category.trim().to_string(),
            funding_level,
        })
    }
}

/// Reject values outside the 0-100 slider range.
pub fn validate_percent(field: &str, value: f64) -> Result<f64, TaxVoiceError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(TaxVoiceError::Validation(format!(
            "{field} must be between 0 and 100, got {value}"
        )));
    }
    Ok(value)
}

/// Aggressiveness is the 0-100 tone slider.
pub fn validate_aggressiveness(value: f64) -> Result<f64, TaxVoiceError> {
    validate_percent("aggressiveness", value)
}
