use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use taxvoice_common::{validate_aggressiveness, validate_percent, FundingLevel, TaxVoiceError, Tone};

const UNCATEGORIZED: &str = "Other Specific Programs";

/// A selected item with the user's 0-100 slider position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptItem {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub slider_value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PromptInput {
    pub items: Vec<PromptItem>,
    pub aggressiveness: f64,
    pub user_name: Option<String>,
    pub user_location: Option<String>,
    pub balance_budget: bool,
}

impl PromptInput {
    pub fn validate(&self) -> Result<(), TaxVoiceError> {
        validate_aggressiveness(self.aggressiveness)?;
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(TaxVoiceError::Validation(
                    "selected item is missing an id".to_string(),
                ));
            }
            validate_percent(&format!("sliderValue for '{}'", item.id), item.slider_value)?;
        }
        Ok(())
    }
}

fn tone_guide() -> String {
    [Tone::Kind, Tone::Concerned, Tone::Stern, Tone::Angry]
        .iter()
        .map(|tone| {
            let low = u32::from(tone.bucket()) * 25;
            let high = if *tone == Tone::Angry { 100 } else { low + 24 };
            format!("{low}-{high}: {tone}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build the instruction text handed to a language model to draft the email body.
///
/// Items are grouped by category in alphabetical order; each item's stance
/// and the tone come from the same buckets the suggestion engine uses.
pub fn build_prompt(input: &PromptInput) -> String {
    let tone = Tone::from_aggressiveness(input.aggressiveness);
    let name = non_blank(input.user_name.as_deref()).unwrap_or("[Constituent Name]");
    let location = non_blank(input.user_location.as_deref()).unwrap_or("[Constituent Location]");

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are helping a constituent draft an email to their elected representative about federal budget priorities. Generate ONLY the body of the email."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Name: {name}");
    let _ = writeln!(prompt, "Location: {location}");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Tone: {tone}.");
    let _ = writeln!(
        prompt,
        "The user set an aggressiveness level of {}/100 (scale: {}).",
        input.aggressiveness,
        tone_guide()
    );

    let mut by_category: BTreeMap<&str, Vec<&PromptItem>> = BTreeMap::new();
    for item in &input.items {
        let category = match item.category.trim() {
            "" => UNCATEGORIZED,
            category => category,
        };
        by_category.entry(category).or_default().push(item);
    }

    if !by_category.is_empty() {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Concerns, grouped by category:");
    }
    for (category, items) in &by_category {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Category \"{category}\":");
        for item in items {
            let level = FundingLevel::from_slider(item.slider_value);
            let description = match item.description.trim() {
                "" => item.id.as_str(),
                description => description,
            };
            let _ = writeln!(
                prompt,
                "- \"{description}\": {}. Preference {}/100 (0-10 Slash Heavily, 11-35 Cut Significantly, 36-65 Improve Efficiency, 66-90 Fund, 91-100 Fund More).",
                level.full_description(),
                item.slider_value
            );
        }
    }

    if input.items.is_empty() && !input.balance_budget {
        let _ = writeln!(prompt);
        let _ = writeln!(
            prompt,
            "No specific items were selected; the email may address the budget process in general."
        );
    }

    if input.balance_budget {
        let _ = writeln!(prompt);
        let _ = writeln!(
            prompt,
            "IMPORTANT: The user strongly wants to balance the budget and reduce the national debt. Make this a prominent theme."
        );
    }

    let _ = writeln!(prompt);
    let _ = write!(
        prompt,
        "Open in a way that fits the tone, state each concern grouped by category, include the debt preference if present, and close with a call to action and salutation suited to the tone. Write as a constituent, not an AI. Do not include a subject line."
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, description: &str, category: &str, slider: f64) -> PromptItem {
        PromptItem {
            id: id.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            slider_value: slider,
        }
    }

    #[test]
    fn items_are_grouped_by_sorted_category() {
        let input = PromptInput {
            items: vec![
                item("nasa", "NASA", "Science", 95.0),
                item("medicaid", "Medicaid", "Health", 5.0),
                item("mystery", "Mystery Fund", "", 50.0),
            ],
            aggressiveness: 60.0,
            ..Default::default()
        };
        let prompt = build_prompt(&input);

        let health = prompt.find("Category \"Health\"").unwrap();
        let other = prompt.find("Category \"Other Specific Programs\"").unwrap();
        let science = prompt.find("Category \"Science\"").unwrap();
        assert!(health < other && other < science);

        assert!(prompt.contains("\"Medicaid\": Slash Heavily"));
        assert!(prompt.contains("\"NASA\": Fund More"));
        assert!(prompt.contains("\"Mystery Fund\": Improve Efficiency/Review"));
        assert!(prompt.contains("Tone: Stern."));
    }

    #[test]
    fn placeholders_fill_missing_identity() {
        let prompt = build_prompt(&PromptInput {
            user_name: Some("  ".to_string()),
            ..Default::default()
        });
        assert!(prompt.contains("Name: [Constituent Name]"));
        assert!(prompt.contains("Location: [Constituent Location]"));
        assert!(prompt.contains("No specific items were selected"));
        assert!(prompt.contains("Tone: Kind."));
    }

    #[test]
    fn budget_preference_is_emphasized() {
        let prompt = build_prompt(&PromptInput {
            aggressiveness: 80.0,
            user_name: Some("Ada".to_string()),
            user_location: Some("Ohio".to_string()),
            balance_budget: true,
            ..Default::default()
        });
        assert!(prompt.contains("Name: Ada"));
        assert!(prompt.contains("balance the budget"));
        assert!(!prompt.contains("No specific items were selected"));
        assert!(prompt.contains("Tone: Angry."));
    }

    #[test]
    fn tone_guide_matches_engine_buckets() {
        assert_eq!(
            tone_guide(),
            "0-24: Kind, 25-49: Concerned, 50-74: Stern, 75-100: Angry"
        );
    }

    #[test]
    fn validation_rejects_bad_sliders_and_tone() {
        let bad_slider = PromptInput {
            items: vec![item("nasa", "NASA", "Science", 120.0)],
            aggressiveness: 10.0,
            ..Default::default()
        };
        assert!(bad_slider.validate().is_err());

        let bad_tone = PromptInput {
            aggressiveness: -5.0,
            ..Default::default()
        };
        assert!(bad_tone.validate().is_err());

        let blank_id = PromptInput {
            items: vec![item(" ", "NASA", "Science", 50.0)],
            ..Default::default()
        };
        assert!(blank_id.validate().is_err());
    }
}
