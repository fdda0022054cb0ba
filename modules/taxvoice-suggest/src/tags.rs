use serde::{Deserialize, Serialize};

use taxvoice_common::FundingAction;

/// A normalized advocacy token shared by organizations and user concerns.
///
/// The action is carried as data, not encoded in a string suffix, so matching
/// is plain structural equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdvocacyTag {
    /// `{subject}_{slash|fund|review}`
    Action {
        subject: String,
        action: FundingAction,
    },
    /// `{subject}_reform`
    Reform { subject: String },
    /// A cause with no funding direction, e.g. `peace`.
    Cause(String),
}

impl AdvocacyTag {
    pub fn action(subject: impl Into<String>, action: FundingAction) -> Self {
        AdvocacyTag::Action {
            subject: subject.into(),
            action,
        }
    }

    pub fn cause(name: impl Into<String>) -> Self {
        AdvocacyTag::Cause(name.into())
    }

    /// Parse a stored tag string. `_cut` is accepted as a legacy alias of `_slash`.
    pub fn parse(raw: &str) -> Self {
        let tag = raw.trim().to_lowercase();
        let split = |suffix: &str| {
            tag.strip_suffix(suffix)
                .filter(|subject| !subject.is_empty())
                .map(str::to_string)
        };

        if let Some(subject) = split("_slash").or_else(|| split("_cut")) {
            return AdvocacyTag::action(subject, FundingAction::Slash);
        }
        if let Some(subject) = split("_fund") {
            return AdvocacyTag::action(subject, FundingAction::Fund);
        }
        if let Some(subject) = split("_review") {
            return AdvocacyTag::action(subject, FundingAction::Review);
        }
        if let Some(subject) = split("_reform") {
            return AdvocacyTag::Reform { subject };
        }
        AdvocacyTag::Cause(tag)
    }

    /// The subject without any action suffix.
    pub fn subject(&self) -> &str {
        match self {
            AdvocacyTag::Action { subject, .. } | AdvocacyTag::Reform { subject } => subject,
            AdvocacyTag::Cause(name) => name,
        }
    }

    pub fn funding_action(&self) -> Option<FundingAction> {
        match self {
            AdvocacyTag::Action { action, .. } => Some(*action),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdvocacyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvocacyTag::Action { subject, action } => write!(f, "{subject}_{}", action.suffix()),
            AdvocacyTag::Reform { subject } => write!(f, "{subject}_reform"),
            AdvocacyTag::Cause(name) => write!(f, "{name}"),
        }
    }
}

impl From<String> for AdvocacyTag {
    fn from(raw: String) -> Self {
        AdvocacyTag::parse(&raw)
    }
}

impl From<&str> for AdvocacyTag {
    fn from(raw: &str) -> Self {
        AdvocacyTag::parse(raw)
    }
}

impl From<AdvocacyTag> for String {
    fn from(tag: AdvocacyTag) -> Self {
        tag.to_string()
    }
}

// --- Concern tag derivation ---

/// Broader causes each spending line item rolls up to.
///
/// A concern about one line item matches organizations tracking that exact
/// item and organizations tracking any of these broader causes.
const CATEGORY_MAP: &[(&str, &[&str])] = &[
    // Health
    ("medicaid", &["health", "social_safety_net", "poverty_reduction"]),
    ("medicare", &["health", "social_safety_net"]),
    ("nih", &["health", "science"]),
    ("cdc", &["health", "public_health"]),
    ("substance_mental_health", &["health", "mental_health"]),
    // War and weapons
    ("pentagon", &["military_spending"]),
    ("pentagon_contractors", &["pentagon", "military_spending"]),
    ("pentagon_personnel", &["pentagon", "military_spending"]),
    ("pentagon_top5_contractors", &["pentagon_contractors", "pentagon", "military_spending"]),
    ("pentagon_spacex", &["pentagon_contractors", "pentagon", "military_spending"]),
    ("pentagon_dei", &["pentagon", "military_spending"]),
    ("nuclear_weapons", &["military_spending"]),
    ("foreign_military_aid", &["military_spending", "foreign_aid"]),
    ("israel_wars", &["foreign_military_aid", "military_spending"]),
    ("f35", &["pentagon", "military_spending"]),
    // Interest on debt
    ("interest_debt", &["debt"]),
    // Veterans
    ("va", &["veterans_affairs"]),
    ("pact_act", &["va", "veterans_affairs"]),
    // Unemployment and labor
    ("tanf", &["social_safety_net", "poverty_reduction", "social_spending"]),
    ("child_tax_credit", &["social_safety_net", "poverty_reduction", "social_spending"]),
    ("refugee_assistance", &["immigration", "social_safety_net"]),
    ("liheap", &["social_safety_net", "poverty_reduction", "housing"]),
    ("nlrb", &["labor", "worker_protections"]),
    // Education
    ("dept_education", &["education"]),
    ("college_aid", &["education"]),
    ("k12_schools", &["education"]),
    ("cpb", &["education", "arts_funding"]),
    ("imls", &["education", "arts_funding"]),
    // Food and agriculture
    ("snap", &["food_security", "social_safety_net", "poverty_reduction"]),
    ("school_lunch", &["food_security", "social_safety_net", "poverty_reduction"]),
    ("wic", &["food_security", "social_safety_net", "poverty_reduction"]),
    ("fsa", &["farm_subsidies", "agriculture"]),
    // Government
    ("fdic", &["financial_regulation", "government_operations"]),
    ("irs", &["government_operations"]),
    ("federal_courts", &["justice_system"]),
    ("public_defenders", &["justice_system", "criminal_justice"]),
    ("usps", &["government_operations"]),
    ("cfpb", &["consumer_protection", "financial_regulation"]),
    ("mbda", &["economic_development"]),
    ("usich", &["homelessness", "housing"]),
    // Housing and community
    ("fema", &["disaster_relief"]),
    ("fema_drf", &["fema", "disaster_relief"]),
    ("hud", &["housing"]),
    ("head_start", &["education", "early_childhood"]),
    ("public_housing", &["housing", "homelessness"]),
    // Energy and environment
    ("epa", &["environment", "climate_action"]),
    ("forest_service", &["public_lands", "environment"]),
    ("noaa", &["environment", "climate_action", "science"]),
    ("renewable_energy", &["environment", "climate_action"]),
    ("nps", &["public_lands", "environment"]),
    // International affairs
    ("diplomacy", &["foreign_aid"]),
    ("usaid", &["foreign_aid"]),
    ("usaid_climate", &["usaid", "foreign_aid", "climate_action"]),
    // Law enforcement
    ("deportations_border", &["immigration_enforcement", "immigration"]),
    ("federal_prisons", &["prison_spending", "criminal_justice"]),
    // Transportation
    ("highways", &["infrastructure", "transportation"]),
    ("public_transit", &["infrastructure", "transportation"]),
    ("tsa", &["transportation"]),
    ("faa", &["transportation"]),
    ("amtrak", &["infrastructure", "transportation"]),
    // Science
    ("nasa", &["science"]),
    ("nsf", &["science"]),
    ("nasa_spacex", &["nasa", "science"]),
];

/// Broader categories for a line item; empty for unknown items.
pub fn broader_categories(item_id: &str) -> &'static [&'static str] {
    let id = item_id.trim().to_lowercase();
    CATEGORY_MAP
        .iter()
        .find(|(item, _)| *item == id)
        .map(|(_, categories)| *categories)
        .unwrap_or(&[])
}

/// Tags a concern about `item_id` contributes for the given action.
///
/// Always starts with the direct `{item_id}_{action}` tag, followed by one tag
/// per broader category in map order. Unknown items yield only the direct tag.
pub fn derive_tags(item_id: &str, action: FundingAction) -> Vec<AdvocacyTag> {
    let id = item_id.trim().to_lowercase();
    let mut tags = vec![AdvocacyTag::action(id.clone(), action)];

    for category in broader_categories(&id) {
        let tag = AdvocacyTag::action(*category, action);
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    tags
}

/// Item ids the category map knows about.
pub fn mapped_items() -> impl Iterator<Item = &'static str> {
    CATEGORY_MAP.iter().map(|(item, _)| *item)
}
