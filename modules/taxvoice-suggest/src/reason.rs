use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use taxvoice_common::FundingAction;

use crate::tags::AdvocacyTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonType {
    Supports,
    Opposes,
    Reviews,
    General,
}

/// Why an organization was suggested for one of the user's concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedReason {
    #[serde(rename = "type")]
    pub reason_type: ReasonType,
    pub description: String,
    /// e.g. "slashing funding for Medicaid"
    pub original_concern: String,
    pub actionable_tag: String,
}

impl ReasonType {
    pub fn of(tag: &AdvocacyTag) -> Self {
        match tag {
            AdvocacyTag::Action { action, .. } => match action {
                FundingAction::Slash => ReasonType::Opposes,
                FundingAction::Fund => ReasonType::Supports,
                FundingAction::Review => ReasonType::Reviews,
            },
            AdvocacyTag::Reform { .. } => ReasonType::Reviews,
            AdvocacyTag::Cause(_) => ReasonType::General,
        }
    }
}

/// Explain a matched tag in terms of the user's own concern.
pub fn explain(tag: &AdvocacyTag, concern_description: &str, action: FundingAction) -> MatchedReason {
    let actionable = actionable_label(tag);
    MatchedReason {
        reason_type: ReasonType::of(tag),
        description: actionable.clone(),
        original_concern: format!(
            "{} {}",
            action.verb_phrase(),
            clean_item_description(concern_description)
        ),
        actionable_tag: actionable,
    }
}

/// String-tag convenience over [`explain`].
pub fn generate_matched_reason(
    tag: &str,
    concern_description: &str,
    action: FundingAction,
) -> MatchedReason {
    explain(&AdvocacyTag::parse(tag), concern_description, action)
}

/// Title-cased subject with trailing generic words dropped.
pub fn actionable_label(tag: &AdvocacyTag) -> String {
    let mut label = title_case(&tag.subject().replace('_', " "));
    for generic in [" Policy", " Reform", " Spending"] {
        if let Some(stripped) = label.strip_suffix(generic) {
            label = stripped.to_string();
        }
    }
    label.trim().to_string()
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// --- Description cleanup ---

static AGENCY_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:Pentagon|Dept\. of Education|Federal Court System|FEMA|USAID|NASA)\s+-\s+",
    )
    .unwrap()
});

/// A parenthesised acronym closing out a description, e.g. "Food stamps (SNAP)".
static TRAILING_ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(([A-Z][A-Z0-9&]{1,7})\)$").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const ACRONYMS: &[(&str, &str)] = &[
    ("CDC", "Centers for Disease Control and Prevention"),
    ("CFPB", "Consumer Financial Protection Bureau"),
    ("CPB", "Corporation for Public Broadcasting"),
    ("EPA", "Environmental Protection Agency"),
    ("FAA", "Federal Aviation Administration"),
    ("FDIC", "Federal Deposit Insurance Corporation"),
    ("FEMA", "Federal Emergency Management Agency"),
    ("FSA", "Farm Service Agency"),
    ("HUD", "Department of Housing and Urban Development"),
    ("IMLS", "Institute of Museum and Library Services"),
    ("IRS", "Internal Revenue Service"),
    ("LIHEAP", "Low Income Home Energy Assistance Program"),
    ("MBDA", "Minority Business Development Agency"),
    ("NASA", "National Aeronautics and Space Administration"),
    ("NIH", "National Institutes of Health"),
    ("NLRB", "National Labor Relations Board"),
    ("NOAA", "National Oceanic and Atmospheric Administration"),
    ("NPS", "National Park Service"),
    ("NSF", "National Science Foundation"),
    ("SNAP", "Supplemental Nutrition Assistance Program"),
    ("TANF", "Temporary Assistance for Needy Families"),
    ("TSA", "Transportation Security Administration"),
    ("USAID", "U.S. Agency for International Development"),
    ("USPS", "U.S. Postal Service"),
    ("VA", "Veterans Affairs"),
    ("WIC", "Women, Infants, and Children"),
];

static ACRONYM_NAMES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ACRONYMS.iter().copied().collect());

static ACRONYM_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<&str> = ACRONYMS.iter().map(|(short, _)| *short).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).unwrap()
});

/// Turn a spending line item label into a readable noun phrase.
///
/// Drops agency prefixes ("Pentagon - Contractors" → "Contractors") and a
/// trailing parenthesised acronym the preceding words already spell out, then
/// spells out bare acronyms. An acronym that adds information, as in
/// "Food stamps (SNAP)", is kept as written.
pub fn clean_item_description(description: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(description.trim(), " ");

    // Raw item ids ("substance_mental_health") read better title-cased.
    if !collapsed.contains(' ') && collapsed.contains('_') {
        return title_case(&collapsed.replace('_', " "));
    }

    let without_prefix = AGENCY_PREFIX_RE.replace(&collapsed, "");
    let (base, kept_note) = match TRAILING_ACRONYM_RE.captures(&without_prefix) {
        Some(caps) => {
            let full = caps.get(0).map_or(0, |m| m.start());
            let text = without_prefix[..full].trim();
            let acronym = &caps[1];
            if text.is_empty() {
                // Nothing but the acronym, e.g. "(WIC)".
                (acronym.to_string(), None)
            } else if spells_out(text, acronym) {
                (text.to_string(), None)
            } else {
                (text.to_string(), Some(format!("({acronym})")))
            }
        }
        None => (without_prefix.trim().to_string(), None),
    };

    let expanded = ACRONYM_RE.replace_all(&base, |caps: &Captures| {
        ACRONYM_NAMES
            .get(&caps[0])
            .map(|name| name.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    });

    let phrase = capitalize_first(expanded.trim());
    match kept_note {
        Some(note) => format!("{phrase} {note}"),
        None => phrase,
    }
}

/// Whether the word initials of `text` contain `acronym` in order, starting
/// with the first word ("Centers for Disease Control & Prevention" spells CDC).
fn spells_out(text: &str, acronym: &str) -> bool {
    let initials: Vec<char> = text
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '/' | '.'))
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let mut letters = acronym.chars().filter(|c| c.is_alphanumeric());
    let Some(first) = letters.next() else {
        return false;
    };
    if initials.first() != Some(&first) {
        return false;
    }
    let mut rest = initials.iter().skip(1);
    letters.all(|letter| rest.any(|&initial| initial == letter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_tag_supports_with_clean_label() {
        let reason =
            generate_matched_reason("health_fund", "Medicaid (Health Coverage)", FundingAction::Fund);
        assert_eq!(reason.reason_type, ReasonType::Supports);
        assert_eq!(reason.actionable_tag, "Health");
        assert_eq!(reason.description, "Health");
        assert_eq!(
            reason.original_concern,
            "increasing funding for Medicaid (Health Coverage)"
        );
    }

    #[test]
    fn slash_and_legacy_cut_tags_oppose() {
        for tag in ["medicaid_slash", "medicaid_cut"] {
            let reason = generate_matched_reason(tag, "Medicaid", FundingAction::Slash);
            assert_eq!(reason.reason_type, ReasonType::Opposes);
            assert_eq!(reason.actionable_tag, "Medicaid");
            assert_eq!(reason.original_concern, "slashing funding for Medicaid");
        }
    }

    #[test]
    fn review_and_reform_tags_review() {
        let review = generate_matched_reason("pentagon_review", "Pentagon", FundingAction::Review);
        assert_eq!(review.reason_type, ReasonType::Reviews);
        assert_eq!(review.original_concern, "reviewing spending on Pentagon");

        let reform =
            generate_matched_reason("criminal_justice_reform", "Federal Prisons", FundingAction::Review);
        assert_eq!(reform.reason_type, ReasonType::Reviews);
        assert_eq!(reform.actionable_tag, "Criminal Justice");
    }

    #[test]
    fn cause_tags_are_general() {
        let reason = generate_matched_reason(
            "fiscal_responsibility",
            "Balancing the Budget & Reducing National Debt",
            FundingAction::Review,
        );
        assert_eq!(reason.reason_type, ReasonType::General);
        assert_eq!(reason.actionable_tag, "Fiscal Responsibility");
    }

    #[test]
    fn generic_trailing_words_are_dropped() {
        assert_eq!(
            actionable_label(&AdvocacyTag::parse("military_spending_slash")),
            "Military"
        );
        assert_eq!(
            actionable_label(&AdvocacyTag::parse("unemployment_labor_policy")),
            "Unemployment Labor"
        );
        assert_eq!(actionable_label(&AdvocacyTag::parse("policy_fund")), "Policy");
    }

    #[test]
    fn agency_prefixes_are_stripped() {
        assert_eq!(clean_item_description("Pentagon - Contractors"), "Contractors");
        assert_eq!(
            clean_item_description("Dept. of Education - K-12 Schools"),
            "K-12 Schools"
        );
        assert_eq!(
            clean_item_description("FEMA - Disaster Relief Fund"),
            "Disaster Relief Fund"
        );
    }

    #[test]
    fn spelled_out_trailing_acronyms_are_dropped() {
        assert_eq!(
            clean_item_description("Centers for Disease Control & Prevention (CDC)"),
            "Centers for Disease Control & Prevention"
        );
        assert_eq!(
            clean_item_description("Medicaid (Health Coverage)"),
            "Medicaid (Health Coverage)"
        );
        assert_eq!(
            clean_item_description("U.S. Agency for International Development (USAID)"),
            "U.S. Agency for International Development"
        );
        assert_eq!(
            clean_item_description("Pentagon - Diversity, Equity, Inclusion (DEI)"),
            "Diversity, Equity, Inclusion"
        );
        assert_eq!(
            clean_item_description("Women, Infants, & Children (WIC)"),
            "Women, Infants, & Children"
        );
    }

    #[test]
    fn informative_trailing_acronyms_are_kept() {
        assert_eq!(clean_item_description("Food stamps (SNAP)"), "Food stamps (SNAP)");
        assert_eq!(
            clean_item_description("food  assistance (WIC)"),
            "Food assistance (WIC)"
        );
    }

    #[test]
    fn bare_acronyms_are_expanded() {
        assert_eq!(
            clean_item_description("NASA"),
            "National Aeronautics and Space Administration"
        );
        assert_eq!(
            clean_item_description("(WIC)"),
            "Women, Infants, and Children"
        );
        assert_eq!(
            clean_item_description("IRS modernization"),
            "Internal Revenue Service modernization"
        );
    }

    #[test]
    fn raw_ids_and_lowercase_labels_are_capitalized() {
        assert_eq!(
            clean_item_description("substance_mental_health"),
            "Substance Mental Health"
        );
        assert_eq!(clean_item_description("public  transit"), "Public transit");
    }

    #[test]
    fn explain_is_deterministic() {
        let tag = AdvocacyTag::parse("snap_fund");
        let a = explain(&tag, "Food stamps (SNAP)", FundingAction::Fund);
        let b = explain(&tag, "Food stamps (SNAP)", FundingAction::Fund);
        assert_eq!(a, b);
    }
}
