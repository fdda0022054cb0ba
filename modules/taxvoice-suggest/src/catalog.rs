use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use taxvoice_common::TaxVoiceError;

use crate::tags::AdvocacyTag;

/// Built-in organization catalog.
const BUILTIN_CATALOG: &str = include_str!("../data/organizations.json");

// --- Entry attributes ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prominence {
    High,
    Medium,
    Low,
}

impl Prominence {
    /// Sort rank: high sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Prominence::High => 0,
            Prominence::Medium => 1,
            Prominence::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusType {
    Broad,
    Niche,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrgType {
    Grassroots,
    Research,
    Legal,
    Established,
    Activism,
    ThinkTank,
    DirectService,
    DataDriven,
}

impl std::fmt::Display for OrgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrgType::Grassroots => write!(f, "grassroots"),
            OrgType::Research => write!(f, "research"),
            OrgType::Legal => write!(f, "legal"),
            OrgType::Established => write!(f, "established"),
            OrgType::Activism => write!(f, "activism"),
            OrgType::ThinkTank => write!(f, "think-tank"),
            OrgType::DirectService => write!(f, "direct-service"),
            OrgType::DataDriven => write!(f, "data-driven"),
        }
    }
}

/// How many descriptive badges an organization should typically carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeProfile {
    SingleProminent,
    #[default]
    DoubleDiverse,
    TripleFocused,
    CommunityFocused,
}

impl BadgeProfile {
    /// Inclusive (min, max) count of descriptive badges.
    pub fn range(self) -> (usize, usize) {
        match self {
            BadgeProfile::SingleProminent => (1, 1),
            BadgeProfile::DoubleDiverse => (2, 2),
            BadgeProfile::TripleFocused => (2, 3),
            BadgeProfile::CommunityFocused => (1, 2),
        }
    }
}

// --- Entries ---

/// One advocacy organization. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationEntry {
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub main_category: String,
    pub prominence: Prominence,
    pub focus_type: FocusType,
    #[serde(default)]
    pub org_type_tags: Vec<OrgType>,
    pub advocacy_tags: Vec<AdvocacyTag>,
    #[serde(default)]
    pub intended_badge_profile: Option<BadgeProfile>,
}

impl OrganizationEntry {
    pub fn badge_profile(&self) -> BadgeProfile {
        self.intended_badge_profile.unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &AdvocacyTag) -> bool {
        self.advocacy_tags.contains(tag)
    }
}

// --- Catalog ---

/// Read-only, ordered registry of organizations.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<OrganizationEntry>,
    by_tag: HashMap<AdvocacyTag, Vec<usize>>,
}

impl Catalog {
    /// Validate entries and build the tag index.
    ///
    /// Rejects blank names or URLs, duplicate URLs, entries without tags and
    /// action tags stacked on another action (`x_slash_review`), which no
    /// concern can ever derive.
    pub fn from_entries(entries: Vec<OrganizationEntry>) -> Result<Self, TaxVoiceError> {
        let mut urls: HashSet<String> = HashSet::new();
        let mut by_tag: HashMap<AdvocacyTag, Vec<usize>> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(TaxVoiceError::Catalog(format!(
                    "entry {index} has an empty name"
                )));
            }
            if entry.url.trim().is_empty() {
                return Err(TaxVoiceError::Catalog(format!(
                    "'{}' has an empty url",
                    entry.name
                )));
            }
            if !urls.insert(entry.url.clone()) {
                return Err(TaxVoiceError::Catalog(format!(
                    "duplicate url {} ('{}')",
                    entry.url, entry.name
                )));
            }
            if entry.advocacy_tags.is_empty() {
                return Err(TaxVoiceError::Catalog(format!(
                    "'{}' has no advocacy tags",
                    entry.name
                )));
            }

            for tag in &entry.advocacy_tags {
                if let AdvocacyTag::Action { subject, .. } = tag {
                    if AdvocacyTag::parse(subject).funding_action().is_some() {
                        return Err(TaxVoiceError::Catalog(format!(
                            "'{}' has unmatchable tag {tag}",
                            entry.name
                        )));
                    }
                }
                let indices = by_tag.entry(tag.clone()).or_default();
                if indices.last() != Some(&index) {
                    indices.push(index);
                }
            }
        }

        Ok(Self { entries, by_tag })
    }

    pub fn from_json(json: &str) -> Result<Self, TaxVoiceError> {
        let entries: Vec<OrganizationEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a catalog file in the same JSON shape as the built-in one.
    pub fn from_path(path: &Path) -> Result<Self, TaxVoiceError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TaxVoiceError::Catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            organizations = catalog.len(),
            tags = catalog.tag_count(),
            "Loaded organization catalog"
        );
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, TaxVoiceError> {
        let catalog = Self::from_json(BUILTIN_CATALOG)?;
        info!(
            organizations = catalog.len(),
            tags = catalog.tag_count(),
            "Loaded built-in organization catalog"
        );
        Ok(catalog)
    }

    pub fn entries(&self) -> &[OrganizationEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&OrganizationEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct advocacy tags across all entries.
    pub fn tag_count(&self) -> usize {
        self.by_tag.len()
    }

    /// Catalog indices of entries carrying `tag`, in catalog order.
    pub fn entries_with_tag(&self, tag: &AdvocacyTag) -> &[usize] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }
}
