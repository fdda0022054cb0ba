use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use typed_builder::TypedBuilder;

use taxvoice_common::{FundingAction, Tone, UserConcern, DEFAULT_MAX_SUGGESTIONS};

use crate::badges::{assign_badges, BadgeTally, BadgeType, RankClass};
use crate::catalog::{Catalog, FocusType, OrgType, OrganizationEntry, Prominence};
use crate::reason::{explain, MatchedReason};
use crate::tags::{derive_tags, AdvocacyTag};

/// Id of the synthetic concern added by the balance-budget checkbox.
pub const BALANCE_BUDGET_ID: &str = "balance_budget";
pub const BALANCE_BUDGET_DESCRIPTION: &str = "Balancing the Budget & Reducing National Debt";
const BALANCE_BUDGET_PHRASE: &str = "balancing the budget and reducing the national debt";
const BALANCE_BUDGET_TAGS: [&str; 2] = ["fiscal_responsibility", "debt_reduction"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMode {
    /// Only organizations matching at least one concern.
    #[default]
    MatchedOnly,
    /// Every organization; unmatched ones are labelled General Interest.
    AllOrganizations,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct SuggestionRequest {
    #[builder(default)]
    pub concerns: Vec<UserConcern>,
    /// 0-100 tone slider; only affects relevance phrasing.
    #[builder(default = 50.0)]
    pub aggressiveness: f64,
    #[builder(default)]
    pub balance_budget: bool,
    #[builder(default)]
    pub mode: SuggestionMode,
}

/// One suggested organization, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedResource {
    pub name: String,
    pub url: String,
    pub description: String,
    pub icon: Option<String>,
    pub main_category: String,
    pub prominence: Prominence,
    pub focus_type: FocusType,
    pub org_type_tags: Vec<OrgType>,
    pub match_count: usize,
    pub matched_reasons: Vec<MatchedReason>,
    pub badges: Vec<BadgeType>,
    pub rank_class: RankClass,
    pub overall_relevance: String,
}

/// A concern with its derived tag set, in derivation order.
struct ConcernTags {
    description: String,
    action: FundingAction,
    tags: Vec<AdvocacyTag>,
    is_budget: bool,
}

impl ConcernTags {
    fn from_concern(concern: &UserConcern) -> Self {
        let action = concern.action();
        Self {
            description: concern.description.clone(),
            action,
            tags: derive_tags(&concern.id, action),
            is_budget: false,
        }
    }

    fn balance_budget() -> Self {
        Self {
            description: BALANCE_BUDGET_DESCRIPTION.to_string(),
            action: FundingAction::Review,
            tags: BALANCE_BUDGET_TAGS.iter().map(|t| AdvocacyTag::cause(*t)).collect(),
            is_budget: true,
        }
    }

    /// First of this concern's tags the organization carries.
    fn first_match<'a>(&'a self, entry: &OrganizationEntry) -> Option<&'a AdvocacyTag> {
        self.tags.iter().find(|tag| entry.has_tag(tag))
    }

    fn reason_for(&self, tag: &AdvocacyTag) -> MatchedReason {
        let mut reason = explain(tag, &self.description, self.action);
        if self.is_budget {
            reason.original_concern = BALANCE_BUDGET_PHRASE.to_string();
        }
        reason
    }
}

/// Per-organization match outcome before ranking.
struct Candidate<'a> {
    index: usize,
    entry: &'a OrganizationEntry,
    reasons: Vec<MatchedReason>,
    budget_matched: bool,
}

impl Candidate<'_> {
    fn match_count(&self) -> usize {
        self.reasons.len()
    }
}

/// Matches user concerns against the catalog and labels the results.
///
/// Holds no per-request state; one engine serves concurrent requests.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    catalog: Arc<Catalog>,
    max_suggestions: usize,
}

impl SuggestionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    /// Compute suggestions for one request.
    ///
    /// Matching and reasons are deterministic; `rng` only drives descriptive
    /// badge selection.
    pub fn suggest(&self, request: &SuggestionRequest, rng: &mut impl Rng) -> Vec<SuggestedResource> {
        let concerns = collect_concerns(request);
        let user_tags: HashSet<&AdvocacyTag> =
            concerns.iter().flat_map(|c| c.tags.iter()).collect();

        let mode = if concerns.is_empty() {
            SuggestionMode::AllOrganizations
        } else {
            request.mode
        };

        let indices: BTreeSet<usize> = match mode {
            SuggestionMode::AllOrganizations => (0..self.catalog.len()).collect(),
            SuggestionMode::MatchedOnly => user_tags
                .iter()
                .flat_map(|tag| self.catalog.entries_with_tag(tag).iter().copied())
                .collect(),
        };

        let mut seen_urls: HashSet<&str> = HashSet::new();
        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        for index in indices {
            let Some(entry) = self.catalog.get(index) else {
                continue;
            };
            if !seen_urls.insert(entry.url.as_str()) {
                continue;
            }
            let candidate = match_entry(index, entry, &concerns);
            if mode == SuggestionMode::MatchedOnly && candidate.match_count() == 0 {
                continue;
            }
            candidates.push(candidate);
        }

        let max_match_count = candidates.iter().map(Candidate::match_count).max().unwrap_or(0);

        // Badge diversification depends on this order.
        candidates.sort_by(|a, b| {
            b.match_count()
                .cmp(&a.match_count())
                .then(a.index.cmp(&b.index))
        });

        let tone = Tone::from_aggressiveness(request.aggressiveness);
        let mut tally = BadgeTally::new();
        let mut results: Vec<SuggestedResource> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let match_count = candidate.match_count();
            let rank = RankClass::classify(match_count, max_match_count);
            let badges = assign_badges(
                candidate.entry,
                match_count,
                rank,
                concerns.len(),
                &tally,
                rng,
            );
            tally.record(&candidate.entry.url, &badges);

            let overall_relevance =
                overall_relevance(&candidate.reasons, candidate.budget_matched, tone);
            results.push(to_resource(
                candidate.entry,
                candidate.reasons,
                badges,
                rank,
                overall_relevance,
            ));
        }

        sort_for_display(&mut results);
        results.truncate(self.max_suggestions);

        debug!(
            concerns = concerns.len(),
            tags = user_tags.len(),
            suggestions = results.len(),
            max_match_count,
            mode = ?mode,
            "Computed suggestions"
        );

        results
    }
}

/// Concerns deduplicated by id, plus the budget concern when requested.
fn collect_concerns(request: &SuggestionRequest) -> Vec<ConcernTags> {
    let mut ids: HashSet<String> = HashSet::new();
    let mut concerns: Vec<ConcernTags> = request
        .concerns
        .iter()
        .filter(|c| ids.insert(c.id.trim().to_lowercase()))
        .map(ConcernTags::from_concern)
        .collect();

    if request.balance_budget {
        concerns.push(ConcernTags::balance_budget());
    }
    concerns
}

fn match_entry<'a>(index: usize, entry: &'a OrganizationEntry, concerns: &[ConcernTags]) -> Candidate<'a> {
    let mut reasons = Vec::new();
    let mut budget_matched = false;

    for concern in concerns {
        if let Some(tag) = concern.first_match(entry) {
            budget_matched |= concern.is_budget;
            reasons.push(concern.reason_for(tag));
        }
    }

    Candidate {
        index,
        entry,
        reasons,
        budget_matched,
    }
}

fn to_resource(
    entry: &OrganizationEntry,
    matched_reasons: Vec<MatchedReason>,
    badges: Vec<BadgeType>,
    rank_class: RankClass,
    overall_relevance: String,
) -> SuggestedResource {
    SuggestedResource {
        name: entry.name.clone(),
        url: entry.url.clone(),
        description: entry.description.clone(),
        icon: entry.icon.clone(),
        main_category: entry.main_category.clone(),
        prominence: entry.prominence,
        focus_type: entry.focus_type,
        org_type_tags: entry.org_type_tags.clone(),
        match_count: matched_reasons.len(),
        matched_reasons,
        badges,
        rank_class,
        overall_relevance,
    }
}

/// Match count desc, then prominence high→low, then name.
pub fn sort_for_display(results: &mut [SuggestedResource]) {
    results.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then(a.prominence.rank().cmp(&b.prominence.rank()))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// One-sentence summary of why an organization showed up.
pub fn overall_relevance(reasons: &[MatchedReason], budget_matched: bool, tone: Tone) -> String {
    let verb = match tone {
        Tone::Kind => "may interest you given",
        Tone::Concerned => "aligns well with",
        Tone::Stern | Tone::Angry => "strongly aligns with",
    };

    let budget_count = usize::from(budget_matched);
    let specific: Vec<&MatchedReason> = reasons
        .iter()
        .filter(|r| r.original_concern != BALANCE_BUDGET_PHRASE)
        .collect();

    let Some(first) = specific.first() else {
        if budget_matched {
            return format!("This organization {verb} your priority of {BALANCE_BUDGET_PHRASE}.");
        }
        return "An organization working on federal spending issues you may care about."
            .to_string();
    };

    let mut sentence = format!(
        "This organization {verb} your concern about {}.",
        first.original_concern
    );

    let others = reasons.len() - 1 - budget_count;
    if others > 0 {
        let plural = if others == 1 { "" } else { "s" };
        sentence.push_str(&format!(" It also addresses {others} other concern{plural}."));
    }
    if budget_matched {
        sentence.push_str(" It also champions fiscal responsibility.");
    }
    sentence
}
