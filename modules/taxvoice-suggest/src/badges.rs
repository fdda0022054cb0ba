use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{BadgeProfile, FocusType, OrgType, OrganizationEntry, Prominence};

/// Hard cap on badges shown per organization.
pub const MAX_BADGES: usize = 3;

/// Display label summarizing why or how an organization is relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BadgeType {
    #[serde(rename = "Best Match")]
    BestMatch,
    #[serde(rename = "Top Match")]
    TopMatch,
    #[serde(rename = "Your Match")]
    YourMatch,
    #[serde(rename = "High Impact")]
    HighImpact,
    #[serde(rename = "Data-Driven")]
    DataDriven,
    #[serde(rename = "Legal Advocacy")]
    LegalAdvocacy,
    #[serde(rename = "Established Voice")]
    EstablishedVoice,
    #[serde(rename = "Grassroots Power")]
    GrassrootsPower,
    #[serde(rename = "Community Pick")]
    CommunityPick,
    #[serde(rename = "Niche Focus")]
    NicheFocus,
    #[serde(rename = "Broad Focus")]
    BroadFocus,
    #[serde(rename = "General Interest")]
    GeneralInterest,
}

impl BadgeType {
    /// Global display priority, lower first.
    pub fn priority(self) -> u8 {
        match self {
            BadgeType::BestMatch => 1,
            BadgeType::TopMatch => 2,
            BadgeType::YourMatch => 3,
            BadgeType::HighImpact => 4,
            BadgeType::DataDriven => 5,
            BadgeType::LegalAdvocacy => 6,
            BadgeType::EstablishedVoice => 7,
            BadgeType::GrassrootsPower => 8,
            BadgeType::CommunityPick => 9,
            BadgeType::NicheFocus => 10,
            BadgeType::BroadFocus => 11,
            BadgeType::GeneralInterest => 12,
        }
    }

    pub fn is_rank(self) -> bool {
        matches!(
            self,
            BadgeType::BestMatch | BadgeType::TopMatch | BadgeType::YourMatch
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            BadgeType::BestMatch => "Best Match",
            BadgeType::TopMatch => "Top Match",
            BadgeType::YourMatch => "Your Match",
            BadgeType::HighImpact => "High Impact",
            BadgeType::DataDriven => "Data-Driven",
            BadgeType::LegalAdvocacy => "Legal Advocacy",
            BadgeType::EstablishedVoice => "Established Voice",
            BadgeType::GrassrootsPower => "Grassroots Power",
            BadgeType::CommunityPick => "Community Pick",
            BadgeType::NicheFocus => "Niche Focus",
            BadgeType::BroadFocus => "Broad Focus",
            BadgeType::GeneralInterest => "General Interest",
        }
    }
}

impl std::fmt::Display for BadgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl OrgType {
    /// Descriptive badge an org type earns, if any.
    pub fn badge(self) -> Option<BadgeType> {
        match self {
            OrgType::Legal => Some(BadgeType::LegalAdvocacy),
            OrgType::Grassroots => Some(BadgeType::GrassrootsPower),
            OrgType::Established => Some(BadgeType::EstablishedVoice),
            OrgType::Activism => Some(BadgeType::HighImpact),
            OrgType::ThinkTank | OrgType::DataDriven => Some(BadgeType::DataDriven),
            OrgType::DirectService => Some(BadgeType::CommunityPick),
            OrgType::Research => None,
        }
    }
}

// --- Rank classes ---

/// Relative match strength within one result set. At most one per organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankClass {
    Best,
    Top,
    Your,
    #[default]
    None,
}

impl RankClass {
    /// Classify a match count against the best count in the result set.
    ///
    /// Best needs the maximum and at least two concerns; any other multi-concern
    /// match is Top; a single concern is Your.
    pub fn classify(match_count: usize, max_match_count: usize) -> Self {
        if match_count >= 2 && match_count == max_match_count {
            RankClass::Best
        } else if match_count >= 2 {
            RankClass::Top
        } else if match_count == 1 {
            RankClass::Your
        } else {
            RankClass::None
        }
    }

    pub fn badge(self) -> Option<BadgeType> {
        match self {
            RankClass::Best => Some(BadgeType::BestMatch),
            RankClass::Top => Some(BadgeType::TopMatch),
            RankClass::Your => Some(BadgeType::YourMatch),
            RankClass::None => None,
        }
    }
}

// --- Tally ---

/// Descriptive badges already handed out earlier in the same pass, keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct BadgeTally {
    by_org: HashMap<String, HashSet<BadgeType>>,
}

impl BadgeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, org_url: &str, badges: &[BadgeType]) {
        let set = self.by_org.entry(org_url.to_string()).or_default();
        set.extend(badges.iter().copied().filter(|b| !b.is_rank()));
    }

    /// How many organizations already carry `badge`.
    pub fn usage(&self, badge: BadgeType) -> usize {
        self.by_org.values().filter(|set| set.contains(&badge)).count()
    }

    pub fn badges_for(&self, org_url: &str) -> Option<&HashSet<BadgeType>> {
        self.by_org.get(org_url)
    }

    pub fn len(&self) -> usize {
        self.by_org.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_org.is_empty()
    }
}

// --- Assignment ---

/// Descriptive badges an organization qualifies for, deduplicated, in
/// attribute order.
pub fn eligible_badges(entry: &OrganizationEntry, match_count: usize) -> Vec<BadgeType> {
    let mut pool = Vec::new();
    let mut push = |badge: BadgeType| {
        if !pool.contains(&badge) {
            pool.push(badge);
        }
    };

    if entry.prominence == Prominence::High {
        push(BadgeType::HighImpact);
    }
    match entry.focus_type {
        FocusType::Broad => push(BadgeType::BroadFocus),
        FocusType::Niche => push(BadgeType::NicheFocus),
    }
    for badge in entry.org_type_tags.iter().filter_map(|t| t.badge()) {
        push(badge);
    }
    if entry.badge_profile() == BadgeProfile::CommunityFocused && match_count > 0 {
        push(BadgeType::CommunityPick);
    }

    pool
}

/// Pick at most [`MAX_BADGES`] badges for one organization.
///
/// Descriptive badges are drawn from the eligible pool preferring badges that
/// fewer organizations in `tally` already carry, then by priority, then at
/// random. The caller records the result in the tally before moving on.
pub fn assign_badges(
    entry: &OrganizationEntry,
    match_count: usize,
    rank: RankClass,
    user_concerns_size: usize,
    tally: &BadgeTally,
    rng: &mut impl Rng,
) -> Vec<BadgeType> {
    if match_count == 0 {
        return vec![BadgeType::GeneralInterest];
    }

    let mut badges: Vec<BadgeType> = rank.badge().into_iter().collect();

    let (min, max) = entry.badge_profile().range();
    let picked = rng.random_range(min..=max);
    let target = picked.min(MAX_BADGES - badges.len());

    let mut pool: Vec<(BadgeType, usize, u8, u32)> = eligible_badges(entry, match_count)
        .into_iter()
        .filter(|b| !badges.contains(b))
        .map(|b| (b, tally.usage(b), b.priority(), rng.random::<u32>()))
        .collect();
    pool.sort_by_key(|&(_, usage, priority, tiebreak)| (usage, priority, tiebreak));

    for &(badge, ..) in pool.iter().take(target) {
        if badges.len() >= MAX_BADGES {
            break;
        }
        badges.push(badge);
    }

    if badges.is_empty() {
        let fallback = if user_concerns_size == 0 {
            None
        } else {
            pool.first().map(|&(badge, ..)| badge)
        };
        badges.push(fallback.unwrap_or(BadgeType::GeneralInterest));
    }

    badges.sort_by_key(|b| b.priority());
    badges.truncate(MAX_BADGES);
    badges
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::tags::AdvocacyTag;

    fn org(
        prominence: Prominence,
        focus: FocusType,
        types: &[OrgType],
        profile: Option<BadgeProfile>,
    ) -> OrganizationEntry {
        OrganizationEntry {
            name: "Test Org".to_string(),
            url: "https://test.org/".to_string(),
            description: String::new(),
            icon: None,
            main_category: "Test".to_string(),
            prominence,
            focus_type: focus,
            org_type_tags: types.to_vec(),
            advocacy_tags: vec![AdvocacyTag::parse("peace")],
            intended_badge_profile: profile,
        }
    }

    fn descriptive(badges: &[BadgeType]) -> usize {
        badges.iter().filter(|b| !b.is_rank()).count()
    }

    #[test]
    fn rank_classes_are_monotonic_and_exclusive() {
        assert_eq!(RankClass::classify(3, 3), RankClass::Best);
        assert_eq!(RankClass::classify(2, 3), RankClass::Top);
        assert_eq!(RankClass::classify(1, 3), RankClass::Your);
        assert_eq!(RankClass::classify(1, 1), RankClass::Your);
        assert_eq!(RankClass::classify(0, 3), RankClass::None);
    }

    #[test]
    fn pool_is_deduplicated() {
        let entry = org(
            Prominence::High,
            FocusType::Broad,
            &[OrgType::Activism, OrgType::ThinkTank, OrgType::DataDriven],
            None,
        );
        assert_eq!(
            eligible_badges(&entry, 1),
            vec![BadgeType::HighImpact, BadgeType::BroadFocus, BadgeType::DataDriven]
        );
    }

    #[test]
    fn community_pick_needs_a_match() {
        let entry = org(
            Prominence::Low,
            FocusType::Niche,
            &[OrgType::Research],
            Some(BadgeProfile::CommunityFocused),
        );
        assert!(eligible_badges(&entry, 1).contains(&BadgeType::CommunityPick));
        assert!(!eligible_badges(&entry, 0).contains(&BadgeType::CommunityPick));
    }

    #[test]
    fn unmatched_orgs_get_general_interest_only() {
        let entry = org(Prominence::High, FocusType::Broad, &[OrgType::Legal], None);
        let mut rng = StdRng::seed_from_u64(7);
        let badges = assign_badges(&entry, 0, RankClass::None, 0, &BadgeTally::new(), &mut rng);
        assert_eq!(badges, vec![BadgeType::GeneralInterest]);
    }

    #[test]
    fn badge_bounds_hold_across_seeds() {
        let profiles = [
            None,
            Some(BadgeProfile::SingleProminent),
            Some(BadgeProfile::DoubleDiverse),
            Some(BadgeProfile::TripleFocused),
            Some(BadgeProfile::CommunityFocused),
        ];
        let ranks = [RankClass::Best, RankClass::Top, RankClass::Your];

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for profile in profiles {
                for rank in ranks {
                    let entry = org(
                        Prominence::High,
                        FocusType::Niche,
                        &[OrgType::Legal, OrgType::Grassroots, OrgType::Established],
                        profile,
                    );
                    let badges =
                        assign_badges(&entry, 2, rank, 3, &BadgeTally::new(), &mut rng);

                    assert!(!badges.is_empty());
                    assert!(badges.len() <= MAX_BADGES);
                    assert_eq!(badges.iter().filter(|b| b.is_rank()).count(), 1);
                    assert_eq!(badges[0], rank.badge().unwrap());

                    let (_, max) = entry.badge_profile().range();
                    assert!(descriptive(&badges) <= max);
                    if profile == Some(BadgeProfile::SingleProminent) {
                        assert!(descriptive(&badges) <= 1);
                    }
                }
            }
        }
    }

    #[test]
    fn profile_counts_descriptive_badges_beside_the_rank() {
        let single = org(
            Prominence::High,
            FocusType::Niche,
            &[OrgType::Legal, OrgType::Grassroots],
            Some(BadgeProfile::SingleProminent),
        );
        let triple = org(
            Prominence::High,
            FocusType::Niche,
            &[OrgType::Legal, OrgType::Grassroots],
            Some(BadgeProfile::TripleFocused),
        );

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            for rank in [RankClass::Best, RankClass::Top, RankClass::Your] {
                let badges = assign_badges(&single, 2, rank, 3, &BadgeTally::new(), &mut rng);
                assert_eq!(descriptive(&badges), 1, "{badges:?}");
                assert_eq!(badges.len(), 2);

                // Three-badge cap leaves room for two beside the rank badge.
                let badges = assign_badges(&triple, 2, rank, 3, &BadgeTally::new(), &mut rng);
                assert_eq!(descriptive(&badges), 2, "{badges:?}");
            }

            let badges =
                assign_badges(&triple, 1, RankClass::None, 1, &BadgeTally::new(), &mut rng);
            assert!((2..=3).contains(&descriptive(&badges)), "{badges:?}");
        }
    }

    #[test]
    fn badges_are_sorted_by_priority() {
        let entry = org(
            Prominence::High,
            FocusType::Broad,
            &[OrgType::Grassroots, OrgType::Legal],
            Some(BadgeProfile::TripleFocused),
        );
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let badges =
                assign_badges(&entry, 1, RankClass::None, 1, &BadgeTally::new(), &mut rng);
            let priorities: Vec<u8> = badges.iter().map(|b| b.priority()).collect();
            let mut sorted = priorities.clone();
            sorted.sort();
            assert_eq!(priorities, sorted);
        }
    }

    #[test]
    fn under_used_badges_are_preferred() {
        let entry = org(
            Prominence::High,
            FocusType::Broad,
            &[OrgType::Legal],
            Some(BadgeProfile::SingleProminent),
        );
        let mut tally = BadgeTally::new();
        tally.record("https://a.org/", &[BadgeType::HighImpact, BadgeType::BroadFocus]);
        tally.record("https://b.org/", &[BadgeType::HighImpact]);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let badges = assign_badges(&entry, 1, RankClass::None, 1, &tally, &mut rng);
            assert_eq!(badges, vec![BadgeType::LegalAdvocacy]);
        }
    }

    #[test]
    fn matched_org_is_never_unlabeled() {
        let entry = org(
            Prominence::Low,
            FocusType::Niche,
            &[],
            Some(BadgeProfile::SingleProminent),
        );
        let mut rng = StdRng::seed_from_u64(1);
        let badges = assign_badges(&entry, 1, RankClass::None, 2, &BadgeTally::new(), &mut rng);
        assert_eq!(badges, vec![BadgeType::NicheFocus]);
    }

    #[test]
    fn tally_ignores_rank_badges() {
        let mut tally = BadgeTally::new();
        tally.record("https://a.org/", &[BadgeType::BestMatch, BadgeType::HighImpact]);
        assert_eq!(tally.usage(BadgeType::BestMatch), 0);
        assert_eq!(tally.usage(BadgeType::HighImpact), 1);
        assert_eq!(tally.len(), 1);
    }

    #[test]
    fn badges_serialize_as_labels() {
        let json = serde_json::to_string(&vec![BadgeType::BestMatch, BadgeType::DataDriven]).unwrap();
        assert_eq!(json, r#"["Best Match","Data-Driven"]"#);
        let back: BadgeType = serde_json::from_str("\"General Interest\"").unwrap();
        assert_eq!(back, BadgeType::GeneralInterest);
    }
}
