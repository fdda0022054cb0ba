use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::badges::{BadgeType, RankClass};
use crate::catalog::OrgType;
use crate::engine::SuggestedResource;

/// Suggestions shown per "show more" step.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// User-selected narrowing of a suggestion list.
///
/// An empty set places no constraint on its dimension. Values within one
/// dimension are alternatives; dimensions must all hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceFilter {
    pub categories: BTreeSet<String>,
    pub org_types: BTreeSet<OrgType>,
    pub badges: BTreeSet<BadgeType>,
    pub rank_classes: BTreeSet<RankClass>,
}

impl ResourceFilter {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.org_types.is_empty()
            && self.badges.is_empty()
            && self.rank_classes.is_empty()
    }

    pub fn matches(&self, resource: &SuggestedResource) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.contains(&resource.main_category);
        let org_type_ok = self.org_types.is_empty()
            || resource.org_type_tags.iter().any(|t| self.org_types.contains(t));
        let badge_ok =
            self.badges.is_empty() || resource.badges.iter().any(|b| self.badges.contains(b));
        let rank_ok =
            self.rank_classes.is_empty() || self.rank_classes.contains(&resource.rank_class);

        category_ok && org_type_ok && badge_ok && rank_ok
    }

    /// Keep matching resources, preserving order.
    pub fn apply(&self, resources: Vec<SuggestedResource>) -> Vec<SuggestedResource> {
        if self.is_empty() {
            return resources;
        }
        resources.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct values present in a result set, for rendering filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFacets {
    pub categories: Vec<String>,
    pub org_types: Vec<OrgType>,
    pub badges: Vec<BadgeType>,
    pub rank_classes: Vec<RankClass>,
}

impl FilterFacets {
    pub fn collect(resources: &[SuggestedResource]) -> Self {
        let mut categories = BTreeSet::new();
        let mut org_types = BTreeSet::new();
        let mut badges = BTreeSet::new();
        let mut rank_classes = BTreeSet::new();

        for resource in resources {
            categories.insert(resource.main_category.clone());
            org_types.extend(resource.org_type_tags.iter().copied());
            badges.extend(resource.badges.iter().copied());
            if resource.rank_class != RankClass::None {
                rank_classes.insert(resource.rank_class);
            }
        }

        Self {
            categories: categories.into_iter().collect(),
            org_types: org_types.into_iter().collect(),
            badges: badges.into_iter().collect(),
            rank_classes: rank_classes.into_iter().collect(),
        }
    }
}

/// The first `page_size * pages` items.
pub fn reveal<T>(items: &[T], page_size: usize, pages: usize) -> &[T] {
    let shown = page_size.saturating_mul(pages).min(items.len());
    &items[..shown]
}

/// Whether another "show more" step would reveal anything.
pub fn has_more(total: usize, page_size: usize, pages: usize) -> bool {
    page_size.saturating_mul(pages) < total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FocusType, Prominence};

    fn resource(
        name: &str,
        category: &str,
        types: &[OrgType],
        badges: &[BadgeType],
        rank: RankClass,
    ) -> SuggestedResource {
        SuggestedResource {
            name: name.to_string(),
            url: format!("https://{name}.org/"),
            description: String::new(),
            icon: None,
            main_category: category.to_string(),
            prominence: Prominence::Medium,
            focus_type: FocusType::Broad,
            org_type_tags: types.to_vec(),
            match_count: usize::from(rank != RankClass::None),
            matched_reasons: vec![],
            badges: badges.to_vec(),
            rank_class: rank,
            overall_relevance: String::new(),
        }
    }

    fn sample() -> Vec<SuggestedResource> {
        vec![
            resource(
                "a",
                "Health",
                &[OrgType::Grassroots],
                &[BadgeType::YourMatch, BadgeType::GrassrootsPower],
                RankClass::Your,
            ),
            resource(
                "b",
                "Peace",
                &[OrgType::Legal, OrgType::Research],
                &[BadgeType::LegalAdvocacy],
                RankClass::None,
            ),
            resource(
                "c",
                "Health",
                &[OrgType::ThinkTank],
                &[BadgeType::BestMatch, BadgeType::DataDriven],
                RankClass::Best,
            ),
        ]
    }

    fn names(resources: &[SuggestedResource]) -> Vec<&str> {
        resources.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = ResourceFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(sample()).len(), 3);
    }

    #[test]
    fn values_within_a_dimension_are_alternatives() {
        let filter = ResourceFilter {
            org_types: BTreeSet::from([OrgType::Grassroots, OrgType::Legal]),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(sample())), vec!["a", "b"]);
    }

    #[test]
    fn dimensions_must_all_hold() {
        let filter = ResourceFilter {
            categories: BTreeSet::from(["Health".to_string()]),
            rank_classes: BTreeSet::from([RankClass::Best]),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(sample())), vec!["c"]);
    }

    #[test]
    fn facets_are_sorted_and_distinct() {
        let facets = FilterFacets::collect(&sample());
        assert_eq!(facets.categories, vec!["Health", "Peace"]);
        assert_eq!(
            facets.badges,
            vec![
                BadgeType::BestMatch,
                BadgeType::YourMatch,
                BadgeType::DataDriven,
                BadgeType::LegalAdvocacy,
                BadgeType::GrassrootsPower,
            ]
        );
        assert_eq!(facets.rank_classes, vec![RankClass::Best, RankClass::Your]);
        assert_eq!(facets.org_types.len(), 4);
    }

    #[test]
    fn reveal_shows_whole_pages() {
        let items: Vec<u32> = (0..14).collect();
        assert_eq!(reveal(&items, DEFAULT_PAGE_SIZE, 1).len(), 6);
        assert_eq!(reveal(&items, DEFAULT_PAGE_SIZE, 2).len(), 12);
        assert_eq!(reveal(&items, DEFAULT_PAGE_SIZE, 3).len(), 14);
        assert!(reveal(&items, DEFAULT_PAGE_SIZE, 0).is_empty());
        assert!(has_more(14, DEFAULT_PAGE_SIZE, 2));
        assert!(!has_more(14, DEFAULT_PAGE_SIZE, 3));
    }

    #[test]
    fn filter_deserializes_with_missing_dimensions() {
        let filter: ResourceFilter =
            serde_json::from_str(r#"{"badges": ["High Impact"], "orgTypes": ["think-tank"]}"#)
                .unwrap();
        assert!(filter.categories.is_empty());
        assert!(filter.badges.contains(&BadgeType::HighImpact));
        assert!(filter.org_types.contains(&OrgType::ThinkTank));
    }
}
