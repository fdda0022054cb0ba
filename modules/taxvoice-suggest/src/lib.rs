pub mod badges;
pub mod catalog;
pub mod engine;
pub mod filter;
pub mod reason;
pub mod tags;

pub use badges::{assign_badges, BadgeTally, BadgeType, RankClass, MAX_BADGES};
pub use catalog::{BadgeProfile, Catalog, FocusType, OrgType, OrganizationEntry, Prominence};
pub use engine::{SuggestedResource, SuggestionEngine, SuggestionMode, SuggestionRequest};
pub use filter::{reveal, FilterFacets, ResourceFilter, DEFAULT_PAGE_SIZE};
pub use reason::{explain, generate_matched_reason, MatchedReason, ReasonType};
pub use tags::{derive_tags, AdvocacyTag};
