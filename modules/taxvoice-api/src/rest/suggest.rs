use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use taxvoice_common::{validate_aggressiveness, SelectedItem, TaxVoiceError, UserConcern};
use taxvoice_suggest::{
    reveal, FilterFacets, ResourceFilter, SuggestedResource, SuggestionMode, SuggestionRequest,
    DEFAULT_PAGE_SIZE,
};

use super::{error_response, json_body};
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    selected_items: Vec<SelectedItem>,
    aggressiveness: f64,
    #[serde(default)]
    balance_budget_checked: bool,
    #[serde(default)]
    show_all: bool,
    #[serde(default)]
    filter: ResourceFilter,
    visible_pages: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    suggestions: Vec<SuggestedResource>,
    facets: FilterFacets,
    /// Count after filtering, before paging.
    total: usize,
}

impl SuggestionsRequest {
    fn to_request(&self) -> Result<SuggestionRequest, TaxVoiceError> {
        let aggressiveness = validate_aggressiveness(self.aggressiveness)?;
        let concerns = self
            .selected_items
            .iter()
            .cloned()
            .map(SelectedItem::into_concern)
            .collect::<Result<Vec<UserConcern>, _>>()?;

        let mode = if self.show_all {
            SuggestionMode::AllOrganizations
        } else {
            SuggestionMode::MatchedOnly
        };

        Ok(SuggestionRequest::builder()
            .concerns(concerns)
            .aggressiveness(aggressiveness)
            .balance_budget(self.balance_budget_checked)
            .mode(mode)
            .build())
    }
}

pub async fn api_suggestions(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SuggestionsRequest>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let request = match body.to_request() {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };

    let mut rng = state.rng();
    let suggestions = state.engine.suggest(&request, &mut rng);
    let facets = FilterFacets::collect(&suggestions);
    let filtered = body.filter.apply(suggestions);
    let total = filtered.len();

    let suggestions = match body.visible_pages {
        Some(pages) => reveal(&filtered, DEFAULT_PAGE_SIZE, pages).to_vec(),
        None => filtered,
    };

    info!(
        concerns = request.concerns.len(),
        balance_budget = request.balance_budget,
        total,
        returned = suggestions.len(),
        "Suggestions computed"
    );

    Json(SuggestionsResponse {
        suggestions,
        facets,
        total,
    })
    .into_response()
}
