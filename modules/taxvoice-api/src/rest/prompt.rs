use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use tracing::info;

use super::{error_response, json_body};
use crate::prompt::{build_prompt, PromptInput, PromptItem};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptRequest {
    selected_items_with_slider_values: Vec<PromptItem>,
    aggressiveness: f64,
    user_name: Option<String>,
    user_location: Option<String>,
    #[serde(default)]
    balance_budget_preference: bool,
}

pub async fn api_generate_ai_prompt(
    body: Result<Json<GeneratePromptRequest>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let input = PromptInput {
        items: body.selected_items_with_slider_values,
        aggressiveness: body.aggressiveness,
        user_name: body.user_name,
        user_location: body.user_location,
        balance_budget: body.balance_budget_preference,
    };
    if let Err(e) = input.validate() {
        return error_response(e);
    }

    let prompt = build_prompt(&input);
    info!(
        items = input.items.len(),
        balance_budget = input.balance_budget,
        "AI prompt generated"
    );

    Json(serde_json::json!({ "prompt": prompt })).into_response()
}
