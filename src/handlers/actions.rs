use crate::config::Config;
use crate::error::AppError;
use crate::models::actions::ActionResponse;
use crate::models::scores::ScoreSubmission;
use crate::services::{decks, scores};
use crate::store::ScoreStore;
use ntex::util::Bytes;
use ntex::web::{self, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;

type Params = web::types::Query<HashMap<String, String>>;

fn to_data<T: serde::Serialize>(value: T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

pub(crate) fn respond(
    action: Option<String>,
    params: HashMap<String, String>,
    result: Result<serde_json::Value, AppError>,
) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(&ActionResponse::ok(action, params, data)),
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!(error = %e, action = ?action, "Request failed");
            } else {
                tracing::warn!(error = %e, action = ?action, "Request rejected");
            }
            HttpResponse::build(e.status()).json(&ActionResponse::failed(
                action,
                params,
                e.public_message(),
            ))
        }
    }
}

pub async fn get_action(
    store: web::types::State<Arc<ScoreStore>>,
    config: web::types::State<Arc<Config>>,
    query: Params,
) -> HttpResponse {
    let params = query.into_inner();
    let action = params.get("action").cloned();

    let result = match action.as_deref() {
        Some("get_scores") => {
            scores::get_deck_scores(&store, params.get("deck").map(String::as_str)).and_then(to_data)
        }
        Some("get_decks") => decks::load_card_library(&config.card_library_path).await,
        other => Err(AppError::BadRequest(format!(
            "Invalid action. Provided: {}",
            other.unwrap_or("none")
        ))),
    };

    respond(action, params, result)
}

pub async fn post_action(
    store: web::types::State<Arc<ScoreStore>>,
    query: Params,
    body: Bytes,
) -> HttpResponse {
    let params = query.into_inner();
    let action = params.get("action").cloned();

    let result = match action.as_deref() {
        Some("post_score") => {
            scores::submit_score(&store, ScoreSubmission::from_body(&body)).and_then(to_data)
        }
        other => Err(AppError::BadRequest(format!(
            "Unknown action: {}",
            other.unwrap_or("none")
        ))),
    };

    respond(action, params, result)
}
