use crate::config::Config;
use crate::error::AppError;
use crate::handlers::actions::respond;
use crate::models::actions::AnnounceQuery;
use crate::services::decks as service;
use crate::validation;
use ntex::web::{self, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;

pub async fn get_deck(
    config: web::types::State<Arc<Config>>,
    query: web::types::Query<HashMap<String, String>>,
) -> HttpResponse {
    let params = query.into_inner();
    let result = match validation::required_param(params.get("slug").map(String::as_str), "slug") {
        Ok(slug) => service::load_deck(&config.decks_dir, slug).await,
        Err(e) => Err(e),
    };
    respond(None, params, result)
}

pub async fn announce(
    query: web::types::Query<AnnounceQuery>,
) -> Result<HttpResponse, AppError> {
    let username = query
        .username
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing username".into()))?;
    tracing::info!(username, "Client connected");
    Ok(HttpResponse::Ok().json(&serde_json::json!({
        "success": true,
        "message": format!("Hello {}, connection established.", username),
    })))
}
