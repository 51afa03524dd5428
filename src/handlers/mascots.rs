use crate::config::Config;
use crate::error::AppError;
use crate::models::mascots::MascotList;
use crate::services::mascots as service;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn list_mascots(
    config: web::types::State<Arc<Config>>,
) -> Result<HttpResponse, AppError> {
    let mascots = service::list_mascots(&config.mascots_dir).await?;
    Ok(HttpResponse::Ok().json(&MascotList {
        success: true,
        mascots,
    }))
}

pub async fn get_mascot_settings(
    config: web::types::State<Arc<Config>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let folder = path.into_inner();
    let settings = service::mascot_settings(&config.mascots_dir, &folder).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(settings))
}

pub async fn get_mascot_media(
    config: web::types::State<Arc<Config>>,
    path: web::types::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (mascot, relative) = path.into_inner();
    let media = service::mascot_media(&config.mascots_dir, &mascot, &relative).await?;
    Ok(HttpResponse::Ok()
        .content_type(media.content_type)
        .body(media.bytes))
}
