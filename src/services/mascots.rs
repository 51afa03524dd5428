use crate::error::AppError;
use crate::models::mascots::MascotMedia;
use crate::validation;
use std::io::ErrorKind;
use std::path::Path;

const SETTINGS_FILE: &str = "mascot.settings";

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") | Some("settings") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Names of the mascot folders that carry a settings file, sorted.
pub async fn list_mascots(mascots_dir: &Path) -> Result<Vec<String>, AppError> {
    let mut entries = tokio::fs::read_dir(mascots_dir).await.map_err(|e| {
        tracing::error!(dir = %mascots_dir.display(), error = %e, "Failed to read mascots folder");
        AppError::from(e)
    })?;

    let mut mascots = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        if tokio::fs::try_exists(entry.path().join(SETTINGS_FILE)).await? {
            mascots.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    mascots.sort();
    Ok(mascots)
}

pub async fn mascot_settings(mascots_dir: &Path, folder: &str) -> Result<String, AppError> {
    validation::validate_path_segment(folder)
        .map_err(|_| AppError::BadRequest("Invalid mascot folder requested.".into()))?;

    let path = mascots_dir.join(folder).join(SETTINGS_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::NotFound("Mascot settings file not found.".into()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn mascot_media(
    mascots_dir: &Path,
    mascot: &str,
    relative: &str,
) -> Result<MascotMedia, AppError> {
    let checked = validation::validate_path_segment(mascot)
        .and_then(|()| validation::safe_join(&mascots_dir.join(mascot), relative));
    let path = match checked {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(mascot, relative, "Directory traversal attempt detected");
            return Err(e);
        }
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(MascotMedia {
            content_type: content_type_for(&path),
            bytes,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Mascot media not found");
            Err(AppError::NotFound("File not found.".into()))
        }
        Err(e) => Err(e.into()),
    }
}
