use crate::error::AppError;
use crate::validation;
use std::io::ErrorKind;
use std::path::Path;

/// Load one deck file from `decks_dir`, e.g. `IntroToPharmacy1/groupA.cards`.
pub async fn load_deck(decks_dir: &Path, slug: &str) -> Result<serde_json::Value, AppError> {
    let path = validation::safe_join(decks_dir, slug).map_err(|e| {
        tracing::warn!(slug, "Rejected deck slug");
        e
    })?;
    tracing::debug!(path = %path.display(), "Reading deck");

    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Deck not found for slug: {}", slug)));
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&contents).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Deck file is not valid JSON");
        AppError::Internal(format!("Invalid deck file {}: {}", path.display(), e))
    })
}

/// Load the deck catalog.
pub async fn load_card_library(path: &Path) -> Result<serde_json::Value, AppError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read card library");
        AppError::from(e)
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Card library is not valid JSON");
        AppError::Internal(format!("Invalid card library: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_load_deck() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("IntroToPharmacy1")).unwrap();
        fs::write(
            dir.path().join("IntroToPharmacy1/groupA.cards"),
            r#"{"cards":[{"front":"Aspirin","back":"NSAID"}]}"#,
        )
        .unwrap();

        let deck = load_deck(dir.path(), "IntroToPharmacy1/groupA.cards").await.unwrap();
        assert_eq!(deck["cards"][0]["front"], "Aspirin");
    }

    #[tokio::test]
    async fn test_load_deck_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.cards"), "{").unwrap();

        assert!(matches!(load_deck(dir.path(), "missing.cards").await, Err(AppError::NotFound(_))));
        assert!(matches!(load_deck(dir.path(), "../scores.json").await, Err(AppError::BadRequest(_))));
        assert!(matches!(load_deck(dir.path(), "broken.cards").await, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_load_card_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardLibrary.json");
        fs::write(&path, r#"[{"name":"Intro To Pharmacy","slug":"IntroToPharmacy1/groupA.cards"}]"#).unwrap();

        let library = load_card_library(&path).await.unwrap();
        assert_eq!(library[0]["name"], "Intro To Pharmacy");
        assert!(load_card_library(&dir.path().join("nope.json")).await.is_err());
    }
}
