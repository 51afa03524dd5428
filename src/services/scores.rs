use crate::error::AppError;
use crate::models::scores::*;
use crate::store::{normalize_deck_id, ScoreStore};
use crate::validation;

/// Score to record for a submission: `correctPercent` when it is a number,
/// otherwise `runningTotalScore` (a number or numeric text), otherwise zero.
fn submitted_score(req: &ScoreSubmission) -> f64 {
    req.correct_percent
        .as_ref()
        .and_then(|v| v.as_f64())
        .or_else(|| match req.running_total_score.as_ref()? {
            serde_json::Value::String(s) => s.trim().parse().ok(),
            other => other.as_f64(),
        })
        .unwrap_or(0.0)
}

pub fn submit_score(store: &ScoreStore, req: ScoreSubmission) -> Result<(Deck, Score), AppError> {
    let deck_name = validation::truthy_text(req.deck_id.as_ref());
    let unique_id = validation::truthy_text(req.performance_record_id.as_ref());
    let (deck_name, unique_id) = match (deck_name, unique_id) {
        (Some(deck), Some(id)) => (deck, id),
        _ => {
            tracing::warn!(?req, "Score submission missing required fields");
            return Err(AppError::BadRequest(
                "Missing required fields: deckId and performanceRecordId".into(),
            ));
        }
    };
    let player_name =
        validation::validate_player_name(validation::truthy_text(req.player.as_ref()).as_deref());
    let score = submitted_score(&req);

    tracing::info!(
        player = %player_name,
        deck = %deck_name,
        unique_id = %unique_id,
        score,
        "Logging score"
    );

    let upsert = store.upsert_score(&deck_name, score, &unique_id, &player_name)?;

    if upsert.created_deck {
        tracing::info!(deck = %deck_name, slug = %upsert.deck.deck_id, "Created new deck");
    }
    if upsert.created_score {
        tracing::info!(player = %player_name, "Added new score");
    } else {
        tracing::info!(player = %player_name, "Updated existing score");
    }

    Ok(upsert.into_pair())
}

pub fn get_deck_scores(store: &ScoreStore, deck: Option<&str>) -> Result<Vec<Score>, AppError> {
    let deck = validation::required_param(deck, "deck")?;
    let scores = store.top_scores(deck)?;
    if scores.is_empty() {
        tracing::warn!(
            deck,
            normalized = %normalize_deck_id(deck),
            "No scores found for deck"
        );
    }
    Ok(scores)
}
