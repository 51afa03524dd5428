use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One scoreboard bucket, keyed by the normalized slug of its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub deck_id: String,
    pub name: String,
}

/// A player's latest result for one performance record.
///
/// `deck_id` references [`Deck::id`], not the slug.
///
/// Older score files hold `uniqueId`, `score` and `playerName` exactly as the
/// client sent them, so those fields also load from numbers, booleans and
/// numeric text. They are written back in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: String,
    pub deck_id: String,
    #[serde(deserialize_with = "scalar_text")]
    pub unique_id: String,
    #[serde(deserialize_with = "numeric")]
    pub score: f64,
    #[serde(deserialize_with = "scalar_text")]
    pub player_name: String,
    pub created_at: i64,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

fn numeric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("score {} out of range", n))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| D::Error::custom(format!("non-numeric score {:?}", s))),
        other => Err(D::Error::custom(format!("expected a numeric score, found {}", other))),
    }
}

/// The whole on-disk score file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDocument {
    #[serde(default)]
    pub decks: Vec<Deck>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

/// Body of a `post_score` action as sent by the flashcard client.
///
/// Loosely typed on purpose: the client sends ids and names as strings or
/// numbers and may send a non-numeric `correctPercent`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub deck_id: Option<serde_json::Value>,
    pub performance_record_id: Option<serde_json::Value>,
    pub player: Option<serde_json::Value>,
    pub correct_percent: Option<serde_json::Value>,
    pub running_total_score: Option<serde_json::Value>,
}

impl ScoreSubmission {
    /// Parse a raw request body. Anything that is not a JSON object, including
    /// an empty body, yields an empty submission.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value).unwrap_or_default()
            }
            _ => ScoreSubmission::default(),
        }
    }
}
