//! Flat-file score store.
//!
//! The whole store is one JSON document holding `decks` and `scores`. Every
//! operation reloads it from disk, and mutations hold `lock` across the
//! read-mutate-write sequence so concurrent submissions cannot clobber each
//! other. Writes go through a sibling temp file and a rename.

use crate::models::scores::{Deck, Score, ScoreDocument};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Maximum number of entries returned by [`ScoreStore::top_scores`].
pub const TOP_SCORES_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("score storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed score document at {path}: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode score document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of [`ScoreStore::upsert_score`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreUpsert {
    pub deck: Deck,
    pub score: Score,
    pub created_deck: bool,
    pub created_score: bool,
}

impl ScoreUpsert {
    pub fn into_pair(self) -> (Deck, Score) {
        (self.deck, self.score)
    }
}

pub struct ScoreStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ScoreStore {
    /// Open the store at `path`, creating or repairing the document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = ScoreStore {
            path: path.into(),
            lock: Mutex::new(()),
        };
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the document exists and has both collections. Idempotent.
    ///
    /// An empty or `null` file is treated like a missing one. Content that is
    /// not a score document is left alone and reported.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let _guard = self.guard();

        let document = match fs::read_to_string(&self.path) {
            Ok(contents) if is_blank_document(&contents) => ScoreDocument::default(),
            Ok(contents) => self.parse(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
                }
                ScoreDocument::default()
            }
            Err(e) => return Err(self.unavailable(e)),
        };

        self.persist(&document)
    }

    /// Record `score` for the performance `unique_id` on the deck named `deck_name`.
    ///
    /// The deck is found by normalized slug and created on first use. The
    /// score is matched by `unique_id` across all decks: a resubmission
    /// overwrites score, player and deck but keeps `id` and `created_at`.
    pub fn upsert_score(
        &self,
        deck_name: &str,
        score: f64,
        unique_id: &str,
        player_name: &str,
    ) -> Result<ScoreUpsert, StoreError> {
        self.update(|doc| {
            let slug = normalize_deck_id(deck_name);

            let (deck, created_deck) = match doc.decks.iter().find(|d| d.deck_id == slug) {
                Some(deck) => (deck.clone(), false),
                None => {
                    let deck = Deck {
                        id: generate_id(),
                        deck_id: slug,
                        name: deck_name.to_string(),
                    };
                    doc.decks.push(deck.clone());
                    (deck, true)
                }
            };

            let (score, created_score) =
                match doc.scores.iter_mut().find(|s| s.unique_id == unique_id) {
                    Some(existing) => {
                        existing.score = score;
                        existing.player_name = player_name.to_string();
                        existing.deck_id = deck.id.clone();
                        (existing.clone(), false)
                    }
                    None => {
                        let created = Score {
                            id: generate_id(),
                            deck_id: deck.id.clone(),
                            unique_id: unique_id.to_string(),
                            score,
                            player_name: player_name.to_string(),
                            created_at: Utc::now().timestamp_millis(),
                        };
                        doc.scores.push(created.clone());
                        (created, true)
                    }
                };

            ScoreUpsert {
                deck,
                score,
                created_deck,
                created_score,
            }
        })
    }

    /// Highest scores for every deck sharing the slug of `deck_name`.
    ///
    /// Unknown decks yield an empty list. Equal scores keep insertion order.
    pub fn top_scores(&self, deck_name: &str) -> Result<Vec<Score>, StoreError> {
        let _guard = self.guard();
        let doc = self.load()?;

        let slug = normalize_deck_id(deck_name);
        let deck_ids: Vec<&str> = doc
            .decks
            .iter()
            .filter(|d| d.deck_id == slug)
            .map(|d| d.id.as_str())
            .collect();
        if deck_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut scores: Vec<Score> = doc
            .scores
            .iter()
            .filter(|s| deck_ids.contains(&s.deck_id.as_str()))
            .cloned()
            .collect();
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores.truncate(TOP_SCORES_LIMIT);
        Ok(scores)
    }

    fn update<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut ScoreDocument) -> T,
    {
        let _guard = self.guard();
        let mut doc = self.load()?;
        let result = f(&mut doc);
        self.persist(&doc)?;
        Ok(result)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<ScoreDocument, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        self.parse(&contents)
    }

    fn parse(&self, contents: &str) -> Result<ScoreDocument, StoreError> {
        serde_json::from_str(contents).map_err(|source| StoreError::MalformedDocument {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self, doc: &ScoreDocument) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(doc)?;
        let tmp = self.temp_path();

        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(&json)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(self.unavailable(e));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scores.json".into());
        self.path
            .with_file_name(format!("{}.{}.tmp", name, Uuid::new_v4().simple()))
    }

    fn unavailable(&self, source: io::Error) -> StoreError {
        StoreError::StorageUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

/// Lowercase, collapse every run of characters outside `[a-z0-9]` into one
/// `-`, and drop leading and trailing dashes.
pub fn normalize_deck_id(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for c in raw.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn is_blank_document(contents: &str) -> bool {
    let trimmed = contents.trim();
    trimmed.is_empty() || trimmed == "null"
}
