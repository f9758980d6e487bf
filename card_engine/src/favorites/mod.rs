//! Favorites - an ordered list of question ids kept in a key-value store.
//!
//! The list is stored under a single key as a JSON array of ids, e.g.
//! `["p1","dt4"]`. Every mutation rewrites the full array immediately.
//! A value that does not parse reads as an empty list and is overwritten by
//! the next mutation.

mod store;

pub use store::*;

use question_bank::{Question, QuestionCatalog, QuestionId};
use tracing::{info, warn};

use crate::config::FavoritesConfig;

/// Key the favorites list is stored under unless configured otherwise.
pub const DEFAULT_FAVORITES_KEY: &str = "favorites";

/// Whether favorites outlive the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesMode {
    /// Backed by a key-value store.
    Persistent,
    /// Held in memory only; lost when the store is dropped.
    SessionOnly,
}

#[derive(Debug)]
enum Backend<S> {
    Persistent(S),
    SessionOnly(Vec<QuestionId>),
}

/// The player's favorite questions, in the order they were added.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    key: String,
    backend: Backend<S>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Keep favorites in `store` under the default key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_FAVORITES_KEY)
    }

    /// Keep favorites in `store` under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            backend: Backend::Persistent(store),
        }
    }

    /// Favorites without any persistent storage.
    pub fn session_only(key: impl Into<String>) -> Self {
        let key = key.into();
        warn!(key = %key, "no persistent storage, favorites will last for this session only");
        Self {
            key,
            backend: Backend::SessionOnly(Vec::new()),
        }
    }

    /// Use `store` when there is one, session-only favorites otherwise.
    pub fn open(store: Option<S>, key: impl Into<String>) -> Self {
        match store {
            Some(store) => Self::with_key(store, key),
            None => Self::session_only(key),
        }
    }

    pub fn mode(&self) -> FavoritesMode {
        match self.backend {
            Backend::Persistent(_) => FavoritesMode::Persistent,
            Backend::SessionOnly(_) => FavoritesMode::SessionOnly,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Favorite ids in insertion order.
    pub fn list(&self) -> Vec<QuestionId> {
        self.read().unwrap_or_else(|error| {
            warn!(key = %self.key, %error, "failed to read favorites, treating as empty");
            Vec::new()
        })
    }

    /// Read the current list, reporting storage failures.
    ///
    /// A corrupt value is not a failure: it reads as empty.
    fn read(&self) -> Result<Vec<QuestionId>, StorageError> {
        let store = match &self.backend {
            Backend::SessionOnly(ids) => return Ok(ids.clone()),
            Backend::Persistent(store) => store,
        };

        let Some(raw) = store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<QuestionId>>(&raw) {
            Ok(mut ids) => {
                dedup_in_order(&mut ids);
                Ok(ids)
            }
            Err(error) => {
                warn!(key = %self.key, %error, "stored favorites are corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Read the list ahead of a mutation.
    ///
    /// If the stored list cannot be read, switches to session-only favorites
    /// so the mutation never overwrites a value it has not seen.
    fn read_for_update(&mut self) -> Vec<QuestionId> {
        match self.read() {
            Ok(ids) => ids,
            Err(error) => {
                warn!(
                    key = %self.key,
                    %error,
                    "failed to read favorites, keeping them for this session only"
                );
                self.backend = Backend::SessionOnly(Vec::new());
                Vec::new()
            }
        }
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.list().contains(id)
    }

    /// Append `id` unless it is already a favorite.
    pub fn add(&mut self, id: impl Into<QuestionId>) {
        let id = id.into();
        let mut ids = self.read_for_update();
        if ids.contains(&id) {
            return;
        }

        info!(question = %id, "added favorite");
        ids.push(id);
        self.persist(ids);
    }

    /// Remove `id` if it is a favorite.
    pub fn remove(&mut self, id: &QuestionId) {
        let mut ids = self.read_for_update();
        let before = ids.len();
        ids.retain(|existing| existing != id);

        if ids.len() != before {
            info!(question = %id, "removed favorite");
        }
        self.persist(ids);
    }

    /// Flip the favorite state of `id`, returning whether it is now a favorite.
    pub fn toggle(&mut self, id: impl Into<QuestionId>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            self.remove(&id);
            false
        } else {
            self.add(id);
            true
        }
    }

    /// Favorite questions resolved against `catalog`, in insertion order.
    ///
    /// Ids that are no longer in the catalog are skipped.
    pub fn questions<'c>(&self, catalog: &'c QuestionCatalog) -> Vec<&'c Question> {
        self.list().iter().filter_map(|id| catalog.get(id)).collect()
    }

    fn persist(&mut self, ids: Vec<QuestionId>) {
        let error = match &mut self.backend {
            Backend::SessionOnly(session) => {
                *session = ids;
                return;
            }
            Backend::Persistent(store) => {
                let written = serde_json::to_string(&ids)
                    .map_err(StorageError::from)
                    .and_then(|encoded| store.set(&self.key, &encoded));
                match written {
                    Ok(()) => return,
                    Err(error) => error,
                }
            }
        };

        warn!(
            key = %self.key,
            %error,
            "failed to persist favorites, keeping them for this session only"
        );
        self.backend = Backend::SessionOnly(ids);
    }
}

impl FavoritesStore<FileStore> {
    /// Open the favorites store described by `config`.
    ///
    /// Without a configured path favorites are session-only.
    pub fn from_config(config: &FavoritesConfig) -> Self {
        Self::open(config.path.as_ref().map(|path| FileStore::new(path.clone())), config.key.clone())
    }
}

/// Drop repeated ids, keeping the first occurrence.
fn dedup_in_order(ids: &mut Vec<QuestionId>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
