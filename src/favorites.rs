use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::{error::AppError, lookup::ProfileLookup, profile::ProfileSummary, storage::KeyValueStorage};

/// Storage key holding the serialized favorites list
pub const FAVORITES_KEY: &str = "githubFavorites:";

/// Ordered list of favorite profiles mirrored into a storage slot
///
/// Entries are newest-first and logins are unique. Every mutation rewrites
/// the whole list under [`FAVORITES_KEY`] before it becomes visible, then
/// bumps the revision seen by [`FavoritesStore::subscribe`] receivers.
pub struct FavoritesStore<S, L> {
    storage: S,
    lookup: L,
    entries: Vec<ProfileSummary>,
    loaded: bool,
    revision: watch::Sender<u64>,
}

impl<S: KeyValueStorage, L: ProfileLookup> FavoritesStore<S, L> {
    /// Creates an empty, not yet loaded store
    pub fn new(storage: S, lookup: L) -> Self {
        FavoritesStore {
            storage,
            lookup,
            entries: Vec::new(),
            loaded: false,
            revision: watch::Sender::new(0),
        }
    }

    /// Creates a store and loads it from storage
    pub fn open(storage: S, lookup: L) -> Self {
        let mut store = Self::new(storage, lookup);
        store.load();
        store
    }

    /// Replaces the in-memory list with the persisted one
    ///
    /// Absent, unreadable or corrupt data loads as an empty list.
    #[instrument(skip(self))]
    pub fn load(&mut self) {
        self.entries = match self.storage.get(FAVORITES_KEY) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(error = %err, "stored favorites are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read stored favorites, starting empty");
                Vec::new()
            }
        };
        self.loaded = true;
        info!(count = self.entries.len(), "favorites loaded");
        self.notify();
    }

    /// Writes the whole list to storage
    pub fn save(&mut self) -> Result<(), AppError> {
        persist(&mut self.storage, &self.entries)
    }

    /// Looks up `username` and puts the profile at the front of the list
    ///
    /// Fails with [`AppError::AlreadyExists`] when the login is already a
    /// favorite (exact, case-sensitive match) and with [`AppError::NotFound`]
    /// when the lookup yields nothing. The list is untouched on failure.
    #[instrument(skip(self))]
    pub async fn add(&mut self, username: &str) -> Result<ProfileSummary, AppError> {
        if self.find(username).is_some() {
            warn!("user already in favorites");
            return Err(AppError::AlreadyExists(username.to_string()));
        }

        let Some(summary) = self.lookup.search(username).await else {
            warn!("lookup found no profile");
            return Err(AppError::NotFound(username.to_string()));
        };

        // The API resolves logins case-insensitively, so the canonical login may differ.
        if self.find(&summary.login).is_some() {
            warn!(login = %summary.login, "resolved login already in favorites");
            return Err(AppError::AlreadyExists(summary.login));
        }

        let mut next: Vec<ProfileSummary> = Vec::with_capacity(self.entries.len() + 1);
        next.push(summary.clone());
        next.extend(self.entries.iter().cloned());
        self.commit(next)?;

        info!(login = %summary.login, "favorite added");
        Ok(summary)
    }

    /// Removes every entry with the target's login
    ///
    /// Removing a login that is not present is not an error; the list is
    /// still persisted and subscribers still notified. Returns the number of
    /// entries removed.
    pub fn delete(&mut self, target: &ProfileSummary) -> Result<usize, AppError> {
        self.delete_login(&target.login)
    }

    /// Removes every entry whose login equals `login`
    #[instrument(skip(self))]
    pub fn delete_login(&mut self, login: &str) -> Result<usize, AppError> {
        let next: Vec<ProfileSummary> = self
            .entries
            .iter()
            .filter(|entry| entry.login != login)
            .cloned()
            .collect();
        let removed: usize = self.entries.len() - next.len();
        self.commit(next)?;

        info!(removed, "favorite deleted");
        Ok(removed)
    }

    pub fn entries(&self) -> &[ProfileSummary] {
        &self.entries
    }

    /// Finds an entry by exact login
    pub fn find(&self, login: &str) -> Option<&ProfileSummary> {
        self.entries.iter().find(|entry| entry.login == login)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Receiver of the revision counter, bumped after every change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persists `next` and only then makes it the current list
    fn commit(&mut self, next: Vec<ProfileSummary>) -> Result<(), AppError> {
        persist(&mut self.storage, &next)?;
        self.entries = next;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

fn persist<S: KeyValueStorage>(storage: &mut S, entries: &[ProfileSummary]) -> Result<(), AppError> {
    let blob: String = serde_json::to_string(entries)?;
    storage.set(FAVORITES_KEY, &blob)
}
