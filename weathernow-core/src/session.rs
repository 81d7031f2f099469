//! Owner of the mutable lookup state: current snapshot, last error, recents.

use crate::{
    model::WeatherSnapshot,
    provider::WeatherProvider,
    recents::{KeyValueStore, RecentSearchStore, RecentSearches},
    search::search_now,
};

/// What the last call to [`WeatherSession::search`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Blank query; nothing changed.
    Skipped,
    Found,
    Failed,
}

/// Drives searches and keeps the result the presentation layer renders.
///
/// Searching takes `&mut self`, so one session never has two searches in flight.
#[derive(Debug)]
pub struct WeatherSession<P, S> {
    provider: P,
    store: RecentSearchStore<S>,
    recents: RecentSearches,
    snapshot: Option<WeatherSnapshot>,
    error: Option<String>,
}

impl<P, S> WeatherSession<P, S>
where
    P: WeatherProvider,
    S: KeyValueStore,
{
    /// Create a session, loading recents from `store`.
    pub fn new(provider: P, store: RecentSearchStore<S>) -> Self {
        let recents = store.load();
        Self { provider, store, recents, snapshot: None, error: None }
    }

    pub async fn search(&mut self, query: &str) -> SearchStatus {
        if query.trim().is_empty() {
            return SearchStatus::Skipped;
        }

        self.snapshot = None;
        self.error = None;

        match search_now(&self.provider, query, &self.recents).await {
            Ok(Some(outcome)) => {
                tracing::info!(city = %outcome.snapshot.city, "Search completed");
                self.snapshot = Some(outcome.snapshot);
                self.recents = outcome.recents;
                if let Err(e) = self.store.save(&self.recents) {
                    tracing::warn!("Failed to persist recent searches: {}", e);
                }
                SearchStatus::Found
            }
            Ok(None) => SearchStatus::Skipped,
            Err(e) => {
                tracing::debug!(error = ?e, "Search failed");
                self.error = Some(e.user_message());
                SearchStatus::Failed
            }
        }
    }

    /// Search again for the city of the recent entry at `index`.
    pub async fn search_recent(&mut self, index: usize) -> SearchStatus {
        let Some(city) = self.recents.get(index).map(|e| e.city.clone()) else {
            return SearchStatus::Skipped;
        };
        self.search(&city).await
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn recents(&self) -> &RecentSearches {
        &self.recents
    }

    pub fn store(&self) -> &RecentSearchStore<S> {
        &self.store
    }
}
