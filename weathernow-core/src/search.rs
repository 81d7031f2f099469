//! Two-stage lookup: geocode the query, then fetch the forecast.

use chrono::{DateTime, SubsecRound, Utc};

use crate::{
    error::SearchError,
    model::WeatherSnapshot,
    provider::WeatherProvider,
    recents::{RecentSearchEntry, RecentSearches},
};

/// Snapshot plus the recents list that includes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub snapshot: WeatherSnapshot,
    pub recents: RecentSearches,
}

/// Run one search stamped with the current time. See [`search`].
pub async fn search_now<P>(
    provider: &P,
    query: &str,
    prior: &RecentSearches,
) -> Result<Option<SearchOutcome>, SearchError>
where
    P: WeatherProvider + ?Sized,
{
    search(provider, query, prior, Utc::now()).await
}

/// Run one search.
///
/// Blank queries return `Ok(None)` without touching the network. `prior` is
/// never modified; on success the returned outcome carries the updated list.
/// The recent entry is stamped with `now` truncated to milliseconds, the
/// precision it is persisted with.
pub async fn search<P>(
    provider: &P,
    query: &str,
    prior: &RecentSearches,
    now: DateTime<Utc>,
) -> Result<Option<SearchOutcome>, SearchError>
where
    P: WeatherProvider + ?Sized,
{
    if query.trim().is_empty() {
        return Ok(None);
    }

    let location = provider
        .geocode(query)
        .await
        .map_err(SearchError::from_geocode)?
        .into_iter()
        .next()
        .ok_or(SearchError::LocationNotFound)?;

    tracing::info!(
        city = %location.name,
        lat = location.latitude,
        lon = location.longitude,
        "Resolved location"
    );

    let forecast = provider.forecast(&location).await.map_err(SearchError::from_forecast)?;

    let entry = RecentSearchEntry {
        city: location.name.clone(),
        region: location.region.clone(),
        country: location.country.clone(),
        timestamp: now.trunc_subsecs(3),
    };
    let snapshot = WeatherSnapshot::from_parts(location, forecast);
    let recents = prior.with_recorded(entry);

    Ok(Some(SearchOutcome { snapshot, recents }))
}
