//! Repository access for the domain layer
//!
//! `RepositoryProvider` hands out the per-aggregate repositories backed by a
//! single storage handle, so services stay independent of the concrete store.

use super::reservation::ReservationRepository;
use super::reservation_time::ReservationTimeRepository;
use super::theme::ThemeRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let theme = repos.themes().find_by_id(ThemeId(1)).await?;
///     let taken = repos.reservations().exists_by_theme_id(ThemeId(1)).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn reservations(&self) -> &dyn ReservationRepository;
    fn themes(&self) -> &dyn ThemeRepository;
    fn times(&self) -> &dyn ReservationTimeRepository;
}
