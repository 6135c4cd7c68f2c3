//! Theme repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Theme, ThemeId};
use crate::domain::DomainResult;

#[async_trait]
pub trait ThemeRepository: Send + Sync {
    async fn find_by_id(&self, id: ThemeId) -> DomainResult<Option<Theme>>;

    /// All themes, id ascending
    async fn find_all(&self) -> DomainResult<Vec<Theme>>;

    async fn exists_by_id(&self, id: ThemeId) -> DomainResult<bool>;

    /// Persist a new theme and return it with its assigned id
    async fn save(&self, theme: Theme) -> DomainResult<Theme>;

    /// Delete a theme that no reservation references.
    ///
    /// Returns `false` when no theme had this id. Fails with
    /// `Conflict(ThemeInUse)` if a reservation references it at delete time.
    async fn delete_by_id(&self, id: ThemeId) -> DomainResult<bool>;

    /// Themes ranked by reservation count within `[start, end]` (inclusive),
    /// count descending then id ascending, at most `limit` entries.
    async fn find_popular_themes(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: u64,
    ) -> DomainResult<Vec<Theme>>;
}
