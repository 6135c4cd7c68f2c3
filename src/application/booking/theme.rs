//! Theme use-cases, including the weekly popularity ranking

use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, EntityKind, RepositoryProvider, Theme, ThemeId,
};

/// Days counted back from the day before the reference date
pub const POPULAR_WINDOW_DAYS: u64 = 7;
pub const POPULAR_THEME_LIMIT: u64 = 10;

pub struct ThemeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ThemeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_themes(&self) -> DomainResult<Vec<Theme>> {
        self.repos.themes().find_all().await
    }

    pub async fn get_theme(&self, id: ThemeId) -> DomainResult<Theme> {
        self.repos
            .themes()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Theme, id))
    }

    /// Most booked themes over the last week, relative to the local date
    pub async fn list_popular_themes(&self) -> DomainResult<Vec<Theme>> {
        self.list_popular_themes_on(Local::now().date_naive()).await
    }

    /// Ranking over `[today - 7, today - 1]`, count descending then id
    /// ascending, at most ten themes.
    pub async fn list_popular_themes_on(&self, today: NaiveDate) -> DomainResult<Vec<Theme>> {
        let (start, end) = popular_window(today)?;
        self.repos
            .themes()
            .find_popular_themes(start, end, POPULAR_THEME_LIMIT)
            .await
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create_theme(
        &self,
        name: &str,
        description: &str,
        thumbnail: &str,
    ) -> DomainResult<Theme> {
        let theme = self
            .repos
            .themes()
            .save(Theme::create(name, description, thumbnail)?)
            .await?;
        if let Some(id) = theme.id() {
            info!(theme_id = %id, name = %theme.name().value(), "Theme created");
        }
        Ok(theme)
    }

    /// Fails with `Conflict(ThemeInUse)` while any reservation references it
    pub async fn delete_theme(&self, id: ThemeId) -> DomainResult<()> {
        if !self.repos.themes().delete_by_id(id).await? {
            return Err(DomainError::not_found(EntityKind::Theme, id));
        }
        info!(theme_id = %id, "Theme deleted");
        Ok(())
    }
}

fn popular_window(today: NaiveDate) -> DomainResult<(NaiveDate, NaiveDate)> {
    let start = today.checked_sub_days(Days::new(POPULAR_WINDOW_DAYS));
    let end = today.checked_sub_days(Days::new(1));
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(DomainError::Validation(format!(
            "No ranking window before {}",
            today
        ))),
    }
}
