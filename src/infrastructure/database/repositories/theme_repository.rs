//! SeaORM implementation of ThemeRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, foreign_key_violation_as};
use crate::domain::{
    ConflictKind, DomainResult, Theme, ThemeDescription, ThemeId, ThemeName, ThemeRepository,
};
use crate::infrastructure::database::entities::{reservation, theme};

pub struct SeaOrmThemeRepository {
    db: DatabaseConnection,
}

impl SeaOrmThemeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: theme::Model) -> DomainResult<Theme> {
    Ok(Theme::of(
        ThemeId(m.id),
        ThemeName::new(m.name)?,
        ThemeDescription::new(m.description)?,
        m.thumbnail,
    ))
}

#[derive(Debug, FromQueryResult)]
struct ThemeReservationCount {
    theme_id: i32,
    #[allow(dead_code)]
    reservation_count: i64,
}

// ── ThemeRepository impl ────────────────────────────────────────

#[async_trait]
impl ThemeRepository for SeaOrmThemeRepository {
    async fn find_by_id(&self, id: ThemeId) -> DomainResult<Option<Theme>> {
        theme::Entity::find_by_id(id.value())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Theme>> {
        theme::Entity::find()
            .order_by_asc(theme::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn exists_by_id(&self, id: ThemeId) -> DomainResult<bool> {
        let count = theme::Entity::find_by_id(id.value())
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, t: Theme) -> DomainResult<Theme> {
        debug!("Saving theme: {}", t.name().value());

        let model = theme::ActiveModel {
            id: NotSet,
            name: Set(t.name().value().to_string()),
            description: Set(t.description().value().to_string()),
            thumbnail: Set(t.thumbnail().to_string()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(t.with_id(ThemeId(inserted.id)))
    }

    async fn delete_by_id(&self, id: ThemeId) -> DomainResult<bool> {
        // ON DELETE RESTRICT rejects the statement while a reservation refers to the theme
        let result = theme::Entity::delete_by_id(id.value())
            .exec(&self.db)
            .await
            .map_err(foreign_key_violation_as(ConflictKind::ThemeInUse))?;

        if result.rows_affected > 0 {
            info!("Theme deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    async fn find_popular_themes(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: u64,
    ) -> DomainResult<Vec<Theme>> {
        let ranked = reservation::Entity::find()
            .select_only()
            .column(reservation::Column::ThemeId)
            .column_as(Expr::col(reservation::Column::Id).count(), "reservation_count")
            .filter(reservation::Column::Date.between(start, end))
            .group_by(reservation::Column::ThemeId)
            .order_by_desc(Expr::col(reservation::Column::Id).count())
            .order_by_asc(reservation::Column::ThemeId)
            .limit(limit)
            .into_model::<ThemeReservationCount>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = ranked.iter().map(|r| r.theme_id).collect();
        let mut models = theme::Entity::find()
            .filter(theme::Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        // keep the ranking order from the aggregate query
        models.sort_by_key(|m| ids.iter().position(|id| *id == m.id));
        models.into_iter().map(model_to_domain).collect()
    }
}
