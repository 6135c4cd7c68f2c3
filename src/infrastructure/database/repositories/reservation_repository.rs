//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, Set, SqlErr,
};

use super::{db_err, unique_violation_as};
use crate::domain::{
    BookingSlot, ClientName, ConflictKind, DomainError, DomainResult, EntityKind, Reservation,
    ReservationDate, ReservationId, ReservationRepository, ReservationTime, Theme,
    ThemeDescription, ThemeId, ThemeName, TimeId,
};
use crate::infrastructure::database::entities::{reservation, reservation_time, theme};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// `NotFound` for the first of the slot's time and theme that does not exist.
    async fn missing_reference(&self, slot: &BookingSlot) -> DomainResult<Option<DomainError>> {
        if reservation_time::Entity::find_by_id(slot.time_id.value())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Ok(Some(DomainError::not_found(EntityKind::Time, slot.time_id)));
        }
        if theme::Entity::find_by_id(slot.theme_id.value())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Ok(Some(DomainError::not_found(EntityKind::Theme, slot.theme_id)));
        }
        Ok(None)
    }
}

// ── Hydrated rows ───────────────────────────────────────────────

/// One reservation joined with its time and theme
#[derive(Debug, FromQueryResult)]
struct ReservationRow {
    reservation_id: i32,
    reservation_name: String,
    reservation_date: NaiveDate,
    time_id: i32,
    time_start_at: NaiveTime,
    theme_id: i32,
    theme_name: String,
    theme_description: String,
    theme_thumbnail: String,
}

impl ReservationRow {
    fn into_domain(self) -> DomainResult<Reservation> {
        let time = ReservationTime::of(TimeId(self.time_id), self.time_start_at);
        let theme = Theme::of(
            ThemeId(self.theme_id),
            ThemeName::new(self.theme_name)?,
            ThemeDescription::new(self.theme_description)?,
            self.theme_thumbnail,
        );
        Reservation::of(
            ReservationId(self.reservation_id),
            ClientName::new(self.reservation_name)?,
            ReservationDate::new(self.reservation_date),
            time,
            theme,
        )
    }
}

fn hydrated() -> Select<reservation::Entity> {
    reservation::Entity::find()
        .select_only()
        .column_as(reservation::Column::Id, "reservation_id")
        .column_as(reservation::Column::Name, "reservation_name")
        .column_as(reservation::Column::Date, "reservation_date")
        .column_as(reservation_time::Column::Id, "time_id")
        .column_as(reservation_time::Column::StartAt, "time_start_at")
        .column_as(theme::Column::Id, "theme_id")
        .column_as(theme::Column::Name, "theme_name")
        .column_as(theme::Column::Description, "theme_description")
        .column_as(theme::Column::Thumbnail, "theme_thumbnail")
        .join(JoinType::InnerJoin, reservation::Relation::ReservationTime.def())
        .join(JoinType::InnerJoin, reservation::Relation::Theme.def())
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        hydrated()
            .order_by_asc(reservation::Column::Id)
            .into_model::<ReservationRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(ReservationRow::into_domain)
            .collect()
    }

    async fn find_by_id(&self, id: ReservationId) -> DomainResult<Option<Reservation>> {
        hydrated()
            .filter(reservation::Column::Id.eq(id.value()))
            .into_model::<ReservationRow>()
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(ReservationRow::into_domain)
            .transpose()
    }

    async fn find_all_by_date_and_theme(
        &self,
        date: NaiveDate,
        theme_id: ThemeId,
    ) -> DomainResult<Vec<Reservation>> {
        hydrated()
            .filter(reservation::Column::Date.eq(date))
            .filter(reservation::Column::ThemeId.eq(theme_id.value()))
            .order_by_asc(reservation::Column::Id)
            .into_model::<ReservationRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(ReservationRow::into_domain)
            .collect()
    }

    async fn exists_by_date_and_time_and_theme(
        &self,
        date: NaiveDate,
        time_id: TimeId,
        theme_id: ThemeId,
    ) -> DomainResult<bool> {
        let count = reservation::Entity::find()
            .filter(reservation::Column::Date.eq(date))
            .filter(reservation::Column::TimeId.eq(time_id.value()))
            .filter(reservation::Column::ThemeId.eq(theme_id.value()))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_time_id(&self, time_id: TimeId) -> DomainResult<bool> {
        let count = reservation::Entity::find()
            .filter(reservation::Column::TimeId.eq(time_id.value()))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_theme_id(&self, theme_id: ThemeId) -> DomainResult<bool> {
        let count = reservation::Entity::find()
            .filter(reservation::Column::ThemeId.eq(theme_id.value()))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, r: Reservation) -> DomainResult<Reservation> {
        let slot = r.slot();
        debug!(
            "Saving reservation: date={} time={} theme={}",
            slot.date, slot.time_id, slot.theme_id
        );

        if let Some(missing) = self.missing_reference(&slot).await? {
            return Err(missing);
        }

        let model = reservation::ActiveModel {
            id: NotSet,
            name: Set(r.client_name().value().to_string()),
            date: Set(slot.date),
            time_id: Set(slot.time_id.value()),
            theme_id: Set(slot.theme_id.value()),
        };
        // the unique slot index arbitrates concurrent inserts
        let inserted = match model.insert(&self.db).await {
            Ok(inserted) => inserted,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                // time or theme removed after the check above
                return Err(match self.missing_reference(&slot).await? {
                    Some(missing) => missing,
                    None => db_err(e),
                });
            }
            Err(e) => return Err(unique_violation_as(ConflictKind::DuplicateBooking)(e)),
        };

        info!("Reservation created: {}", inserted.id);
        Ok(r.with_id(ReservationId(inserted.id)))
    }

    async fn delete_by_id(&self, id: ReservationId) -> DomainResult<bool> {
        let result = reservation::Entity::delete_by_id(id.value())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
