//! SeaORM implementation of ReservationTimeRepository

use async_trait::async_trait;
use chrono::NaiveTime;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, foreign_key_violation_as, unique_violation_as};
use crate::domain::{ConflictKind, DomainResult, ReservationTime, ReservationTimeRepository, TimeId};
use crate::infrastructure::database::entities::reservation_time;

pub struct SeaOrmReservationTimeRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationTimeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: reservation_time::Model) -> ReservationTime {
    ReservationTime::of(TimeId(m.id), m.start_at)
}

#[async_trait]
impl ReservationTimeRepository for SeaOrmReservationTimeRepository {
    async fn find_by_id(&self, id: TimeId) -> DomainResult<Option<ReservationTime>> {
        let model = reservation_time::Entity::find_by_id(id.value())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<ReservationTime>> {
        let models = reservation_time::Entity::find()
            .order_by_asc(reservation_time::Column::StartAt)
            .order_by_asc(reservation_time::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists_by_id(&self, id: TimeId) -> DomainResult<bool> {
        let count = reservation_time::Entity::find_by_id(id.value())
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> DomainResult<bool> {
        let count = reservation_time::Entity::find()
            .filter(reservation_time::Column::StartAt.eq(start_at))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, time: ReservationTime) -> DomainResult<ReservationTime> {
        debug!("Saving reservation time: {}", time.start_at());

        let model = reservation_time::ActiveModel {
            id: NotSet,
            start_at: Set(time.start_at()),
        };
        let inserted = model
            .insert(&self.db)
            .await
            .map_err(unique_violation_as(ConflictKind::DuplicateTime))?;
        Ok(time.with_id(TimeId(inserted.id)))
    }

    async fn delete_by_id(&self, id: TimeId) -> DomainResult<bool> {
        // ON DELETE RESTRICT rejects the statement while a reservation refers to the time
        let result = reservation_time::Entity::delete_by_id(id.value())
            .exec(&self.db)
            .await
            .map_err(foreign_key_violation_as(ConflictKind::TimeInUse))?;

        if result.rows_affected > 0 {
            info!("Reservation time deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
