//! Create reservations table
//!
//! Foreign keys restrict deletion of referenced themes and times, and a
//! unique index guarantees one reservation per (date, time, theme).

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_themes::Themes;
use super::m20240601_000002_create_reservation_times::ReservationTimes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::Name).string_len(20).not_null())
                    .col(ColumnDef::new(Reservations::Date).date().not_null())
                    .col(ColumnDef::new(Reservations::TimeId).integer().not_null())
                    .col(ColumnDef::new(Reservations::ThemeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_time")
                            .from(Reservations::Table, Reservations::TimeId)
                            .to(ReservationTimes::Table, ReservationTimes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_theme")
                            .from(Reservations::Table, Reservations::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_slot")
                    .table(Reservations::Table)
                    .col(Reservations::Date)
                    .col(Reservations::TimeId)
                    .col(Reservations::ThemeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // popular theme ranking scans by date
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_date")
                    .table(Reservations::Table)
                    .col(Reservations::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    Name,
    Date,
    TimeId,
    ThemeId,
}
