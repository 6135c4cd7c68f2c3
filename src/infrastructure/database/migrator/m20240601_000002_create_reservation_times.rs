//! Create reservation_times table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReservationTimes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReservationTimes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReservationTimes::StartAt)
                            .time()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReservationTimes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ReservationTimes {
    Table,
    Id,
    StartAt,
}
