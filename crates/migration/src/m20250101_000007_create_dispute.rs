//! Create `dispute` table: complaints between two users, resolved by an admin.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dispute::Table)
                    .if_not_exists()
                    .col(uuid(Dispute::Id).primary_key())
                    .col(uuid(Dispute::ReporterId).not_null())
                    .col(uuid(Dispute::ReportedUserId).not_null())
                    .col(text(Dispute::Reason).not_null())
                    .col(string_len(Dispute::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Dispute::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dispute_reporter")
                            .from(Dispute::Table, Dispute::ReporterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dispute_reported_user")
                            .from(Dispute::Table, Dispute::ReportedUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Dispute::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Dispute { Table, Id, ReporterId, ReportedUserId, Reason, Status, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
