//! Create `service_listing` table with FK to the owning provider.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceListing::Table)
                    .if_not_exists()
                    .col(uuid(ServiceListing::Id).primary_key())
                    .col(uuid(ServiceListing::ProviderId).not_null())
                    .col(string_len(ServiceListing::Title, 200).not_null())
                    .col(text(ServiceListing::Description).not_null())
                    .col(string_len(ServiceListing::Category, 128).not_null())
                    .col(double(ServiceListing::Price).not_null())
                    .col(string_len(ServiceListing::Location, 200).not_null())
                    .col(string_len(ServiceListing::Image, 512).not_null().default(""))
                    .col(timestamp_with_time_zone(ServiceListing::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_listing_provider")
                            .from(ServiceListing::Table, ServiceListing::ProviderId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceListing::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceListing { Table, Id, ProviderId, Title, Description, Category, Price, Location, Image, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
