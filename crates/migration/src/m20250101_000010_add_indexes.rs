use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Services: lookup by owner for provider booking lists
        manager
            .create_index(
                Index::create()
                    .name("idx_service_listing_provider")
                    .table(ServiceListing::Table)
                    .col(ServiceListing::ProviderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_customer")
                    .table(Booking::Table)
                    .col(Booking::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_service")
                    .table(Booking::Table)
                    .col(Booking::ServiceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_service")
                    .table(Review::Table)
                    .col(Review::ServiceId)
                    .to_owned(),
            )
            .await?;

        // Messages: both directions of a conversation, ordered by time
        manager
            .create_index(
                Index::create()
                    .name("idx_message_sender_created")
                    .table(Message::Table)
                    .col(Message::SenderId)
                    .col(Message::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_message_recipient_created")
                    .table(Message::Table)
                    .col(Message::RecipientId)
                    .col(Message::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dispute_status")
                    .table(Dispute::Table)
                    .col(Dispute::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_listing_provider").table(ServiceListing::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_customer").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_service").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_service").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_message_sender_created").table(Message::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_message_recipient_created").table(Message::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_dispute_status").table(Dispute::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceListing { Table, ProviderId }

#[derive(DeriveIden)]
enum Booking { Table, CustomerId, ServiceId }

#[derive(DeriveIden)]
enum Review { Table, ServiceId }

#[derive(DeriveIden)]
enum Message { Table, SenderId, RecipientId, CreatedAt }

#[derive(DeriveIden)]
enum Dispute { Table, Status }
