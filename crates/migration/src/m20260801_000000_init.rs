//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Presagio:
//!
//! - `users`: authentication and profile data
//! - `transactions`: the income/expense ledger
//! - `cash_flow_predictions`: stored 30-day projections
//! - `business_recommendations`: stored advisor suggestions
//! - `community_posts`: the community feed
//! - `community_comments`: comments under posts
//! - `community_likes`: one row per user/post like
//!
//! Community rows keep their `user_id` without a foreign key, so posts
//! and comments survive the deletion of their author's account.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Date,
    Kind,
    AmountMinor,
    Category,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CashFlowPredictions {
    Table,
    Id,
    UserId,
    PredictedIncomeMinor,
    PredictedExpenseMinor,
    Insight,
    PredictionDate,
    CreatedAt,
}

#[derive(Iden)]
enum BusinessRecommendations {
    Table,
    Id,
    UserId,
    CapitalMinor,
    Interest,
    Location,
    Items,
    GeneratedAt,
}

#[derive(Iden)]
enum CommunityPosts {
    Table,
    Id,
    UserId,
    Title,
    Content,
    ImageUrl,
    Category,
    LikesCount,
    CommentsCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CommunityComments {
    Table,
    Id,
    PostId,
    UserId,
    Content,
    CreatedAt,
}

#[derive(Iden)]
enum CommunityLikes {
    Table,
    Id,
    PostId,
    UserId,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).integer().not_null())
                    .col(ColumnDef::new(Transactions::Date).date().not_null())
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Category).string().not_null())
                    .col(ColumnDef::new(Transactions::Description).string())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-user_id")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-date")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        // The prediction window scans by creation time.
        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-created_at")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Cash Flow Predictions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CashFlowPredictions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CashFlowPredictions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CashFlowPredictions::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashFlowPredictions::PredictedIncomeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashFlowPredictions::PredictedExpenseMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashFlowPredictions::Insight)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashFlowPredictions::PredictionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashFlowPredictions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_flow_predictions-user_id")
                            .from(CashFlowPredictions::Table, CashFlowPredictions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cash_flow_predictions-user_id")
                    .table(CashFlowPredictions::Table)
                    .col(CashFlowPredictions::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Business Recommendations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(BusinessRecommendations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BusinessRecommendations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BusinessRecommendations::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusinessRecommendations::CapitalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BusinessRecommendations::Interest).string())
                    .col(ColumnDef::new(BusinessRecommendations::Location).string())
                    .col(
                        ColumnDef::new(BusinessRecommendations::Items)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusinessRecommendations::GeneratedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-business_recommendations-user_id")
                            .from(
                                BusinessRecommendations::Table,
                                BusinessRecommendations::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-business_recommendations-user_id")
                    .table(BusinessRecommendations::Table)
                    .col(BusinessRecommendations::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Community Posts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CommunityPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityPosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommunityPosts::UserId).integer().not_null())
                    .col(ColumnDef::new(CommunityPosts::Title).string().not_null())
                    .col(ColumnDef::new(CommunityPosts::Content).string().not_null())
                    .col(ColumnDef::new(CommunityPosts::ImageUrl).string())
                    .col(ColumnDef::new(CommunityPosts::Category).string().not_null())
                    .col(
                        ColumnDef::new(CommunityPosts::LikesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CommunityPosts::CommentsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CommunityPosts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CommunityPosts::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityPosts::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-community_posts-created_at")
                    .table(CommunityPosts::Table)
                    .col(CommunityPosts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-community_posts-category")
                    .table(CommunityPosts::Table)
                    .col(CommunityPosts::Category)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Community Comments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CommunityComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityComments::PostId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityComments::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityComments::Content)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityComments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-community_comments-post_id")
                            .from(CommunityComments::Table, CommunityComments::PostId)
                            .to(CommunityPosts::Table, CommunityPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-community_comments-post_id")
                    .table(CommunityComments::Table)
                    .col(CommunityComments::PostId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Community Likes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CommunityLikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityLikes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommunityLikes::PostId).integer().not_null())
                    .col(ColumnDef::new(CommunityLikes::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(CommunityLikes::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-community_likes-post_id")
                            .from(CommunityLikes::Table, CommunityLikes::PostId)
                            .to(CommunityPosts::Table, CommunityPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-community_likes-post_id-user_id-unique")
                    .table(CommunityLikes::Table)
                    .col(CommunityLikes::PostId)
                    .col(CommunityLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(CommunityLikes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BusinessRecommendations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CashFlowPredictions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
