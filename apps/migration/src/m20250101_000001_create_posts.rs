use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null().default(""))
                    .col(ColumnDef::new(Posts::Description).text().null())
                    .col(ColumnDef::new(Posts::IntroQuestion).string().null())
                    .col(ColumnDef::new(Posts::IntroHook).string().null())
                    .col(text_array(Posts::SummaryPoints))
                    .col(text_array(Posts::ImpactPoints))
                    .col(text_array(Posts::InsightPoints))
                    .col(text_array(Posts::Tags))
                    .col(
                        ColumnDef::new(Posts::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Posts::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_now(Posts::CreatedAt))
                    .col(timestamp_now(Posts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_published_created")
                    .table(Posts::Table)
                    .col(Posts::IsPublished)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContentSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentSections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentSections::PostId).uuid().not_null())
                    .col(
                        ColumnDef::new(ContentSections::DisplayOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContentSections::Title).string().not_null())
                    .col(
                        ColumnDef::new(ContentSections::Content)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(text_array(ContentSections::Points))
                    .col(text_array(ContentSections::Examples))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_sections_post")
                            .from(ContentSections::Table, ContentSections::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_sections_post_order")
                    .table(ContentSections::Table)
                    .col(ContentSections::PostId)
                    .col(ContentSections::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Resources::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Resources::PostId).uuid().not_null())
                    .col(ColumnDef::new(Resources::DisplayOrder).integer().not_null())
                    .col(ColumnDef::new(Resources::Title).string().not_null())
                    .col(ColumnDef::new(Resources::Url).text().not_null())
                    .col(
                        ColumnDef::new(Resources::ResourceType)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resources_post")
                            .from(Resources::Table, Resources::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resources_post_order")
                    .table(Resources::Table)
                    .col(Resources::PostId)
                    .col(Resources::DisplayOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContentSections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

/// `text[] NOT NULL DEFAULT '{}'`
fn text_array<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .array(ColumnType::Text)
        .not_null()
        .default(Expr::cust("'{}'"))
        .to_owned()
}

/// `timestamptz NOT NULL DEFAULT CURRENT_TIMESTAMP`
fn timestamp_now<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Slug,
    Title,
    Content,
    Description,
    IntroQuestion,
    IntroHook,
    SummaryPoints,
    ImpactPoints,
    InsightPoints,
    Tags,
    IsPublished,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContentSections {
    Table,
    Id,
    PostId,
    DisplayOrder,
    Title,
    Content,
    Points,
    Examples,
}

#[derive(DeriveIden)]
enum Resources {
    Table,
    Id,
    PostId,
    DisplayOrder,
    Title,
    Url,
    ResourceType,
}
