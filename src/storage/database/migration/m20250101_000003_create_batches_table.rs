use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batches::ProjectId).integer().not_null())
                    .col(
                        ColumnDef::new(Batches::LotId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Batches::BatchDate).date().not_null())
                    .col(
                        ColumnDef::new(Batches::PartCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Batches::SpectrometricAnalysis).string().null())
                    .col(ColumnDef::new(Batches::GeometricTolerance).string().null())
                    .col(ColumnDef::new(Batches::HardnessTest).string().null())
                    .col(ColumnDef::new(Batches::TensionTest).string().null())
                    .col(ColumnDef::new(Batches::PhotographicEvidence).string().null())
                    .col(ColumnDef::new(Batches::OriginalDrawing).string().null())
                    .col(ColumnDef::new(Batches::UploadedBy).uuid().null())
                    .col(
                        ColumnDef::new(Batches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Batches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batches_project_id")
                            .from(Batches::Table, Batches::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batches_uploaded_by")
                            .from(Batches::Table, Batches::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batches_project_id")
                    .table(Batches::Table)
                    .col(Batches::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batches_batch_date")
                    .table(Batches::Table)
                    .col(Batches::BatchDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Batches {
    Table,
    Id,
    ProjectId,
    LotId,
    BatchDate,
    PartCount,
    SpectrometricAnalysis,
    GeometricTolerance,
    HardnessTest,
    TensionTest,
    PhotographicEvidence,
    OriginalDrawing,
    UploadedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
