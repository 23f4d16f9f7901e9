use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditLogEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditLogEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditLogEntries::BatchId).integer().not_null())
                    .col(ColumnDef::new(AuditLogEntries::Field).string_len(64).not_null())
                    .col(ColumnDef::new(AuditLogEntries::Action).string_len(16).not_null())
                    .col(ColumnDef::new(AuditLogEntries::UserId).uuid().null())
                    .col(
                        ColumnDef::new(AuditLogEntries::Detail)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AuditLogEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audit_log_entries_batch_id")
                            .from(AuditLogEntries::Table, AuditLogEntries::BatchId)
                            .to(Batches::Table, Batches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audit_log_entries_user_id")
                            .from(AuditLogEntries::Table, AuditLogEntries::UserId)
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
                    .name("idx_audit_log_entries_batch_id")
                    .table(AuditLogEntries::Table)
                    .col(AuditLogEntries::BatchId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuditLogEntries {
    Table,
    Id,
    BatchId,
    Field,
    Action,
    UserId,
    Detail,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Batches {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
