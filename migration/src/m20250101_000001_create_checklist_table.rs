use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Checklist Table
        manager
            .create_table(
                Table::create()
                    .table(Checklist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Checklist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Checklist::Name).string().not_null())
                    .col(ColumnDef::new(Checklist::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-checklist-user_id")
                            .from(Checklist::Table, Checklist::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ChecklistEntry Table (Many-to-Many, 並び順つき)
        manager
            .create_table(
                Table::create()
                    .table(ChecklistEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChecklistEntry::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChecklistEntry::ChecklistId).integer().not_null())
                    .col(ColumnDef::new(ChecklistEntry::TaskId).integer().not_null())
                    .col(ColumnDef::new(ChecklistEntry::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-checklist_entry-checklist_id")
                            .from(ChecklistEntry::Table, ChecklistEntry::ChecklistId)
                            .to(Checklist::Table, Checklist::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-checklist_entry-task_id")
                            .from(ChecklistEntry::Table, ChecklistEntry::TaskId)
                            .to(Task::Table, Task::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChecklistEntry::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Checklist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Checklist {
    Table,
    Id,
    Name,
    UserId,
}

#[derive(DeriveIden)]
enum ChecklistEntry {
    Table,
    Id,
    ChecklistId,
    TaskId,
    Position,
}

#[derive(DeriveIden)]
enum Task {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
