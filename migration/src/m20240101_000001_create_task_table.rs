use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ユーザーが所有するタスク。削除はサービス層で順序立てて行うため、
        // 外部キーにカスケードは設定しない。
        manager
            .create_table(
                Table::create()
                    .table(Task::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Task::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Task::Name).string().not_null())
                    .col(ColumnDef::new(Task::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Task::StartDate).date().not_null())
                    .col(ColumnDef::new(Task::EndDate).date())
                    .col(ColumnDef::new(Task::IsDone).boolean().not_null().default(false))
                    .col(ColumnDef::new(Task::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_user")
                            .from(Task::Table, Task::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Task::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Task {
    Table,
    Id,
    Name,
    Description,
    StartDate,
    EndDate,
    IsDone,
    UserId,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
