use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// タスクモデル。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// タスク名 (空文字も可)
    pub name: String,

    /// 詳細な説明
    pub description: String,

    /// 開始日
    pub start_date: Date,

    /// 終了日 (任意、開始日より前にはできない)
    pub end_date: Option<Date>,

    /// 完了状態
    pub is_done: bool,

    /// 所有者のユーザーID (外部キー)
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::checklist_entry::Entity")]
    ChecklistEntries,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::checklist_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistEntries.def()
    }
}

impl Related<super::checklist::Entity> for Entity {
    fn to() -> RelationDef {
        super::checklist_entry::Relation::Checklist.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::checklist_entry::Relation::Task.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
