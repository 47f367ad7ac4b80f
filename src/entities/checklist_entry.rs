use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// チェックリストとタスクの中間テーブル。
/// `position` の昇順がチェックリスト内のタスクの並び順です。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "checklist_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub checklist_id: i32,
    pub task_id: i32,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::checklist::Entity",
        from = "Column::ChecklistId",
        to = "super::checklist::Column::Id"
    )]
    Checklist,
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::Id"
    )]
    Task,
}

impl Related<super::checklist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checklist.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
