use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// チェックリストの行。
/// 所属タスクの並びは `checklist_entry` に保持されます。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "checklist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
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
    Entries,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::checklist_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        super::checklist_entry::Relation::Task.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::checklist_entry::Relation::Checklist.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
