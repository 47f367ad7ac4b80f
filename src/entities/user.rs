use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 外部IDプロバイダで認証されたアカウント。
/// 初回ログイン時に `subject` をキーとして作成されます。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// IDプロバイダ上の不変の識別子
    #[sea_orm(unique)]
    pub subject: String,
    /// 表示名 (一意ではない)
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::checklist::Entity")]
    Checklists,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::checklist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checklists.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
