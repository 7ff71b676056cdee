use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::{CreateItem, Item, UpdateItem};

/// Sea-ORM Entity for the `items` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub value: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            value: model.value,
        }
    }
}

// id is left to the sequence
impl From<CreateItem> for ActiveModel {
    fn from(input: CreateItem) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            value: Set(input.value),
        }
    }
}

impl ActiveModel {
    /// Active model that rewrites name and value of row `id`.
    pub fn for_update(id: i32, input: UpdateItem) -> Self {
        ActiveModel {
            id: Unchanged(id),
            name: Set(input.name),
            value: Set(input.value),
        }
    }
}
