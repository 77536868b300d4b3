use sea_orm::{entity::prelude::*, ActiveValue};

/// A database model that represents a metadata key value pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "metadata")]
pub struct Model {
    /// The metadata key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// The metadata value.
    pub value: String,
}

/// The relation for the metadata model.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// The active model behavior for the metadata model.
impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Returns a new active model for the provided key and value.
    pub fn new(key: &str, value: String) -> Self {
        Self { key: ActiveValue::Set(key.to_owned()), value: ActiveValue::Set(value) }
    }
}
