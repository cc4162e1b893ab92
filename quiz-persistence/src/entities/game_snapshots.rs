use sea_orm::entity::prelude::*;

/// Single-row table holding the current quiz run
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_snapshots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub lives: i32,
    pub phase: String,
    /// JSON array of normalized champion names
    #[sea_orm(column_type = "Text")]
    pub correct_guesses: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
