use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub trailer_url: String,
    pub genre: String,
    pub release_year: Option<i32>,
    pub director: String,
    // JSON array of names; `cast` is a keyword in both Rust and SQL
    #[sea_orm(column_name = "cast")]
    pub cast_list: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
