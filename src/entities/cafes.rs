use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cafes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Admin who created the record. Nullified when that user is deleted.
    pub author_id: Option<i32>,

    #[sea_orm(unique)]
    pub name: String,

    pub map_url: String,

    pub img_url: String,

    pub location: String,

    /// Free-form capacity descriptor, e.g. "20-30".
    pub seats: String,

    pub has_toilet: bool,

    pub has_wifi: bool,

    pub has_sockets: bool,

    pub can_take_calls: bool,

    pub coffee_price: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
