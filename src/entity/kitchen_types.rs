use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "kitchen_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurant_kitchen_types::Entity")]
    RestaurantKitchenTypes,
}

impl Related<super::restaurant_kitchen_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantKitchenTypes.def()
    }
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        super::restaurant_kitchen_types::Relation::Restaurants.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::restaurant_kitchen_types::Relation::KitchenTypes.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
