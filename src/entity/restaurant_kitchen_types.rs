use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant_kitchen_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub restaurant_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub kitchen_type_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurants::Column::Id",
        on_delete = "Cascade"
    )]
    Restaurants,
    #[sea_orm(
        belongs_to = "super::kitchen_types::Entity",
        from = "Column::KitchenTypeId",
        to = "super::kitchen_types::Column::Id",
        on_delete = "Cascade"
    )]
    KitchenTypes,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl Related<super::kitchen_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KitchenTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
