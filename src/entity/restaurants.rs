use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::RestaurantStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub address: String,
    pub phone: String,
    pub description: String,
    pub status: RestaurantStatus,
    pub opening_time: Time,
    pub closing_time: Time,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::social_links::Entity")]
    SocialLinks,
    #[sea_orm(has_many = "super::payment_methods::Entity")]
    PaymentMethods,
    #[sea_orm(has_many = "super::shipping_options::Entity")]
    ShippingOptions,
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::restaurant_kitchen_types::Entity")]
    RestaurantKitchenTypes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::social_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialLinks.def()
    }
}

impl Related<super::payment_methods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentMethods.def()
    }
}

impl Related<super::shipping_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShippingOptions.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::kitchen_types::Entity> for Entity {
    fn to() -> RelationDef {
        super::restaurant_kitchen_types::Relation::KitchenTypes.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::restaurant_kitchen_types::Relation::Restaurants.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
