pub mod audit_logs;
pub mod categories;
pub mod kitchen_types;
pub mod order_items;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod restaurant_kitchen_types;
pub mod restaurants;
pub mod sea_orm_active_enums;
pub mod shipping_options;
pub mod social_links;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use kitchen_types::Entity as KitchenTypes;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use payment_methods::Entity as PaymentMethods;
pub use products::Entity as Products;
pub use restaurant_kitchen_types::Entity as RestaurantKitchenTypes;
pub use restaurants::Entity as Restaurants;
pub use shipping_options::Entity as ShippingOptions;
pub use social_links::Entity as SocialLinks;
pub use users::Entity as Users;
