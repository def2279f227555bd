pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod kitchen_types;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod restaurants;
pub mod shipping_options;
pub mod social_links;
