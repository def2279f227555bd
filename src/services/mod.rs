pub mod access;
pub mod auth_service;
pub mod category_service;
pub mod dashboard_service;
pub mod kitchen_type_service;
pub mod menu_service;
pub mod order_service;
pub mod payment_method_service;
pub mod pricing;
pub mod product_service;
pub mod restaurant_service;
pub mod shipping_option_service;
pub mod social_link_service;
pub mod validation;
