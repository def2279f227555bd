use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{Credentials, LoginResponse},
        categories::{CategoryList, CreateCategoryRequest, Menu, MenuSection, UpdateCategoryRequest},
        dashboard::{DashboardSummary, StatusCount},
        kitchen_types::{CreateKitchenTypeRequest, KitchenTypeList},
        orders::{
            CreateOrderRequest, OrderLineRequest, OrderList, OrderWithItems,
            UpdateOrderStatusRequest,
        },
        payment_methods::{
            CreatePaymentMethodRequest, PaymentMethodList, UpdatePaymentMethodRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        restaurants::{
            CreateRestaurantRequest, RestaurantDetail, RestaurantList, UpdateRestaurantRequest,
        },
        shipping_options::{
            CreateShippingOptionRequest, ShippingOptionList, UpdateShippingOptionRequest,
        },
        social_links::{CreateSocialLinkRequest, SocialLinkList, UpdateSocialLinkRequest},
    },
    entity::sea_orm_active_enums::{
        Availability, OrderStatus, PaymentKind, RestaurantStatus, ShippingStatus, SocialNetwork,
    },
    models::{
        Category, KitchenType, Order, OrderItem, PaymentMethod, Product, Restaurant,
        ShippingOption, SocialLink, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, categories, dashboard, health, kitchen_types, menu, orders, params,
        payment_methods, products, restaurant_orders, restaurants, shipping_options, social_links,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        kitchen_types::list_kitchen_types,
        kitchen_types::create_kitchen_type,
        restaurants::list_restaurants,
        restaurants::list_my_restaurants,
        restaurants::create_restaurant,
        restaurants::get_restaurant,
        restaurants::update_restaurant,
        restaurants::delete_restaurant,
        social_links::list_social_links,
        social_links::create_social_link,
        social_links::get_social_link,
        social_links::update_social_link,
        social_links::delete_social_link,
        payment_methods::list_payment_methods,
        payment_methods::create_payment_method,
        payment_methods::get_payment_method,
        payment_methods::update_payment_method,
        payment_methods::delete_payment_method,
        shipping_options::list_shipping_options,
        shipping_options::create_shipping_option,
        shipping_options::get_shipping_option,
        shipping_options::update_shipping_option,
        shipping_options::delete_shipping_option,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        menu::get_menu,
        menu::get_menu_product,
        menu::list_restaurant_products,
        orders::list_my_orders,
        orders::create_order,
        orders::get_order,
        restaurant_orders::list_restaurant_orders,
        restaurant_orders::get_restaurant_order,
        restaurant_orders::update_order_status,
        dashboard::summary
    ),
    components(
        schemas(
            User,
            KitchenType,
            Restaurant,
            SocialLink,
            PaymentMethod,
            ShippingOption,
            Category,
            Product,
            Order,
            OrderItem,
            RestaurantStatus,
            SocialNetwork,
            PaymentKind,
            ShippingStatus,
            Availability,
            OrderStatus,
            Credentials,
            LoginResponse,
            CreateKitchenTypeRequest,
            KitchenTypeList,
            CreateRestaurantRequest,
            UpdateRestaurantRequest,
            RestaurantList,
            RestaurantDetail,
            CreateSocialLinkRequest,
            UpdateSocialLinkRequest,
            SocialLinkList,
            CreatePaymentMethodRequest,
            UpdatePaymentMethodRequest,
            PaymentMethodList,
            CreateShippingOptionRequest,
            UpdateShippingOptionRequest,
            ShippingOptionList,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            Menu,
            MenuSection,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateOrderRequest,
            OrderLineRequest,
            UpdateOrderStatusRequest,
            OrderList,
            OrderWithItems,
            StatusCount,
            DashboardSummary,
            params::Pagination,
            params::SortOrder,
            params::OrderListQuery,
            health::HealthData,
            Meta,
            ApiResponse<User>,
            ApiResponse<RestaurantDetail>,
            ApiResponse<RestaurantList>,
            ApiResponse<Menu>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<DashboardSummary>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Kitchen types", description = "Cuisine catalogue"),
        (name = "Restaurants", description = "Restaurant profiles"),
        (name = "Social links", description = "Owner-managed social links"),
        (name = "Payment methods", description = "Owner-managed payment methods"),
        (name = "Shipping options", description = "Owner-managed shipping options"),
        (name = "Categories", description = "Owner-managed menu categories"),
        (name = "Products", description = "Owner-managed products"),
        (name = "Menu", description = "Public menu"),
        (name = "Orders", description = "Customer orders"),
        (name = "Restaurant orders", description = "Orders received by a restaurant"),
        (name = "Dashboard", description = "Owner dashboard"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_group_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/login",
            "/api/restaurants/{slug}",
            "/api/restaurants/{slug}/categories/{category_id}/products/{id}",
            "/api/restaurants/{slug}/menu",
            "/api/restaurants/{slug}/orders/{id}/status",
            "/api/restaurants/{slug}/dashboard/summary",
            "/api/orders",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing from docs");
        }
    }
}
