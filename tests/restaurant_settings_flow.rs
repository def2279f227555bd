mod common;

use common::dec;
use restaurant_ordering_api::{
    dto::{
        payment_methods::{CreatePaymentMethodRequest, UpdatePaymentMethodRequest},
        shipping_options::{CreateShippingOptionRequest, UpdateShippingOptionRequest},
        social_links::{CreateSocialLinkRequest, UpdateSocialLinkRequest},
    },
    entity::sea_orm_active_enums::{PaymentKind, SocialNetwork},
    error::AppError,
    services::{payment_method_service, shipping_option_service, social_link_service},
};

// Social links, payment methods and shipping options are only reachable by
// the restaurant owner, and only under the restaurant they belong to.
#[tokio::test]
async fn settings_are_owner_only_and_tenant_scoped() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let owner = common::create_customer(&state).await?;
    let stranger = common::create_customer(&state).await?;
    let slug = common::create_restaurant(&state, &owner, "Settings Bistro").await?;
    let stranger_slug = common::create_restaurant(&state, &stranger, "Rival Bistro").await?;

    let link = social_link_service::create_social_link(
        &state,
        &owner,
        &slug,
        CreateSocialLinkRequest {
            kind: SocialNetwork::Instagram,
            url: "https://instagram.com/settings-bistro".into(),
            position: 0,
            active: None,
        },
    )
    .await?
    .data
    .unwrap();
    let method = payment_method_service::create_payment_method(
        &state,
        &owner,
        &slug,
        CreatePaymentMethodRequest {
            kind: PaymentKind::Card,
            description: "Card on delivery".into(),
            position: 0,
            active: None,
            config: None,
        },
    )
    .await?
    .data
    .unwrap();
    let option = shipping_option_service::create_shipping_option(
        &state,
        &owner,
        &slug,
        CreateShippingOptionRequest {
            name: "Bike courier".into(),
            price: dec("3.00"),
            status: None,
        },
    )
    .await?
    .data
    .unwrap();

    // A non-owner is refused even though every id exists.
    assert!(matches!(
        social_link_service::list_social_links(&state, &stranger, &slug).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        social_link_service::get_social_link(&state, &stranger, &slug, link.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        social_link_service::update_social_link(
            &state,
            &stranger,
            &slug,
            link.id,
            UpdateSocialLinkRequest {
                active: Some(false),
                ..Default::default()
            },
        )
        .await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        social_link_service::delete_social_link(&state, &stranger, &slug, link.id).await,
        Err(AppError::Forbidden)
    ));

    assert!(matches!(
        payment_method_service::get_payment_method(&state, &stranger, &slug, method.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        payment_method_service::update_payment_method(
            &state,
            &stranger,
            &slug,
            method.id,
            UpdatePaymentMethodRequest {
                description: Some("Cash only".into()),
                ..Default::default()
            },
        )
        .await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        payment_method_service::delete_payment_method(&state, &stranger, &slug, method.id).await,
        Err(AppError::Forbidden)
    ));

    assert!(matches!(
        shipping_option_service::get_shipping_option(&state, &stranger, &slug, option.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        shipping_option_service::update_shipping_option(
            &state,
            &stranger,
            &slug,
            option.id,
            UpdateShippingOptionRequest {
                price: Some(dec("0.00")),
                ..Default::default()
            },
        )
        .await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        shipping_option_service::delete_shipping_option(&state, &stranger, &slug, option.id)
            .await,
        Err(AppError::Forbidden)
    ));

    // Under the stranger's own restaurant the owner's ids do not exist.
    assert!(matches!(
        social_link_service::get_social_link(&state, &stranger, &stranger_slug, link.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        social_link_service::delete_social_link(&state, &stranger, &stranger_slug, link.id)
            .await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        payment_method_service::update_payment_method(
            &state,
            &stranger,
            &stranger_slug,
            method.id,
            UpdatePaymentMethodRequest::default(),
        )
        .await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        payment_method_service::delete_payment_method(
            &state,
            &stranger,
            &stranger_slug,
            method.id
        )
        .await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        shipping_option_service::get_shipping_option(&state, &stranger, &stranger_slug, option.id)
            .await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        shipping_option_service::delete_shipping_option(
            &state,
            &stranger,
            &stranger_slug,
            option.id
        )
        .await,
        Err(AppError::NotFound)
    ));

    // Nothing the stranger tried changed the owner's records.
    let link = social_link_service::get_social_link(&state, &owner, &slug, link.id)
        .await?
        .data
        .unwrap();
    assert!(link.active);
    let method = payment_method_service::get_payment_method(&state, &owner, &slug, method.id)
        .await?
        .data
        .unwrap();
    assert_eq!(method.description, "Card on delivery");
    let option = shipping_option_service::get_shipping_option(&state, &owner, &slug, option.id)
        .await?
        .data
        .unwrap();
    assert_eq!(option.price, dec("3.00"));

    Ok(())
}
