use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity::sea_orm_active_enums::SocialNetwork, models::SocialLink};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSocialLinkRequest {
    pub kind: SocialNetwork,
    pub url: String,
    #[serde(default)]
    pub position: i32,
    pub active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSocialLinkRequest {
    pub kind: Option<SocialNetwork>,
    pub url: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SocialLinkList {
    pub items: Vec<SocialLink>,
}
