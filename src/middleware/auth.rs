use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, error::AppError, state::AppState};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CUSTOMER: &str = "customer";

/// The authenticated caller, taken from a `Bearer` JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: String,
}

pub fn ensure_role(user: &AuthUser, role: &str) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, ROLE_ADMIN)
}

/// Extracts and decodes a bearer token from an `Authorization` header value.
pub fn decode_bearer(auth_str: &str, secret: &str) -> Result<AuthUser, AppError> {
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::bad_request("Invalid Authorization scheme"))?
        .trim();

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::bad_request("Invalid or expired token"))?;

    Ok(AuthUser {
        user_id: decoded.claims.sub,
        role: decoded.claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::bad_request("Missing Authorization header"))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Authorization header"))?;

        decode_bearer(auth_str, &state.config.jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::issue_token;

    #[test]
    fn decode_bearer_round_trips_issued_token() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, ROLE_CUSTOMER, "secret", 1).unwrap().token;
        let user = decode_bearer(&token, "secret").unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, ROLE_CUSTOMER);
    }

    #[test]
    fn decode_bearer_rejects_wrong_secret_and_scheme() {
        let token = issue_token(Uuid::new_v4(), ROLE_CUSTOMER, "secret", 1).unwrap().token;
        assert!(matches!(
            decode_bearer(&token, "other"),
            Err(AppError::BadRequest(_))
        ));
        let raw = token.trim_start_matches("Bearer ");
        assert!(matches!(
            decode_bearer(&format!("Basic {raw}"), "secret"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn ensure_admin_rejects_customers() {
        let customer = AuthUser {
            user_id: Uuid::new_v4(),
            role: ROLE_CUSTOMER.into(),
        };
        assert!(matches!(ensure_admin(&customer), Err(AppError::Forbidden)));
        let admin = AuthUser {
            user_id: Uuid::new_v4(),
            role: ROLE_ADMIN.into(),
        };
        assert!(ensure_admin(&admin).is_ok());
    }
}
