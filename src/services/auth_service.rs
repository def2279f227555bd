use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, Credentials, LoginResponse},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::ROLE_CUSTOMER,
    models::User,
    response::ApiResponse,
    services::validation,
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

pub async fn register_user(
    state: &AppState,
    payload: Credentials,
) -> AppResult<ApiResponse<User>> {
    let Credentials { email, password } = payload;
    let email = validation::email("email", &email)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::bad_request("Email is already taken"));
    }

    let password_hash = hash_password(&password)?;

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(ROLE_CUSTOMER.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.id,
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::ok("User created", user_from_entity(user)))
}

pub async fn login_user(
    state: &AppState,
    payload: Credentials,
) -> AppResult<ApiResponse<LoginResponse>> {
    let Credentials { email, password } = payload;
    let user = Users::find()
        .filter(UserCol::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::bad_request("Invalid email or password")),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::bad_request("Invalid email or password"));
    }

    let issued = issue_token(
        user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_ttl_hours,
    )?;

    audit::record(
        &state.pool,
        user.id,
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    tracing::debug!(user_id = %user.id, expires_at = %issued.expires_at, "token issued");
    Ok(ApiResponse::ok(
        "Logged in",
        LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user_from_entity(user),
        },
    ))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

/// A signed token and the instant it stops being accepted.
#[derive(Debug)]
pub struct IssuedToken {
    /// `Bearer <jwt>`, usable as the `Authorization` header as is.
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub fn issue_token(
    user_id: Uuid,
    role: &str,
    secret: &str,
    ttl_hours: i64,
) -> AppResult<IssuedToken> {
    let issued_at = Utc::now();
    let expires_at = issued_at
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("token lifetime out of range")))?;

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
    };

    let jwt = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(IssuedToken {
        token: format!("Bearer {jwt}"),
        expires_at,
    })
}

pub(crate) fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        role: model.role,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn issued_token_carries_subject_role_and_lifetime() {
        let user_id = Uuid::new_v4();
        let issued = issue_token(user_id, ROLE_CUSTOMER, "secret", 24).unwrap();

        let jwt = issued.token.strip_prefix("Bearer ").unwrap();
        let claims = decode::<Claims>(
            jwt,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, ROLE_CUSTOMER);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("correct horse").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"correct horse", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }
}
