//! Field checks shared by the services. Each returns a `BadRequest` naming the field.

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    services::pricing,
};

/// Trims `value` and rejects it when empty or longer than `max_len` characters.
pub fn required_text(field: &str, value: &str, max_len: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

/// Like [`required_text`] for optional fields; blank input becomes `None`.
pub fn optional_text(field: &str, value: Option<String>, max_len: usize) -> AppResult<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, max_len).map(Some),
    }
}

pub fn non_negative_price(field: &str, price: Decimal) -> AppResult<Decimal> {
    if price < Decimal::ZERO {
        return Err(AppError::bad_request(format!("{field} must not be negative")));
    }
    if price.scale() > 2 && price != price.round_dp(2) {
        return Err(AppError::bad_request(format!(
            "{field} must have at most 2 decimal places"
        )));
    }
    if price >= pricing::amount_ceiling() {
        return Err(AppError::bad_request(format!("{field} is too large")));
    }
    Ok(price.round_dp(2))
}

pub fn position(value: i32) -> AppResult<i32> {
    if value < 0 {
        return Err(AppError::bad_request("position must not be negative"));
    }
    Ok(value)
}

pub fn email(field: &str, value: &str) -> AppResult<String> {
    let value = required_text(field, value, 254)?.to_lowercase();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::bad_request(format!("{field} is not a valid email")));
    }
    Ok(value)
}

/// Accepts absolute `http`/`https` URLs with a host.
pub fn web_url(field: &str, value: &str) -> AppResult<String> {
    let value = required_text(field, value, 200)?;
    let parsed = url::Url::parse(&value)
        .map_err(|_| AppError::bad_request(format!("{field} is not a valid URL")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::bad_request(format!(
            "{field} must be an http or https URL"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_limits() {
        assert_eq!(required_text("name", "  Pizza ", 10).unwrap(), "Pizza");
        assert!(required_text("name", "   ", 10).is_err());
        assert!(required_text("name", "abcdefghijk", 10).is_err());
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text("note", Some("  ".into()), 10).unwrap(), None);
        assert_eq!(optional_text("note", None, 10).unwrap(), None);
        assert_eq!(
            optional_text("note", Some(" hi ".into()), 10).unwrap(),
            Some("hi".into())
        );
    }

    #[test]
    fn prices_must_be_non_negative_cents() {
        assert_eq!(
            non_negative_price("price", Decimal::new(350, 2)).unwrap(),
            Decimal::new(350, 2)
        );
        assert!(non_negative_price("price", Decimal::ZERO).is_ok());
        assert!(non_negative_price("price", Decimal::new(-1, 2)).is_err());
        assert!(non_negative_price("price", Decimal::new(1001, 3)).is_err());
        assert!(non_negative_price("price", Decimal::new(1000, 3)).is_ok());
    }

    #[test]
    fn email_requires_local_part_and_domain() {
        assert_eq!(email("email", " Ana@Example.com ").unwrap(), "ana@example.com");
        assert!(email("email", "ana@example").is_err());
        assert!(email("email", "@example.com").is_err());
        assert!(email("email", "ana example.com").is_err());
    }

    #[test]
    fn web_url_requires_http_scheme() {
        assert!(web_url("url", "https://instagram.com/pizza").is_ok());
        assert!(web_url("url", "ftp://example.com").is_err());
        assert!(web_url("url", "not a url").is_err());
    }
}
