//! The JSON envelope every endpoint answers with:
//! `{ "message": ..., "data": ..., "meta": { "page", "per_page", "total" } }`.

use serde::Serialize;
use utoipa::ToSchema;

/// Paging info. Single-record responses carry it with every field `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A list returned whole: one page holding every item.
    pub fn unpaged(len: usize) -> Self {
        let total = len as i64;
        Self::new(1, total, total)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    /// One record, with an empty `meta`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::success(message, data, Some(Meta::empty()))
    }

    pub fn page(message: impl Into<String>, data: T, meta: Meta) -> Self {
        Self::success(message, data, Some(meta))
    }
}

impl ApiResponse<serde_json::Value> {
    /// Deletion acknowledgement; `data` is an empty object.
    pub fn deleted() -> Self {
        Self::ok("Deleted", serde_json::json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_record_envelope_has_null_meta_fields() {
        let body = serde_json::to_value(ApiResponse::ok("Restaurant", json!({ "slug": "luigi" })))
            .unwrap();
        assert_eq!(
            body,
            json!({
                "message": "Restaurant",
                "data": { "slug": "luigi" },
                "meta": { "page": null, "per_page": null, "total": null },
            })
        );
    }

    #[test]
    fn unpaged_meta_reports_one_full_page() {
        assert_eq!(Meta::unpaged(3), Meta::new(1, 3, 3));
        assert_eq!(Meta::unpaged(0), Meta::new(1, 0, 0));
    }

    #[test]
    fn deleted_carries_empty_object() {
        let body = serde_json::to_value(ApiResponse::deleted()).unwrap();
        assert_eq!(body["message"], "Deleted");
        assert_eq!(body["data"], json!({}));
    }
}
