use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::BoxError;
use serde_json::json;

use storefront_infra::{CatalogStoreError, QueryError};

/// Map a hard query failure to an HTTP response.
///
/// Total over `QueryError`. The current hard-failing routes (`/groups` and
/// `/groups/:group/categories`) only reach the `UnsupportedGroup` and `Store`
/// arms; the input and not-found arms fix the body any other route gets if it
/// starts propagating those errors.
pub fn query_error_to_response(err: QueryError) -> axum::response::Response {
    match err {
        QueryError::UnsupportedGroup(name) => json_error(
            StatusCode::BAD_REQUEST,
            "unsupported_group",
            format!("unsupported group name: {name}"),
        ),
        QueryError::MissingFilter(name) => json_error(
            StatusCode::BAD_REQUEST,
            "missing_filter",
            format!("missing required filter: {name}"),
        ),
        QueryError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        QueryError::Store(CatalogStoreError::Unavailable(msg)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
        QueryError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

/// Errors raised by the tower middleware stack (request timeout).
pub async fn middleware_error_to_response(err: BoxError) -> axum::response::Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        return json_error(
            StatusCode::REQUEST_TIMEOUT,
            "timeout",
            "request timed out",
        );
    }
    tracing::error!(error = %err, "unhandled middleware error");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        err.to_string(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: QueryError) -> StatusCode {
        query_error_to_response(err).status()
    }

    #[test]
    fn query_errors_map_to_statuses() {
        assert_eq!(
            status_of(QueryError::UnsupportedGroup("NOPE".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(QueryError::MissingFilter("category")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(QueryError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(QueryError::Store(CatalogStoreError::Unavailable("down".into()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(QueryError::Store(CatalogStoreError::Decode("bad".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn other_middleware_errors_are_internal() {
        let err: BoxError = "layer failed".into();
        assert_eq!(
            middleware_error_to_response(err).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
