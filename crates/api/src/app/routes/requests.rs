use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::SharedBank;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/requests", get(list_requests).post(submit_request))
}

pub async fn list_requests(Extension(bank): Extension<SharedBank>) -> axum::response::Response {
    (StatusCode::OK, Json(bank.requests())).into_response()
}

/// Decide the request against current stock. A pending outcome is still a
/// successful submission; the message carries the available count.
pub async fn submit_request(
    Extension(bank): Extension<SharedBank>,
    body: Result<Json<dto::SubmitRequestRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    match bank.submit_request(body.into()) {
        Ok(allocation) => (
            StatusCode::OK,
            Json(dto::SubmitRequestResponse::from(allocation)),
        )
            .into_response(),
        Err(e) => errors::bank_error_to_response(e),
    }
}
