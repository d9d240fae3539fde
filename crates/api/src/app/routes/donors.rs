use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

use crate::app::services::SharedBank;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/donors", get(list_donors).post(register_donor))
        .route("/donors/:id", delete(remove_donor))
}

/// Most-recent-first.
pub async fn list_donors(Extension(bank): Extension<SharedBank>) -> axum::response::Response {
    (StatusCode::OK, Json(bank.donors())).into_response()
}

pub async fn register_donor(
    Extension(bank): Extension<SharedBank>,
    body: Result<Json<dto::RegisterDonorRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    match bank.register_donor(body.into()) {
        Ok(donor) => (StatusCode::OK, Json(donor)).into_response(),
        Err(e) => errors::bank_error_to_response(e),
    }
}

pub async fn remove_donor(
    Extension(bank): Extension<SharedBank>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match bank.remove_donor(&id) {
        Ok(ok) => (StatusCode::OK, Json(dto::DeleteResponse { ok })).into_response(),
        Err(e) => errors::bank_error_to_response(e),
    }
}
