use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::SharedBank;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(get_inventory))
        .route("/inventory/add", post(add_units))
        .route("/inventory/remove", post(remove_units))
}

pub async fn get_inventory(Extension(bank): Extension<SharedBank>) -> axum::response::Response {
    (StatusCode::OK, Json(bank.inventory())).into_response()
}

pub async fn add_units(
    Extension(bank): Extension<SharedBank>,
    body: Result<Json<dto::AdjustInventoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    match bank.add_units(&body.group, body.qty()) {
        Ok(qty) => group_count(body.group, qty),
        Err(e) => errors::bank_error_to_response(e),
    }
}

pub async fn remove_units(
    Extension(bank): Extension<SharedBank>,
    body: Result<Json<dto::AdjustInventoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    match bank.remove_units(&body.group, body.qty()) {
        Ok(qty) => group_count(body.group, qty),
        Err(e) => errors::bank_error_to_response(e),
    }
}

fn group_count(group: String, qty: u64) -> axum::response::Response {
    (StatusCode::OK, Json(dto::GroupCountResponse { group, qty })).into_response()
}
