use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::{Duration, Utc};

use aiventory_auth::{verify_password, JwtClaims, NewStaff};

use crate::app::services::{AppServices, TOKEN_TTL_HOURS};
use crate::app::{dto, errors};

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewStaff>,
) -> axum::response::Response {
    let staff = match body.into_staff(Utc::now()) {
        Ok(s) => s,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };

    if let Err(e) = services.staff.insert(&staff).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(dto::staff_to_json(&staff))).into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let username = body.username.trim().to_lowercase();

    let staff = match services.staff.find_by_username(&username).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "invalid username or password",
            )
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    match verify_password(&body.password, &staff.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "invalid username or password",
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "password verification failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "auth_error",
                "authentication failure",
            );
        }
    }

    let now = Utc::now();
    let claims = JwtClaims {
        sub: staff.id,
        name: staff.display_name.clone(),
        role: staff.role.clone(),
        issued_at: now,
        expires_at: now + Duration::hours(TOKEN_TTL_HOURS),
    };

    let token = match services.tokens.issue(&claims) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "auth_error",
                "authentication failure",
            );
        }
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "staff": dto::staff_to_json(&staff),
        })),
    )
        .into_response()
}
