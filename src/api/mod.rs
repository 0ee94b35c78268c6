// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::require_auth,
    profiles::LocalProfile,
    state::AppState,
};

pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/users/me",
            get(users::get_current_user)
                .patch(users::update_current_user)
                .delete(users::delete_current_user),
        )
        .route("/users/sync", post(users::sync_current_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::get_current_user,
        users::sync_current_user,
        users::update_current_user,
        users::delete_current_user,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            LocalProfile,
            users::UserMeResponse,
            users::UpdateProfileRequest,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Users", description = "Caller identity and local profile"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
