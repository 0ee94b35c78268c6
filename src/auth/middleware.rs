// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied to the whole `/v1` router subtree, so no protected handler can run
//! without the gate having produced an identity first.
//!
//! ```rust,ignore
//! let v1 = Router::new()
//!     .route("/users/me", get(users::get_current_user))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::gate::{authenticate, AuthenticatedRequest};
use crate::state::AppState;

/// Authenticate the request and store identity and profile in its extensions.
pub async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match authenticate(request, &state.auth_config, &state.profiles).await {
        Ok(AuthenticatedRequest {
            mut request,
            identity,
            profile,
        }) => {
            request.extensions_mut().insert(identity);
            request.extensions_mut().insert(profile);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
