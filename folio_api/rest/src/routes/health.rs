use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { http: true, email })).into_response()
}

#[cfg(test)]
mod tests {
    use folio_core_health_contracts::MockHealthFeatureService;
    use serde_json::json;

    use super::*;
    use crate::routes::body_json;

    #[tokio::test]
    async fn healthy() {
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus { email: true });

        let response = health(State(Arc::new(service))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn smtp_down() {
        let service =
            MockHealthFeatureService::new().with_get_status(HealthStatus { email: false });

        let response = health(State(Arc::new(service))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"http": true, "email": false}));
    }
}
