//! Liveness and readiness probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

/// Probe verdict for the service or one of its dependencies
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Unhealthy,
}

/// Body returned by `/health` and `/ready`
#[derive(Serialize)]
pub struct ProbeResponse {
    pub status: Health,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<DependencyCheck>>,
}

/// Outcome of probing a single dependency
#[derive(Serialize)]
pub struct DependencyCheck {
    pub name: &'static str,
    pub status: Health,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: u64,
}

/// GET /health. Answers 200 as long as the process is up.
pub async fn health_check() -> impl IntoResponse {
    let response = ProbeResponse {
        status: Health::Healthy,
        version: env!("CARGO_PKG_VERSION"),
        checks: None,
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready. Answers 503 while the user store is unreachable so load
/// balancers hold traffic back until storage recovers.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let store = probe_user_store(&state).await;

    let status_code = match store.status {
        Health::Healthy => StatusCode::OK,
        Health::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    let response = ProbeResponse {
        status: store.status,
        version: env!("CARGO_PKG_VERSION"),
        checks: Some(vec![store]),
    };

    (status_code, Json(response))
}

async fn probe_user_store(state: &AppState) -> DependencyCheck {
    let started = Instant::now();
    let (status, error) = match state.user_service.list().await {
        Ok(_) => (Health::Healthy, None),
        Err(e) => (Health::Unhealthy, Some(e.to_string())),
    };

    DependencyCheck {
        name: "user_store",
        status,
        error,
        latency_ms: started.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Health::Healthy).unwrap(), "\"healthy\"");
        assert_eq!(
            serde_json::to_string(&Health::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_probe_response_omits_absent_checks() {
        let response = ProbeResponse {
            status: Health::Healthy,
            version: "0.1.0",
            checks: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"status": "healthy", "version": "0.1.0"}));
    }

    #[test]
    fn test_failed_check_carries_error() {
        let response = ProbeResponse {
            status: Health::Unhealthy,
            version: "0.1.0",
            checks: Some(vec![DependencyCheck {
                name: "user_store",
                status: Health::Unhealthy,
                error: Some("Connection refused".to_string()),
                latency_ms: 12,
            }]),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["checks"][0]["name"], "user_store");
        assert_eq!(json["checks"][0]["error"], "Connection refused");
        assert_eq!(json["checks"][0]["status"], "unhealthy");
    }
}
