pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::chat::handlers as chat;
use crate::companies::handlers as companies;
use crate::insights::handlers as insights;
use crate::sessions::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Company data
        .route("/api/v1/companies", get(companies::handle_list_companies))
        .route(
            "/api/v1/companies/:ticker",
            get(companies::handle_get_company),
        )
        .route(
            "/api/v1/companies/:ticker/insights/:category",
            get(insights::handle_company_insight),
        )
        // Dashboard sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/navigation",
            put(sessions::handle_navigate),
        )
        .route(
            "/api/v1/sessions/:id/panels/:category",
            get(sessions::handle_get_panel),
        )
        // Chat
        .route("/api/v1/sessions/:id/chat", post(chat::handle_ask))
        .route("/api/v1/chat/suggestions", get(chat::handle_suggestions))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::companies::JsonCompanyProvider;
    use crate::insights::completion::test_support::{FailingCompletion, FixedCompletion};
    use crate::llm_client::CompletionService;
    use crate::models::company::Company;

    fn app(completion: Arc<dyn CompletionService>) -> Router {
        let companies = JsonCompanyProvider::from_companies(vec![
            Company {
                ticker_symbol: Some("ACME".into()),
                company_name: Some("Acme Corp".into()),
                industry: Some("Software".into()),
                ..Company::default()
            },
            Company {
                ticker_symbol: Some("GLBX".into()),
                company_name: Some("Globex".into()),
                ..Company::default()
            },
        ]);
        build_router(AppState::new(Arc::new(companies), completion))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(Arc::new(FixedCompletion::text("ok")));
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "corpintel-api");
    }

    #[tokio::test]
    async fn test_company_lookup() {
        let app = app(Arc::new(FixedCompletion::text("ok")));

        let (status, body) = send(&app, Method::GET, "/api/v1/companies", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&app, Method::GET, "/api/v1/companies/glbx", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["company_name"], "Globex");

        let (status, body) = send(&app, Method::GET, "/api/v1/companies/NOPE", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_one_shot_insight_ready_and_degraded() {
        let app_ok = app(Arc::new(FixedCompletion::text("Acme Corp leads.")));
        let (status, body) = send(
            &app_ok,
            Method::GET,
            "/api/v1/companies/ACME/insights/strategic",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["company_id"], "ACME");
        assert_eq!(body["status"], "ready");
        assert_eq!(body["result"], json!({ "kind": "text", "content": "Acme Corp leads." }));

        let app_down = app(Arc::new(FailingCompletion));
        let (status, body) = send(
            &app_down,
            Method::GET,
            "/api/v1/companies/ACME/insights/competitors",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "competitor");
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["result"]["kind"], "structured");
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let app = app(Arc::new(FixedCompletion::text("ok")));
        let (status, _) = send(
            &app,
            Method::GET,
            "/api/v1/companies/ACME/insights/horoscope",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_navigation_and_chat() {
        let app = app(Arc::new(FixedCompletion::text("Solid outlook.")));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/sessions?tab=ai-insights&company=UNKNOWN",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["navigation"]["active_tab"], "ai-insights");
        assert_eq!(body["navigation"]["selected_company"], "ACME");
        assert_eq!(body["url"], "Companies?tab=ai-insights&company=ACME");
        assert_eq!(body["panels"].as_array().unwrap().len(), 6);
        let id = body["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/navigation?tab=news&company=GLBX"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["company"]["ticker_symbol"], "GLBX");

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/chat"),
            Some(json!({ "question": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{id}/chat"),
            Some(json!({ "question": "Outlook?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transcript"][0]["role"], "user");
        assert_eq!(body["transcript"][1]["text"], "Solid outlook.");
        assert_eq!(body["in_flight"], false);

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{id}/panels/performance"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "stock");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_suggestions() {
        let app = app(Arc::new(FixedCompletion::text("ok")));
        let (status, body) = send(&app, Method::GET, "/api/v1/chat/suggestions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);
    }
}
