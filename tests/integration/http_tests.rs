//! HTTP route and tenant guard tests
//!
//! Drives the actix application in-process with `test::init_service`.

#[cfg(test)]
mod tests {
    use crate::common::database::test_storage_config;
    use crate::common::{EventFactory, ExperimentFactory, TestDatabase, fixtures};
    use abtest_analytics::config::{AppConfig, AuthConfig, Config, RateLimitConfig};
    use abtest_analytics::core::analytics::AnalyticsSummary;
    use abtest_analytics::core::models::{EventType, Tenant};
    use abtest_analytics::server::routes::analytics::DashboardResponse;
    use abtest_analytics::server::{AppState, HttpServer};
    use abtest_analytics::utils::error::ErrorResponse;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use serde_json::{Value, json};

    const JWT_SECRET: &str = "an-http-test-secret-that-is-long-enough";

    fn config() -> Config {
        Config {
            app: AppConfig {
                storage: test_storage_config(),
                ..Default::default()
            },
        }
    }

    async fn setup(config: Config) -> (TestDatabase, Tenant, web::Data<AppState>) {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;
        let state = web::Data::new(AppState::new(config, db.storage()));
        (db, tenant, state)
    }

    fn error_message(body: &[u8]) -> String {
        let parsed: ErrorResponse = serde_json::from_slice(body).unwrap();
        parsed.error.message
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let (_db, _tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], true);
        assert!(body["version"].is_string());
    }

    #[actix_web::test]
    async fn test_missing_credentials_are_rejected() {
        let (_db, _tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/experiments").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = test::read_body(res).await;
        assert!(error_message(&body).contains("Tenant identification required"));
    }

    #[actix_web::test]
    async fn test_guard_errors_echo_request_id() {
        let (_db, _tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/experiments").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let header = res
            .headers()
            .get("x-request-id")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.error.code, "UNAUTHORIZED");
        assert_eq!(body.error.request_id, Some(header));
    }

    #[actix_web::test]
    async fn test_unknown_api_key_is_rejected() {
        let (_db, _tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/analytics/summary")
            .insert_header(("x-api-key", "not-a-key"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = test::read_body(res).await;
        assert!(error_message(&body).contains("Invalid API key"));
    }

    #[actix_web::test]
    async fn test_experiment_lifecycle() {
        let (_db, tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/experiments")
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .set_json(json!({"name": "Homepage CTA Test", "variants": ["A", "B"]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(res).await;
        assert_eq!(created["status"], "DRAFT");
        assert_eq!(created["tenantId"], tenant.id.to_string());
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/experiments")
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);

        let req = test::TestRequest::patch()
            .uri(&format!("/experiments/{}", id))
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .set_json(json!({"status": "ACTIVE"}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "ACTIVE");

        let req = test::TestRequest::get()
            .uri(&format!("/experiments/{}", id))
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let detail: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail["_count"]["events"], 0);
        assert_eq!(detail["variants"], json!(["A", "B"]));
    }

    #[actix_web::test]
    async fn test_invalid_experiment_body_is_bad_request() {
        let (_db, tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        for body in [
            json!({"name": "", "variants": ["A"]}),
            json!({"name": "No variants", "variants": []}),
            json!({"name": "Bad status", "variants": ["A"], "status": "RUNNING"}),
        ] {
            let req = test::TestRequest::post()
                .uri("/experiments")
                .insert_header(("x-api-key", tenant.api_key.as_str()))
                .set_json(body)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_foreign_experiment_is_not_found() {
        let (db, tenant, state) = setup(config()).await;
        let other = fixtures::tenant(&db).await;
        let exp = ExperimentFactory::create(&db, other.id, "Private").await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/experiments/{}", exp.id))
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body = test::read_body(res).await;
        assert_eq!(
            error_message(&body),
            format!("Experiment with ID {} not found", exp.id)
        );
    }

    #[actix_web::test]
    async fn test_event_ingest_extracts_attribution() {
        let (db, tenant, state) = setup(config()).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Checkout").await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/events")
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .set_json(json!({
                "userId": "user-e2e-1",
                "eventType": "PAGE_VIEW",
                "properties": {"experimentId": exp.id, "variant": "A", "page": "/home"}
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let event: Value = test::read_body_json(res).await;
        assert_eq!(event["userId"], "user-e2e-1");
        assert_eq!(event["eventType"], "PAGE_VIEW");
        assert_eq!(event["experimentId"], exp.id.to_string());
        assert_eq!(event["variant"], "A");
        assert_eq!(event["tenantId"], tenant.id.to_string());
        assert_eq!(event["properties"]["page"], "/home");
    }

    #[actix_web::test]
    async fn test_event_validation() {
        let (_db, tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        for body in [
            json!({"userId": "u1", "eventType": "PURCHASE"}),
            json!({"eventType": "CLICK"}),
            json!({"userId": "u1", "eventType": "CLICK", "timestamp": "yesterday"}),
            json!({"userId": "u1", "eventType": "CLICK",
                   "properties": {"experimentId": uuid::Uuid::new_v4()}}),
        ] {
            let req = test::TestRequest::post()
                .uri("/events")
                .insert_header(("x-api-key", tenant.api_key.as_str()))
                .set_json(body)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_event_ingest_is_throttled_per_tenant() {
        let mut config = config();
        config.app.rate_limit = RateLimitConfig {
            events_per_minute: 2,
        };
        let (db, tenant, state) = setup(config).await;
        let other = fixtures::tenant(&db).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let send = |api_key: String| {
            test::TestRequest::post()
                .uri("/events")
                .insert_header(("x-api-key", api_key))
                .set_json(json!({"userId": "u1", "eventType": "CLICK"}))
                .to_request()
        };

        for _ in 0..2 {
            let res = test::call_service(&app, send(tenant.api_key.clone())).await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }
        let res = test::call_service(&app, send(tenant.api_key.clone())).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

        let res = test::call_service(&app, send(other.api_key.clone())).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn test_summary_endpoint() {
        let (db, tenant, state) = setup(config()).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Checkout").await;
        for (user, event_type, variant) in [
            ("u1", EventType::PageView, "A"),
            ("u1", EventType::Conversion, "A"),
            ("u2", EventType::Conversion, "B"),
            ("u3", EventType::PageView, "B"),
        ] {
            EventFactory::insert(
                &db,
                EventFactory::variant(tenant.id, exp.id, user, event_type, variant),
            )
            .await;
        }
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/analytics/summary?experimentId={}", exp.id))
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let summary: AnalyticsSummary = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary.total_events, 4);
        assert_eq!(summary.unique_users, 3);
        assert_eq!(summary.variant("A").unwrap().conversion_rate, 1.0);
        assert_eq!(summary.variant("B").unwrap().conversion_rate, 0.5);

        let req = test::TestRequest::get()
            .uri("/analytics/summary?startDate=not-a-date")
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_dashboard_endpoint() {
        let (db, tenant, state) = setup(config()).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Checkout").await;
        ExperimentFactory::create(&db, tenant.id, "Pricing").await;
        EventFactory::insert(
            &db,
            EventFactory::variant(tenant.id, exp.id, "u1", EventType::Conversion, "B"),
        )
        .await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/analytics/dashboard?search=CHECK&sortBy=conversionRate&sortOrder=desc&limit=1")
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let view: DashboardResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].variant, "B");
        assert_eq!(view.rows[0].conversion_rate, 1.0);
        assert_eq!(view.pagination.total, 2);
        assert!(view.pagination.has_next);
        assert_eq!(view.cards.total_campaigns, 1);
        assert_eq!(view.cards.active_experiments, 1);

        let req = test::TestRequest::get()
            .uri("/analytics/dashboard?limit=0")
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_bearer_token_resolves_tenant() {
        let mut config = config();
        config.app.auth = AuthConfig {
            jwt_secret: Some(JWT_SECRET.to_string()),
            ..Default::default()
        };
        let (_db, tenant, state) = setup(config).await;
        let token = state.auth.issue_token(tenant.id, 300).unwrap();
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/experiments")
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/experiments")
            .insert_header(("authorization", "Bearer garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bearer_ignored_without_secret() {
        let (_db, tenant, state) = setup(config()).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/experiments")
            .insert_header(("authorization", "Bearer whatever"))
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_api_prefix() {
        let mut config = config();
        config.app.server.api_prefix = "/api".to_string();
        let (_db, tenant, state) = setup(config).await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/experiments")
            .insert_header(("x-api-key", tenant.api_key.as_str()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
