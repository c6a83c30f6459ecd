// API integration tests against the fixture model
//
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use crop_advisor::{create_router, ArtifactPaths, AppState, Recommender};
    use serde_json::Value;
    use std::path::PathBuf;
    use tower::ServiceExt; // for oneshot

    fn create_test_app() -> axum::Router {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/model");
        let recommender = Recommender::load(&ArtifactPaths::in_dir(dir)).unwrap();
        create_router(AppState::from_recommender(recommender))
    }

    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    fn predict_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn rice_body() -> Value {
        serde_json::json!({
            "region": "South",
            "season": "Summer",
            "rainfall_mm": 300.0,
            "temperature_c": 35.0,
            "humidity_pct": 80.0,
            "soil_moisture_pct": 65.0,
            "sunlight_hours": 10.0,
            "soil_ph": 6.5,
            "nitrogen_kg_ha": 90.0,
            "phosphorus_kg_ha": 60.0,
            "potassium_kg_ha": 75.0
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_vocabulary() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/vocabulary").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["crops"].as_array().unwrap().len(), 4);
        assert_eq!(body["regions"][0], "Central");
        assert_eq!(body["readings"].as_array().unwrap().len(), 9);
        assert_eq!(body["readings"][0]["key"], "rainfall");
        assert_eq!(body["readings"][0]["max"], 361.0);
    }

    #[tokio::test]
    async fn test_defaults() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/defaults").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_response(response).await;
        assert_eq!(body["region"], "Central");
        assert_eq!(body["season"], "Autumn");
        assert_eq!(body["rainfall_mm"], 200.0);
    }

    #[tokio::test]
    async fn test_predict_rice() {
        let response = create_test_app().oneshot(predict_request(rice_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["label"], "Rice");
        assert_eq!(body["confidence_level"], "Good");
        assert_eq!(body["alternatives"].as_array().unwrap().len(), 3);
        assert!(body["explanation"]["sentence"]
            .as_str()
            .unwrap()
            .starts_with("Rice is suitable due to high rainfall (300mm)"));
    }

    #[tokio::test]
    async fn test_predict_is_cached() {
        let app = create_test_app();
        let first = json_response(app.clone().oneshot(predict_request(rice_body())).await.unwrap()).await;
        let second = json_response(app.oneshot(predict_request(rice_body())).await.unwrap()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_predict_unknown_region() {
        let mut body = rice_body();
        body["region"] = Value::from("Atlantis");
        let response = create_test_app().oneshot(predict_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_response(response).await;
        assert_eq!(body["error"], "unknown region 'Atlantis'");
    }

    #[tokio::test]
    async fn test_predict_out_of_range() {
        let mut body = rice_body();
        body["soil_ph"] = Value::from(12.0);
        let response = create_test_app().oneshot(predict_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("soil_ph = 12"));
    }
}
