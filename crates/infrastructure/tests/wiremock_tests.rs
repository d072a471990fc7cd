//! Adapter integration tests using WireMock
//!
//! Exercise the adapters together with the application services against
//! mocked AMap and DeepSeek HTTP APIs.

use std::sync::Arc;

use ai_core::InferenceConfig;
use application::{
    ApplicationError, InferencePort, RoutePlannerPort, RouteService, TripService,
};
use domain::{DomainError, GeoPoint, RouteMode, RouteQuery};
use infrastructure::{AmapRouteAdapter, DeepSeekInferenceAdapter};
use integration_amap::AmapConfig;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn amap_config_for_mock(base_url: &str) -> AmapConfig {
    AmapConfig::for_testing().with_base_url(base_url)
}

fn inference_config_for_mock(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        request_url: format!("{base_url}/v1/chat/completions"),
        api_key: Some("sk-test".to_string()),
        timeout_ms: 5000,
        ..Default::default()
    }
}

fn chat_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "deepseek-chat",
        "choices": [{
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 200, "completion_tokens": 100, "total_tokens": 300}
    })
}

const ITINERARY_OUTPUT: &str = r#"```json
{
  "tripName": "衢州山水两日游",
  "days": 2,
  "schedule": [
    {"day": 1, "items": [{"timeSlot": "上午", "scenicName": "江郎山", "scenicAddress": "江山市石门镇", "description": "三爿石", "tips": "穿运动鞋"}]},
    {"day": 2, "items": [{"timeSlot": "全天", "scenicName": "根宫佛国", "scenicAddress": "开化县", "description": "根雕", "tips": ""}]}
  ],
  "routeList": [
    {"day": 1, "name": "江郎山", "address": "江山市石门镇", "startTime": "08:30", "endTime": "12:00", "description": "登山", "longitude": 118.6798, "latitude": 28.5964},
    {"day": 2, "name": "根宫佛国", "address": "开化县", "startTime": "09:00", "endTime": "16:00", "description": "参观", "longitude": "118.4157", "latitude": "29.1370"}
  ]
}
```"#;

// =============================================================================
// AMap Route Adapter
// =============================================================================

mod route_tests {
    use super::*;

    #[tokio::test]
    async fn adapter_returns_raw_document() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/direction/walking"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status":"1","route":{"paths":[{"polyline":"_p~iF~ps|U"}]}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = AmapRouteAdapter::new(&amap_config_for_mock(&server.uri())).unwrap();
        let query = RouteQuery::new(
            GeoPoint::new_unchecked(118.875, 28.9783),
            GeoPoint::new_unchecked(118.88, 28.97),
            RouteMode::Walking,
        );

        let response = adapter.fetch_route(&query).await.unwrap();
        assert_eq!(response["route"]["paths"][0]["polyline"], "_p~iF~ps|U");
    }

    #[tokio::test]
    async fn adapter_maps_rate_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let adapter = AmapRouteAdapter::new(&amap_config_for_mock(&server.uri())).unwrap();
        let query = RouteQuery::new(
            GeoPoint::new_unchecked(118.875, 28.9783),
            GeoPoint::new_unchecked(118.88, 28.97),
            RouteMode::Driving,
        );

        let err = adapter.fetch_route(&query).await.unwrap_err();
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[tokio::test]
    async fn route_service_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/direction/driving"))
            .and(query_param("origin", "118.875,28.9783"))
            .and(query_param("destination", "118.6798,28.5964"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status":"1","info":"OK","route":{"paths":[{"polyline":"_p~iF~ps|U_ulLnnqC_mqNvxq`@"}]}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = AmapRouteAdapter::new(&amap_config_for_mock(&server.uri())).unwrap();
        let service = RouteService::new(Arc::new(adapter));

        let route = service
            .plan_route("28.9783,118.875", "28.5964,118.6798", None)
            .await
            .unwrap();

        assert_eq!(
            route.to_lng_lat_strings(),
            vec!["3.85,-12.02", "4.07,-12.095", "4.3252,-12.6453"]
        );
    }

    #[tokio::test]
    async fn route_service_surfaces_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/direction/transit/integrated"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status":"0","info":"INVALID_USER_KEY","infocode":"10001"}"#,
            ))
            .mount(&server)
            .await;

        let adapter = AmapRouteAdapter::new(&amap_config_for_mock(&server.uri())).unwrap();
        let service = RouteService::new(Arc::new(adapter));

        let err = service
            .plan_route("28.9783,118.875", "28.5964,118.6798", Some("transit"))
            .await
            .unwrap_err();

        match err {
            ApplicationError::Domain(DomainError::UpstreamStatusFailure { status, info, infocode }) => {
                assert_eq!(status, "0");
                assert_eq!(info, "INVALID_USER_KEY");
                assert_eq!(infocode, "10001");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

// =============================================================================
// DeepSeek Inference Adapter
// =============================================================================

mod inference_tests {
    use super::*;

    #[tokio::test]
    async fn adapter_reports_usage_and_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("你好")))
            .expect(1)
            .mount(&server)
            .await;

        let adapter =
            DeepSeekInferenceAdapter::new(inference_config_for_mock(&server.uri())).unwrap();
        let result = adapter.generate_with_system("system", "hi").await.unwrap();

        assert_eq!(result.content, "你好");
        assert_eq!(result.model, "deepseek-chat");
        assert_eq!(result.tokens_used, Some(300));
    }

    #[tokio::test]
    async fn adapter_health_uses_models_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let adapter =
            DeepSeekInferenceAdapter::new(inference_config_for_mock(&server.uri())).unwrap();
        assert!(adapter.is_healthy().await);
    }

    #[tokio::test]
    async fn trip_service_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(ITINERARY_OUTPUT)))
            .expect(1)
            .mount(&server)
            .await;

        let adapter =
            DeepSeekInferenceAdapter::new(inference_config_for_mock(&server.uri())).unwrap();
        let service = TripService::new(Arc::new(adapter));

        let itinerary = service.generate_trip("衢州两天怎么玩").await.unwrap();

        assert_eq!(itinerary.trip_name, "衢州山水两日游");
        assert_eq!(itinerary.days, 2);
        assert_eq!(itinerary.daily_schedules.len(), 2);
        assert_eq!(itinerary.route_stops.len(), 2);
        assert!((itinerary.route_stops[1].location.longitude() - 118.4157).abs() < 1e-9);
        assert_eq!(itinerary.stops_for_day(1).count(), 1);
    }

    #[tokio::test]
    async fn trip_service_surfaces_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let adapter =
            DeepSeekInferenceAdapter::new(inference_config_for_mock(&server.uri())).unwrap();
        let service = TripService::new(Arc::new(adapter));

        let err = service.generate_trip("行程").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Inference(ref m) if m.contains("503")));
    }
}
