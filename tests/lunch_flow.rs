//! End-to-end lunch flow against mock upstream services

use std::time::Duration;

use httpmock::prelude::*;
use lunchbot::{
    ERROR_MESSAGE, HandlerState, IncomingMessage, LunchConfig, LunchHandler, ReqwestClient,
};
use serde_json::json;

fn config_for(server: &MockServer) -> LunchConfig {
    let mut config = LunchConfig::default();
    config.weather.api_key = Some("weather-key".to_string());
    config.weather.base_url = server.url("/weather");
    config.dine_out.api_key = Some("dine-key".to_string());
    config.dine_out.base_url = server.url("/dine");
    config.delivery.api_key = Some("delivery-key".to_string());
    config.delivery.base_url = server.url("/delivery");
    config.http.timeout_seconds = 1;
    config
}

fn handler_for(server: &MockServer) -> LunchHandler<ReqwestClient> {
    let config = config_for(server);
    config.validate().expect("test config is valid");
    let http = ReqwestClient::new(&config.http).expect("client builds");
    LunchHandler::new(http, config)
}

fn question() -> IncomingMessage {
    IncomingMessage::new("bob", "Where should we go to lunch?")
}

#[tokio::test]
async fn test_nice_weather_walks_to_lunch() {
    let server = MockServer::start_async().await;

    let weather = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/weather/forecast/weather-key/43.072864,-89.388124")
                .query_param("units", "us");
            then.status(200).json_body(json!({
                "currently": {"apparentTemperature": 25.0, "precipProbability": 0.1, "precipIntensity": 0.0}
            }));
        })
        .await;

    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dine/search")
                .query_param("open", "now")
                .query_param("radius", "1610")
                .header("user-key", "dine-key");
            then.status(200).json_body(json!({
                "results_found": 2,
                "results_start": 0,
                "results_shown": 2,
                "restaurants": [
                    {"restaurant": {
                        "name": "Graze",
                        "cuisines": "American, Bar Food",
                        "url": "https://dine.test/graze",
                        "location": {"address": "1 S Pinckney St", "latitude": "43.0749", "longitude": "-89.3838"}
                    }},
                    {"restaurant": {
                        "name": "Far Away Diner",
                        "cuisines": "Diner",
                        "url": "https://dine.test/far",
                        "location": {"address": "Middleton", "latitude": "43.0972", "longitude": "-89.5043"}
                    }}
                ]
            }));
        })
        .await;

    let handler = handler_for(&server);
    let reply = handler.handle(&question()).await.expect("lunch question is answered");

    assert_eq!(reply.state, HandlerState::Replied);
    assert_eq!(
        reply.content,
        "\nThe weather looks fine, you should go out:\n\nGraze\nCuisines: American, Bar Food\n1 S Pinckney St\nhttps://dine.test/graze\n"
    );
    weather.assert_async().await;
    search.assert_async().await;
}

#[tokio::test]
async fn test_rainy_weather_orders_delivery() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/weather/forecast/weather-key/43.072864,-89.388124");
            then.status(200).json_body(json!({
                "currently": {"apparentTemperature": 55.0, "precipProbability": 0.95, "precipIntensity": 0.4}
            }));
        })
        .await;

    let delivery = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/delivery/restaurant/search")
                .query_param("method", "delivery")
                .header("x-access-token", "delivery-key");
            then.status(200).json_body(json!({
                "restaurants": [{
                    "name": "Ian's Pizza",
                    "foodTypes": ["Pizza", "Late Night"],
                    "streetAddress": "115 State St",
                    "url": "https://delivery.test/ians"
                }]
            }));
        })
        .await;

    let handler = handler_for(&server);
    let reply = handler.handle(&question()).await.expect("lunch question is answered");

    assert_eq!(
        reply.content,
        "\nWeather doesn't look great. Don't be a hero. Get delivery:\n\nIan's Pizza\nCuisines: Pizza, Late Night\n115 State St\nhttps://delivery.test/ians\n"
    );
    delivery.assert_async().await;
}

#[tokio::test]
async fn test_weather_outage_cancels_lunch_without_searching() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/weather/");
            then.status(503).body("service unavailable");
        })
        .await;

    let search = server
        .mock_async(|when, then| {
            when.path_contains("/dine/");
            then.status(200).json_body(json!({"results_found": 0, "results_start": 0, "results_shown": 0}));
        })
        .await;

    let handler = handler_for(&server);
    let reply = handler.handle(&question()).await.expect("lunch question is answered");

    assert_eq!(reply.state, HandlerState::Failed);
    assert_eq!(reply.content, ERROR_MESSAGE);
    assert_eq!(search.hits_async().await, 0);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/weather/");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({"currently": {"apparentTemperature": 70.0}}));
        })
        .await;

    let handler = handler_for(&server);
    let err = handler.suggest().await.expect_err("request should time out");

    assert!(matches!(err, lunchbot::LunchError::Transport { .. }), "got {err:?}");
}
