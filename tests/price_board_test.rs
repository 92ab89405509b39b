use httpmock::prelude::*;
use kisagold_storefront::{FeedEndpoints, PriceService, StorefrontError};

async fn serve_feeds(
    server: &MockServer,
    price_status: u16,
    price_body: serde_json::Value,
    update_status: u16,
    update_body: serde_json::Value,
) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/comparison-data");
            then.status(price_status)
                .header("Content-Type", "application/json")
                .json_body(price_body);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/logs/last-update/");
            then.status(update_status)
                .header("Content-Type", "application/json")
                .json_body(update_body);
        })
        .await;
}

fn service(server: &MockServer) -> PriceService<FeedEndpoints> {
    PriceService::new(FeedEndpoints::new(
        server.url("/comparison-data"),
        server.url("/api/logs/last-update/"),
    ))
}

#[tokio::test]
async fn test_full_price_board() {
    let server = MockServer::start_async().await;
    serve_feeds(
        &server,
        200,
        serde_json::json!({
            "priceData": {
                "KISAGOLD 999% (KISA24) 100gr": {"buyPrice": 180000000, "buybackPrice": 175000000, "categories": "Physical"},
                "KISA24 24K 25gr": {"buyPrice": 100, "buybackPrice": 90, "categories": ""},
                "KISAGOLD 992% (Non Brand)": {"buyPrice": 1700000, "buybackPrice": 1650000, "categories": "Physical 1 gr"},
                "KISA24 24K 10gr": {"buyPrice": 50, "buybackPrice": 45, "categories": ""},
                "KISA24 24K 5gr": {"buyPrice": null, "buybackPrice": 20, "categories": ""},
                "KISAGOLD 999% (KISA24) 50gr": {"buyPrice": 90000000, "buybackPrice": 87000000, "categories": ""},
                "SILVER 100gr": {"buyPrice": 1, "buybackPrice": 1, "categories": ""}
            }
        }),
        200,
        serde_json::json!({"value": "4 Feb 2026 11.00 WIB"}),
    )
    .await;

    let result = service(&server).fetch_price_data().await.unwrap();

    let ids: Vec<&str> = result.groups.iter().map(|g| g.category_id.as_str()).collect();
    assert_eq!(ids, vec!["classic-24k", "kisagold-992", "kisagold-999"]);

    let classic: Vec<&str> = result.groups[0].rows.iter().map(|r| r.weight.as_str()).collect();
    assert_eq!(classic, vec!["10 gr", "25 gr"]);

    assert_eq!(result.groups[1].rows[0].weight, "1 gr");
    assert_eq!(result.groups[1].label.en, "KISAGOLD 99.2% (Non Brand)");

    let heavy: Vec<&str> = result.groups[2].rows.iter().map(|r| r.weight.as_str()).collect();
    assert_eq!(heavy, vec!["50 gr", "100 gr"]);

    for group in &result.groups {
        assert!(!group.rows.is_empty());
        assert!(group
            .rows
            .windows(2)
            .all(|pair| weight_grams(&pair[0].weight) <= weight_grams(&pair[1].weight)));
    }

    assert_eq!(result.last_update.as_deref(), Some("4 Feb 2026 11.00 WIB"));
}

fn weight_grams(weight: &str) -> u64 {
    weight.trim_end_matches(" gr").parse().unwrap()
}

#[tokio::test]
async fn test_empty_feed_has_no_groups_and_null_update() {
    let server = MockServer::start_async().await;
    serve_feeds(
        &server,
        200,
        serde_json::json!({}),
        200,
        serde_json::json!({}),
    )
    .await;

    let result = service(&server).fetch_price_data().await.unwrap();
    assert!(result.groups.is_empty());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, serde_json::json!({"groups": [], "lastUpdate": null}));
}

#[tokio::test]
async fn test_price_feed_failure_returns_no_groups() {
    let server = MockServer::start_async().await;
    serve_feeds(
        &server,
        500,
        serde_json::json!({"error": "sheet unavailable"}),
        200,
        serde_json::json!({"value": "4 Feb 2026 11.00 WIB"}),
    )
    .await;

    let err = service(&server).fetch_price_data().await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::PriceApiError {
            price_status: 500,
            update_status: 200
        }
    ));
}

#[tokio::test]
async fn test_unreachable_feed_is_transport_error() {
    let service = PriceService::new(FeedEndpoints::new(
        "http://127.0.0.1:9/comparison-data",
        "http://127.0.0.1:9/last-update",
    ));

    let err = service.fetch_price_data().await.unwrap_err();
    assert!(matches!(err, StorefrontError::ApiError(_)));
}

#[tokio::test]
async fn test_every_call_refetches() {
    let server = MockServer::start_async().await;
    let prices = server
        .mock_async(|when, then| {
            when.method(GET).path("/comparison-data");
            then.status(200).json_body(serde_json::json!({"priceData": {}}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/logs/last-update/");
            then.status(200).json_body(serde_json::json!({"value": null}));
        })
        .await;

    let service = service(&server);
    service.fetch_price_data().await.unwrap();
    service.fetch_price_data().await.unwrap();

    prices.assert_hits_async(2).await;
    update.assert_hits_async(2).await;
}
