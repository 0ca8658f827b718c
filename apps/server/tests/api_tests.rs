use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use wealthdesk_ai::{AiConfig, FakeCompletionProvider};
use wealthdesk_server::{api::app_router, build_state_with, config::Config};
use wealthdesk_translation::{FakeTranslator, TranslatorConfig};

struct TestApp {
    _dir: TempDir,
    router: Router,
    completion: Arc<FakeCompletionProvider>,
    translator: Arc<FakeTranslator>,
}

async fn test_app() -> TestApp {
    let dir = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        static_dir: "dist".to_string(),
        ai: AiConfig::default(),
        translator: TranslatorConfig::default(),
    };
    let completion = Arc::new(FakeCompletionProvider::new());
    let translator = Arc::new(FakeTranslator::new());
    let state = build_state_with(&config, completion.clone(), translator.clone())
        .await
        .unwrap();
    TestApp {
        _dir: dir,
        router: app_router(state, &config).unwrap(),
        completion,
        translator,
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn csv_upload(csv: &str) -> Request<Body> {
    let boundary = "wealthdesk-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"clients.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = boundary,
        csv = csv
    );
    Request::builder()
        .method(Method::POST)
        .uri("/api/clients/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn import_sample(app: &TestApp) -> Value {
    let csv = "Client ID,Name,Risk Tolerance,Portfolio Value,YTD Return,Volatility\n\
               WM-001,Anna Keller,Conservative,1500000,4.2,6.5\n\
               WM-002,Ben Ortiz,Aggressive,2500000,11.8,16.1\n";
    let response = app.router.clone().oneshot(csv_upload(csv)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let app = test_app().await;
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn unknown_client_is_404() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/clients/UNKNOWN_ID", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, _) = send(&app, Method::GET, "/api/clients/UNKNOWN_ID/rebalancing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/api/clients/UNKNOWN_ID/scorecard", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn import_then_bundle() {
    let app = test_app().await;
    let summary = import_sample(&app).await;
    assert_eq!(summary["imported"], 2);
    assert_eq!(summary["skipped"], 0);
    assert_eq!(summary["clients"].as_array().unwrap().len(), 2);

    let (status, clients) = send(&app, Method::GET, "/api/clients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(clients.as_array().unwrap().len(), 2);

    let (status, bundle) = send(&app, Method::GET, "/api/clients/WM-001", None).await;
    assert_eq!(status, StatusCode::OK);
    let portfolio_id = bundle["portfolio"]["id"].as_i64().unwrap();
    let allocations = bundle["assetAllocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 3);
    assert!(allocations
        .iter()
        .all(|a| a["portfolioId"].as_i64() == Some(portfolio_id)));
    assert!(bundle["performance"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["portfolioId"].as_i64() == Some(portfolio_id)));
    assert_eq!(bundle["chatHistory"], json!([]));
}

#[tokio::test]
async fn import_with_bad_header_is_400() {
    let app = test_app().await;
    let response = app
        .router
        .clone()
        .oneshot(csv_upload("Client,Full Name\nWM-1,Anna\n"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("client_id") || message.contains("Client ID"));
}

#[tokio::test]
async fn create_client_normalizes_and_rejects_duplicates() {
    let app = test_app().await;
    let payload = json!({
        "clientId": "WM-100",
        "name": "Clara Novak",
        "riskTolerance": "low risk",
        "investmentExperience": "expert"
    });
    let (status, client) = send(&app, Method::POST, "/api/clients", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(client["riskTolerance"], "Conservative");
    assert_eq!(client["investmentExperience"], "Experienced");
    assert_eq!(client["investmentHorizon"], 5);

    let (status, _) = send(&app, Method::POST, "/api/clients", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn chat_persists_exactly_one_row() {
    let app = test_app().await;
    import_sample(&app).await;
    app.completion.push_reply("Your allocation is well diversified.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "clientId": "WM-002", "message": "How am I doing?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Your allocation is well diversified.");

    let (_, history) = send(&app, Method::GET, "/api/clients/WM-002/chat", None).await;
    let rows = history.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["response"], body["response"]);
    assert_eq!(rows[0]["message"], "How am I doing?");
    assert_eq!(rows[0]["clientId"], "WM-002");
}

#[tokio::test]
async fn chat_failure_is_500_and_stores_nothing() {
    let app = test_app().await;
    import_sample(&app).await;
    app.completion.push_failure("upstream timeout");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "clientId": "WM-001", "message": "Hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to process chat message");

    let (_, history) = send(&app, Method::GET, "/api/clients/WM-001/chat", None).await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn chat_validates_input() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "clientId": "WM-001", "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/chat",
        Some(json!({ "clientId": 42, "message": "Hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rebalancing_falls_back_on_non_json_reply() {
    let app = test_app().await;
    import_sample(&app).await;
    app.completion.push_reply("Sorry, I cannot format that as JSON.");

    let (status, body) = send(&app, Method::GET, "/api/clients/WM-001/rebalancing", None).await;
    assert_eq!(status, StatusCode::OK);
    for key in ["recommendations", "riskAssessment", "expectedImpact", "timeframe"] {
        assert!(body.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(body["recommendations"][0]["action"], "review");
    assert!(app.completion.requests()[0].json_mode);
}

#[tokio::test]
async fn report_is_an_attachment() {
    let app = test_app().await;
    import_sample(&app).await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/clients/WM-002/report")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("WM-002"));
}

#[tokio::test]
async fn scorecard_for_imported_client() {
    let app = test_app().await;
    import_sample(&app).await;
    let (status, body) = send(&app, Method::GET, "/api/clients/WM-002/scorecard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
}

#[tokio::test]
async fn out_of_range_refresh_is_rejected_and_scorecard_still_answers() {
    let app = test_app().await;
    import_sample(&app).await;
    let (_, bundle) = send(&app, Method::GET, "/api/clients/WM-002", None).await;
    let portfolio_id = bundle["portfolio"]["id"].as_i64().unwrap();

    for body in [
        json!({ "ytdReturn": 1e27 }),
        json!({ "totalValue": 1e28 }),
        json!({ "volatility": 5000 }),
    ] {
        let (status, error) = send(
            &app,
            Method::PATCH,
            &format!("/api/portfolios/{}", portfolio_id),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], 400);
    }

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/portfolios/{}", portfolio_id),
        Some(json!({ "ytdReturn": 950, "volatility": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, card) = send(&app, Method::GET, "/api/clients/WM-002/scorecard", None).await;
    assert_eq!(status, StatusCode::OK);
    let growth = card["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["kind"] == "portfolioGrowth")
        .unwrap();
    assert_eq!(growth["score"], 100.0);
}

#[tokio::test]
async fn portfolio_updates() {
    let app = test_app().await;
    import_sample(&app).await;
    let (_, bundle) = send(&app, Method::GET, "/api/clients/WM-001", None).await;
    let portfolio_id = bundle["portfolio"]["id"].as_i64().unwrap();
    let allocation_id = bundle["assetAllocations"][0]["id"].as_i64().unwrap();

    let (status, portfolio) = send(
        &app,
        Method::PATCH,
        &format!("/api/portfolios/{}", portfolio_id),
        Some(json!({ "totalValue": 1750000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(portfolio["totalValue"], 1750000.0);

    let (status, allocation) = send(
        &app,
        Method::PATCH,
        &format!("/api/allocations/{}", allocation_id),
        Some(json!({ "allocation": 55 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allocation["allocation"], 55.0);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/portfolios/99999",
        Some(json!({ "ytdReturn": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn insights_and_glossary_round_trip() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/market-insights",
        Some(json!({
            "title": "Rates outlook",
            "content": "Central banks are expected to hold.",
            "category": "Macro",
            "priority": "High"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, insights) = send(&app, Method::GET, "/api/market-insights", None).await;
    assert_eq!(insights.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/glossary",
        Some(json!({
            "term": "Duration",
            "definition": "Sensitivity of a bond price to rate changes",
            "category": "Fixed Income"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, term) = send(&app, Method::GET, "/api/glossary/duration", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(term["term"], "Duration");

    let (status, _) = send(&app, Method::GET, "/api/glossary/duration?language=de", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/api/glossary?language=x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn translate_to_english_skips_the_api() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/translate",
        Some(json!({ "text": "Balanced portfolio", "targetLanguage": "en" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translatedText"], "Balanced portfolio");
    assert!(app.translator.calls().is_empty());

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/translate",
        Some(json!({ "text": "Cash", "targetLanguage": "DE" })),
    )
    .await;
    assert_eq!(body["translatedText"], "[de] Cash");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/translate",
        Some(json!({ "text": "", "targetLanguage": "de" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/translate",
        Some(json!({ "text": "Cash", "targetLanguage": "german" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn language_codes_with_query_characters_are_rejected() {
    let app = test_app().await;
    for (field, code) in [
        ("targetLanguage", "de&x"),
        ("targetLanguage", "d=e"),
        ("sourceLanguage", "en#"),
    ] {
        let mut payload = json!({ "text": "Cash", "targetLanguage": "de" });
        payload[field] = json!(code);
        let (status, _) = send(&app, Method::POST, "/api/translate", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} = {}", field, code);
    }
    assert!(app.translator.calls().is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/translate",
        Some(json!({ "text": "Cash", "targetLanguage": "pt-BR" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translatedText"], "[pt-br] Cash");
}
