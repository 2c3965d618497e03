use giftvaluation::config::Config;
use std::time::Duration;

#[tokio::test]
async fn health_check_works() {
    let address = spawn_app();

    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn index_serves_valuation_form() {
    let address = spawn_app();

    let response = reqwest::get(format!("{}/", address))
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = response.text().await.unwrap();

    assert!(body.contains("Stock Gift Valuation"));
    assert!(body.contains("/api/gift-valuation"));
}

#[test]
fn run_requires_api_key() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();

    let config = Config {
        api_key: String::new(),
        base_url: "http://127.0.0.1".to_string(),
        timeout: Duration::from_secs(1),
        server_port: 0,
    };

    assert!(giftvaluation::run(listener, config).is_err());
}

fn spawn_app() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let config = Config {
        api_key: "VALUE".to_string(),
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(1),
        server_port: port,
    };

    let server = giftvaluation::run(listener, config).unwrap();
    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}
