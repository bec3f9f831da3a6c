//! Host-level behaviour: routing, request IDs, shutdown.

use std::time::Duration;

use saludo_gateway::config::FunctionAppConfig;
use saludo_gateway::greeting::GREETING;

mod common;

#[tokio::test]
async fn test_greeting_and_request_id() {
    let (host, shutdown) = common::start_host(FunctionAppConfig::default()).await;

    let res = common::function_client(host)
        .greeting()
        .await
        .unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(res.content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(res.body, GREETING);
    assert!(res.request_id.is_some());

    shutdown.trigger();
}

#[tokio::test]
async fn test_greeting_accepts_post() {
    let (host, shutdown) = common::start_host(FunctionAppConfig::default()).await;

    let res = common::http_client()
        .post(format!("http://{}/api/Greeting", host))
        .body("ignored")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), GREETING);

    shutdown.trigger();
}

#[tokio::test]
async fn test_custom_paths() {
    let (upstream, recorded) = common::start_mock_upstream(common::MockReply::new(
        "200 OK",
        Some("text/plain"),
        "hola",
    ))
    .await;
    let mut config = common::config_for(&format!("http://{}/", upstream));
    config.routes.forward_path = "/api/saludo".into();
    config.routes.greeting_path = "/api/hola".into();
    let (host, shutdown) = common::start_host(config).await;

    let client = common::function_client(host).with_paths("/api/saludo", "/api/hola");
    assert_eq!(client.saludo(None).await.unwrap().body, "hola");
    assert_eq!(client.greeting().await.unwrap().body, GREETING);
    assert_eq!(recorded.count(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let (host, shutdown) = common::start_host(FunctionAppConfig::default()).await;
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client.get(format!("http://{}/health", host)).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "Healthy");

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(client
        .get(format!("http://{}/health", host))
        .send()
        .await
        .is_err());
}
