use std::net::SocketAddr;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::auth::ApiKeys;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    let app = server::startup::app(db, ApiKeys::new(vec!["e2e-key".to_string()]));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_product_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();
    let products = format!("{}/api/v1/products", app.base_url);

    let res = client
        .post(&products)
        .header("X-API-Key", "e2e-key")
        .json(&json!({
            "name": "Road Bike",
            "price": 899.0,
            "stockQuantity": 2,
            "imageUrls": ["front.jpg"],
            "specifications": {"frame": "aluminium"},
            "reviews": [{"rating": 5, "comment": "fast"}]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let header_id = res.headers()["x-resource-id"].to_str()?.to_string();
    let created: Value = res.json().await?;
    assert_eq!(created["id"].to_string(), header_id);
    assert_eq!(created["totalReviews"], 1);
    assert_eq!(created["averageRating"], 5.0);

    let item = format!("{products}/{header_id}");
    let res = client
        .put(&item)
        .json(&json!({"name": "Road Bike Pro", "price": 999.0, "stockQuantity": 1, "imageUrls": ["side.jpg"]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["name"], "Road Bike Pro");
    assert_eq!(updated["imageUrls"], json!(["front.jpg", "side.jpg"]));
    assert_eq!(updated["specifications"]["frame"], "aluminium");

    assert_eq!(client.delete(&item).send().await?.status(), StatusCode::NO_CONTENT);
    let listed: Value = client.get(&products).send().await?.json().await?;
    assert_eq!(listed, json!([]));
    let fetched: Value = client.get(&item).send().await?.json().await?;
    assert_eq!(fetched["active"], false);
    Ok(())
}

#[tokio::test]
async fn e2e_serve_migrates_and_drains_on_shutdown() -> anyhow::Result<()> {
    let port = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?.local_addr()?.port();
    let mut cfg = configs::AppConfig::default();
    cfg.server.host = "127.0.0.1".into();
    cfg.server.port = port;
    cfg.database.url = "sqlite::memory:".into();
    cfg.database.min_connections = 1;
    cfg.database.max_connections = 1;
    cfg.database.run_migrations = true;

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(server::serve(cfg, async {
        let _ = stop_rx.await;
    }));

    let url = format!("http://127.0.0.1:{port}/api/v1/products");
    let mut listed = None;
    for _ in 0..50 {
        if let Ok(res) = reqwest::get(&url).await {
            listed = Some(res.json::<Value>().await?);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    // Migrations ran, so the empty catalog lists cleanly
    assert_eq!(listed, Some(json!([])));

    let _ = stop_tx.send(());
    server.await??;
    Ok(())
}
