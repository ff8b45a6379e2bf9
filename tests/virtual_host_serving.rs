//! Full-stack test: scheduler → deployers → axum virtual host → HTTP.

mod common;

use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;

use common::{endpoint, tagged_handler};
use endpoint_scheduler::{
    EndpointDeployer, EndpointScheduler, HostEnvironment, MountPath, ServingConfig, VirtualHost,
};

async fn serve(host: &Arc<VirtualHost>) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Arc::clone(host).router();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn get(
    client: &Client<HttpConnector, Body>,
    addr: std::net::SocketAddr,
    path: &str,
) -> (u16, String) {
    let uri = format!("http://{}{}", addr, path).parse().unwrap();
    let response = client.get(uri).await.unwrap();
    let status = response.status().as_u16();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn test_buffered_endpoints_become_reachable_after_group_ready() {
    let host = Arc::new(VirtualHost::new("default"));
    let scheduler = EndpointScheduler::new("shop", 2);

    // Routes activate before either module's serving infrastructure
    // exists.
    scheduler
        .publish(&endpoint("/orders/api"), tagged_handler("orders"))
        .unwrap();
    scheduler
        .publish(&endpoint("/billing/api"), tagged_handler("billing"))
        .unwrap();

    let addr = serve(&host).await;
    let client: Client<HttpConnector, Body> =
        Client::builder(TokioExecutor::new()).build(HttpConnector::new());

    // Nothing is served while the scheduler is still collecting.
    let (status, _) = get(&client, addr, "/orders/api/list").await;
    assert_eq!(status, 404);

    for mount in ["/orders", "/billing"] {
        scheduler.register_deployer(Arc::new(EndpointDeployer::new(
            MountPath::new(mount),
            Arc::new(ServingConfig::default()),
            Arc::clone(&host) as Arc<dyn HostEnvironment>,
        )));
    }
    assert!(scheduler.is_ready());

    // Both endpoints serve, each seeing paths relative to its own
    // context.
    let (status, body) = get(&client, addr, "/orders/api/list").await;
    assert_eq!(status, 200);
    assert_eq!(body, "orders:/list");

    let (status, body) = get(&client, addr, "/billing/api").await;
    assert_eq!(status, 200);
    assert_eq!(body, "billing:/");

    let (status, _) = get(&client, addr, "/nowhere").await;
    assert_eq!(status, 404);

    // Unpublishing makes the endpoint unreachable again.
    scheduler.unpublish(&endpoint("/orders/api"));
    let (status, _) = get(&client, addr, "/orders/api/list").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_late_publish_serves_immediately() {
    let host = Arc::new(VirtualHost::new("default"));
    let scheduler = EndpointScheduler::new("single", 1);

    scheduler.register_deployer(Arc::new(EndpointDeployer::new(
        MountPath::new("/app"),
        Arc::new(ServingConfig::default()),
        Arc::clone(&host) as Arc<dyn HostEnvironment>,
    )));

    let addr = serve(&host).await;
    let client: Client<HttpConnector, Body> =
        Client::builder(TokioExecutor::new()).build(HttpConnector::new());

    scheduler
        .publish(&endpoint("/app/echo"), tagged_handler("echo"))
        .unwrap();

    let (status, body) = get(&client, addr, "/app/echo/deep/path").await;
    assert_eq!(status, 200);
    assert_eq!(body, "echo:/deep/path");
}
