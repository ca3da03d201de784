use axum_test::TestServer;
use werwolf_server::server::GameServer;

/// Builds an in-process `TestServer` wrapping a fresh `GameServer`, with a
/// permissive CORS layer (origin filtering is not under test here).
#[allow(dead_code)]
pub fn test_app() -> TestServer {
    let server = GameServer::new();
    let router = werwolf_server::http::create_router(server, tower_http::cors::CorsLayer::permissive());
    TestServer::new(router).expect("failed to build test server")
}
