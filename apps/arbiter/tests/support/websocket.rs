// WebSocket test utilities

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use arbiter::routes;
use arbiter::state::app_state::AppState;

/// Start a test HTTP server with the full route set on a random port,
/// so tests can connect via real WebSocket clients (tokio-tungstenite).
///
/// Returns (server_handle, socket_addr, join_handle):
/// - `server_handle` can be used to gracefully stop the server
/// - `socket_addr` is the address the server is listening on
/// - `join_handle` can be awaited to check for server errors on shutdown
pub async fn start_test_server(
    state: AppState,
) -> Result<
    (
        actix_web::dev::ServerHandle,
        std::net::SocketAddr,
        tokio::task::JoinHandle<Result<(), std::io::Error>>,
    ),
    Box<dyn std::error::Error>,
> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    // Start server in background and return handle + join
    let server_handle = server.handle();
    let join = tokio::spawn(server);

    Ok((server_handle, addr, join))
}

pub fn ws_url(addr: std::net::SocketAddr) -> String {
    format!("ws://{addr}/api/ws/session")
}

/// Wait until the coordinator has registered exactly `expected` live
/// connections (connect and disconnect events are asynchronous).
pub async fn wait_for_connections(
    state: &AppState,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        if state.connections.active_connections_count() == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!(
                "timeout waiting for active_connections_count == {expected} (got {})",
                state.connections.active_connections_count()
            )
            .into());
        }
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
