use actix_web::{web, App, HttpServer};
use arbiter::config::time_control::TimeControl;
use arbiter::middleware::cors::cors_middleware;
use arbiter::middleware::request_trace::RequestTrace;
use arbiter::routes;
use arbiter::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("ARBITER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("ARBITER_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ ARBITER_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("🚀 Starting Arbiter on http://{}:{}", host, port);

    let time_control = match TimeControl::from_env() {
        Ok(tc) => tc,
        Err(e) => {
            eprintln!("❌ Invalid time control configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::standard(time_control);

    println!("✅ Session coordinator running");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
