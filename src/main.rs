use std::sync::Arc;

use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use roleboard_backend::api::{AdminApi, AuthApi, HealthApi};
use roleboard_backend::config::{init_database, init_logging, migrate_database, AppSettings};
use roleboard_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = AppSettings::from_env().expect("Failed to load settings");

    let db = init_database(&settings)
        .await
        .expect("Failed to connect to database");

    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    let app_data = Arc::new(AppData::init(db, settings.jwt_secret.clone()));

    let auth_api = AuthApi::new(app_data.clone());
    let admin_api = AdminApi::new(app_data.clone());

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, admin_api),
        "Roleboard API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.bind_address()));

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", settings.bind_address());

    Server::new(TcpListener::bind(settings.bind_address()))
        .run(app)
        .await
}
