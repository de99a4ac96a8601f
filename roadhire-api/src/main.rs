use std::net::SocketAddr;
use std::sync::Arc;

use roadhire_api::{app, state::AppState};
use roadhire_core::flow::{BookingFlow, BookingSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roadhire_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = roadhire_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting RoadHire API on port {}", config.server.port);

    let db = roadhire_store::DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let repo = Arc::new(roadhire_store::PgBookingRepository::new(db.pool.clone()));
    let payments = Arc::new(roadhire_store::StripeClient::new(
        config.stripe.api_base.clone(),
        config.stripe.secret_key.clone(),
    ));
    let mailer = Arc::new(roadhire_store::HttpMailer::new(
        config.mail.api_url.clone(),
        config.mail.api_key.clone(),
    ));

    let settings = BookingSettings {
        owner_email: config.booking.owner_email.clone(),
        from_address: config.mail.from_address.clone(),
        public_base_url: config.booking.public_base_url.clone(),
        deposit_minor: config.booking.deposit_minor,
        deposit_currency: config.booking.deposit_currency.clone(),
        pickup_instructions: config.booking.pickup_instructions.clone(),
    };

    let app_state = AppState {
        flow: Arc::new(BookingFlow::new(repo, payments, mailer, settings)),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
