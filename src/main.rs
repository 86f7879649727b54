use adhan_push::api::{AladhanApi, build_http_client};
use adhan_push::db::SettingsStorage;
use adhan_push::service::notification_actor;
use adhan_push::service::notifier::{WebPushNotifier, check_key_pair};
use adhan_push::NotificationLoop;
use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &adhan_push::config::CONFIG;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        database_url = %cfg.basic.database_url,
        timings_endpoint = %cfg.timings.endpoint,
        poll_interval_secs = cfg.notify.poll_interval_secs,
        cooldown_secs = cfg.notify.cooldown_secs,
        push_configured = cfg.push.is_configured(),
        loglevel = %cfg.basic.loglevel,
    );
    if !cfg.push.is_configured() {
        warn!("VAPID keys not configured; notifications will not be delivered");
    } else if let Err(e) = check_key_pair(&cfg.push) {
        warn!(error = %e, "VAPID key pair is inconsistent; browsers will reject signed pushes");
    }

    let storage = SettingsStorage::connect(&cfg.basic.database_url).await?;
    let timings = Arc::new(AladhanApi::new(
        build_http_client()?,
        cfg.timings.endpoint.clone(),
    ));
    let notifier = Arc::new(WebPushNotifier::new(cfg.push.clone())?);

    let job = NotificationLoop::new(storage.clone(), timings.clone(), notifier, &cfg.notify);
    let notifications = notification_actor::spawn(job, cfg.notify.poll_interval()).await?;

    let state = adhan_push::router::AdhanState::new(storage, timings, cfg.push.clone());
    let app = adhan_push::router::adhan_router(state);

    let listener = TcpListener::bind(cfg.basic.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    notifications.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
