use std::net::SocketAddr;
use std::sync::Arc;

use jobmatch_backend::{
    config::{get_config, init_config},
    router,
    store::{EntityStore, MemoryStore, PgStore},
    AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store: Arc<dyn EntityStore> = match &config.database_url {
        Some(url) => {
            info!("Using Postgres record store");
            Arc::new(PgStore::connect(url).await?)
        }
        None => {
            info!("No DATABASE_URL set, using in-memory record store");
            Arc::new(MemoryStore::new())
        }
    };

    let app_state = AppState::new(store);

    let app = router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
