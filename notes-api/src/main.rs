mod config;

mod app;
mod auth;
mod db;
mod errors;
mod extract;
mod notes;
mod shared;
mod state;
mod testing;
mod users;
mod validation;

use std::net::SocketAddr;

use app::AppParams;
use config::Config;
pub use db::{init_db, DB};
pub use errors::{Error, Result};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = Config::from_env()?;

    shared::tracing::setup_tracing(config.log_json);

    let conn = init_db(&config.database_url).await?;
    let addr = format!("{}:{}", config.host, config.port);

    let app = app::create(AppParams {
        db: conn,
        config,
        router: app::routes,
    });
    let app = shared::tracing::add_tracing_layer(app);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
