mod errors;
mod handlers;
mod http;
mod product;
mod setup;
mod user;

mod impls {
    pub type UserRepo = crate::user::memory_repository::InMemoryUserRepository;
    pub type ProductRepo = crate::product::memory_repository::InMemoryProductRepository;
}

use crate::{impls::*, setup::AppConfig};
use axum::{extract::Request, ServiceExt};
use std::{error::Error, net::SocketAddr};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

pub type BoxedError = Box<dyn Error + Send + Sync>;

pub const ENCODING_FAILED_BODY: &[u8] =
    br#"{"message":"Failed to encode the response body","error_code":50000}"#;

async fn body() -> Result<(), BoxedError> {
    #[cfg(feature = "dotenv")]
    dotenvy::dotenv().map_err(|_| crate::setup::VarError::DotenvFileNotFound)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(feature = "json-log")]
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .try_init()?;

    #[cfg(not(feature = "json-log"))]
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()?;

    let config = AppConfig::from_env()?;
    let (port, seed_data) = (config.port, config.seed_data);

    let (user_repo, product_repo) = if seed_data {
        (UserRepo::seeded(), ProductRepo::seeded())
    } else {
        (UserRepo::new(), ProductRepo::new())
    };

    let app = setup::app(handlers::router(user_repo, product_repo), &config);

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    tracing::info!(port, seed_data, "Server listening");
    tracing::info!("Health check: http://localhost:{port}/health");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}

fn main() -> Result<(), BoxedError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(body())
}
