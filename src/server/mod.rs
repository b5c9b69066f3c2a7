//! HTTP transport for the weather store
//!
//! Two route families share one [`WeatherStore`]:
//! - `/collect/...` for ground stations and administration (readings, airports, exit)
//! - `/query/...` for clients (health and weather queries)
//!
//! `GET /collect/exit` cancels the shutdown token, which stops the server
//! gracefully once in-flight requests finish.

pub mod handlers;

use crate::app::services::weather_store::WeatherStore;
use crate::constants::COLLECT_PING_RESPONSE;
use crate::{Error, Result};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body in bytes
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Full route tree with request tracing
pub fn routes(
    store: Arc<WeatherStore>,
    shutdown: CancellationToken,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    collect_routes(store.clone(), shutdown)
        .or(query_routes(store))
        .with(warp::trace::request())
}

/// `/collect/...` routes
pub fn collect_routes(
    store: Arc<WeatherStore>,
    shutdown: CancellationToken,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let ping = warp::path!("collect" / "ping")
        .and(warp::get())
        .map(|| COLLECT_PING_RESPONSE);

    let submit = warp::path!("collect" / "weather" / String / String)
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_store(store.clone()))
        .map(handlers::submit_reading);

    let airports = warp::path!("collect" / "airports")
        .and(warp::get())
        .and(with_store(store.clone()))
        .map(handlers::list_airports);

    let get_airport = warp::path!("collect" / "airport" / String)
        .and(warp::get())
        .and(with_store(store.clone()))
        .map(handlers::get_airport);

    let add_airport = warp::path!("collect" / "airport" / String / String / String)
        .and(warp::post())
        .and(with_store(store.clone()))
        .map(handlers::add_airport);

    let delete_airport = warp::path!("collect" / "airport" / String)
        .and(warp::delete())
        .and(with_store(store))
        .map(handlers::delete_airport);

    let exit = warp::path!("collect" / "exit")
        .and(warp::get())
        .map(move || handlers::exit(&shutdown));

    ping.or(submit)
        .or(airports)
        .or(get_airport)
        .or(add_airport)
        .or(delete_airport)
        .or(exit)
}

/// `/query/...` routes
pub fn query_routes(
    store: Arc<WeatherStore>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let ping = warp::path!("query" / "ping")
        .and(warp::get())
        .and(with_store(store.clone()))
        .map(handlers::health);

    let weather_radius = warp::path!("query" / "weather" / String / String)
        .and(warp::get())
        .and(with_store(store.clone()))
        .map(|iata: String, radius: String, store: Arc<WeatherStore>| {
            handlers::query_weather(iata, Some(radius), store)
        });

    let weather_point = warp::path!("query" / "weather" / String)
        .and(warp::get())
        .and(with_store(store))
        .map(|iata: String, store: Arc<WeatherStore>| handlers::query_weather(iata, None, store));

    ping.or(weather_radius).or(weather_point)
}

fn with_store(
    store: Arc<WeatherStore>,
) -> impl Filter<Extract = (Arc<WeatherStore>,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

/// Bind the server without starting it
///
/// Returns the bound address (useful with port 0) and the server future,
/// which completes once `shutdown` is cancelled.
pub fn bind(
    address: SocketAddr,
    store: Arc<WeatherStore>,
    shutdown: CancellationToken,
) -> Result<(SocketAddr, impl Future<Output = ()> + 'static)> {
    let signal = shutdown.clone();
    warp::serve(routes(store, shutdown))
        .try_bind_with_graceful_shutdown(address, async move { signal.cancelled().await })
        .map_err(|e| Error::server(format!("Failed to bind {}", address), e))
}

/// Run the server until `shutdown` is cancelled
pub async fn serve(
    address: SocketAddr,
    store: Arc<WeatherStore>,
    shutdown: CancellationToken,
) -> Result<()> {
    let (bound, server) = bind(address, store, shutdown)?;
    info!("Weather server listening on http://{}", bound);

    server.await;

    info!("Weather server stopped");
    Ok(())
}
