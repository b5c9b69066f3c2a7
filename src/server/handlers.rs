//! Request handlers
//!
//! Each handler runs one store operation and turns its result into a reply.
//! Store errors map onto status codes in [`error_response`].

use crate::app::models::{DataPoint, DataPointType};
use crate::app::services::weather_store::WeatherStore;
use crate::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{self, Reply, Response};

/// JSON body of every error reply
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::AirportNotFound { .. } => StatusCode::NOT_FOUND,
        Error::DuplicateAirport { .. } => StatusCode::CONFLICT,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(error: Error) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        warn!("Request failed: {:#}", error);
    } else {
        debug!("Request rejected ({}): {}", status, error);
    }

    reply::with_status(
        reply::json(&ErrorBody {
            error: error.to_string(),
        }),
        status,
    )
    .into_response()
}

fn json_response<T: Serialize>(result: Result<T>) -> Response {
    match result {
        Ok(value) => reply::json(&value).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /collect/weather/{iata}/{pointType}
pub fn submit_reading(
    iata: String,
    point_type: String,
    body: Bytes,
    store: Arc<WeatherStore>,
) -> Response {
    json_response(parse_reading(&point_type, &body).and_then(|(data_type, data_point)| {
        store.submit_reading(&iata, data_type, data_point)
    }))
}

fn parse_reading(point_type: &str, body: &[u8]) -> Result<(DataPointType, DataPoint)> {
    let data_type: DataPointType = point_type.parse()?;
    let data_point = serde_json::from_slice(body)
        .map_err(|e| Error::invalid_payload("Malformed data point", e))?;
    Ok((data_type, data_point))
}

/// GET /collect/airports
pub fn list_airports(store: Arc<WeatherStore>) -> Response {
    reply::json(&store.airport_codes()).into_response()
}

/// GET /collect/airport/{iata}
pub fn get_airport(iata: String, store: Arc<WeatherStore>) -> Response {
    json_response(store.get_airport(&iata))
}

/// POST /collect/airport/{iata}/{lat}/{long}
pub fn add_airport(
    iata: String,
    latitude: String,
    longitude: String,
    store: Arc<WeatherStore>,
) -> Response {
    json_response(
        parse_coordinate("latitude", &latitude)
            .and_then(|lat| Ok((lat, parse_coordinate("longitude", &longitude)?)))
            .and_then(|(lat, lon)| store.add_airport(&iata, lat, lon)),
    )
}

fn parse_coordinate(name: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::invalid_airport(format!("{} is not a number: {:?}", name, value)))
}

/// DELETE /collect/airport/{iata}
pub fn delete_airport(iata: String, store: Arc<WeatherStore>) -> Response {
    json_response(store.remove_airport(&iata))
}

/// GET /collect/exit
pub fn exit(shutdown: &CancellationToken) -> Response {
    info!("Shutdown requested over HTTP");
    shutdown.cancel();
    reply::with_status(warp::reply(), StatusCode::NO_CONTENT).into_response()
}

/// GET /query/ping
pub fn health(store: Arc<WeatherStore>) -> Response {
    reply::json(&store.health()).into_response()
}

/// GET /query/weather/{iata}[/{radius}]
pub fn query_weather(iata: String, radius: Option<String>, store: Arc<WeatherStore>) -> Response {
    json_response(
        parse_radius(radius.as_deref()).and_then(|radius| store.query_weather(&iata, radius)),
    )
}

/// Absent or blank radius means a point query
pub fn parse_radius(radius: Option<&str>) -> Result<f64> {
    match radius.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| Error::invalid_query(format!("radius is not a number: {:?}", value))),
    }
}
