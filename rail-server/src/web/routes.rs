//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::catalog::{DistrictRecord, LineRecord, ScheduleRecord, TrainRecord};
use crate::domain::{StationCode, TrainStatus};
use crate::planner::RouteEngine;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/find-routes", get(find_routes))
        .route("/lines", get(list_lines))
        .route("/lines/:code", get(get_line))
        .route("/schedules", get(list_schedules))
        .route("/schedules/:line_code", get(schedules_for_line))
        .route("/trains", get(list_trains))
        .route("/trains/:name", get(get_train))
        .route("/districts", get(list_districts))
        .route("/districts/:code", get(get_district))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a required station code query parameter.
fn station_param(name: &str, value: Option<&str>) -> Result<StationCode, AppError> {
    let value = value.ok_or_else(|| AppError::BadRequest {
        message: format!("Missing {name} parameter"),
    })?;
    StationCode::parse_normalized(value).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {name} station {value:?}: {e}"),
    })
}

/// Find every itinerary between two stations.
async fn find_routes(
    State(state): State<AppState>,
    Query(req): Query<FindRoutesRequest>,
) -> Result<Json<Vec<ItineraryResult>>, AppError> {
    let start = station_param("start", req.start.as_deref())?;
    let end = station_param("end", req.end.as_deref())?;

    let snapshot = state.catalog.snapshot().await;
    let key = (start, end, snapshot.generation);

    let itineraries = match state.routes.get(&key).await {
        Some(cached) => {
            debug!(%start, %end, "route cache hit");
            cached
        }
        None => {
            let catalog = Arc::clone(&snapshot.catalog);
            let config = Arc::clone(&state.config);
            // Search is CPU-bound; keep it off the async workers
            let found = tokio::task::spawn_blocking(move || {
                RouteEngine::new(&catalog, &config).find_routes(start, end)
            })
            .await
            .map_err(|e| AppError::Internal {
                message: format!("Route search failed: {e}"),
            })?;

            let found = Arc::new(found);
            state.routes.insert(key, Arc::clone(&found)).await;
            found
        }
    };

    Ok(Json(
        itineraries
            .iter()
            .map(ItineraryResult::from_itinerary)
            .collect(),
    ))
}

async fn list_lines(State(state): State<AppState>) -> Json<Vec<LineRecord>> {
    let snapshot = state.catalog.snapshot().await;
    Json(
        snapshot
            .catalog
            .lines()
            .iter()
            .map(LineRecord::from)
            .collect(),
    )
}

async fn get_line(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LineRecord>, AppError> {
    let snapshot = state.catalog.snapshot().await;
    let catalog = &snapshot.catalog;

    catalog
        .line(&code)
        .or_else(|| catalog.line(&code.to_ascii_uppercase()))
        .map(|line| Json(LineRecord::from(line)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("Line {code} not found"),
        })
}

async fn list_schedules(State(state): State<AppState>) -> Json<Vec<ScheduleRecord>> {
    let snapshot = state.catalog.snapshot().await;
    Json(
        snapshot
            .catalog
            .schedules()
            .iter()
            .map(ScheduleRecord::from)
            .collect(),
    )
}

/// Runs of one direction-tagged line, matched case-insensitively.
async fn schedules_for_line(
    State(state): State<AppState>,
    Path(line_code): Path<String>,
) -> Json<Vec<ScheduleRecord>> {
    let snapshot = state.catalog.snapshot().await;
    Json(
        snapshot
            .catalog
            .schedules()
            .iter()
            .filter(|s| s.line.to_string().eq_ignore_ascii_case(&line_code))
            .map(ScheduleRecord::from)
            .collect(),
    )
}

/// The roster, optionally filtered by line and status.
async fn list_trains(
    State(state): State<AppState>,
    Query(query): Query<TrainQuery>,
) -> Result<Json<Vec<TrainRecord>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<TrainStatus>)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    let snapshot = state.catalog.snapshot().await;
    let trains = snapshot
        .catalog
        .trains()
        .iter()
        .filter(|t| {
            query
                .line
                .as_deref()
                .is_none_or(|line| t.line.to_string().eq_ignore_ascii_case(line))
        })
        .filter(|t| status.is_none_or(|s| t.status == s))
        .map(TrainRecord::from)
        .collect();

    Ok(Json(trains))
}

async fn get_train(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TrainRecord>, AppError> {
    let snapshot = state.catalog.snapshot().await;
    snapshot
        .catalog
        .train_by_name(&name)
        .map(|t| Json(TrainRecord::from(t)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("Train {name} not found"),
        })
}

async fn list_districts(State(state): State<AppState>) -> Json<Vec<DistrictRecord>> {
    let snapshot = state.catalog.snapshot().await;
    Json(
        snapshot
            .catalog
            .districts()
            .iter()
            .map(DistrictRecord::from)
            .collect(),
    )
}

async fn get_district(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DistrictRecord>, AppError> {
    let station = StationCode::parse_normalized(&code).map_err(|e| AppError::BadRequest {
        message: format!("Invalid district code {code:?}: {e}"),
    })?;

    let snapshot = state.catalog.snapshot().await;
    snapshot
        .catalog
        .district(&station)
        .map(|d| Json(DistrictRecord::from(d)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("District {station} not found"),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                debug!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound { message } => {
                debug!(%message, "not found");
                (StatusCode::NOT_FOUND, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::cache::{CacheConfig, RouteCache};
    use crate::catalog::{
        AnySource, Catalog, CatalogStore, GeneratorConfig, derive_districts, generate_roster,
        generate_schedules,
    };
    use crate::domain::{District, Line};
    use crate::planner::RouteConfig;

    fn line(code: &str, stations: &[&str]) -> Line {
        Line::new(
            1,
            code,
            format!("{code} line"),
            stations
                .iter()
                .map(|s| StationCode::parse(s).unwrap())
                .collect(),
            4.0,
        )
        .unwrap()
    }

    async fn app() -> Router {
        let lines = vec![
            line("LINE-RED", &["A", "B", "C"]),
            line("LINE-BLUE", &["C", "D", "E"]),
        ];
        let schedules = generate_schedules(&lines, &GeneratorConfig::default());
        let roster = generate_roster(&lines);
        let mut districts = derive_districts(&lines);
        districts[0] = District::new(StationCode::parse("A").unwrap(), "Harbour");
        let catalog = Catalog::new(lines, schedules, roster, districts);

        let store = CatalogStore::load(AnySource::Fixed(catalog)).await.unwrap();
        let state = AppState::new(
            store,
            RouteCache::new(&CacheConfig::default()),
            RouteConfig::default(),
        );
        create_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn find_routes_across_transfer() {
        let (status, json) = get_json(app().await, "/find-routes?start=a&end=E").await;

        assert_eq!(status, StatusCode::OK);
        let itineraries = json.as_array().unwrap();
        assert_eq!(itineraries.len(), 1);

        let itinerary = &itineraries[0];
        assert_eq!(itinerary["route"], serde_json::json!(["A", "B", "C", "D", "E"]));
        assert_eq!(itinerary["transfer"], serde_json::json!(["C"]));
        assert_eq!(itinerary["stationsCount"], 5);
        assert_eq!(itinerary["lines"][0]["trainName"], "RED-01");
        assert_eq!(itinerary["lines"][1]["trainName"], "BLU-01");
        assert!(!itinerary["schedules"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_routes_validates_parameters() {
        let (status, json) = get_json(app().await, "/find-routes?start=A").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing end parameter");

        let (status, _) = get_json(app().await, "/find-routes?start=A&end=not-a-code").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = get_json(app().await, "/find-routes?start=A&end=ZZ").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn lines_and_schedules() {
        let (status, json) = get_json(app().await, "/lines").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 2);

        let (status, json) = get_json(app().await, "/lines/line-red").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stations"], serde_json::json!(["A", "B", "C"]));

        let (status, _) = get_json(app().await, "/lines/LINE-GREEN").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, json) = get_json(app().await, "/schedules").await;
        assert_eq!(json.as_array().unwrap().len(), 24);

        let (_, json) = get_json(app().await, "/schedules/line-red-rev").await;
        let runs = json.as_array().unwrap();
        assert_eq!(runs.len(), 6);
        assert!(runs.iter().all(|r| r["lineCode"] == "LINE-RED-REV"));
    }

    #[tokio::test]
    async fn trains_by_filter_and_name() {
        let (_, json) = get_json(app().await, "/trains").await;
        assert_eq!(json.as_array().unwrap().len(), 4);

        let (_, json) = get_json(app().await, "/trains?line=LINE-BLUE-REV").await;
        assert_eq!(json[0]["name"], "BLU-02");

        let (_, json) = get_json(app().await, "/trains?status=stopped").await;
        assert_eq!(json.as_array().unwrap().len(), 4);

        let (status, _) = get_json(app().await, "/trains?status=flying").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = get_json(app().await, "/trains/RED-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["line"], "LINE-RED-REV");

        let (status, _) = get_json(app().await, "/trains/NOPE").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn districts() {
        let (_, json) = get_json(app().await, "/districts").await;
        assert_eq!(json.as_array().unwrap().len(), 5);

        let (status, json) = get_json(app().await, "/districts/a").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Harbour");

        let (status, json) = get_json(app().await, "/districts/D").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "District D");

        let (status, _) = get_json(app().await, "/districts/Z").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
