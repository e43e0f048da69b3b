//! HTTP request handlers.

use crate::extract::ValidJson;
use crate::model::PrivacyGroupId;
use crate::response::{
    CreateDatasetResponse, Dataset, DatasetsResponse, DeleteDatasetResponse, HealthResponse,
    SyncDatasetResponse,
};
use crate::schemas::{CreateDatasetRequest, UpdateDatasetRequest};
use crate::state::AppState;
use crate::Error;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

/// Health check with basic counters.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store_backend: state.config.store_backend.as_str(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}

/// `GET /datasets/`
pub async fn list_datasets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetsResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let datasets = state.datasets.list().await?;
    info!(count = datasets.len(), "Listed datasets");

    Ok(Json(DatasetsResponse {
        datasets_response: datasets,
    }))
}

/// `POST /datasets/update`
pub async fn update_dataset(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<UpdateDatasetRequest>,
) -> Result<Json<Dataset>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    info!(privacy_group_id = %request.privacy_group_id, "Updating dataset");

    Ok(Json(state.datasets.update(request).await?))
}

/// `POST /datasets/create`
pub async fn create_dataset(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<CreateDatasetRequest>,
) -> Result<Json<CreateDatasetResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    info!(privacy_group_id = %request.privacy_group_id, "Creating dataset");

    let id = state.datasets.create(request).await?;
    Ok(Json(CreateDatasetResponse::new(&id)))
}

/// `POST /datasets/sync`
pub async fn sync_datasets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SyncDatasetResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    info!("Syncing datasets with ThreatExchange");
    state.datasets.sync().await?;

    Ok(Json(SyncDatasetResponse::default()))
}

/// `POST /datasets/delete/{id}`
pub async fn delete_dataset(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteDatasetResponse>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let id: PrivacyGroupId = raw_id.parse()?;
    info!(privacy_group_id = %id, "Deleting dataset");

    state.datasets.delete(&id).await?;
    Ok(Json(DeleteDatasetResponse::default()))
}
