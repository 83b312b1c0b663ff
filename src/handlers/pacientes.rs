use axum::{
    extract::{Path, Query},
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{CreatePaciente, Paciente};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::PacienteService;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/pacientes - Create a patient (tenant id stamped on insert)
pub async fn create(Json(payload): Json<CreatePaciente>) -> ApiResult<Paciente> {
    let pool = DatabaseManager::pool().await?;
    let paciente = PacienteService::new(pool).create(payload).await?;
    Ok(ApiResponse::created(paciente))
}

/// GET /api/pacientes - List patients
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Vec<Paciente>> {
    let pool = DatabaseManager::pool().await?;
    let pacientes = PacienteService::new(pool)
        .find_all(query.limit, query.offset)
        .await?;
    Ok(ApiResponse::success(pacientes))
}

/// GET /api/pacientes/:id - Fetch one patient
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<Paciente> {
    let pool = DatabaseManager::pool().await?;
    let paciente = PacienteService::new(pool).find_one(id).await?;
    Ok(ApiResponse::success(paciente))
}
