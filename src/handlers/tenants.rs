use axum::{
    extract::Path,
    response::Json,
};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{CreateTenant, Tenant, TenantStatistics, UpdateTenant};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::TenantService;

// Tenant administration. These routes carry the skip-tenant flag: the
// operators managing tenants have no tenant association themselves.

/// POST /api/tenants - Create a tenant
pub async fn create(Json(payload): Json<CreateTenant>) -> ApiResult<Tenant> {
    let pool = DatabaseManager::pool().await?;
    let tenant = TenantService::new(pool).create(payload).await?;
    Ok(ApiResponse::created(tenant))
}

/// GET /api/tenants - List all tenants
pub async fn list() -> ApiResult<Vec<Tenant>> {
    let pool = DatabaseManager::pool().await?;
    let tenants = TenantService::new(pool).find_all().await?;
    Ok(ApiResponse::success(tenants))
}

/// GET /api/tenants/ativos - List active tenants
pub async fn list_ativos() -> ApiResult<Vec<Tenant>> {
    let pool = DatabaseManager::pool().await?;
    let tenants = TenantService::new(pool).find_ativos().await?;
    Ok(ApiResponse::success(tenants))
}

/// GET /api/tenants/estatisticas - Aggregate counts
pub async fn statistics() -> ApiResult<TenantStatistics> {
    let pool = DatabaseManager::pool().await?;
    let stats = TenantService::new(pool).statistics().await?;
    Ok(ApiResponse::success(stats))
}

/// GET /api/tenants/slug/:slug - Fetch by slug
pub async fn get_by_slug(Path(slug): Path<String>) -> ApiResult<Tenant> {
    let pool = DatabaseManager::pool().await?;
    let tenant = TenantService::new(pool).find_by_slug(&slug).await?;
    Ok(ApiResponse::success(tenant))
}

/// GET /api/tenants/:id - Fetch one tenant
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<Tenant> {
    let pool = DatabaseManager::pool().await?;
    let tenant = TenantService::new(pool).find_one(id).await?;
    Ok(ApiResponse::success(tenant))
}

/// PATCH /api/tenants/:id - Update a tenant
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<UpdateTenant>) -> ApiResult<Tenant> {
    let pool = DatabaseManager::pool().await?;
    let tenant = TenantService::new(pool).update(id, payload).await?;
    Ok(ApiResponse::success(tenant))
}

/// DELETE /api/tenants/:id - Deactivate a tenant (soft delete)
pub async fn remove(Path(id): Path<Uuid>) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    TenantService::new(pool).remove(id).await?;
    Ok(ApiResponse::success(()))
}
