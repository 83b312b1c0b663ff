use axum::{extract::Extension, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentTenant, Principal};
use crate::services::UsuarioService;
use crate::tenant;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// POST /auth/login - Authenticate with email + password and receive a JWT
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let usuarios = UsuarioService::new(pool);

    let usuario = usuarios
        .find_active_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Credenciais inválidas"))?;

    if !auth::verify_password(&payload.senha, &usuario.senha_hash) {
        return Err(ApiError::unauthorized("Credenciais inválidas"));
    }

    let claims = Claims::new(usuario.id, usuario.tenant_id, usuario.email.clone());
    let token = auth::generate_jwt(&claims)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": {
            "id": usuario.id,
            "nome_completo": usuario.nome_completo,
            "email": usuario.email,
            "tenant_id": usuario.tenant_id,
        },
        "expires_in": expires_in
    })))
}

/// GET /api/auth/whoami - Principal plus the ambient context values.
///
/// The context reads go through the task-local accessors rather than the
/// request extension, exercising the same path services use.
pub async fn whoami(
    Extension(principal): Extension<Principal>,
    current_tenant: Option<Extension<CurrentTenant>>,
) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "user_id": principal.user_id,
        "email": principal.email,
        "tenant_id": principal.tenant_id,
        "request_tenant": current_tenant.map(|Extension(CurrentTenant(id))| id),
        "context": {
            "tenant_id": tenant::current_tenant_id(),
            "user_id": tenant::current_user_id(),
        }
    })))
}
