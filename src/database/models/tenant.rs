use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row in the shared `tenants` table. This table has no tenant affinity
/// itself, so the insert path does not go through the tenant stamp.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub nome: String,
    pub slug: String,
    pub cnpj: Option<String>,
    pub plano: String,
    pub limite_usuarios: i32,
    pub limite_unidades: i32,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a tenant
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTenant {
    pub nome: String,
    pub slug: String,
    pub cnpj: Option<String>,
    #[serde(default = "default_plano")]
    pub plano: String,
    #[serde(default = "default_limite_usuarios")]
    pub limite_usuarios: i32,
    #[serde(default = "default_limite_unidades")]
    pub limite_unidades: i32,
}

/// Payload for updating a tenant; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTenant {
    pub nome: Option<String>,
    pub slug: Option<String>,
    pub cnpj: Option<String>,
    pub plano: Option<String>,
    pub limite_usuarios: Option<i32>,
    pub limite_unidades: Option<i32>,
}

fn default_plano() -> String {
    "basico".to_string()
}

fn default_limite_usuarios() -> i32 {
    10
}

fn default_limite_unidades() -> i32 {
    1
}

/// Aggregate counts for the tenant statistics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TenantStatistics {
    pub total: i64,
    pub ativos: i64,
    pub inativos: i64,
}
