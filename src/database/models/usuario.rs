use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row in the `usuarios` table. `tenant_id` is nullable: platform
/// administrators have no tenant association and are rejected by the
/// tenant guard on tenant-required routes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub nome_completo: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub senha_hash: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
