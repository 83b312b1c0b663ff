use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::tenant::TenantScoped;

/// Row in the `pacientes` table. `tenant_id` is nullable: rows written
/// outside any tenant context (seeds, migrations) stay unstamped.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Paciente {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub codigo_interno: String,
    pub nome: String,
    pub nome_social: Option<String>,
    pub sexo: String,
    pub data_nascimento: NaiveDate,
    pub nome_mae: String,
    pub rg: String,
    pub cpf: String,
    pub email: String,
    pub contatos: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a patient. Callers normally leave `tenant_id`
/// unset and let the pre-insert stamp fill it from the request context;
/// an explicit value is kept as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaciente {
    pub tenant_id: Option<Uuid>,
    pub codigo_interno: String,
    pub nome: String,
    pub nome_social: Option<String>,
    pub sexo: String,
    pub data_nascimento: NaiveDate,
    pub nome_mae: String,
    pub rg: String,
    pub cpf: String,
    pub email: String,
    pub contatos: String,
}

impl TenantScoped for CreatePaciente {
    fn tenant_id(&self) -> Option<Uuid> {
        self.tenant_id
    }

    fn set_tenant_id(&mut self, tenant_id: Uuid) {
        self.tenant_id = Some(tenant_id);
    }
}
