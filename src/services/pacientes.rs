use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{CreatePaciente, Paciente};
use crate::error::ApiError;
use crate::tenant;

pub struct PacienteService {
    pool: PgPool,
}

impl PacienteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a patient row.
    ///
    /// The tenant stamp runs as an explicit pre-insert step: an unset
    /// `tenant_id` is filled from the request context, an explicit one is
    /// kept. This is the only place in the write path that touches the
    /// tenant column.
    pub async fn create(&self, mut input: CreatePaciente) -> Result<Paciente, ApiError> {
        tenant::stamp_on_insert(&mut input);

        let paciente = sqlx::query_as::<_, Paciente>(
            r#"
            INSERT INTO pacientes (
                id, tenant_id, codigo_interno, nome, nome_social, sexo,
                data_nascimento, nome_mae, rg, cpf, email, contatos
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.tenant_id)
        .bind(&input.codigo_interno)
        .bind(&input.nome)
        .bind(&input.nome_social)
        .bind(&input.sexo)
        .bind(input.data_nascimento)
        .bind(&input.nome_mae)
        .bind(&input.rg)
        .bind(&input.cpf)
        .bind(&input.email)
        .bind(&input.contatos)
        .fetch_one(&self.pool)
        .await?;

        Ok(paciente)
    }

    /// List patients. Reads are not tenant-filtered; only the stamped id
    /// on new rows is guaranteed.
    pub async fn find_all(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Paciente>, ApiError> {
        let pacientes = sqlx::query_as::<_, Paciente>(
            "SELECT * FROM pacientes ORDER BY nome ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit.unwrap_or(100).clamp(1, 500))
        .bind(offset.unwrap_or(0).max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(pacientes)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Paciente, ApiError> {
        let paciente = sqlx::query_as::<_, Paciente>("SELECT * FROM pacientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        paciente.ok_or_else(|| ApiError::not_found(format!("Paciente com ID \"{}\" não encontrado", id)))
    }
}
