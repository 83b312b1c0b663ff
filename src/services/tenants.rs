use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{CreateTenant, Tenant, TenantStatistics, UpdateTenant};
use crate::error::ApiError;

pub struct TenantService {
    pool: PgPool,
}

impl TenantService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateTenant) -> Result<Tenant, ApiError> {
        if self.slug_exists(&input.slug, None).await? {
            return Err(ApiError::conflict(format!(
                "Tenant com slug \"{}\" já existe",
                input.slug
            )));
        }

        if let Some(cnpj) = &input.cnpj {
            if self.cnpj_exists(cnpj, None).await? {
                return Err(ApiError::conflict(format!(
                    "Tenant com CNPJ \"{}\" já existe",
                    cnpj
                )));
            }
        }

        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (id, nome, slug, cnpj, plano, limite_usuarios, limite_unidades, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, true)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.nome)
        .bind(&input.slug)
        .bind(&input.cnpj)
        .bind(&input.plano)
        .bind(input.limite_usuarios)
        .bind(input.limite_unidades)
        .fetch_one(&self.pool)
        .await?;

        Ok(tenant)
    }

    pub async fn find_all(&self) -> Result<Vec<Tenant>, ApiError> {
        let tenants = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY nome ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tenants)
    }

    pub async fn find_ativos(&self) -> Result<Vec<Tenant>, ApiError> {
        let tenants =
            sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE ativo = true ORDER BY nome ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(tenants)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Tenant, ApiError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        tenant.ok_or_else(|| ApiError::not_found(format!("Tenant com ID \"{}\" não encontrado", id)))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Tenant, ApiError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        tenant
            .ok_or_else(|| ApiError::not_found(format!("Tenant com slug \"{}\" não encontrado", slug)))
    }

    pub async fn update(&self, id: Uuid, input: UpdateTenant) -> Result<Tenant, ApiError> {
        let current = self.find_one(id).await?;

        if let Some(slug) = &input.slug {
            if slug != &current.slug && self.slug_exists(slug, Some(id)).await? {
                return Err(ApiError::conflict(format!(
                    "Tenant com slug \"{}\" já existe",
                    slug
                )));
            }
        }

        if let Some(cnpj) = &input.cnpj {
            if current.cnpj.as_deref() != Some(cnpj.as_str())
                && self.cnpj_exists(cnpj, Some(id)).await?
            {
                return Err(ApiError::conflict(format!(
                    "Tenant com CNPJ \"{}\" já existe",
                    cnpj
                )));
            }
        }

        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants SET
                nome = COALESCE($2, nome),
                slug = COALESCE($3, slug),
                cnpj = COALESCE($4, cnpj),
                plano = COALESCE($5, plano),
                limite_usuarios = COALESCE($6, limite_usuarios),
                limite_unidades = COALESCE($7, limite_unidades),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.nome)
        .bind(&input.slug)
        .bind(&input.cnpj)
        .bind(&input.plano)
        .bind(input.limite_usuarios)
        .bind(input.limite_unidades)
        .fetch_one(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Soft-deactivate: tenants are never hard-deleted
    pub async fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        // 404 when missing, matching find_one
        self.find_one(id).await?;

        sqlx::query("UPDATE tenants SET ativo = false, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn statistics(&self) -> Result<TenantStatistics, ApiError> {
        let (total, ativos): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE ativo = true) FROM tenants",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(TenantStatistics {
            total,
            ativos,
            inativos: total - ativos,
        })
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        let found: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM tenants WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)")
                .bind(slug)
                .bind(exclude)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    async fn cnpj_exists(&self, cnpj: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        let found: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM tenants WHERE cnpj = $1 AND ($2::uuid IS NULL OR id <> $2)")
                .bind(cnpj)
                .bind(exclude)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }
}
