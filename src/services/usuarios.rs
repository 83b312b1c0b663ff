use sqlx::PgPool;

use crate::database::models::Usuario;
use crate::error::ApiError;

pub struct UsuarioService {
    pool: PgPool,
}

impl UsuarioService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lookup for the login flow; only active accounts can authenticate
    pub async fn find_active_by_email(&self, email: &str) -> Result<Option<Usuario>, ApiError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE email = $1 AND ativo = true",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }
}
