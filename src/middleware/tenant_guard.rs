use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::middleware::auth::Principal;

/// Per-route tenant requirement, attached as a request extension by the
/// router. Every route under the guard defaults to `Required`; cross-tenant
/// administration routes layer `Skip` outside the guard so the flag is
/// visible when the guard runs. Layering order resolves overrides: the
/// outermost flag on a route group wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TenantCheck {
    Required,
    Skip,
}

pub const NO_TENANT_MESSAGE: &str = "Usuário não possui tenant associado ao seu cadastro";

/// Rejects authenticated principals that have no tenant association.
///
/// Decision table:
/// - route flagged `TenantCheck::Skip` -> allow unconditionally
/// - no principal attached -> allow (the authentication layer rejects
///   unauthenticated access on its own terms)
/// - principal without tenant id -> 403 Forbidden, fixed message
/// - otherwise -> allow
///
/// No side effects beyond the decision; rejections are not logged here.
pub async fn tenant_guard_middleware(
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(TenantCheck::Skip) = request.extensions().get::<TenantCheck>() {
        return Ok(next.run(request).await);
    }

    match request.extensions().get::<Principal>() {
        None => Ok(next.run(request).await),
        Some(principal) if principal.tenant_id.is_some() => Ok(next.run(request).await),
        Some(_) => Err(ApiError::forbidden(NO_TENANT_MESSAGE)),
    }
}
