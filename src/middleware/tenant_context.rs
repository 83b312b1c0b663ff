use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

use crate::middleware::auth::Principal;
use crate::tenant;

/// Resolved tenant id stamped onto the request, for handlers that prefer a
/// direct extension read over the ambient context.
#[derive(Clone, Copy, Debug)]
pub struct CurrentTenant(pub Uuid);

/// Opens the request-scoped tenant context around the downstream handler.
///
/// Reads `(tenant_id, user_id)` from the attached principal (absent
/// principal yields both `None`) and binds them for the rest of request
/// processing, including the persistence-time stamp step. The downstream
/// response passes through untransformed.
pub async fn tenant_context_middleware(mut request: Request, next: Next) -> Response {
    let (tenant_id, user_id) = match request.extensions().get::<Principal>() {
        Some(principal) => (principal.tenant_id, Some(principal.user_id)),
        None => (None, None),
    };

    if let Some(tenant_id) = tenant_id {
        request.extensions_mut().insert(CurrentTenant(tenant_id));
    }

    tenant::scope(tenant_id, user_id, next.run(request)).await
}
