pub mod auth;
pub mod response;
pub mod tenant_context;
pub mod tenant_guard;

pub use auth::{jwt_auth_middleware, Principal};
pub use response::{ApiResponse, ApiResult};
pub use tenant_context::{tenant_context_middleware, CurrentTenant};
pub use tenant_guard::{tenant_guard_middleware, TenantCheck, NO_TENANT_MESSAGE};
