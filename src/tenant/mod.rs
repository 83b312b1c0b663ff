// Tenant isolation: request-scoped context plus the pre-insert stamp step.

pub mod context;
pub mod stamp;

pub use context::{current_tenant_id, current_user_id, scope, RequestContext};
pub use stamp::{stamp_on_insert, TenantScoped};
