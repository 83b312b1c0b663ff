// Pre-insert tenant stamping for rows with tenant affinity.

use uuid::Uuid;

use crate::tenant::context;

/// Implemented by insertable records whose table carries a nullable
/// `tenant_id` column. Shared tables (e.g. `tenants` itself) simply do not
/// implement this, and their insert paths skip the stamp step.
pub trait TenantScoped {
    fn tenant_id(&self) -> Option<Uuid>;
    fn set_tenant_id(&mut self, tenant_id: Uuid);
}

/// Fill `tenant_id` from the ambient context when the caller left it unset.
///
/// Called explicitly at the top of every repository insert for tenant-scoped
/// records, so the stamping is visible at the call site rather than hidden
/// in a persistence-layer registration. A caller-provided value always wins.
/// A missing context is not a fault: the row is written without a tenant id.
/// Update and delete paths never stamp.
pub fn stamp_on_insert<T: TenantScoped>(record: &mut T) {
    if record.tenant_id().is_some() {
        return;
    }
    if let Some(tenant_id) = context::current_tenant_id() {
        record.set_tenant_id(tenant_id);
    }
}
