pub mod paciente;
pub mod tenant;
pub mod usuario;

pub use paciente::{CreatePaciente, Paciente};
pub use tenant::{CreateTenant, Tenant, TenantStatistics, UpdateTenant};
pub use usuario::Usuario;
