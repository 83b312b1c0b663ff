pub mod pacientes;
pub mod tenants;
pub mod usuarios;

pub use pacientes::PacienteService;
pub use tenants::TenantService;
pub use usuarios::UsuarioService;
