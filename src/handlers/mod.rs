pub mod auth;
pub mod pacientes;
pub mod tenants;
