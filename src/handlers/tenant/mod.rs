// handlers/tenant - Tenant registration service endpoints (public)

pub mod health;
pub mod register;

pub use health::am_i_up;
pub use register::register_tenant;
