pub mod factory;
pub mod role;
pub mod token;

pub use factory::build_token_service;
pub use role::{Elevation, RoleAuthorizer};
pub use token::TokenService;
