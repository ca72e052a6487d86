pub mod authorize;
pub mod health;
pub mod relationships;
pub mod schema;
pub mod user_roles;
