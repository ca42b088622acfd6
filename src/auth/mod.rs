pub mod credentials;
pub mod identity;
pub mod validate;
