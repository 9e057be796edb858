pub mod factory;
pub mod retry;
pub mod source;
