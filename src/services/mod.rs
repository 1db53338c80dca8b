// Service exports
pub mod backend;

pub use backend::{BackendError, DecisionService, RunnrClient};
