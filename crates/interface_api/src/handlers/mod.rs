//! Request handlers, one module per surface

pub mod relay;
pub mod dashboard;
pub mod notes;
pub mod portfolio;
pub mod health;
