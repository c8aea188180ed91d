//! Request and response bodies

pub mod fund;
pub mod notes;
pub mod portfolio;
