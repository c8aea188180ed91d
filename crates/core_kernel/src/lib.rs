//! Core Kernel - Foundational types and utilities for the fund tracker
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for funds, notes and holdings
//! - A clock abstraction so timestamp-derived data can be tested deterministically
//! - The port error taxonomy and storage port shared by adapters

pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use temporal::{Clock, SystemClock, FixedClock};
pub use identifiers::{FundId, NoteId, InvestmentId};
pub use ports::{PortError, DomainPort, KeyValueStore};
