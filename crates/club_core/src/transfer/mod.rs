//! Transfer Resolver
//!
//! `evaluate` decides an offer from plain data; `resolve` runs it against
//! a `GameState` and applies an accepted deal in one step.

pub mod evaluate;
pub mod resolve;

pub use evaluate::{
    asking_price, evaluate, RejectReason, TransferDecision, TransferOffer, TransferResult,
};
pub use resolve::resolve;
