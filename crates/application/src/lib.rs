//! Booky Application - Use cases and ports
//!
//! This crate holds the client logic: the typed API wrapper, session
//! handling, per-screen controllers and the exchange wizard. All I/O goes
//! through the ports in [`ports`].

pub mod api;
pub mod context;
pub mod controllers;
pub mod dashboard;
pub mod error;
pub mod ports;
pub mod session;
pub mod wizard;

#[cfg(test)]
mod test_support;

pub use api::BookyApi;
pub use context::AppContext;
pub use controllers::Controllers;
pub use dashboard::{Dashboard, RestoreOutcome};
pub use error::{ApplicationError, ApplicationResult};
pub use session::{SessionHandle, SessionManager};
pub use wizard::{ExchangeWizard, FinalizeReport, ProposalOutcome};
