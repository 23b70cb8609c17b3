//! Roster client library: users listing, registration form, and the REST
//! adapters behind them.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod page;
