//! Payment reputation scoring
//!
//! Turns a counterparty's payment history into a bounded trust score, a risk
//! level, a predicted next-payment date and short textual insights. The
//! engine in [`services`] is pure and synchronous; the HTTP layer in
//! [`routes`] and [`handlers`] exposes it to dashboard clients.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
