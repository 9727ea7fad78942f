//! # pay-api
//!
//! HTTP API layer for the Nuvei gateway facade.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - JSON endpoints that sign and forward calls to the payment gateway
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/get-session-token` | Issue a session token |
//! | POST | `/process-payment` | Capture a card payment |
//! | POST | `/openOrder` | Open an order |
//! | POST | `/api/PaymentStatus` | Query payment status |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
