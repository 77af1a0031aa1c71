//! HTTP API serving connection details to the voice client
//!
//! - GET /api/connection-details - Mint a participant token for a fresh room
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
