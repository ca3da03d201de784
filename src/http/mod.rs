//! The HTTP/WebSocket surface: a CORS + `TraceLayer`-wrapped route table of
//! command/read endpoints plus a WebSocket upgrade that pushes "changed"
//! signals instead of full delta messages.

pub mod commands;
pub mod reads;
pub mod routes;
pub mod ws;

pub use routes::create_router;
