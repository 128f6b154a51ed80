//! WebSocket infrastructure for realtime notification delivery.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by Axum routes.

mod handler;
pub mod manager;

pub use handler::ws_handler;
pub use manager::WsManager;
