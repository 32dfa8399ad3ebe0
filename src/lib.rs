//! Civic Pulse - neighborhood issues, legislation voting and feedback
//!
//! An HTTP API over a small in-memory dataset. Every accepted vote or
//! feedback submission is pushed to all connected clients over SSE or
//! WebSocket.

pub mod api;
pub mod broadcast;
pub mod client;
pub mod config;
pub mod store;
pub mod view;
