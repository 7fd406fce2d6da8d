//! WebSocket client for the Hybrid Trading user-input endpoint.
//!
//! Provides the wire protocol (outgoing submission envelope, incoming
//! progress events), connection management, the progress view and
//! navigator seams, an injectable reconnect policy, and the
//! [`FormController`](controller::FormController) that ties one form to
//! one socket.

pub mod client;
pub mod controller;
pub mod form;
pub mod messages;
pub mod navigator;
pub mod reconnect;
pub mod session;
pub mod terminal;
pub mod view;
