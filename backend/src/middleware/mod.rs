//! Actix middleware for the HTTP server.

pub mod request_log;
