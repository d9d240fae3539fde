//! HTTP API: routing and request/response mapping for the blood bank service.

pub mod app;
