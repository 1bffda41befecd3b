pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod routes;
pub mod server;
pub mod telemetry;
pub mod workflows;
