pub mod api_client;
pub mod browser;
pub mod configuration;
pub mod domain;
pub mod markup;
pub mod pages;
pub mod session_bridge;
pub mod telemetry;
