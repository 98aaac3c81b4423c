//! Session bridge against wiremock stand-ins of the shop and of a WebDriver
//! endpoint. Runs without a browser or network access.

#[path = "../common/mod.rs"]
mod common;

mod authenticate_browser;
