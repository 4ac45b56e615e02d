//! Client library for the employee attrition prediction service.
/// Backend API client and payload types.
pub mod api;
/// App directory resolution.
pub mod app_dirs;
/// Settings file and backend address resolution.
pub mod config;
/// Plain-text rendering for the command line.
pub mod display;
/// Employee fields, form drafts and records.
pub mod employee;
mod http_client;
/// Tracing setup.
pub mod logging;
/// View controllers and routing.
pub mod views;
