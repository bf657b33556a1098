// Application layer - Services and use cases
pub mod dashboard_service;
pub mod engine;
pub mod source;
