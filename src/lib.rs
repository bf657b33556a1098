// Mine helmet telemetry - simulation core and dashboard service
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
