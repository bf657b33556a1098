// Domain layer - Core models and algorithms
pub mod alert;
pub mod channel;
pub mod dashboard;
pub mod generator;
pub mod helmet;
pub mod reading;
pub mod safety;
