//! Domain layer: catalog records, collaborator traits, and the cost estimator

pub mod model;
pub mod repository;
pub mod service;
