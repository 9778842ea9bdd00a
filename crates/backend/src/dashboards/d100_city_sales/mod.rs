pub mod aggregation;
pub mod error;
pub mod repository;
pub mod service;
