pub mod runner;
pub mod seed_service;
pub mod summary;
