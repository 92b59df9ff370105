pub mod handlers;
pub mod memory_repository;
pub mod models;
pub mod repository;
pub mod service;
