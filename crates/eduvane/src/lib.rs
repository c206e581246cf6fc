pub mod engine;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod profile;
pub mod workspace;
