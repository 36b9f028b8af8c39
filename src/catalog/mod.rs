pub mod ability;
pub mod classes;
pub mod loader;
pub mod models;
