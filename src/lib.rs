//! # Room Escape Booking Service
//!
//! Books escape-room themes at fixed time slots and ranks the most popular
//! themes of the past week.
//!
//! ## Architecture
//!
//! - **domain**: Value objects, aggregates and repository traits
//! - **application**: Booking use-cases (reservations, themes, times)
//! - **infrastructure**: SeaORM/SQLite and in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Composition root and lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export storage types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{create_api_router, BookingState};
