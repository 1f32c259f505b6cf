//! shiftdesk - role-based shift scheduling for a services business
//!
//! Admins manage employees, customers, their assignments and the shift
//! calendar; employees and customers see the shifts they take part in.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, shifts, listing filters and the access policy
//! - **services**: Application use cases
//! - **infra**: Database, repositories and the Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Bootstrap the first admin
//! cargo run -- create-admin --name Admin --email admin@example.com --password ...
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Actor, Password, User, UserRole};
pub use errors::{AppError, AppResult};
