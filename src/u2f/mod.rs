pub mod challenge_repo;
pub mod config;
pub mod device_repo;
pub mod directory;
pub mod engine;
pub mod errors;
pub mod models;
pub mod service;

pub use challenge_repo::*;
pub use config::*;
pub use device_repo::*;
pub use directory::*;
pub use engine::*;
pub use errors::*;
pub use models::*;
pub use service::*;
