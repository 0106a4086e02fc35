// Infrastructure layer module
// Contains document store adapters and the remote team accessor
// Follows Hexagonal Architecture

pub mod remote;
pub mod repositories;
pub mod stores;
