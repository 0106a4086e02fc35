// Team domain module
// Contains the team entity and the document field names it maps through

#![allow(clippy::module_inception)]

pub mod fields;
pub mod team;

// Re-export main types for convenience
pub use team::Team;
