// Repository ports (interfaces the domain depends on)

pub mod team_repository;

pub use team_repository::TeamRepository;
