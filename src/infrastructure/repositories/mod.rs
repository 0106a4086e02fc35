// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod remote_team_repository;

pub use remote_team_repository::RemoteTeamRepository;
