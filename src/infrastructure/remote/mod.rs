// Remote data access
// Maps team entities onto a hosted document store

pub mod team_remote_data_source;

pub use team_remote_data_source::TeamRemoteDataSource;
