// Team registration form

pub mod model;
pub mod validation;

pub use model::{RegisterModel, RegisterState};
