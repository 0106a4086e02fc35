//! Document field names for team records
//!
//! Both the read mapping and the write mapping go through these constants.

/// Collection holding every team document
pub const TEAMS_COLLECTION: &str = "futboll";

pub const NAME: &str = "name";
pub const FOUNDED_YEAR: &str = "foundedYear";
pub const TITLES_WON: &str = "titlesWon";
pub const IMAGE_URL: &str = "imageUrl";
