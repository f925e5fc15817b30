pub mod scoring;
pub mod test_run;
pub mod types;

pub use scoring::{calculate_score, classify, initialize_sites, instruction};
pub use test_run::SensationTest;
pub use types::{Classification, SensationResponse, SensationSession, SensationSite, Toe};
