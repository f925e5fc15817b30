pub mod types;

pub use types::PhotoSession;
