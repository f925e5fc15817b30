//! Core logic for the Sugarless foot-health companion app: the
//! monofilament-style sensation screening (scoring and classification),
//! append-only session storage over a pluggable key-value blob store, and
//! the client for the hosted wound-detection workflow.
//!
//! The UI layer drives a [`SensationTest`] through the six screening
//! sites, finalizes it into a [`SensationSession`], and hands it to a
//! [`SessionStore`] for persistence; photo captures become
//! [`PhotoSession`] records in an independent collection. The
//! [`detection`] module submits an image to the remote detection endpoint
//! and flattens its loosely-shaped response for display.

pub mod config;
pub mod detection;
pub mod photo;
pub mod sensation;
pub mod storage;
pub mod types;

pub use photo::PhotoSession;
pub use sensation::{
    Classification, SensationResponse, SensationSession, SensationSite, SensationTest,
};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, SessionStore};
pub use types::FootSide;
