pub mod blob;
pub mod file;
pub mod store;

pub use blob::{BlobStore, MemoryBlobStore};
pub use file::FileBlobStore;
pub use store::{SessionStore, PHOTO_SESSIONS_KEY, SENSATION_SESSIONS_KEY};
