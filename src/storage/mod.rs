//! Durable blob storage for the notification list

mod file;
mod memory;
mod repository;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use repository::BlobStore;

#[cfg(test)]
pub use repository::MockBlobStore;
