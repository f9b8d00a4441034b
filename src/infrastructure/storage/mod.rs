//! Avatar storage backends.

pub mod fs_avatar_storage;

pub use fs_avatar_storage::FsAvatarStorage;
