pub mod cloudinary;
pub mod media;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod relay;
pub mod request;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig};
pub use media::{MediaApi, MediaError, ResourceScope};
pub use relay::{BatchRelay, FolderOutcome, RelayError};
pub use request::{DeleteFoldersRequest, DeleteImagesRequest, ValidationError};
