pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, MediumError, PlatformError, RegistryError, WinsyncError};
pub use id::{new_handle_id, new_id};
pub use types::{Snapshot, WindowDescriptor, WindowId, WindowShape};

pub type Result<T> = std::result::Result<T, WinsyncError>;
