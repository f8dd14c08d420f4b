pub mod activity;
pub mod errors;
pub mod id;

pub use activity::{ActivityKind, ActivityRecord, TitleId, HOME_MENU_NAME};
pub use errors::{ConfigError, NxrpcError};
pub use id::new_nonce;

pub type Result<T> = std::result::Result<T, NxrpcError>;
