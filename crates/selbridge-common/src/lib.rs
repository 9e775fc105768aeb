pub mod errors;
pub mod id;
pub mod options;

pub use errors::{BridgeError, ConfigError, SelbridgeError};
pub use id::ElementId;
pub use options::BridgeOptions;

pub type Result<T> = std::result::Result<T, SelbridgeError>;
