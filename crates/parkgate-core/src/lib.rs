pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod fee;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, DeviceConfig, GateConfig, ServerConfig, StorageConfig};
pub use error::{Error, Result};
pub use fee::{FeeQuote, Rate, dwell_minutes, format_dwell, legacy_fee};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
