pub mod config;
pub mod error;
pub mod funding;
pub mod spending;
pub mod types;

pub use config::{Config, LogFormat, DEFAULT_MAX_SUGGESTIONS};
pub use error::TaxVoiceError;
pub use funding::*;
pub use spending::{SpendingItem, SpendingSource, StaticSpending, TaxSpending};
pub use types::*;
