pub mod config;
pub mod error;
pub mod notification;
pub mod result;
pub mod traits;

pub use config::{AppConfig, ViewMode};
pub use error::TrackerError;
pub use notification::{Notification, NotificationLevel, Notifier};
pub use result::TrackerResult;
pub use traits::Editable;
