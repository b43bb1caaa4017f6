#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod animation;
pub mod config;
pub mod error;
pub mod layout;
pub mod presenter;
pub mod request;
pub mod scheduler;
pub mod telemetry;
pub mod types;

pub use error::Error;
pub use request::{Dismissal, ToastBuilder, ToastContent, ToastId, ToastRequest};
pub use scheduler::{Snapshot, Stage, ToastScheduler};

pub type Result<T> = std::result::Result<T, error::Error>;
