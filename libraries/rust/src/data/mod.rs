#[cfg(feature = "data")]
pub mod client;
pub use client::Client;
pub use client::DailyBar;
pub use client::Error;
pub use client::Interface;
pub use client::MockInterface;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
