pub mod api;
pub mod retry;

pub use api::{error_message, ApiError, SpaceTradersClient};
pub use retry::{fetch_with_retry, RetryPolicy};
