//! Middleware components for the WeChat client.
//!
//! Middleware are tower [`Layer`]s installed with
//! [`WechatClientBuilder::with_middleware`](crate::client::WechatClientBuilder::with_middleware).
//! They see every outgoing request, token exchange included. Nothing is
//! installed by default, so the client logs no URLs unless asked to.
//!
//! ## Usage
//!
//! ```ignore
//! use wechat_mp_code::client::WechatClient;
//! use wechat_mp_code::middleware::LoggingMiddleware;
//!
//! let client = WechatClient::builder()
//!     .appid("wx1234567890abcdef")
//!     .secret("your_secret")
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
