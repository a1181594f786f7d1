//! WeChat Mini Program code client for Rust
//!
//! Exchanges app credentials for an access token and requests an unlimited
//! mini program code image (`wxacode.getUnlimited`) for a scene.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wechat_mp_code::CodeProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut provider = CodeProvider::new("wx1234567890abcdef", "your_secret", "id=42", 430);
//!
//!     // Refreshes the access token, then downloads the image
//!     let image = provider.fetch_code_image().await?;
//!     std::fs::write("code.jpg", image)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Every call to [`CodeProvider::fetch_code_image`] performs exactly one
//! token exchange and one image request. Tokens are not cached and failed
//! calls are not retried.
//!
//! ## Modules
//!
//! - [`code`] - Code image provider
//! - [`blocking`] - Synchronous wrapper around the provider
//! - [`client`] - HTTP client and builder
//! - [`middleware`] - Request middleware (logging with credential redaction)
//! - [`error`] - Error types
//! - [`token`] - Access token exchange
//! - [`types`] - Identifiers and wire types
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wechat_mp_code::{ProtocolError, WechatError};
//!
//! match provider.fetch_code_image().await {
//!     Ok(image) => { /* save image */ }
//!     Err(WechatError::Protocol(ProtocolError::NotImage { upstream, .. })) => {
//!         eprintln!("WeChat refused: {:?}", upstream);
//!     }
//!     Err(WechatError::Network(e)) => {
//!         eprintln!("network error: {}", e);
//!     }
//!     Err(e) => {
//!         eprintln!("other error: {}", e);
//!     }
//! }
//! ```

pub mod blocking;
pub mod client;
pub mod code;
pub mod error;
pub mod middleware;
pub mod token;
pub mod types;

pub use client::{WechatClient, WechatClientBuilder};
pub use code::CodeProvider;
pub use error::{ApiErrorBody, ProtocolError, WechatError};
