//! WeChat HTTP Client module
//!
//! This module contains the WechatClient and its builder.

mod wechat_client;
pub use wechat_client::WechatClient;
pub(crate) use wechat_client::RawResponse;

mod builder;
pub use builder::WechatClientBuilder;
