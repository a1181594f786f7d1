//! Fetch a mini program code image and save it to disk
//!
//! Run with:
//! WECHAT_APPID=wx... WECHAT_SECRET=... WECHAT_SCENE=id=42 cargo run --example fetch_code

use std::env;

use wechat_mp_code::middleware::LoggingMiddleware;
use wechat_mp_code::{CodeProvider, WechatClient, WechatError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let appid = env::var("WECHAT_APPID")?;
    let secret = env::var("WECHAT_SECRET")?;
    let scene = env::var("WECHAT_SCENE").unwrap_or_else(|_| "demo".to_string());
    let output = env::var("WECHAT_OUTPUT").unwrap_or_else(|_| "code.jpg".to_string());

    let client = WechatClient::builder()
        .appid(appid)
        .secret(secret)
        .with_middleware(LoggingMiddleware::new())
        .build()?;

    let mut provider = CodeProvider::with_client(client, scene, 430);

    match provider.fetch_code_image().await {
        Ok(image) => {
            std::fs::write(&output, &image)?;
            println!("Saved {} bytes to {}", image.len(), output);
        }
        Err(e @ WechatError::Protocol(_)) => {
            eprintln!("WeChat did not return an image: {}", e);
            if let Some(upstream) = e.upstream() {
                eprintln!("errcode={} errmsg={}", upstream.errcode, upstream.errmsg);
            }
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
