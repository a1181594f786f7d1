use serde::Serialize;

/// Page every generated code opens.
pub const CODE_PAGE: &str = "pages/index/index";

/// Body of `POST /wxa/getwxacodeunlimit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeRequest {
    pub scene: String,
    pub page: String,
    pub width: u32,
    pub auto_color: bool,
}

impl CodeRequest {
    /// Page is fixed to [`CODE_PAGE`] and line color is always automatic.
    pub fn new(scene: impl Into<String>, width: u32) -> Self {
        Self {
            scene: scene.into(),
            page: CODE_PAGE.to_string(),
            width,
            auto_color: true,
        }
    }
}
