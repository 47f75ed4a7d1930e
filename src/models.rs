use serde::{Serialize, Deserialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StickerRequest {
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub details: Option<String>, // free text from the storefront form
}

/// A request that passed validation; every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSticker {
    pub shape: String,
    pub material: String,
    pub details: Option<String>,
}

impl StickerRequest {
    /// `None` when `shape` or `material` is absent or blank.
    pub fn validate(self) -> Option<ValidSticker> {
        let shape = non_blank(self.shape)?;
        let material = non_blank(self.material)?;
        Some(ValidSticker { shape, material, details: non_blank(self.details) })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// What the upstream handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    Base64(String),
    Url(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StickerMeta {
    pub shape: String,
    pub material: String,
}

/// The image reference, named by what it holds. Storefront pages accept either field.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub enum ImageRef {
    #[serde(rename = "imageDataUrl")]
    DataUrl(String),
    #[serde(rename = "imageUrl")]
    Url(String),
}

impl From<GeneratedImage> for ImageRef {
    fn from(image: GeneratedImage) -> Self {
        match image {
            GeneratedImage::Base64(b64) => ImageRef::DataUrl(format!("data:image/png;base64,{b64}")),
            GeneratedImage::Url(url) => ImageRef::Url(url),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct StickerResponse {
    #[serde(flatten)]
    pub image: ImageRef,
    pub meta: StickerMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), hint: None, details: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
