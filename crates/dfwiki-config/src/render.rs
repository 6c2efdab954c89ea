use dfwiki_core::render::{DEFAULT_IMAGE_BASE_URL, DEFAULT_LINK_SCHEME, RenderOptions};
use serde::{Deserialize, Serialize};

fn default_image_base_url() -> Option<String> {
    Some(DEFAULT_IMAGE_BASE_URL.to_string())
}

fn default_link_scheme() -> String {
    DEFAULT_LINK_SCHEME.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// `null` renders embeds as `file:` links for the viewer to resolve
    #[serde(default = "default_image_base_url")]
    pub image_base_url: Option<String>,
    #[serde(default = "default_link_scheme")]
    pub link_scheme: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_base_url: default_image_base_url(),
            link_scheme: default_link_scheme(),
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            image_base_url: self
                .image_base_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            link_scheme: self.link_scheme.clone(),
        }
    }
}
