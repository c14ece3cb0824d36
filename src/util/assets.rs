use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use tracing::warn;

#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Contents of `assets/main.css`; empty if the asset is missing.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

fn load_text(path: &str) -> String {
    match EmbeddedAssets::get(path).map(|file| file.data) {
        Some(Cow::Borrowed(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
        Some(Cow::Owned(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
        None => {
            warn!("embedded asset {path} not found");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_stylesheet_is_embedded() {
        assert!(main_css().contains(".app-shell"));
    }
}
