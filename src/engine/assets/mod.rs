// Asset access
//
// Resolves asset paths under the configured root, decodes images and hands
// out typed handles the renderer and audio backends key their caches on.

mod handle;
mod loader;

pub use handle::{AssetId, SoundHandle, TextureHandle};
pub use loader::{load_rgba, AssetLoader, AssetType};

/// Asset loading errors. Always fatal: the game cannot run without its assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("level_101.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: level_101.png");
    }
}
