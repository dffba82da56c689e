// Asset path resolution and image loading

use super::AssetError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// Level spawn maps
    Level,
    /// Decoration layer drawn behind the actors
    BackgroundLayer,
    /// Decoration layer drawn in front of the actors
    ForegroundLayer,
    /// Sprite sheets for actors and items
    Entity,
    /// Door, gate and decoration tiles
    Tile,
    /// Particle sheets
    Particle,
    /// Health bar, key icon and overlay screens
    Gui,
    Sound,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Level => "images/levels",
            AssetType::BackgroundLayer => "images/levels/background",
            AssetType::ForegroundLayer => "images/levels/foreground",
            AssetType::Entity => "images/entities",
            AssetType::Tile => "images/tiles",
            AssetType::Particle => "images/particles",
            AssetType::Gui => "images/gui",
            AssetType::Sound => "sounds",
        }
    }
}

/// Asset loader responsible for finding and loading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Check if an asset exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).is_file()
    }

    /// Open and decode an image asset as RGBA8
    pub fn load_image(&self, asset_type: AssetType, name: &str) -> Result<RgbaImage, AssetError> {
        load_rgba(&self.resolve_path(asset_type, name))
    }

    /// Like `load_image`, but a missing file is `Ok(None)` instead of an error
    pub fn load_optional_image(
        &self,
        asset_type: AssetType,
        name: &str,
    ) -> Result<Option<RgbaImage>, AssetError> {
        if !self.exists(asset_type, name) {
            return Ok(None);
        }
        self.load_image(asset_type, name).map(Some)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// Open an image file and convert it to RGBA8.
///
/// RGB sources come out with an alpha of 255.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
    }

    let image = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_string_lossy().to_string(),
        source,
    })?;

    Ok(image.to_rgba8())
}
