use crate::error::MapError;
use macroquad::prelude::*;
use std::path::Path;

/// Something with a pixel size that sprites can display.
pub trait SpriteTexture: Clone {
    /// Native size in pixels.
    fn size(&self) -> Vec2;
}

impl SpriteTexture for Texture2D {
    #[inline]
    fn size(&self) -> Vec2 {
        Texture2D::size(self)
    }
}

/// Turns an image path into a texture.
pub trait ImageLoader {
    /// Texture type produced.
    type Texture: SpriteTexture;

    /// Loads the image at `path`; failures become [`MapError::Image`].
    fn load_image(&mut self, path: &Path) -> Result<Self::Texture, MapError>;
}

/// Synchronous GPU texture loader. Needs a live Macroquad context.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextureLoader;

impl ImageLoader for TextureLoader {
    type Texture = Texture2D;

    fn load_image(&mut self, path: &Path) -> Result<Texture2D, MapError> {
        let bytes = std::fs::read(path).map_err(|e| MapError::Image {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let image = Image::from_file_with_format(&bytes, None).map_err(|e| MapError::Image {
            path: path.to_path_buf(),
            reason: format!("{:?}", e),
        })?;

        let tex = Texture2D::from_image(&image);
        tex.set_filter(FilterMode::Nearest);
        Ok(tex)
    }
}
