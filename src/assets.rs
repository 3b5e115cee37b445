//! Sprite image loading
//!
//! Decodes image files into straight RGBA8 textures ready for blitting.

use std::path::{Path, PathBuf};

use image::ImageError;

use crate::canvas::Texture;
use crate::error::{BounceError, Result};

/// Decode an image file into an alpha-blended texture
pub fn load_texture(path: impl AsRef<Path>) -> Result<Texture> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| decode_error(path, source))?;
    let texture = into_texture(image)?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        texture.width(),
        texture.height()
    );
    Ok(texture)
}

/// Decode an in-memory encoded image (format sniffed from the bytes)
pub fn decode_texture(bytes: &[u8]) -> Result<Texture> {
    let image =
        image::load_from_memory(bytes).map_err(|source| decode_error(Path::new("<memory>"), source))?;
    into_texture(image)
}

fn into_texture(image: image::DynamicImage) -> Result<Texture> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Texture::from_rgba(width, height, rgba.into_raw())?.with_blend(true))
}

fn decode_error(path: &Path, source: ImageError) -> BounceError {
    BounceError::Decode {
        path: PathBuf::from(path),
        source,
    }
}
