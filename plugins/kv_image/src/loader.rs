//! Image loading that always produces an image

use crate::path::find_image;
use image::Rgb32FImage;
use std::path::Path;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Rgb32FImage> = LazyLock::new(|| Rgb32FImage::new(1, 1));

/// The 1x1 black RGB image returned whenever a real image is unavailable
pub fn placeholder() -> &'static Rgb32FImage {
    &PLACEHOLDER
}

/// Outcome of an image lookup
#[derive(Clone, Debug)]
pub enum ImageLookup {
    /// A decoded image, RGB with intensities in `0.0..=1.0`
    Found { image: Rgb32FImage, path: String },
    /// Nothing usable was found; stands for the placeholder and an empty path
    Placeholder,
}

impl ImageLookup {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// The image path, or `""` for the placeholder
    pub fn path(&self) -> &str {
        match self {
            Self::Found { path, .. } => path.as_str(),
            Self::Placeholder => "",
        }
    }

    pub fn image(&self) -> &Rgb32FImage {
        match self {
            Self::Found { image, .. } => image,
            Self::Placeholder => placeholder(),
        }
    }

    /// Split into the image and path outputs the host expects
    pub fn into_parts(self) -> (Rgb32FImage, String) {
        match self {
            Self::Found { image, path } => (image, path),
            Self::Placeholder => (placeholder().clone(), String::new()),
        }
    }
}

/// Load the image for `key` in the store `store_file_name`.
///
/// Blank inputs, a missing file and any read or decode failure all give
/// [`ImageLookup::Placeholder`]. Decoded images drop any alpha channel and
/// are scaled to the unit range.
pub fn load_image(image_root: &Path, store_file_name: &str, key: &str, ext: &str) -> ImageLookup {
    let Some(path) = find_image(image_root, store_file_name, key, ext) else {
        log::debug!("no image for {:?} in {:?}", key, store_file_name);
        return ImageLookup::Placeholder;
    };

    match image::open(&path) {
        Ok(decoded) => ImageLookup::Found {
            image: decoded.to_rgb32f(),
            path: path.to_string_lossy().into_owned(),
        },
        Err(e) => {
            log::warn!("failed to load image {}: {}", path.display(), e);
            ImageLookup::Placeholder
        }
    }
}
