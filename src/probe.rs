//! Dimension Probe - Source Image Size
//!
//! Markup compilation needs the source size before parsing.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::document::Size;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Cannot read dimensions of '{}': {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub trait DimensionProbe {
    fn dimensions(&self, path: &Path) -> Result<Size, ProbeError>;
}

/// Reads the size from the image header without decoding pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProbe;

impl DimensionProbe for ImageProbe {
    fn dimensions(&self, path: &Path) -> Result<Size, ProbeError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| ProbeError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Size::new(i64::from(width), i64::from(height)))
    }
}

/// Same size for every path
#[derive(Debug, Clone, Copy)]
pub struct FixedDimensions(pub Size);

impl DimensionProbe for FixedDimensions {
    fn dimensions(&self, _path: &Path) -> Result<Size, ProbeError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_image_probe_reads_png_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("source.png");
        image::RgbImage::new(7, 3).save(&path).unwrap();

        assert_eq!(ImageProbe.dimensions(&path).unwrap(), Size::new(7, 3));
    }

    #[test]
    fn test_image_probe_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.jpg");

        let err = ImageProbe.dimensions(&path).unwrap_err();
        assert!(err.to_string().contains("missing.jpg"));
    }

    #[test]
    fn test_fixed_dimensions() {
        let probe = FixedDimensions(Size::new(10, 20));
        assert_eq!(
            probe.dimensions(Path::new("anything")).unwrap(),
            Size::new(10, 20)
        );
    }
}
