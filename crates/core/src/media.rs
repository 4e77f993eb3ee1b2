//! Image dimension probing for placement.

use std::path::{Path, PathBuf};

/// What is known about an image file before placing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageInfo {
    /// The file does not exist.
    Missing,

    /// The file exists but its dimensions could not be read.
    Unknown,

    /// Pixel dimensions.
    Size { width: u32, height: u32 },
}

impl ImageInfo {
    /// Width divided by height, if known and non-degenerate.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match *self {
            ImageInfo::Size { width, height } if width > 0 && height > 0 => {
                Some(f64::from(width) / f64::from(height))
            }
            _ => None,
        }
    }
}

/// Capability for reading image dimensions.
pub trait ImageProbe {
    fn probe(&self, path: &Path) -> ImageInfo;
}

/// Reads dimensions from image headers on the local file system.
#[derive(Debug, Clone, Default)]
pub struct FsImageProbe {
    /// Directory relative paths are resolved against.
    base: Option<PathBuf>,
}

impl FsImageProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative image paths against `dir` instead of the working
    /// directory.
    pub fn relative_to(dir: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(dir.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageProbe for FsImageProbe {
    fn probe(&self, path: &Path) -> ImageInfo {
        let path = self.resolve(path);
        let path = path.as_path();
        if !path.exists() {
            return ImageInfo::Missing;
        }

        match image::image_dimensions(path) {
            Ok((width, height)) => ImageInfo::Size { width, height },
            Err(e) => {
                log::debug!("Could not read dimensions of {}: {}", path.display(), e);
                ImageInfo::Unknown
            }
        }
    }
}

/// Probe that reports the same answer for every path. Useful when no
/// file system is available.
#[derive(Debug, Clone, Copy)]
pub struct FixedImageProbe(pub ImageInfo);

impl ImageProbe for FixedImageProbe {
    fn probe(&self, _path: &Path) -> ImageInfo {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let info = ImageInfo::Size {
            width: 1600,
            height: 900,
        };
        assert!((info.aspect_ratio().unwrap() - 16.0 / 9.0).abs() < 1e-9);
        assert_eq!(ImageInfo::Unknown.aspect_ratio(), None);
        assert_eq!(
            ImageInfo::Size {
                width: 10,
                height: 0
            }
            .aspect_ratio(),
            None
        );
    }

    #[test]
    fn test_fs_probe_missing_file() {
        let probe = FsImageProbe::new();
        assert_eq!(
            probe.probe(Path::new("definitely/not/here.png")),
            ImageInfo::Missing
        );
    }

    #[test]
    fn test_reads_png_dimensions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(3, 2)
            .save(dir.path().join("wide.png"))
            .unwrap();

        let probe = FsImageProbe::relative_to(dir.path());
        assert_eq!(
            probe.probe(Path::new("wide.png")),
            ImageInfo::Size {
                width: 3,
                height: 2
            }
        );
    }

    #[test]
    fn test_unreadable_header_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"this is not an image at all").unwrap();

        assert_eq!(FsImageProbe::new().probe(&path), ImageInfo::Unknown);
    }

    #[test]
    fn test_fs_probe_resolves_relative_paths() {
        let probe = FsImageProbe::relative_to("/docs");
        assert_eq!(probe.resolve(Path::new("img/a.png")), PathBuf::from("/docs/img/a.png"));
        assert_eq!(probe.resolve(Path::new("/abs/a.png")), PathBuf::from("/abs/a.png"));
    }

    #[test]
    fn test_fixed_probe() {
        let probe = FixedImageProbe(ImageInfo::Unknown);
        assert_eq!(probe.probe(Path::new("a.png")), ImageInfo::Unknown);
    }
}
