//! # Optional Export Assets
//!
//! Well-known paths for the optional logo image and the optional embedded
//! font. Absence or unreadability of either is never an error: the PDF
//! renders without a logo, or with the built-in fallback font. The fallback
//! decision is logged at debug level and otherwise invisible.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::debug;

/// Default location of the optional PNG logo.
pub const DEFAULT_LOGO_PATH: &str = "assets/logo.png";

/// Default location of the optional TTF font (enables non-Latin text,
/// e.g. Thai item descriptions, in the PDF).
pub const DEFAULT_FONT_PATH: &str = "assets/fonts/NotoSansThai-Regular.ttf";

/// Optional assets consumed by the PDF renderer.
#[derive(Debug, Clone)]
pub struct ExportAssets {
    /// PNG logo drawn in the page header when present.
    pub logo_path: PathBuf,
    /// TTF font embedded when present; built-in Helvetica otherwise.
    pub font_path: PathBuf,
}

impl Default for ExportAssets {
    fn default() -> Self {
        ExportAssets {
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}

impl ExportAssets {
    /// Assets rooted at a custom directory (same well-known file names).
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        ExportAssets {
            logo_path: dir.join("logo.png"),
            font_path: dir.join("fonts/NotoSansThai-Regular.ttf"),
        }
    }

    /// Opens the logo file if it exists and is readable.
    pub fn logo_reader(&self) -> Option<BufReader<File>> {
        match File::open(&self.logo_path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(err) => {
                debug!(path = %self.logo_path.display(), %err, "No logo asset, header renders without one");
                None
            }
        }
    }

    /// Opens the font file if it exists and is readable.
    pub fn font_reader(&self) -> Option<BufReader<File>> {
        match File::open(&self.font_path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(err) => {
                debug!(path = %self.font_path.display(), %err, "No font asset, falling back to built-in font");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_assets_are_silently_none() {
        let assets = ExportAssets::in_dir("/nonexistent/dir");
        assert!(assets.logo_reader().is_none());
        assert!(assets.font_reader().is_none());
    }

    #[test]
    fn test_default_paths() {
        let assets = ExportAssets::default();
        assert_eq!(assets.logo_path, PathBuf::from("assets/logo.png"));
    }
}
