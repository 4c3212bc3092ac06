//! Font registry.
//!
//! Fonts are installed from files on disk before any text is drawn and then
//! looked up by family name.

use std::fs;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use walkdir::WalkDir;

use crate::error::{Result, ThumbnailError};

/// An installed font and where it came from.
pub struct InstalledFont {
    pub name: String,
    pub path: PathBuf,
    pub font: Font,
}

#[derive(Default)]
pub struct FontRegistry {
    fonts: Vec<InstalledFont>,
}

fn is_font_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    !hidden && matches!(ext.as_deref(), Some("ttf") | Some("otf"))
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install every font file found under `dir`, recursively.
    ///
    /// Returns how many fonts were installed. Files that are not valid fonts
    /// are skipped with a warning.
    pub fn install_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(ThumbnailError::missing(dir, "font directory does not exist"));
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_font_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        // Directory iteration order is platform dependent.
        paths.sort();

        let mut installed = 0;
        for path in paths {
            match self.install_file(&path) {
                Ok(_) => installed += 1,
                Err(ThumbnailError::InvalidConfiguration(reason)) => {
                    log::warn!("Skipping {}: {}", path.display(), reason);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(installed)
    }

    /// Install a single font file and return its family name.
    pub fn install_file(&mut self, path: &Path) -> Result<&str> {
        let bytes = fs::read(path).map_err(|e| ThumbnailError::missing(path, e))?;
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| ThumbnailError::invalid(format!("not a usable font: {}", e)))?;

        let name = font
            .name()
            .map(str::to_string)
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_default();
        log::info!("Installed font '{}'", name);

        self.fonts.push(InstalledFont {
            name,
            path: path.to_path_buf(),
            font,
        });
        Ok(&self.fonts[self.fonts.len() - 1].name)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.iter().map(|f| f.name.as_str())
    }

    /// Look a font up by family name.
    ///
    /// Tries an exact match, then a case-insensitive one, then the file stem
    /// (`Roboto-Black` for `Roboto-Black.ttf`).
    pub fn family(&self, name: &str) -> Result<&Font> {
        let found = self
            .fonts
            .iter()
            .find(|f| f.name == name)
            .or_else(|| self.fonts.iter().find(|f| f.name.eq_ignore_ascii_case(name)))
            .or_else(|| {
                self.fonts.iter().find(|f| {
                    f.path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .is_some_and(|s| s.eq_ignore_ascii_case(name))
                })
            });

        match found {
            Some(installed) => {
                log::debug!("Using font '{}' from {}", installed.name, installed.path.display());
                Ok(&installed.font)
            }
            None => Err(ThumbnailError::FontNotFound {
                family: name.to_string(),
                installed: if self.fonts.is_empty() {
                    "none".to_string()
                } else {
                    self.families().collect::<Vec<_>>().join(", ")
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_font_file() {
        assert!(is_font_file(Path::new("fonts/roboto/Roboto-Black.ttf")));
        assert!(is_font_file(Path::new("fonts/Mono.OTF")));
        assert!(!is_font_file(Path::new("fonts/._Roboto-Black.ttf")));
        assert!(!is_font_file(Path::new("fonts/roboto-unhinted.zip")));
        assert!(!is_font_file(Path::new("fonts/LICENSE")));
    }

    #[test]
    fn test_empty_registry_lookup() {
        let registry = FontRegistry::new();
        let err = registry.family("Roboto Black").err().unwrap();
        assert_eq!(
            err.to_string(),
            "font family 'Roboto Black' is not installed (installed: none)"
        );
    }

    #[test]
    fn test_missing_directory() {
        let mut registry = FontRegistry::new();
        let err = registry.install_dir(Path::new("/no/such/fonts")).unwrap_err();
        assert!(matches!(err, ThumbnailError::MissingAsset { .. }));
    }

    #[test]
    fn test_garbage_font_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let mut registry = FontRegistry::new();
        assert_eq!(registry.install_dir(dir.path()).unwrap(), 0);
        assert!(registry.is_empty());
    }
}
