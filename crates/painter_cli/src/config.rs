//! Optional TOML configuration file.
//!
//! Every key is optional; anything left out falls back to the built-in
//! defaults, and command-line flags override the file.
//!
//! ```toml
//! width = 80
//! trim = true
//!
//! [render]
//! ramp = "standard"
//! gamma = 0.8
//! brightness-offset = 0
//! ```

use std::path::{Path, PathBuf};

use ascii_painter::AsciiOptions;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    pub width: Option<u32>,
    pub color: bool,
    pub trim: bool,
    pub auto_copy: bool,
    pub render: AsciiOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use ascii_painter::{ContrastPivot, DensityRamp};

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_full_config() {
        let file = write_config(
            r#"
            width = 80
            trim = true
            color = true

            [render]
            ramp = "standard"
            contrast = 1.5
            contrast-pivot = "mean"
            brightness-offset = -5
            aspect-correction = 0.55
            gamma = 0.8
            invert = true
            "#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.width, Some(80));
        assert!(config.trim);
        assert!(config.color);
        assert!(!config.auto_copy);
        assert_eq!(config.render.ramp, DensityRamp::standard());
        assert_eq!(config.render.contrast, 1.5);
        assert_eq!(config.render.contrast_pivot, ContrastPivot::Mean);
        assert_eq!(config.render.brightness_offset, -5);
        assert_eq!(config.render.aspect_correction, 0.55);
        assert_eq!(config.render.gamma, 0.8);
        assert!(config.render.invert);
    }

    #[test]
    fn empty_config_is_default() {
        let file = write_config("");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.width, None);
        assert_eq!(config.render, AsciiOptions::default());
    }

    #[test]
    fn unknown_keys_fail() {
        let file = write_config("colour = true\n");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("/no/such/painter.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
