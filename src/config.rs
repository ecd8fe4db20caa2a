use crate::error::ConfigError;
use crate::loader::DOCUMENT_NAME;
use crate::scroll::ScrollOffsets;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub document: DocumentConfig,

    #[serde(default)]
    pub scroll: ScrollConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub theme: CustomThemeConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path, directory or http(s) URL of the terminology document
    #[serde(default = "default_source")]
    pub source: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Sticky header offsets, in terminal rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Rows taken by the title bar above the search box
    #[serde(default = "default_header_offset")]
    pub header_offset: u32,

    /// Blank rows left between the search box and a jumped-to heading
    #[serde(default = "default_clearance")]
    pub clearance: u32,

    /// Animate jumps instead of snapping
    #[serde(default = "default_smooth")]
    pub smooth: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_query_len")]
    pub max_query_len: usize,

    /// Visible rows of the result dropdown; the list itself is unbounded
    #[serde(default = "default_dropdown_rows")]
    pub dropdown_rows: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Write logs here while the TUI is running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Custom theme color overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_1: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_2: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_3: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_bullet: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_border: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_bg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bar_bg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bar_fg: Option<ColorValue>,
}

/// Color value that can be specified in multiple formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Named color (e.g., "Red", "Cyan", "White")
    Named(String),
    /// RGB color { rgb = [r, g, b] }
    Rgb { rgb: [u8; 3] },
    /// Indexed color { indexed = 235 }
    Indexed { indexed: u8 },
}

impl ColorValue {
    /// Convert to ratatui Color
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorValue::Named(name) => match name.to_lowercase().as_str() {
                "black" => Some(Color::Black),
                "red" => Some(Color::Red),
                "green" => Some(Color::Green),
                "yellow" => Some(Color::Yellow),
                "blue" => Some(Color::Blue),
                "magenta" => Some(Color::Magenta),
                "cyan" => Some(Color::Cyan),
                "gray" | "grey" => Some(Color::Gray),
                "darkgray" | "darkgrey" => Some(Color::DarkGray),
                "lightred" => Some(Color::LightRed),
                "lightgreen" => Some(Color::LightGreen),
                "lightyellow" => Some(Color::LightYellow),
                "lightblue" => Some(Color::LightBlue),
                "lightmagenta" => Some(Color::LightMagenta),
                "lightcyan" => Some(Color::LightCyan),
                "white" => Some(Color::White),
                _ => None,
            },
            ColorValue::Rgb { rgb } => Some(Color::Rgb(rgb[0], rgb[1], rgb[2])),
            ColorValue::Indexed { indexed } => Some(Color::Indexed(*indexed)),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_source() -> String {
    DOCUMENT_NAME.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: default_header_offset(),
            clearance: default_clearance(),
            smooth: default_smooth(),
        }
    }
}

fn default_header_offset() -> u32 {
    2
}

fn default_clearance() -> u32 {
    1
}

fn default_smooth() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_query_len: default_max_query_len(),
            dropdown_rows: default_dropdown_rows(),
        }
    }
}

fn default_max_query_len() -> usize {
    crate::glossary::search::DEFAULT_MAX_QUERY_LEN
}

fn default_dropdown_rows() -> u16 {
    8
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/glossview/config.toml
    /// - Linux: ~/.config/glossview/config.toml
    /// - Windows: %APPDATA%/glossview/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("glossview").join("config.toml"))
    }

    /// Load config from the default location.
    ///
    /// A missing file gives defaults. A broken one also gives defaults, along
    /// with the error so the caller can report it once logging is set up.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => (Self::default(), None),
        }
    }

    /// Like [`Config::load_from`], but falls back to defaults.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load config from an explicit file, reporting any problem.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.document.timeout_secs)
    }

    pub fn scroll_offsets(&self) -> ScrollOffsets {
        ScrollOffsets {
            header_offset: self.scroll.header_offset,
            clearance: self.scroll.clearance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.document.source, "terminology.md");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(
            config.scroll_offsets(),
            ScrollOffsets {
                header_offset: 2,
                clearance: 1
            }
        );
        assert!(config.scroll.smooth);
        assert_eq!(config.search.max_query_len, 256);
        assert_eq!(config.search.dropdown_rows, 8);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[document]
source = "https://example.com/"

[scroll]
smooth = false

[theme]
heading_3 = "LightCyan"
bold_fg = { rgb = [255, 200, 0] }
rule = { indexed = 240 }
"#,
        )
        .unwrap();

        assert_eq!(config.document.source, "https://example.com/");
        assert_eq!(config.document.timeout_secs, 30);
        assert!(!config.scroll.smooth);
        assert_eq!(config.scroll.header_offset, 2);
        assert_eq!(
            config.theme.heading_3.as_ref().and_then(ColorValue::to_color),
            Some(Color::LightCyan)
        );
        assert_eq!(
            config.theme.bold_fg.as_ref().and_then(ColorValue::to_color),
            Some(Color::Rgb(255, 200, 0))
        );
        assert_eq!(
            config.theme.rule.as_ref().and_then(ColorValue::to_color),
            Some(Color::Indexed(240))
        );
    }

    #[test]
    fn test_unknown_color_name() {
        assert_eq!(ColorValue::Named("chartreuse".to_string()).to_color(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.dropdown_rows = 4;
        config.log.file = Some(PathBuf::from("/tmp/glossview.log"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scroll]\nclearance = \"wide\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_or_default_keeps_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (config, err) = Config::load_or_default(&path);
        assert_eq!(config, Config::default());
        assert!(err.is_none());

        fs::write(&path, "[scroll]\nclearance = \"wide\"").unwrap();
        let (config, err) = Config::load_or_default(&path);
        assert_eq!(config, Config::default());
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
    }
}
