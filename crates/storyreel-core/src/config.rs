use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Playback timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// How long an image item stays on screen when it has no explicit duration
    #[serde(default = "default_image_duration")]
    pub image_duration_ms: u64,
    /// Clip length used when the clip does not declare one
    #[serde(default = "default_clip_duration")]
    pub default_clip_duration_ms: u64,
    /// Progress ticker frequency
    #[serde(default = "default_ticker_fps")]
    pub ticker_fps: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            image_duration_ms: default_image_duration(),
            default_clip_duration_ms: default_clip_duration(),
            ticker_fps: default_ticker_fps(),
        }
    }
}

impl PlaybackConfig {
    pub fn image_duration(&self) -> Duration {
        Duration::from_millis(self.image_duration_ms)
    }

    pub fn default_clip_duration(&self) -> Duration {
        Duration::from_millis(self.default_clip_duration_ms)
    }

    /// Period of the fine progress ticker
    pub fn ticker_period(&self) -> Duration {
        if self.ticker_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.ticker_fps as u64)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle event poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Logical pixel width of one terminal cell (gesture geometry)
    #[serde(default = "default_cell_width")]
    pub cell_width_px: u16,
    /// Logical pixel height of one terminal cell (gesture geometry)
    #[serde(default = "default_cell_height")]
    pub cell_height_px: u16,
    /// Show item captions over the media
    #[serde(default = "default_true")]
    pub show_captions: bool,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            show_captions: default_true(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("midnight", "daylight")
    pub name: String,
    /// Optional color overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "midnight".to_string()
}

/// Optional color overrides, hex strings ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Viewer background
    pub background: Option<String>,
    /// Primary text
    pub foreground: Option<String>,
    /// Secondary text (captions, hints)
    pub muted: Option<String>,
    /// Accent (store name, key hints)
    pub accent: Option<String>,
    /// Empty progress segment
    pub track: Option<String>,
    /// Filled progress segment
    pub track_fill: Option<String>,
    /// Product price
    pub price: Option<String>,
    /// Error text
    pub error: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "q", "<C-c>", "<Left>", "<Space>", "<CR>", "<Esc>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Close the viewer
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Previous item
    #[serde(default = "default_key_previous")]
    pub previous: String,
    /// Next item
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Toggle hold (pause/resume)
    #[serde(default = "default_key_hold")]
    pub hold: String,
    /// Open the attached product
    #[serde(default = "default_key_view_product")]
    pub view_product: String,
    /// Add the attached product to the cart
    #[serde(default = "default_key_add_to_cart")]
    pub add_to_cart: String,
    /// Open the current store
    #[serde(default = "default_key_view_store")]
    pub view_store: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            previous: default_key_previous(),
            next: default_key_next(),
            hold: default_key_hold(),
            view_product: default_key_view_product(),
            add_to_cart: default_key_add_to_cart(),
            view_store: default_key_view_store(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_previous() -> String { "h".to_string() }
fn default_key_next() -> String { "l".to_string() }
fn default_key_hold() -> String { "<Space>".to_string() }
fn default_key_view_product() -> String { "<CR>".to_string() }
fn default_key_add_to_cart() -> String { "a".to_string() }
fn default_key_view_store() -> String { "s".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storyreel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_image_duration() -> u64 {
    5000
}

fn default_clip_duration() -> u64 {
    15000
}

fn default_ticker_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> u16 {
    8
}

fn default_cell_height() -> u16 {
    16
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; missing file means defaults
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/storyreel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("storyreel")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("storyreel.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
