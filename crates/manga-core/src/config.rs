use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use log::warn;
use serde::Deserialize;

use crate::types::DisplayMode;

pub const QUALIFIER: &str = "com";
pub const ORGANIZATION: &str = "zmreader";
pub const APPLICATION: &str = "zmreader";

pub const DEFAULT_ZOOM_MIN: f32 = 0.5;
pub const DEFAULT_ZOOM_MAX: f32 = 3.0;
pub const DEFAULT_ZOOM_STEP: f32 = 0.1;
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.8;
pub const DEFAULT_SUPPRESS_MS: u64 = 1000;

pub fn config_root() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|p| p.config_dir().to_path_buf())
}

pub fn config_file() -> Option<PathBuf> {
    config_root().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomPolicy {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_ZOOM_MIN,
            max: DEFAULT_ZOOM_MAX,
            step: DEFAULT_ZOOM_STEP,
            default: 1.0,
        }
    }
}

impl ZoomPolicy {
    /// Clamps into `[min, max]`; `None` for NaN or infinite input.
    pub fn clamp(&self, value: f32) -> Option<f32> {
        value.is_finite().then(|| value.clamp(self.min, self.max))
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollPolicy {
    /// Minimum intersection ratio for a page to take focus while scrolling.
    pub threshold: f32,
    /// How long viewport updates are ignored after a programmatic jump.
    pub suppress_ms: u64,
    pub gap_rows: u16,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VISIBILITY_THRESHOLD,
            suppress_ms: DEFAULT_SUPPRESS_MS,
            gap_rows: 1,
        }
    }
}

impl ScrollPolicy {
    pub fn suppress_window(&self) -> Duration {
        Duration::from_millis(self.suppress_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReaderConfig {
    pub zoom: ZoomPolicy,
    pub scroll: ScrollPolicy,
    pub cache_pages: usize,
    pub start_mode: DisplayMode,
    /// `name` picks a preset, other keys override single colours.
    pub theme: BTreeMap<String, String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomPolicy::default(),
            scroll: ScrollPolicy::default(),
            cache_pages: 32,
            start_mode: DisplayMode::Scroll,
            theme: BTreeMap::new(),
        }
    }
}

impl ReaderConfig {
    /// Replaces values that cannot work with their defaults.
    pub fn validate(mut self) -> Self {
        let zoom_ok = self.zoom.min.is_finite()
            && self.zoom.max.is_finite()
            && self.zoom.min > 0.0
            && self.zoom.min <= self.zoom.max;
        if !zoom_ok {
            warn!(
                "invalid zoom bounds [{}, {}], using defaults",
                self.zoom.min, self.zoom.max
            );
            self.zoom.min = DEFAULT_ZOOM_MIN;
            self.zoom.max = DEFAULT_ZOOM_MAX;
        }
        if !(self.zoom.step.is_finite() && self.zoom.step > 0.0) {
            warn!("invalid zoom step {}, using default", self.zoom.step);
            self.zoom.step = DEFAULT_ZOOM_STEP;
        }
        self.zoom.default = self
            .zoom
            .clamp(self.zoom.default)
            .unwrap_or(1.0)
            .clamp(self.zoom.min, self.zoom.max);

        let t = self.scroll.threshold;
        if !(t > 0.0 && t <= 1.0) {
            warn!("invalid visibility threshold {t}, using default");
            self.scroll.threshold = DEFAULT_VISIBILITY_THRESHOLD;
        }
        if self.cache_pages == 0 {
            self.cache_pages = 1;
        }
        self
    }
}
