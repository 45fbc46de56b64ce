//! Figure Settings

use hashbench_stats::DEFAULT_HISTOGRAM_BINS;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Rasterized PNG
    #[default]
    Png,
    /// Vector SVG as drawn
    Svg,
}

impl ImageFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(format!("Unknown image format: {}", other)),
        }
    }
}

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on white
    #[default]
    Light,
    /// Light text on near-black
    Dark,
}

pub(crate) struct Colors {
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub grid: RGBColor,
    pub bars: RGBColor,
    pub accent: RGBColor,
}

impl Theme {
    pub(crate) fn colors(&self) -> Colors {
        match self {
            Theme::Light => Colors {
                background: RGBColor(255, 255, 255),
                foreground: RGBColor(20, 20, 20),
                grid: RGBColor(200, 200, 200),
                bars: RGBColor(76, 114, 176),
                accent: RGBColor(221, 132, 82),
            },
            Theme::Dark => Colors {
                background: RGBColor(24, 24, 27),
                foreground: RGBColor(228, 228, 231),
                grid: RGBColor(70, 70, 76),
                bars: RGBColor(96, 165, 250),
                accent: RGBColor(251, 146, 60),
            },
        }
    }
}

/// Figure settings shared by every plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Output file format
    pub format: ImageFormat,
    /// Color scheme
    pub theme: Theme,
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// Histogram bin count for distribution plots
    pub histogram_bins: usize,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            theme: Theme::Light,
            width: 1280,
            height: 720,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}
