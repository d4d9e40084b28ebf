//! Filter catalog.
//!
//! Each [`Filter`] maps a [`PixelBuffer`] to a new buffer of the same
//! dimensions and channel layout:
//!
//! - **Per-pixel**: grayscale, sepia, invert, contrast, saturation
//! - **Convolution**: blur, sharpen
//!
//! The source buffer is never modified.

pub mod color;
pub mod convolve;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::ParseNameError;

pub use color::{contrast, grayscale, invert, saturation, sepia};
pub use convolve::{blur, convolve, sharpen, Kernel};

/// Named filter from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Identity.
    #[default]
    None,
    Grayscale,
    Sepia,
    Blur,
    Sharpen,
    Invert,
    Contrast,
    Saturation,
}

impl Filter {
    /// Every filter, in menu order.
    pub const ALL: [Filter; 8] = [
        Filter::None,
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Blur,
        Filter::Sharpen,
        Filter::Invert,
        Filter::Contrast,
        Filter::Saturation,
    ];

    /// Lowercase name accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Filter::None => "none",
            Filter::Grayscale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::Blur => "blur",
            Filter::Sharpen => "sharpen",
            Filter::Invert => "invert",
            Filter::Contrast => "contrast",
            Filter::Saturation => "saturation",
        }
    }

    /// Apply this filter, returning a new buffer.
    pub fn apply(self, image: &PixelBuffer) -> PixelBuffer {
        match self {
            Filter::None => image.clone(),
            Filter::Grayscale => grayscale(image),
            Filter::Sepia => sepia(image),
            Filter::Blur => blur(image),
            Filter::Sharpen => sharpen(image),
            Filter::Invert => invert(image),
            Filter::Contrast => contrast(image),
            Filter::Saturation => saturation(image),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseNameError::new("filter", s))
    }
}

/// Apply `filter` to `image`. Free-function form of [`Filter::apply`].
pub fn apply_filter(image: &PixelBuffer, filter: Filter) -> PixelBuffer {
    filter.apply(image)
}
