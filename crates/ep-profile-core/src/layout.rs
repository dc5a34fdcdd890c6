//! Responsive sizing of the modal's video frame.

use ep_profile_source::MediaSize;

/// Widest the modal's video frame gets with the current stylesheet.
pub const MAX_CONTENT_WIDTH: u32 = 630;
/// Combined left and right margin around the frame on narrow screens.
pub const SIDE_MARGINS: u32 = 60;

/// Size the layout is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoDimensions {
    pub size: MediaSize,
    /// Whether `size` came from the video itself rather than its preview.
    pub height_known: bool,
}

impl VideoDimensions {
    /// Prefer the video's own metadata; fall back to the preview image when
    /// the video reports no height.
    pub fn resolve(metadata: MediaSize, preview: Option<MediaSize>) -> Option<Self> {
        if metadata.aspect_ratio().is_some() {
            return Some(Self {
                size: metadata,
                height_known: true,
            });
        }
        preview
            .filter(|size| size.aspect_ratio().is_some())
            .map(|size| Self {
                size,
                height_known: false,
            })
    }

    fn ratio(&self) -> f64 {
        self.size.aspect_ratio().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoBox {
    /// No usable dimensions; leave the frame's styles alone.
    Unset,
    /// The viewport fits the video at its natural size.
    Natural { height_px: u32 },
    /// Full frame width with an explicit height.
    WidthLocked { height_px: u32 },
    /// Full frame width, height from `padding-bottom`.
    AspectBox { padding_bottom_pct: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleOp {
    Set(&'static str, String),
    Remove(&'static str),
}

impl VideoBox {
    pub fn compute(dimensions: Option<VideoDimensions>, viewport_width: f64) -> Self {
        let Some(dimensions) = dimensions else {
            return VideoBox::Unset;
        };
        let ratio = dimensions.ratio();
        let width = dimensions.size.width;

        if width > MAX_CONTENT_WIDTH {
            return VideoBox::AspectBox {
                padding_bottom_pct: ratio * 100.0,
            };
        }

        if viewport_width >= f64::from(width + SIDE_MARGINS) {
            return VideoBox::Natural {
                height_px: dimensions.size.height,
            };
        }

        if dimensions.height_known {
            let frame_width = (viewport_width - f64::from(SIDE_MARGINS)).max(0.0);
            VideoBox::WidthLocked {
                height_px: (frame_width * ratio).ceil() as u32,
            }
        } else {
            VideoBox::AspectBox {
                padding_bottom_pct: ratio * 100.0,
            }
        }
    }

    /// Inline style changes for the video container.
    pub fn style_ops(&self) -> Vec<StyleOp> {
        match self {
            VideoBox::Unset => Vec::new(),
            VideoBox::Natural { height_px } => vec![
                StyleOp::Set("height", format!("{height_px}px")),
                StyleOp::Set("width", "auto".to_owned()),
                StyleOp::Remove("padding-bottom"),
            ],
            VideoBox::WidthLocked { height_px } => vec![
                StyleOp::Set("height", format!("{height_px}px")),
                StyleOp::Remove("width"),
                StyleOp::Remove("padding-bottom"),
            ],
            VideoBox::AspectBox { padding_bottom_pct } => vec![
                StyleOp::Remove("height"),
                StyleOp::Remove("width"),
                StyleOp::Set("padding-bottom", format!("{padding_bottom_pct}%")),
            ],
        }
    }
}
