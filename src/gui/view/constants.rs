//! View constants (layout/sizing).

pub(crate) const PADDING: f32 = 12.0;
pub(crate) const SPACING: f32 = 8.0;

pub(crate) const LABEL_TEXT: f32 = 14.0;
pub(crate) const TICK_TEXT: f32 = 10.0;
pub(crate) const STATUS_TEXT: f32 = 12.0;

/// Volume tick marks every this many percent.
pub(crate) const VOLUME_TICK_STEP: u8 = 25;
