//! Sidebar width policy.
//!
//! Projects the stored width preference and the viewport class onto the width
//! the sidebar is actually drawn with. Pure and cheap: it runs on every frame.

pub use chatnav_core::config::DEFAULT_SIDEBAR_WIDTH;

pub const MAX_SIDEBAR_WIDTH: u32 = 500;
pub const MIN_SIDEBAR_WIDTH: u32 = 230;
pub const NARROW_SIDEBAR_WIDTH: u32 = 100;

/// Viewports at most this wide (in px) are treated as mobile.
pub const MOBILE_MAX_WIDTH_PX: u32 = 600;

/// Width of one terminal cell in px.
pub const CELL_WIDTH_PX: u32 = 8;

/// Width bounds shared by the width policy and the drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarLimits {
    pub default: u32,
    pub min: u32,
    pub max: u32,
    pub narrow: u32,
}

impl Default for SidebarLimits {
    fn default() -> Self {
        Self {
            default: DEFAULT_SIDEBAR_WIDTH,
            min: MIN_SIDEBAR_WIDTH,
            max: MAX_SIDEBAR_WIDTH,
            narrow: NARROW_SIDEBAR_WIDTH,
        }
    }
}

impl SidebarLimits {
    /// Clamps an arbitrary (possibly negative) width into `[0, max]`.
    pub fn clamp(&self, width: i64) -> u32 {
        width.clamp(0, i64::from(self.max)) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn from_columns(columns: u16) -> Self {
        if u32::from(columns) * CELL_WIDTH_PX <= MOBILE_MAX_WIDTH_PX {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarWidth {
    Px(u32),
    FullViewport,
}

/// Derived sidebar geometry. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveLayout {
    pub width: SidebarWidth,
    pub is_narrow: bool,
}

impl EffectiveLayout {
    /// Sidebar width in terminal columns for a viewport `viewport_columns` wide.
    pub fn columns(&self, viewport_columns: u16) -> u16 {
        match self.width {
            SidebarWidth::FullViewport => viewport_columns,
            SidebarWidth::Px(px) => px_to_columns(px).min(viewport_columns),
        }
    }
}

/// Computes the effective sidebar layout.
///
/// Mobile always spans the viewport and is never narrow. On desktop the
/// preference is capped at `max`; anything below `min` collapses to the
/// fixed narrow width.
pub fn compute_layout(
    preference: u32,
    viewport: ViewportClass,
    limits: &SidebarLimits,
) -> EffectiveLayout {
    if viewport == ViewportClass::Mobile {
        return EffectiveLayout {
            width: SidebarWidth::FullViewport,
            is_narrow: false,
        };
    }

    let clamped = preference.min(limits.max);
    let is_narrow = clamped < limits.min;
    let width = if is_narrow { limits.narrow } else { clamped };
    EffectiveLayout {
        width: SidebarWidth::Px(width),
        is_narrow,
    }
}

pub fn px_to_columns(px: u32) -> u16 {
    px.div_ceil(CELL_WIDTH_PX).min(u32::from(u16::MAX)) as u16
}

/// Left edge of `column` in px.
pub fn column_to_px(column: u16) -> i64 {
    i64::from(column) * i64::from(CELL_WIDTH_PX)
}
