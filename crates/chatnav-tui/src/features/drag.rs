//! Drag handle controller.
//!
//! Two states: idle, and dragging with a live [`DragSession`]. While a session
//! exists it holds the pointer-move and pointer-up subscriptions, so the
//! runtime keeps forwarding pointer events even after the pointer leaves the
//! handle. Ending the session in any way drops both subscriptions.
//!
//! A press/release pair shorter than the click threshold is a click and
//! toggles narrow mode from the width stored at release time, regardless of
//! how far the pointer travelled.

use chatnav_core::config::DragConfig;

use super::layout::SidebarLimits;
use crate::common::{EventSurface, ListenerKind, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTiming {
    /// Moves within this many ms of the last applied update are dropped.
    pub rate_limit_ms: u64,
    /// Releases sooner than this after the press are clicks.
    pub click_threshold_ms: u64,
}

impl Default for DragTiming {
    fn default() -> Self {
        DragConfig::default().into()
    }
}

impl From<DragConfig> for DragTiming {
    fn from(config: DragConfig) -> Self {
        Self {
            rate_limit_ms: config.rate_limit_ms,
            click_threshold_ms: config.click_threshold_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    pub is_click: bool,
}

/// Decides whether a press/release pair was a click or a drag.
///
/// Only elapsed time counts; movement never turns a quick release into a drag.
pub fn classify_release(elapsed_ms: u64, _movement_px: i64, timing: &DragTiming) -> Release {
    Release {
        is_click: elapsed_ms < timing.click_threshold_ms,
    }
}

/// Width for a drag that moved the pointer `delta_px` from where it started.
///
/// Results below `min` snap to the narrow width instead of following the
/// pointer.
pub fn resize_width(start_width: u32, delta_px: i64, limits: &SidebarLimits) -> u32 {
    let proposed = limits.clamp(i64::from(start_width) + delta_px);
    if proposed < limits.min {
        limits.narrow
    } else {
        proposed
    }
}

/// The narrow/wide toggle: narrow widths expand to the default, anything else collapses.
pub fn toggle_width(width: u32, limits: &SidebarLimits) -> u32 {
    if width < limits.min {
        limits.default
    } else {
        limits.narrow
    }
}

#[derive(Debug)]
struct DragSession {
    start_pointer_x: i64,
    start_width: u32,
    start_ms: u64,
    last_update_ms: Option<u64>,
    _pointer_move: Subscription,
    _pointer_up: Subscription,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragRelease {
    pub release: Release,
    /// Width to store: the toggled width for clicks, the final drag width otherwise.
    pub width: u32,
}

#[derive(Debug)]
pub struct DragController {
    limits: SidebarLimits,
    timing: DragTiming,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(limits: SidebarLimits, timing: DragTiming) -> Self {
        Self {
            limits,
            timing,
            session: None,
        }
    }

    pub fn limits(&self) -> &SidebarLimits {
        &self.limits
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a drag session at `pointer_x` (px) with the current width preference.
    ///
    /// A stale session (a release that never arrived) is discarded first.
    pub fn pointer_down(
        &mut self,
        surface: &EventSurface,
        pointer_x: i64,
        current_width: u32,
        now_ms: u64,
    ) {
        if self.session.take().is_some() {
            tracing::debug!("discarding unfinished drag session");
        }
        tracing::debug!(pointer_x, current_width, "drag started");
        self.session = Some(DragSession {
            start_pointer_x: pointer_x,
            start_width: current_width,
            start_ms: now_ms,
            last_update_ms: None,
            _pointer_move: surface.subscribe(ListenerKind::PointerMove),
            _pointer_up: surface.subscribe(ListenerKind::PointerUp),
        });
    }

    /// Handles a pointer move. Returns the width to store, or `None` when idle
    /// or when the move falls inside the rate-limit window.
    pub fn pointer_move(&mut self, pointer_x: i64, now_ms: u64) -> Option<u32> {
        let rate_limit_ms = self.timing.rate_limit_ms;
        let session = self.session.as_mut()?;
        if let Some(last) = session.last_update_ms
            && now_ms.saturating_sub(last) < rate_limit_ms
        {
            return None;
        }
        session.last_update_ms = Some(now_ms);
        Some(resize_width(
            session.start_width,
            pointer_x - session.start_pointer_x,
            &self.limits,
        ))
    }

    /// Ends the drag session. Listeners are released before anything else.
    ///
    /// `current_width` is the width stored right now; clicks toggle from it.
    pub fn pointer_up(
        &mut self,
        pointer_x: i64,
        current_width: u32,
        now_ms: u64,
    ) -> Option<DragRelease> {
        let session = self.session.take()?;
        let start_width = session.start_width;
        let delta = pointer_x - session.start_pointer_x;
        let elapsed = now_ms.saturating_sub(session.start_ms);
        drop(session);

        let release = classify_release(elapsed, delta, &self.timing);
        let width = if release.is_click {
            toggle_width(current_width, &self.limits)
        } else {
            resize_width(start_width, delta, &self.limits)
        };
        tracing::debug!(elapsed, delta, is_click = release.is_click, width, "drag released");
        Some(DragRelease { release, width })
    }

    /// Abandons the drag. Returns the width captured at pointer-down so the
    /// caller can restore it.
    pub fn cancel(&mut self) -> Option<u32> {
        let session = self.session.take()?;
        tracing::debug!(width = session.start_width, "drag cancelled");
        Some(session.start_width)
    }

    pub fn toggle(&self, width: u32) -> u32 {
        toggle_width(width, &self.limits)
    }
}
