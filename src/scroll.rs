//! Scroll offset and jump-to-entry arithmetic.
//!
//! The page keeps a sticky header (site header, search box and its result
//! list) over the top of the scrolled document. Jumping to an entry must
//! leave that much clearance above the entry's heading, so the offset is
//! recomputed whenever the header's measured height can change.
//!
//! Units are whatever the renderer measures in: pixels for a web page, rows
//! for a terminal. Nothing here knows which.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Height of the page's fixed site header, in pixels.
pub const PAGE_HEADER_OFFSET: u32 = 140;
/// Gap left between the sticky header and a jumped-to heading, in pixels.
pub const PAGE_CLEARANCE: u32 = 12;

/// Fixed parts of the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollOffsets {
    pub header_offset: u32,
    pub clearance: u32,
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self {
            header_offset: PAGE_HEADER_OFFSET,
            clearance: PAGE_CLEARANCE,
        }
    }
}

/// Finds where a rendered entry heading sits in document coordinates.
pub trait AnchorLocator {
    /// Top of the element rendered for `id`, or `None` if nothing with that
    /// id is currently rendered.
    fn anchor_top(&self, id: &str) -> Option<u32>;
}

/// Anchor positions recorded by a renderer while laying out blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorMap {
    tops: HashMap<String, u32>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, top: u32) {
        self.tops.insert(id.into(), top);
    }

    pub fn clear(&mut self) {
        self.tops.clear();
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }
}

impl AnchorLocator for AnchorMap {
    fn anchor_top(&self, id: &str) -> Option<u32> {
        self.tops.get(id).copied()
    }
}

/// Where to scroll the viewport, and whether to animate getting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: u32,
    pub smooth: bool,
}

/// Derived scroll offset for the sticky header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollController {
    offsets: ScrollOffsets,
    smooth: bool,
    offset: u32,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(ScrollOffsets::default(), true)
    }
}

impl ScrollController {
    pub fn new(offsets: ScrollOffsets, smooth: bool) -> Self {
        Self {
            offsets,
            smooth,
            offset: offsets.header_offset.saturating_add(offsets.clearance),
        }
    }

    /// Current offset: header + search box + clearance.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn offsets(&self) -> ScrollOffsets {
        self.offsets
    }

    /// Recompute the offset from the search box's measured height.
    ///
    /// `None` means the search box has not been measured yet and counts as 0.
    /// Returns the new offset.
    pub fn recompute(&mut self, search_box_height: Option<u32>) -> u32 {
        self.offset = self
            .offsets
            .header_offset
            .saturating_add(search_box_height.unwrap_or(0))
            .saturating_add(self.offsets.clearance);
        self.offset
    }

    /// Scroll request that brings entry `id` just below the sticky header.
    ///
    /// Returns `None` when no element is rendered for `id`; that is not an
    /// error, the target may be filtered out or not drawn yet.
    pub fn jump_target<L>(&self, locator: &L, id: &str) -> Option<ScrollRequest>
    where
        L: AnchorLocator + ?Sized,
    {
        let Some(top) = locator.anchor_top(id) else {
            tracing::debug!(id, "jump target not rendered");
            return None;
        };
        let target = top.saturating_sub(self.offset);
        tracing::debug!(id, top, offset = self.offset, target, "jump to entry");
        Some(ScrollRequest {
            target,
            smooth: self.smooth,
        })
    }
}

/// Scroll position of the document view, with optional smooth animation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    position: u32,
    target: Option<u32>,
    content_height: u32,
    height: u32,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn content_height(&self) -> u32 {
        self.content_height
    }

    /// Largest position that still fills the view.
    pub fn max_position(&self) -> u32 {
        self.content_height.saturating_sub(self.height)
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Update the content and view sizes, clamping the position.
    pub fn set_bounds(&mut self, content_height: u32, height: u32) {
        self.content_height = content_height;
        self.height = height;
        let max = self.max_position();
        self.position = self.position.min(max);
        if let Some(target) = self.target.as_mut() {
            *target = (*target).min(max);
        }
    }

    /// Start scrolling towards `request.target`.
    pub fn apply(&mut self, request: ScrollRequest) {
        let target = request.target.min(self.max_position());
        if request.smooth && target != self.position {
            self.target = Some(target);
        } else {
            self.position = target;
            self.target = None;
        }
    }

    /// Advance a running animation by one frame. Returns true if the
    /// position changed.
    ///
    /// Each frame covers a third of the remaining distance, at least one unit,
    /// so the motion eases out and always terminates.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let distance = target.abs_diff(self.position);
        let step = (distance / 3).max(1);
        if target > self.position {
            self.position += step.min(distance);
        } else {
            self.position -= step.min(distance);
        }

        if self.position == target {
            self.target = None;
        }
        true
    }

    /// Scroll by a relative amount, cancelling any animation.
    pub fn scroll_by(&mut self, delta: i32) {
        self.target = None;
        let next = i64::from(self.position) + i64::from(delta);
        let clamped = next.clamp(0, i64::from(self.max_position()));
        self.position = u32::try_from(clamped).unwrap_or(0);
    }

    pub fn scroll_to_top(&mut self) {
        self.target = None;
        self.position = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.target = None;
        self.position = self.max_position();
    }
}
