//! Child elements of a container.
//!
//! An element is the container's view of one child: its measured size, where it is pinned
//! inside the parent and the background it paints. Content children are created by the host,
//! the overlap panel is created by the container itself.

use crate::invalidation::{impl_dirty_flags, ChangeFlags, WidgetId};
use crate::layout::{Anchor, Axis, Size};

#[derive(Debug, Clone)]
pub struct Element<D> {
    id: WidgetId,
    tag: Option<&'static str>,
    size: Size,
    anchor: Anchor,
    background: Option<D>,
    dirty_flags: ChangeFlags,
}

impl<D> Element<D> {
    pub fn new(size: Size) -> Self {
        Self {
            id: WidgetId::next(),
            tag: None,
            size,
            anchor: Anchor::TOP | Anchor::LEFT,
            background: None,
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
        }
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn background(mut self, background: D) -> Self {
        self.background = Some(background);
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == Some(tag)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn anchors(&self) -> Anchor {
        self.anchor
    }

    pub fn background_drawable(&self) -> Option<&D> {
        self.background.as_ref()
    }

    /// Set the width and request layout and paint.
    pub fn update_width(&mut self, width: u32) {
        self.update_extent(Axis::Horizontal, width);
    }

    /// Set the height and request layout and paint.
    pub fn update_height(&mut self, height: u32) {
        self.update_extent(Axis::Vertical, height);
    }

    /// Set the extent along `axis`. Writing the current value does not invalidate.
    pub fn update_extent(&mut self, axis: Axis, extent: u32) {
        if self.size.along(axis) == extent {
            return;
        }
        self.size = self.size.with_extent(axis, extent);
        self.mark_dirty(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT);
    }

    impl_dirty_flags!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_is_dirty() {
        let mut element: Element<()> = Element::new(Size::new(10, 10));
        assert!(element.needs_layout());
        assert_eq!(element.take_dirty(), ChangeFlags::all());
        assert!(!element.needs_paint());
    }

    #[test]
    fn test_update_height_invalidates() {
        let mut element: Element<()> = Element::new(Size::new(10, 10));
        element.take_dirty();
        element.update_height(30);
        assert_eq!(element.size(), Size::new(10, 30));
        assert!(element.needs_layout() && element.needs_paint());
    }

    #[test]
    fn test_same_extent_is_not_an_invalidation() {
        let mut element: Element<()> = Element::new(Size::new(10, 10));
        element.take_dirty();
        element.update_width(10);
        assert!(!element.needs_layout());
    }

    #[test]
    fn test_tags() {
        let element: Element<()> = Element::new(Size::zero()).tag("badge");
        assert!(element.has_tag("badge"));
        assert!(!element.has_tag("other"));
    }
}
