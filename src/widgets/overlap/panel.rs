//! The overlap panel: a plain child element that grows along the reveal axis.

use std::sync::Arc;

use crate::layout::{Anchor, Axis, Size};
use crate::widgets::element::Element;
use crate::widgets::{Padding, Rect};

use super::background::DrawableFactory;
use super::style::{OverlapEdge, StackPosition, StyleConfiguration};

/// Tag identifying the overlap panel among the container's children.
pub const OVERLAP_TAG: &str = "view_overlap";

/// Resize the panel along its reveal axis and request a redraw.
pub fn set_dynamic_extent<D>(panel: &mut Element<D>, edge: OverlapEdge, extent: u32) {
    match edge.axis() {
        Axis::Horizontal => panel.update_width(extent),
        Axis::Vertical => panel.update_height(extent),
    }
}

/// Creates the overlap panel on first measure and keeps it sized to the container.
#[derive(Debug)]
pub struct PanelManager {
    style: Arc<StyleConfiguration>,
}

impl PanelManager {
    pub fn new(style: Arc<StyleConfiguration>) -> Self {
        Self { style }
    }

    /// Create the panel if needed, otherwise track the container across the reveal axis.
    ///
    /// A new panel starts at `initial_extent` along the reveal axis. The reveal-axis extent
    /// of an existing panel belongs to the animation and is left alone.
    pub fn ensure_panel<F: DrawableFactory>(
        &self,
        children: &mut Vec<Element<F::Drawable>>,
        container_width: u32,
        container_height: u32,
        initial_extent: u32,
        factory: &F,
    ) {
        let axis = self.style.reveal_axis();
        let container = Size::new(container_width, container_height);

        if let Some(panel) = self.panel_mut(children) {
            panel.update_extent(axis.cross(), container.across(axis));
            return;
        }

        let edge = self.style.overlap_edge();
        let background =
            factory.make_rect(self.style.overlap_color(), self.style.corner_radius());
        let panel = Element::new(container.with_extent(axis, initial_extent))
            .tag(OVERLAP_TAG)
            .anchor(edge.anchor())
            .background(background);

        log::debug!(
            "Creating overlap panel {:?} at {:?} ({:?}, {:?})",
            panel.id(),
            panel.size(),
            edge,
            self.style.stack_position()
        );

        match self.style.stack_position() {
            StackPosition::Back => children.insert(0, panel),
            StackPosition::Front => children.push(panel),
        }
    }

    pub fn panel<'a, D>(&self, children: &'a [Element<D>]) -> Option<&'a Element<D>> {
        children.iter().find(|child| child.has_tag(OVERLAP_TAG))
    }

    pub fn panel_mut<'a, D>(&self, children: &'a mut [Element<D>]) -> Option<&'a mut Element<D>> {
        children.iter_mut().find(|child| child.has_tag(OVERLAP_TAG))
    }

    /// Index at which a new content child goes so the panel keeps its stacking position.
    pub fn content_insert_index<D>(&self, children: &[Element<D>]) -> usize {
        match self.style.stack_position() {
            StackPosition::Front => children
                .iter()
                .position(|child| child.has_tag(OVERLAP_TAG))
                .unwrap_or(children.len()),
            StackPosition::Back => children.len(),
        }
    }

    /// Frame of `panel` inside a container of `container`.
    ///
    /// The panel is placed inside the padded content box: it stretches across every axis it
    /// is anchored on both ends of, and otherwise sits against its anchored edge, clamped to
    /// the box.
    pub fn panel_rect<D>(&self, container: Size, padding: Padding, panel: &Element<D>) -> Rect {
        let anchor = panel.anchors();
        let content_width = (container.width as f32 - padding.horizontal()).max(0.0);
        let content_height = (container.height as f32 - padding.vertical()).max(0.0);

        let width = if anchor.fills(Axis::Horizontal) {
            content_width
        } else {
            (panel.size().width as f32).min(content_width)
        };
        let height = if anchor.fills(Axis::Vertical) {
            content_height
        } else {
            (panel.size().height as f32).min(content_height)
        };

        let x = if anchor.contains(Anchor::RIGHT) && !anchor.contains(Anchor::LEFT) {
            padding.left + content_width - width
        } else {
            padding.left
        };
        let y = if anchor.contains(Anchor::BOTTOM) && !anchor.contains(Anchor::TOP) {
            padding.top + content_height - height
        } else {
            padding.top
        };
        Rect::new(x, y, width, height)
    }
}
