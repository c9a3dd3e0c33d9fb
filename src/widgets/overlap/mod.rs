//! Overlap layout: a container that reveals its content behind a growing panel.
//!
//! The host drives the container from its UI thread:
//!
//! - [`OverlapLayout::on_measure`] after every measure pass creates or resizes the panel,
//! - [`OverlapLayout::on_draw`] on every draw pass starts the reveal (or pins a finished one),
//! - [`OverlapLayout::on_animation_frame`] from the animation scheduler advances a running reveal,
//! - [`OverlapLayout::on_detached`] on teardown cancels a running reveal.
//!
//! State saved with [`OverlapLayout::save_state`] and handed to
//! [`OverlapLayout::restore_state`] of the recreated container lets an interrupted reveal
//! pick up where it stopped.
//!
//! ```ignore
//! let style = StyleConfiguration::default()
//!     .with_overlap_color(Color::from_hex(0x3366CC))
//!     .with_overlap_duration_ms(1000);
//! let mut layout = OverlapLayout::new(style);
//! layout.on_measure(320, 200);
//! layout.on_draw(Instant::now());
//! ```

mod background;
mod controller;
mod enabled;
mod listener;
mod panel;
mod saved_state;
mod style;

pub use background::{DrawableFactory, RectDrawable, RectFactory};
pub use controller::{OverlapController, OverlapEvent, OverlapPhase, OverlapState};
pub use enabled::EnabledPolicy;
pub use listener::{OverlapCallback, OverlapCallbacks, OverlapListener};
pub use panel::{set_dynamic_extent, PanelManager, OVERLAP_TAG};
pub use saved_state::PersistedSnapshot;
pub use style::{
    keys, AttrValue, OverlapEdge, ResumePolicy, StackPosition, StyleAttributes,
    StyleConfiguration, DEFAULT_OVERLAP_DURATION_MS,
};

use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::invalidation::{impl_dirty_flags, ChangeFlags, WidgetId};
use crate::layout::{Size, MAX_EXTENT};

use super::element::Element;
use super::widget::{Padding, Rect};

pub struct OverlapLayout<F: DrawableFactory = RectFactory> {
    widget_id: WidgetId,
    style: Arc<StyleConfiguration>,
    factory: F,
    background: F::Drawable,
    padding: Padding,
    enabled: bool,
    size: Size,
    children: Vec<Element<F::Drawable>>,
    panels: PanelManager,
    controller: OverlapController,
    enabled_policy: EnabledPolicy,
    listener: Option<Box<dyn OverlapListener>>,
    dirty_flags: ChangeFlags,
}

impl OverlapLayout<RectFactory> {
    pub fn new(style: StyleConfiguration) -> Self {
        Self::with_factory(style, RectFactory)
    }

    /// Build a layout from resolved attributes.
    pub fn from_attributes(attributes: &StyleAttributes) -> Result<Self> {
        Ok(Self::new(StyleConfiguration::from_attributes(attributes)?))
    }
}

impl<F: DrawableFactory> OverlapLayout<F> {
    pub fn with_factory(style: StyleConfiguration, factory: F) -> Self {
        let style = Arc::new(style);
        let background = factory.make_rect(style.background_color(), style.corner_radius());
        let enabled_policy = EnabledPolicy::new(style.auto_disable_after_overlap());

        let mut enabled = true;
        enabled_policy.apply_after_creation(&mut enabled);

        let widget_id = WidgetId::next();
        log::debug!(
            "Created overlap layout {:?} (edge {:?}, {}ms)",
            widget_id,
            style.overlap_edge(),
            style.overlap_duration_ms()
        );

        Self {
            widget_id,
            panels: PanelManager::new(style.clone()),
            controller: OverlapController::new(style.clone()),
            style,
            factory,
            background,
            padding: Padding::ZERO,
            enabled,
            size: Size::zero(),
            children: Vec::new(),
            enabled_policy,
            listener: None,
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.widget_id
    }

    pub fn style(&self) -> &StyleConfiguration {
        &self.style
    }

    pub fn background(&self) -> &F::Drawable {
        &self.background
    }

    pub fn set_listener(&mut self, listener: impl OverlapListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Padding is honored only when the style supports it; otherwise it stays zero.
    pub fn set_padding(&mut self, padding: impl Into<Padding>) {
        if !self.style.support_padding() {
            log::debug!("Ignoring padding on {:?}: padding not supported", self.widget_id);
            return;
        }
        self.padding = padding.into();
        self.mark_dirty(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT);
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.mark_dirty(ChangeFlags::NEEDS_PAINT);
        }
    }

    /// Add a content child. It is stacked below a front panel and above a back panel.
    pub fn add_child(&mut self, child: Element<F::Drawable>) -> WidgetId {
        let id = child.id();
        let index = self.panels.content_insert_index(&self.children);
        self.children.insert(index, child);
        self.mark_dirty(ChangeFlags::NEEDS_LAYOUT);
        id
    }

    /// Children in paint order, panel included once it exists.
    pub fn children(&self) -> &[Element<F::Drawable>] {
        &self.children
    }

    pub fn panel(&self) -> Option<&Element<F::Drawable>> {
        self.panels.panel(&self.children)
    }

    /// Frame of the panel inside the container's padded content box, if it exists.
    pub fn panel_rect(&self) -> Option<Rect> {
        self.panel()
            .map(|panel| self.panels.panel_rect(self.size, self.padding, panel))
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn phase(&self) -> OverlapPhase {
        self.controller.phase()
    }

    pub fn overlap_state(&self) -> OverlapState {
        self.controller.state()
    }

    pub fn current_extent(&self) -> u32 {
        self.controller.state().current_extent
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// Record the measured size and create or resize the overlap panel.
    ///
    /// Sizes above [`MAX_EXTENT`] are clamped.
    pub fn on_measure(&mut self, width: u32, height: u32) {
        let (width, height) = (width.min(MAX_EXTENT), height.min(MAX_EXTENT));
        let size = Size::new(width, height);
        if size != self.size {
            self.size = size;
            self.mark_dirty(ChangeFlags::NEEDS_LAYOUT);
        }
        let initial_extent = self.controller.state().current_extent;
        self.panels
            .ensure_panel(&mut self.children, width, height, initial_extent, &self.factory);
    }

    /// Draw pass: start the reveal, or pin a finished one at full extent.
    pub fn on_draw(&mut self, now: Instant) {
        let full_extent = self.size.along(self.style.reveal_axis());
        let panel = self.panels.panel_mut(&mut self.children);
        let event = self.controller.on_draw_tick(panel, full_extent, now);
        self.dispatch(event);
    }

    /// Animation scheduler tick. Returns true while the reveal still needs frames.
    pub fn on_animation_frame(&mut self, now: Instant) -> bool {
        let panel = self.panels.panel_mut(&mut self.children);
        let event = self.controller.on_animation_frame(panel, now);
        self.dispatch(event);
        self.controller.is_animating()
    }

    /// Teardown: a running reveal is cancelled and counts as finished.
    pub fn on_detached(&mut self) {
        let event = self.controller.cancel();
        self.dispatch(event);
    }

    pub fn save_state(&self) -> PersistedSnapshot {
        self.controller.save()
    }

    /// Restore saved state. Call before the first measure and draw of a recreated container.
    pub fn restore_state(&mut self, snapshot: PersistedSnapshot) {
        self.controller.restore(snapshot);
        let edge = self.style.overlap_edge();
        let extent = self.controller.state().current_extent;
        if let Some(panel) = self.panels.panel_mut(&mut self.children) {
            log::debug!("Restoring state after the overlap panel was created");
            set_dynamic_extent(panel, edge, extent);
        }
    }

    /// Decode and restore binary saved state.
    pub fn restore_state_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let snapshot = PersistedSnapshot::decode(bytes)?;
        self.restore_state(snapshot);
        Ok(())
    }

    /// Collect and reset change flags of the container and its children.
    pub fn take_all_dirty(&mut self) -> ChangeFlags {
        let own = self.take_dirty();
        self.children
            .iter_mut()
            .fold(own, |flags, child| flags | child.take_dirty())
    }

    fn dispatch(&mut self, event: Option<OverlapEvent>) {
        let Some(event) = event else {
            return;
        };

        match event {
            OverlapEvent::Started => {
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_overlap_started();
                }
            }
            OverlapEvent::Completed => {
                self.apply_completion();
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_overlap_completed();
                }
            }
            OverlapEvent::Cancelled => {
                self.apply_completion();
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_overlap_cancelled();
                }
            }
            OverlapEvent::Settled => self.apply_completion(),
        }
    }

    fn apply_completion(&mut self) {
        if self
            .enabled_policy
            .apply_after_completion(&mut self.enabled)
        {
            self.mark_dirty(ChangeFlags::NEEDS_PAINT);
        }
    }

    impl_dirty_flags!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_construction_applies_enabled_policy() {
        let layout = OverlapLayout::new(StyleConfiguration::default());
        assert!(!layout.is_enabled());

        let layout = OverlapLayout::new(
            StyleConfiguration::default().with_auto_disable_after_overlap(false),
        );
        assert!(layout.is_enabled());
    }

    #[test]
    fn test_background_uses_style() {
        let style = StyleConfiguration::default()
            .with_background_color(crate::widgets::Color::WHITE)
            .with_corner_radius(3.0);
        let layout = OverlapLayout::new(style);
        assert_eq!(layout.background().color, crate::widgets::Color::WHITE);
        assert_eq!(layout.background().corner_radii[7], 3.0);
    }

    #[test]
    fn test_padding_support() {
        let mut layout = OverlapLayout::new(StyleConfiguration::default());
        layout.set_padding(8.0);
        assert_eq!(layout.padding(), Padding::all(8.0));

        let mut layout =
            OverlapLayout::new(StyleConfiguration::default().with_support_padding(false));
        layout.set_padding(8.0);
        assert_eq!(layout.padding(), Padding::ZERO);
    }

    #[test]
    fn test_panel_rect_sits_inside_padding() {
        let mut layout =
            OverlapLayout::new(StyleConfiguration::default().with_overlap_duration_ms(100));
        layout.set_padding(8.0);
        layout.on_measure(100, 50);
        let t0 = Instant::now();
        layout.on_draw(t0);
        layout.on_animation_frame(t0 + Duration::from_millis(100));
        assert_eq!(layout.panel_rect(), Some(Rect::new(8.0, 8.0, 84.0, 34.0)));

        let mut layout = OverlapLayout::new(
            StyleConfiguration::default()
                .with_overlap_duration_ms(100)
                .with_support_padding(false),
        );
        layout.set_padding(8.0);
        layout.on_measure(100, 50);
        layout.on_draw(t0);
        layout.on_animation_frame(t0 + Duration::from_millis(100));
        assert_eq!(layout.panel_rect(), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn test_content_children_keep_front_panel_on_top() {
        let mut layout = OverlapLayout::new(
            StyleConfiguration::default().with_stack_position(StackPosition::Front),
        );
        layout.add_child(Element::new(Size::new(10, 10)));
        layout.on_measure(100, 50);
        layout.add_child(Element::new(Size::new(10, 10)));

        let children = layout.children();
        assert_eq!(children.len(), 3);
        assert!(children[2].has_tag(OVERLAP_TAG));
    }

    #[test]
    fn test_content_children_go_above_back_panel() {
        let mut layout = OverlapLayout::new(StyleConfiguration::default());
        layout.on_measure(100, 50);
        let id = layout.add_child(Element::new(Size::new(10, 10)));

        let children = layout.children();
        assert!(children[0].has_tag(OVERLAP_TAG));
        assert_eq!(children[1].id(), id);
    }

    #[test]
    fn test_dirty_flags_follow_animation() {
        let mut layout =
            OverlapLayout::new(StyleConfiguration::default().with_overlap_duration_ms(100));
        layout.on_measure(100, 50);
        let t0 = Instant::now();
        layout.on_draw(t0);
        layout.take_all_dirty();

        assert!(layout.on_animation_frame(t0 + Duration::from_millis(50)));
        assert!(layout.take_all_dirty().contains(ChangeFlags::NEEDS_LAYOUT));
        assert!(layout.take_all_dirty().is_empty());
    }

    #[test]
    fn test_panel_rect_tracks_extent() {
        let mut layout =
            OverlapLayout::new(StyleConfiguration::default().with_overlap_duration_ms(100));
        assert_eq!(layout.panel_rect(), None);
        layout.on_measure(100, 50);
        let t0 = Instant::now();
        layout.on_draw(t0);
        layout.on_animation_frame(t0 + Duration::from_millis(40));
        assert_eq!(layout.panel_rect(), Some(Rect::new(0.0, 30.0, 100.0, 20.0)));
    }

    #[test]
    fn test_oversized_extents_survive_a_save() {
        let mut layout = OverlapLayout::new(StyleConfiguration::default());
        layout.on_measure(320, u32::MAX);
        assert_eq!(layout.size(), Size::new(320, MAX_EXTENT));

        layout.restore_state(PersistedSnapshot {
            completed: true,
            current_extent: u32::MAX,
            elapsed_ms: 0,
        });
        let saved = layout.save_state();
        assert_eq!(saved.current_extent, MAX_EXTENT);
        assert_eq!(PersistedSnapshot::decode(&saved.encode()).unwrap(), saved);
        assert_eq!(layout.panel().unwrap().size(), Size::new(320, MAX_EXTENT));
    }

    #[test]
    fn test_restore_bytes_rejects_garbage() {
        let mut layout = OverlapLayout::new(StyleConfiguration::default());
        assert!(layout.restore_state_bytes(&[9, 9]).is_err());
        assert_eq!(layout.phase(), OverlapPhase::Idle);
    }
}
