//! Background drawables for the container and its overlap panel.

use crate::widgets::Color;

/// Produces the rectangular backgrounds painted behind the container and the panel.
///
/// Hosts with their own paint primitives implement this to hand back native drawables.
pub trait DrawableFactory {
    type Drawable;

    fn make_rect(&self, color: Color, corner_radius: f32) -> Self::Drawable;
}

/// A filled rectangle with per-corner radii, stored as x/y pairs clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDrawable {
    pub color: Color,
    pub corner_radii: [f32; 8],
}

/// Default factory producing [`RectDrawable`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectFactory;

impl DrawableFactory for RectFactory {
    type Drawable = RectDrawable;

    fn make_rect(&self, color: Color, corner_radius: f32) -> RectDrawable {
        RectDrawable {
            color,
            corner_radii: [corner_radius.max(0.0); 8],
        }
    }
}
