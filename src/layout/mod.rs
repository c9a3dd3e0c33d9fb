//! Geometry shared by the container and its children.

use bitflags::bitflags;

/// Largest extent a layout accepts along either axis. Saved state stores extents as `i32`.
pub const MAX_EXTENT: u32 = i32::MAX as u32;

/// Measured size of an element, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }

    /// Extent along the given axis
    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Extent across the given axis
    pub fn across(&self, axis: Axis) -> u32 {
        self.along(axis.cross())
    }

    /// Copy of this size with the extent along `axis` replaced.
    pub fn with_extent(self, axis: Axis, extent: u32) -> Self {
        match axis {
            Axis::Horizontal => Self {
                width: extent,
                ..self
            },
            Axis::Vertical => Self {
                height: extent,
                ..self
            },
        }
    }
}

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Width changes
    Horizontal,
    /// Height changes
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

bitflags! {
    /// Edges of the parent an element is pinned to.
    ///
    /// An element anchored to both edges of an axis stretches across that axis.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Anchor: u8 {
        const TOP = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}

impl Anchor {
    /// Whether the element stretches along `axis`
    pub fn fills(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.contains(Anchor::LEFT | Anchor::RIGHT),
            Axis::Vertical => self.contains(Anchor::TOP | Anchor::BOTTOM),
        }
    }
}
