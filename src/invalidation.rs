//! Change tracking for elements owned by a container.
//!
//! Nothing here talks to a renderer. Mutations record what they invalidated and the host
//! drains the flags once per frame to decide whether to re-run layout, paint, or both.

use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// Element needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b01;
        /// Element needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

/// Unique identifier for a widget or element
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    /// Generate a new unique widget ID
    pub fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Implements the dirty flag accessors for a type with a `dirty_flags: ChangeFlags` field.
macro_rules! impl_dirty_flags {
    () => {
        pub fn mark_dirty(&mut self, flags: $crate::invalidation::ChangeFlags) {
            self.dirty_flags |= flags;
        }

        pub fn needs_layout(&self) -> bool {
            self.dirty_flags
                .contains($crate::invalidation::ChangeFlags::NEEDS_LAYOUT)
        }

        pub fn needs_paint(&self) -> bool {
            self.dirty_flags
                .contains($crate::invalidation::ChangeFlags::NEEDS_PAINT)
        }

        /// Return the accumulated flags and reset them.
        pub fn take_dirty(&mut self) -> $crate::invalidation::ChangeFlags {
            std::mem::take(&mut self.dirty_flags)
        }
    };
}
pub(crate) use impl_dirty_flags;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }

    #[test]
    fn test_flags_combine() {
        let mut flags = ChangeFlags::empty();
        flags |= ChangeFlags::NEEDS_PAINT;
        assert!(!flags.contains(ChangeFlags::NEEDS_LAYOUT));
        flags |= ChangeFlags::NEEDS_LAYOUT;
        assert_eq!(flags, ChangeFlags::all());
    }
}
