//! A container widget that reveals its content behind an animated overlap panel.
//!
//! The crate is headless: it owns the state machine, the child geometry and the saved state,
//! while the host toolkit supplies measure/draw/animation callbacks and paints the
//! drawables it gets back. See [`widgets::overlap`] for the driving contract.

pub mod animation;
pub mod error;
pub mod invalidation;
pub mod layout;
pub mod widgets;

pub use error::{OverlapError, Result};

pub mod prelude {
    pub use crate::animation::TimingFunction;
    pub use crate::error::{OverlapError, Result};
    pub use crate::invalidation::{ChangeFlags, WidgetId};
    pub use crate::layout::{Anchor, Axis, Size, MAX_EXTENT};
    pub use crate::widgets::overlap::{
        keys, DrawableFactory, OverlapCallbacks, OverlapEdge, OverlapLayout, OverlapListener,
        OverlapPhase, OverlapState, PersistedSnapshot, RectDrawable, RectFactory, ResumePolicy,
        StackPosition, StyleAttributes, StyleConfiguration,
    };
    pub use crate::widgets::{Color, Element, Padding, Rect};
}
