pub mod element;
pub mod overlap;
pub mod widget;

pub use element::Element;
pub use overlap::{
    OverlapCallbacks, OverlapEdge, OverlapLayout, OverlapListener, OverlapPhase,
    PersistedSnapshot, StackPosition, StyleAttributes, StyleConfiguration,
};
pub use widget::{Color, Padding, Rect};
