//! Resolved style options for an overlap layout.
//!
//! A [`StyleConfiguration`] is produced once, either programmatically through the `with_*`
//! builders or from a [`StyleAttributes`] map (the resolved attribute set a host reads from
//! its markup or config layer), and never changes afterwards.

use std::collections::HashMap;
use std::str::FromStr;

use crate::animation::TimingFunction;
use crate::error::{OverlapError, Result};
use crate::layout::{Anchor, Axis};
use crate::widgets::Color;

/// Attribute names understood by [`StyleConfiguration::from_attributes`].
pub mod keys {
    pub const SUPPORT_PADDING: &str = "support_padding";
    pub const AUTO_DISABLE_AFTER_OVERLAP: &str = "auto_disable_after_overlap";
    pub const BACKGROUND_COLOR: &str = "background_color";
    pub const CORNER_RADIUS: &str = "corner_radius";
    pub const OVERLAP_COLOR: &str = "overlap_color";
    pub const OVERLAP_EDGE: &str = "overlap_edge";
    pub const STACK_POSITION: &str = "stack_position";
    pub const OVERLAP_DURATION: &str = "overlap_duration";
    pub const TIMING: &str = "timing";
    pub const RESUME_POLICY: &str = "resume_policy";

    /// Every known key, in the order they are resolved.
    pub const ALL: [&str; 10] = [
        SUPPORT_PADDING,
        AUTO_DISABLE_AFTER_OVERLAP,
        BACKGROUND_COLOR,
        CORNER_RADIUS,
        OVERLAP_COLOR,
        OVERLAP_EDGE,
        STACK_POSITION,
        OVERLAP_DURATION,
        TIMING,
        RESUME_POLICY,
    ];
}

pub const DEFAULT_OVERLAP_DURATION_MS: u64 = 5_000;

/// Edge the overlap panel grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapEdge {
    Top,
    #[default]
    Bottom,
    Start,
    End,
}

impl OverlapEdge {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(OverlapEdge::Top),
            1 => Ok(OverlapEdge::Bottom),
            2 => Ok(OverlapEdge::Start),
            3 => Ok(OverlapEdge::End),
            other => Err(OverlapError::invalid(
                keys::OVERLAP_EDGE,
                format!("unsupported edge code {other}"),
            )),
        }
    }

    /// The axis the panel grows along
    pub fn axis(self) -> Axis {
        match self {
            OverlapEdge::Top | OverlapEdge::Bottom => Axis::Vertical,
            OverlapEdge::Start | OverlapEdge::End => Axis::Horizontal,
        }
    }

    /// Pinned to its own edge and stretched across the other axis.
    pub fn anchor(self) -> Anchor {
        match self {
            OverlapEdge::Top => Anchor::TOP | Anchor::LEFT | Anchor::RIGHT,
            OverlapEdge::Bottom => Anchor::BOTTOM | Anchor::LEFT | Anchor::RIGHT,
            OverlapEdge::Start => Anchor::LEFT | Anchor::TOP | Anchor::BOTTOM,
            OverlapEdge::End => Anchor::RIGHT | Anchor::TOP | Anchor::BOTTOM,
        }
    }
}

impl FromStr for OverlapEdge {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(OverlapEdge::Top),
            "bottom" => Ok(OverlapEdge::Bottom),
            "start" | "left" => Ok(OverlapEdge::Start),
            "end" | "right" => Ok(OverlapEdge::End),
            other => Err(OverlapError::invalid(
                keys::OVERLAP_EDGE,
                format!("unsupported edge '{other}'"),
            )),
        }
    }
}

/// Whether the panel is drawn behind or in front of the other children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackPosition {
    #[default]
    Back,
    Front,
}

impl StackPosition {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(StackPosition::Back),
            1 => Ok(StackPosition::Front),
            other => Err(OverlapError::invalid(
                keys::STACK_POSITION,
                format!("unsupported position code {other}"),
            )),
        }
    }
}

impl FromStr for StackPosition {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "back" => Ok(StackPosition::Back),
            "front" => Ok(StackPosition::Front),
            other => Err(OverlapError::invalid(
                keys::STACK_POSITION,
                format!("unsupported position '{other}'"),
            )),
        }
    }
}

/// How an interrupted run continues after its state was restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumePolicy {
    /// Continue from the saved extent with `duration - elapsed` left on the clock.
    #[default]
    RemainingTime,
    /// Use the saved elapsed time itself as the budget of the resumed run.
    /// Matches the saved-state behavior of older releases.
    Checkpoint,
}

impl FromStr for ResumePolicy {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remaining" | "remaining_time" => Ok(ResumePolicy::RemainingTime),
            "checkpoint" => Ok(ResumePolicy::Checkpoint),
            other => Err(OverlapError::invalid(
                keys::RESUME_POLICY,
                format!("unsupported resume policy '{other}'"),
            )),
        }
    }
}

/// A single resolved attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Color(Color),
    Str(String),
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Float(f64::from(value))
    }
}

impl From<Color> for AttrValue {
    fn from(value: Color) -> Self {
        AttrValue::Color(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

/// Key to value map of resolved attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleAttributes {
    values: HashMap<String, AttrValue>,
}

impl StyleAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }

    /// Read attributes from a TOML document.
    ///
    /// The options may sit at the top level or inside an `[overlap]` table. Colors are
    /// written as `"#RRGGBB"`/`"#AARRGGBB"` strings or packed integers.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut table = toml::from_str::<toml::Table>(source)?;
        if let Some(toml::Value::Table(section)) = table.remove("overlap") {
            table = section;
        }

        let mut attributes = Self::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::Boolean(b) => AttrValue::Bool(b),
                toml::Value::Integer(i) => AttrValue::Int(i),
                toml::Value::Float(f) => AttrValue::Float(f),
                toml::Value::String(s) => AttrValue::Str(s),
                other => {
                    return Err(OverlapError::invalid(
                        &key,
                        format!("unsupported value type {}", other.type_str()),
                    ))
                }
            };
            attributes.values.insert(key, value);
        }
        Ok(attributes)
    }
}

/// Immutable, fully resolved style of an overlap layout.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfiguration {
    support_padding: bool,
    auto_disable_after_overlap: bool,
    background_color: Color,
    corner_radius: f32,
    overlap_color: Color,
    overlap_edge: OverlapEdge,
    stack_position: StackPosition,
    overlap_duration_ms: u64,
    timing: TimingFunction,
    resume_policy: ResumePolicy,
}

impl Default for StyleConfiguration {
    fn default() -> Self {
        Self {
            support_padding: true,
            auto_disable_after_overlap: true,
            background_color: Color::TRANSPARENT,
            corner_radius: 0.0,
            overlap_color: Color::TRANSPARENT,
            overlap_edge: OverlapEdge::Bottom,
            stack_position: StackPosition::Back,
            overlap_duration_ms: DEFAULT_OVERLAP_DURATION_MS,
            timing: TimingFunction::Linear,
            resume_policy: ResumePolicy::RemainingTime,
        }
    }
}

impl StyleConfiguration {
    /// Resolve a style from an attribute map. Unset options keep their defaults and
    /// unknown keys are ignored.
    ///
    /// Keys are resolved in [`keys::ALL`] order, so the first invalid key in that order is
    /// the one reported.
    pub fn from_attributes(attributes: &StyleAttributes) -> Result<Self> {
        let mut unknown: Vec<&str> = attributes
            .values
            .keys()
            .map(String::as_str)
            .filter(|key| !keys::ALL.contains(key))
            .collect();
        unknown.sort_unstable();
        for key in unknown {
            log::warn!("Ignoring unknown overlap attribute '{}'", key);
        }

        let mut style = Self::default();
        for key in keys::ALL {
            if let Some(value) = attributes.get(key) {
                style.apply(key, value)?;
            }
        }
        Ok(style)
    }

    fn apply(&mut self, key: &str, value: &AttrValue) -> Result<()> {
        match key {
            keys::SUPPORT_PADDING => self.support_padding = read_bool(key, value)?,
            keys::AUTO_DISABLE_AFTER_OVERLAP => {
                self.auto_disable_after_overlap = read_bool(key, value)?
            }
            keys::BACKGROUND_COLOR => self.background_color = read_color(key, value)?,
            keys::CORNER_RADIUS => self.corner_radius = read_dimension(key, value)?,
            keys::OVERLAP_COLOR => self.overlap_color = read_color(key, value)?,
            keys::OVERLAP_EDGE => {
                self.overlap_edge = match value {
                    AttrValue::Int(code) => OverlapEdge::from_code(*code)?,
                    AttrValue::Str(name) => name.parse()?,
                    _ => return Err(type_mismatch(key, "an edge code or name")),
                }
            }
            keys::STACK_POSITION => {
                self.stack_position = match value {
                    AttrValue::Int(code) => StackPosition::from_code(*code)?,
                    AttrValue::Str(name) => name.parse()?,
                    _ => return Err(type_mismatch(key, "a position code or name")),
                }
            }
            keys::OVERLAP_DURATION => self.overlap_duration_ms = read_duration(key, value)?,
            keys::TIMING => {
                self.timing = match value {
                    AttrValue::Str(name) => name
                        .parse()
                        .map_err(|reason| OverlapError::invalid(key, reason))?,
                    _ => return Err(type_mismatch(key, "a timing function name")),
                }
            }
            keys::RESUME_POLICY => {
                self.resume_policy = match value {
                    AttrValue::Str(name) => name.parse()?,
                    _ => return Err(type_mismatch(key, "a resume policy name")),
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Shorthand for [`StyleAttributes::from_toml_str`] followed by
    /// [`StyleConfiguration::from_attributes`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Self::from_attributes(&StyleAttributes::from_toml_str(source)?)
    }

    pub fn with_support_padding(mut self, support_padding: bool) -> Self {
        self.support_padding = support_padding;
        self
    }

    pub fn with_auto_disable_after_overlap(mut self, auto_disable: bool) -> Self {
        self.auto_disable_after_overlap = auto_disable;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Negative radii are clamped to zero.
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn with_overlap_color(mut self, color: Color) -> Self {
        self.overlap_color = color;
        self
    }

    pub fn with_overlap_edge(mut self, edge: OverlapEdge) -> Self {
        self.overlap_edge = edge;
        self
    }

    pub fn with_stack_position(mut self, position: StackPosition) -> Self {
        self.stack_position = position;
        self
    }

    /// A zero duration is raised to one millisecond.
    pub fn with_overlap_duration_ms(mut self, duration_ms: u64) -> Self {
        self.overlap_duration_ms = duration_ms.max(1);
        self
    }

    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_resume_policy(mut self, policy: ResumePolicy) -> Self {
        self.resume_policy = policy;
        self
    }

    pub fn support_padding(&self) -> bool {
        self.support_padding
    }

    pub fn auto_disable_after_overlap(&self) -> bool {
        self.auto_disable_after_overlap
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn overlap_color(&self) -> Color {
        self.overlap_color
    }

    pub fn overlap_edge(&self) -> OverlapEdge {
        self.overlap_edge
    }

    pub fn stack_position(&self) -> StackPosition {
        self.stack_position
    }

    pub fn overlap_duration_ms(&self) -> u64 {
        self.overlap_duration_ms
    }

    pub fn timing(&self) -> TimingFunction {
        self.timing
    }

    pub fn resume_policy(&self) -> ResumePolicy {
        self.resume_policy
    }

    /// Axis the overlap panel animates along
    pub fn reveal_axis(&self) -> Axis {
        self.overlap_edge.axis()
    }
}

fn type_mismatch(key: &str, expected: &str) -> OverlapError {
    OverlapError::invalid(key, format!("expected {expected}"))
}

fn read_bool(key: &str, value: &AttrValue) -> Result<bool> {
    match value {
        AttrValue::Bool(b) => Ok(*b),
        _ => Err(type_mismatch(key, "a boolean")),
    }
}

fn read_color(key: &str, value: &AttrValue) -> Result<Color> {
    match value {
        AttrValue::Color(color) => Ok(*color),
        AttrValue::Int(packed) => u32::try_from(*packed)
            .map(Color::from_argb)
            .map_err(|_| OverlapError::invalid(key, format!("color {packed} out of range"))),
        AttrValue::Str(hex) => Color::parse_hex(hex)
            .ok_or_else(|| OverlapError::invalid(key, format!("malformed color '{hex}'"))),
        _ => Err(type_mismatch(key, "a color")),
    }
}

fn read_dimension(key: &str, value: &AttrValue) -> Result<f32> {
    let raw = match value {
        AttrValue::Int(i) => *i as f64,
        AttrValue::Float(f) => *f,
        _ => return Err(type_mismatch(key, "a dimension")),
    };
    if !raw.is_finite() || raw < 0.0 {
        return Err(OverlapError::invalid(key, format!("dimension {raw} must be >= 0")));
    }
    Ok(raw as f32)
}

fn read_duration(key: &str, value: &AttrValue) -> Result<u64> {
    match value {
        AttrValue::Int(ms) if *ms > 0 => Ok(*ms as u64),
        AttrValue::Int(ms) => Err(OverlapError::invalid(
            key,
            format!("duration {ms}ms must be positive"),
        )),
        _ => Err(type_mismatch(key, "a duration in milliseconds")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(result: Result<StyleConfiguration>, expected_key: &str) {
        match result {
            Err(OverlapError::InvalidConfiguration { key, .. }) => assert_eq!(key, expected_key),
            other => panic!("expected InvalidConfiguration for {expected_key}, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let style = StyleConfiguration::from_attributes(&StyleAttributes::new()).unwrap();
        assert_eq!(style, StyleConfiguration::default());
        assert!(style.support_padding());
        assert!(style.auto_disable_after_overlap());
        assert_eq!(style.background_color(), Color::TRANSPARENT);
        assert_eq!(style.overlap_color(), Color::TRANSPARENT);
        assert_eq!(style.corner_radius(), 0.0);
        assert_eq!(style.overlap_edge(), OverlapEdge::Bottom);
        assert_eq!(style.stack_position(), StackPosition::Back);
        assert_eq!(style.overlap_duration_ms(), 5000);
        assert_eq!(style.reveal_axis(), Axis::Vertical);
    }

    #[test]
    fn test_all_options() {
        let attributes = StyleAttributes::new()
            .with(keys::SUPPORT_PADDING, false)
            .with(keys::AUTO_DISABLE_AFTER_OVERLAP, false)
            .with(keys::BACKGROUND_COLOR, Color::WHITE)
            .with(keys::CORNER_RADIUS, 12)
            .with(keys::OVERLAP_COLOR, 0x8000FF00_i64)
            .with(keys::OVERLAP_EDGE, 2)
            .with(keys::STACK_POSITION, 1)
            .with(keys::OVERLAP_DURATION, 1000)
            .with(keys::TIMING, "ease_out")
            .with(keys::RESUME_POLICY, "checkpoint");
        let style = StyleConfiguration::from_attributes(&attributes).unwrap();

        assert!(!style.support_padding());
        assert!(!style.auto_disable_after_overlap());
        assert_eq!(style.background_color(), Color::WHITE);
        assert_eq!(style.corner_radius(), 12.0);
        assert_eq!(style.overlap_color(), Color::from_argb(0x8000FF00));
        assert_eq!(style.overlap_edge(), OverlapEdge::Start);
        assert_eq!(style.reveal_axis(), Axis::Horizontal);
        assert_eq!(style.stack_position(), StackPosition::Front);
        assert_eq!(style.overlap_duration_ms(), 1000);
        assert_eq!(style.timing(), TimingFunction::EaseOut);
        assert_eq!(style.resume_policy(), ResumePolicy::Checkpoint);
    }

    #[test]
    fn test_unknown_edge_code_is_rejected() {
        let attributes = StyleAttributes::new().with(keys::OVERLAP_EDGE, 99);
        assert_invalid(
            StyleConfiguration::from_attributes(&attributes),
            keys::OVERLAP_EDGE,
        );
    }

    #[test]
    fn test_unknown_stack_position_is_rejected() {
        let attributes = StyleAttributes::new().with(keys::STACK_POSITION, 2);
        assert_invalid(
            StyleConfiguration::from_attributes(&attributes),
            keys::STACK_POSITION,
        );
        let attributes = StyleAttributes::new().with(keys::STACK_POSITION, "middle");
        assert_invalid(
            StyleConfiguration::from_attributes(&attributes),
            keys::STACK_POSITION,
        );
    }

    #[test]
    fn test_wrong_types_and_ranges_are_rejected() {
        let cases = [
            StyleAttributes::new().with(keys::SUPPORT_PADDING, 1),
            StyleAttributes::new().with(keys::OVERLAP_DURATION, 0),
            StyleAttributes::new().with(keys::OVERLAP_DURATION, 1.5),
            StyleAttributes::new().with(keys::CORNER_RADIUS, -1.0),
            StyleAttributes::new().with(keys::OVERLAP_COLOR, "red"),
            StyleAttributes::new().with(keys::TIMING, "bounce"),
            StyleAttributes::new().with(keys::OVERLAP_EDGE, true),
        ];
        for attributes in &cases {
            assert!(
                StyleConfiguration::from_attributes(attributes).is_err(),
                "{attributes:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let attributes = StyleAttributes::new().with("ol_shadow", true);
        let style = StyleConfiguration::from_attributes(&attributes).unwrap();
        assert_eq!(style, StyleConfiguration::default());
    }

    #[test]
    fn test_edge_names_and_anchors() {
        assert_eq!("TOP".parse::<OverlapEdge>().unwrap(), OverlapEdge::Top);
        assert_eq!("right".parse::<OverlapEdge>().unwrap(), OverlapEdge::End);
        assert!(OverlapEdge::End.anchor().contains(Anchor::RIGHT));
        assert!(OverlapEdge::Bottom.anchor().fills(Axis::Horizontal));
        assert_eq!(OverlapEdge::from_code(2).unwrap(), OverlapEdge::Start);
        assert_eq!(OverlapEdge::from_code(3).unwrap(), OverlapEdge::End);
    }

    #[test]
    fn test_first_invalid_key_is_reported_in_key_order() {
        let attributes = StyleAttributes::new()
            .with(keys::RESUME_POLICY, 7)
            .with(keys::STACK_POSITION, 5)
            .with(keys::OVERLAP_EDGE, 99)
            .with(keys::CORNER_RADIUS, "wide");
        for _ in 0..8 {
            match StyleConfiguration::from_attributes(&attributes) {
                Err(OverlapError::InvalidConfiguration { key, .. }) => {
                    assert_eq!(key, keys::CORNER_RADIUS)
                }
                other => panic!("unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_toml() {
        let style = StyleConfiguration::from_toml_str(
            r##"
            [overlap]
            overlap_edge = "top"
            overlap_color = "#FF3366CC"
            overlap_duration = 1200
            corner_radius = 8.0
            auto_disable_after_overlap = false
            "##,
        )
        .unwrap();
        assert_eq!(style.overlap_edge(), OverlapEdge::Top);
        assert_eq!(style.overlap_color(), Color::from_argb(0xFF3366CC));
        assert_eq!(style.overlap_duration_ms(), 1200);
        assert_eq!(style.corner_radius(), 8.0);
        assert!(!style.auto_disable_after_overlap());
    }

    #[test]
    fn test_toml_errors() {
        assert!(matches!(
            StyleConfiguration::from_toml_str("overlap_edge = ["),
            Err(OverlapError::ConfigSyntax(_))
        ));
        assert_invalid(
            StyleConfiguration::from_toml_str("overlap_edge = 99"),
            keys::OVERLAP_EDGE,
        );
        assert_invalid(
            StyleConfiguration::from_toml_str("overlap_duration = [1, 2]"),
            keys::OVERLAP_DURATION,
        );
    }

    #[test]
    fn test_builders_clamp() {
        let style = StyleConfiguration::default()
            .with_corner_radius(-3.0)
            .with_overlap_duration_ms(0);
        assert_eq!(style.corner_radius(), 0.0);
        assert_eq!(style.overlap_duration_ms(), 1);
    }
}
