/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Copy + PartialEq + 'static {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

/// Pixel extents are rounded to the nearest whole pixel.
impl Animatable for u32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let from = f64::from(*from);
        let to = f64::from(*to);
        let value = from + (to - from) * f64::from(t);
        value.round().clamp(0.0, f64::from(u32::MAX)) as u32
    }
}
