use color::{HueDirection, Oklch, OpaqueColor, Srgb};
use peniko::Color;

pub struct LinearPalette {
  start: OpaqueColor<Oklch>,
  end:   OpaqueColor<Oklch>,
}

pub const ROCKET: LinearPalette =
  LinearPalette::new(OpaqueColor::new([0.7, 0.13, 50.0]), OpaqueColor::new([0.7, 0.13, 290.0]));

impl LinearPalette {
  pub const fn new(start: OpaqueColor<Oklch>, end: OpaqueColor<Oklch>) -> Self {
    Self { start, end }
  }

  pub fn sample(&self, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    self.start.lerp(self.end, t, HueDirection::Shorter).with_alpha(1.0).convert::<Srgb>()
  }

  /// Color for category `index` out of `count` categories, spread evenly
  /// across the palette.
  pub fn indexed(&self, index: usize, count: usize) -> Color {
    if count <= 1 {
      self.sample(0.0)
    } else {
      self.sample(index as f32 / (count - 1) as f32)
    }
  }
}
