use kurbo::{Affine, Point};

#[derive(Clone, Copy)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Clone, Copy)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  pub fn width(&self) -> f64 { self.x.size() }
  pub fn height(&self) -> f64 { self.y.size() }

  pub fn center(&self) -> Point {
    Point::new((self.x.min + self.x.max) / 2.0, (self.y.min + self.y.max) / 2.0)
  }

  pub const fn shrink(self, amount: f64) -> Self {
    Bounds { x: self.x.shrink(amount), y: self.y.shrink(amount) }
  }

  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub const fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = (self.max - self.min) / f64::from(count);
    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b < 1.0 => 1.0,
      b if b < 2.0 => 2.0,
      b if b < 2.5 => 2.5,
      b if b < 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let lo = (self.min / step).floor() * step;
    let hi = (self.max / step).ceil() * step;

    let precision = (-k as i32 + 4).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, precision)
  }
}

pub struct NiceTicksIter {
  current:   f64,
  step:      f64,
  hi:        f64,
  precision: usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, precision: usize) -> Self {
    NiceTicksIter { current: lo, step, hi, precision }
  }

  pub fn precision(&self) -> usize { self.precision }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.current < self.hi + self.step * 0.5 {
      let p = 10f64.powi(self.precision as i32);
      let result = (self.current * p).round() / p;
      self.current += self.step;
      Some(result)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nice_ticks_cover_the_range() {
    let ticks: Vec<f64> = Range::new(0.0, 10.0).nice_ticks(5).collect();

    assert!(ticks.first().unwrap() <= &0.0);
    assert!(ticks.last().unwrap() >= &10.0);
    assert!(ticks.windows(2).all(|w| w[0] < w[1]));
  }

  #[test]
  fn contains_handles_inverted_ranges() {
    // Screen-space y ranges run from a larger min (bottom) to a smaller max (top).
    let inverted = Range::new(100.0, 0.0);

    assert!(inverted.contains(&50.0));
    assert!(inverted.contains(&0.0));
    assert!(inverted.contains(&100.0));
    assert!(!inverted.contains(&101.0));
  }

  #[test]
  fn transform_maps_data_corners_to_viewport_corners() {
    let data = Bounds::new(Range::new(0.0, 4.0), Range::new(0.0, 8.0));
    let viewport = Bounds::new(Range::new(100.0, 300.0), Range::new(500.0, 100.0));

    let transform = data.transform_to(viewport);

    let origin = transform * Point::new(0.0, 0.0);
    assert_eq!((origin.x, origin.y), (100.0, 500.0));

    let far = transform * Point::new(4.0, 8.0);
    assert_eq!((far.x, far.y), (300.0, 100.0));
  }

  #[test]
  fn shrink_narrows_inverted_bounds_inward() {
    let cell = Bounds::new(Range::new(0.0, 512.0), Range::new(512.0, 0.0)).shrink(64.0);

    assert_eq!((cell.x.min, cell.x.max), (64.0, 448.0));
    assert_eq!((cell.y.min, cell.y.max), (448.0, 64.0));
  }
}
