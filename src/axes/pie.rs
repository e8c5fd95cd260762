use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Affine, CircleSegment, Vec2};
use peniko::{Brush, Color};

use crate::{
  bounds::Bounds,
  render::{Align, DrawText, Render},
};

/// A pie of value counts. Wedge order and colors come from the shared value
/// list of the figure, so the same value looks the same on every panel.
pub struct PieAxes {
  counts: Vec<u32>,
  colors: Vec<Color>,
}

impl PieAxes {
  pub(crate) fn new(counts: Vec<u32>, colors: Vec<Color>) -> Self {
    debug_assert_eq!(counts.len(), colors.len());
    PieAxes { counts, colors }
  }

  pub(crate) fn fractions(&self) -> Vec<f64> {
    let total: u32 = self.counts.iter().sum();
    if total == 0 {
      return vec![0.0; self.counts.len()];
    }
    self.counts.iter().map(|&count| f64::from(count) / f64::from(total)).collect()
  }

  pub(crate) fn draw(&self, render: &mut Render, viewport: Bounds) {
    let total: u32 = self.counts.iter().sum();
    if total == 0 {
      return;
    }

    let center = viewport.center();
    let radius = viewport.width().min(viewport.height().abs()) / 2.0 * 0.9;

    let mut angle = -FRAC_PI_2;
    for (fraction, &color) in self.fractions().iter().zip(&self.colors) {
      let sweep = fraction * TAU;

      if sweep > 0.0 {
        let wedge = CircleSegment::new(center, radius, 0.0, angle, sweep);
        render.fill(&wedge, Affine::IDENTITY, color);
      }

      let mid = angle + sweep / 2.0;
      render.draw_text(DrawText {
        text: &format!("{:.1}%", fraction * 100.0),
        size: 16.0,
        brush: Brush::Solid(Color::WHITE),
        position: center + Vec2::new(mid.cos(), mid.sin()) * (radius * 0.6),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });

      angle += sweep;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn colors(n: usize) -> Vec<Color> {
    (0..n).map(|i| crate::theme::ROCKET.indexed(i, n)).collect()
  }

  #[test]
  fn fractions_sum_to_one() {
    let pie = PieAxes::new(vec![1, 2, 3, 4], colors(4));

    let sum: f64 = pie.fractions().iter().sum();
    assert!((sum - 1.0).abs() < 1e-12);
  }

  #[test]
  fn zero_counts_yield_zero_fractions() {
    let pie = PieAxes::new(vec![0, 3, 0, 1], colors(4));

    let fractions = pie.fractions();
    assert_eq!(fractions[0], 0.0);
    assert_eq!(fractions[2], 0.0);
    assert_eq!(fractions[1], 0.75);
  }

  #[test]
  fn empty_pie_has_no_wedges() {
    let pie = PieAxes::new(vec![0, 0], colors(2));
    assert_eq!(pie.fractions(), &[0.0, 0.0]);
  }
}
