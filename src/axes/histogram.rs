use kurbo::{Affine, BezPath, Line, Point, Stroke};
use peniko::{Brush, Color};

use crate::{
  bounds::{Bounds, Range},
  render::{Align, DrawText, Render},
  theme,
};

/// A histogram over a fixed x range, so every panel of a figure bins the
/// same way and stays comparable.
pub struct HistogramAxes {
  range:  Range,
  counts: Vec<u32>,
  y_max:  u32,
}

impl HistogramAxes {
  /// Bins `values` into `bins` equal-width bins spanning `range`. Values
  /// outside the range are dropped; a value exactly on the upper edge lands
  /// in the last bin.
  pub(crate) fn new(values: &[f64], bins: usize, range: Range) -> Self {
    let mut counts = vec![0; bins];

    for &value in values {
      if !range.contains(&value) {
        continue;
      }

      let mut index = ((value - range.min) / range.size() * bins as f64) as usize;
      if index == bins {
        index -= 1;
      }
      counts[index] += 1;
    }

    let y_max = counts.iter().copied().max().unwrap_or(0);
    HistogramAxes { range, counts, y_max }
  }

  pub(crate) fn max_count(&self) -> u32 { self.y_max }

  /// Imposes a common y maximum so panels share the y scale.
  pub(crate) fn share_y(&mut self, y_max: u32) { self.y_max = y_max; }

  fn data_bounds(&self) -> Bounds {
    Bounds::new(self.range, Range::new(0.0, f64::from(self.y_max.max(1)) * 1.05))
  }

  pub(crate) fn draw(&self, render: &mut Render, viewport: Bounds) {
    const TEXT_COLOR: Brush = Brush::Solid(Color::from_rgb8(32, 32, 32));
    const LINE_COLOR: Brush = Brush::Solid(Color::from_rgb8(128, 128, 128));

    let border_stroke = Stroke::new(2.0);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      Affine::IDENTITY,
      &LINE_COLOR,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      Affine::IDENTITY,
      &LINE_COLOR,
      &border_stroke,
    );

    let data_bounds = self.data_bounds();
    let transform = data_bounds.transform_to(viewport);

    let ticks = 5;
    let iter = data_bounds.y.nice_ticks(ticks);
    let precision = iter.precision();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(data_bounds.x.min, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 8.0, vy)),
        Affine::IDENTITY,
        &LINE_COLOR,
        &border_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{:.*}", precision.saturating_sub(3), y),
        size: 12.0,
        position: Point { x: viewport.x.min - 12.0, y: vy },
        brush: TEXT_COLOR,
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let iter = data_bounds.x.nice_ticks(ticks);
    let precision = iter.precision();
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 8.0)),
        Affine::IDENTITY,
        &LINE_COLOR,
        &border_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{:.*}", precision.saturating_sub(3), x),
        size: 12.0,
        position: Point { x: vx, y: viewport.y.min + 12.0 },
        brush: TEXT_COLOR,
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    let mut bars = BezPath::new();
    let bin_width = self.range.size() / self.counts.len() as f64;
    for (i, &count) in self.counts.iter().enumerate() {
      if count == 0 {
        continue;
      }

      let x = self.range.min + i as f64 * bin_width;
      bars.move_to(Point::new(x, 0.0));
      bars.line_to(Point::new(x, f64::from(count)));
      bars.line_to(Point::new(x + bin_width, f64::from(count)));
      bars.line_to(Point::new(x + bin_width, 0.0));
      bars.close_path();
    }

    render.fill(&bars, transform, theme::ROCKET.sample(0.0));
    render.stroke(&(transform * bars), Affine::IDENTITY, Color::BLACK, &Stroke::new(1.0));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bin_counts_sum_to_in_range_values() {
    let values = [0.05, 0.1, 0.3, 0.55, 0.9, 0.99];
    let axes = HistogramAxes::new(&values, 4, Range::new(0.0, 1.0));

    assert_eq!(axes.counts.iter().sum::<u32>(), values.len() as u32);
    assert_eq!(axes.counts, &[3, 0, 1, 2]);
  }

  #[test]
  fn upper_edge_lands_in_the_last_bin() {
    let axes = HistogramAxes::new(&[1.0], 4, Range::new(0.0, 1.0));
    assert_eq!(axes.counts, &[0, 0, 0, 1]);
  }

  #[test]
  fn out_of_range_values_are_dropped() {
    let axes = HistogramAxes::new(&[-0.1, 0.5, 1.5], 2, Range::new(0.0, 1.0));
    assert_eq!(axes.counts.iter().sum::<u32>(), 1);
  }

  #[test]
  fn shared_y_overrides_the_local_maximum() {
    let mut axes = HistogramAxes::new(&[0.1, 0.2], 1, Range::new(0.0, 1.0));
    assert_eq!(axes.max_count(), 2);

    axes.share_y(7);
    assert_eq!(axes.data_bounds().y.max, 7.0 * 1.05);
  }
}
