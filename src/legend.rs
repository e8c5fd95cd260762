use kurbo::{Affine, Point, Rect, RoundedRect, Size, Stroke, Vec2};
use peniko::{Brush, Color};

use crate::{
  bounds::Bounds,
  render::{Align, DrawText, Render},
};

/// Maps wedge colors back to feature values, drawn over the right edge of
/// the aggregate panel.
pub(crate) struct Legend {
  items: Vec<LegendItem>,
}

struct LegendItem {
  label: String,
  color: Color,
}

impl Legend {
  pub(crate) fn new(labels: &[String], colors: &[Color]) -> Legend {
    Legend {
      items: labels
        .iter()
        .zip(colors)
        .map(|(label, &color)| LegendItem { label: label.clone(), color })
        .collect(),
    }
  }

  pub(crate) fn is_empty(&self) -> bool { self.items.is_empty() }

  pub(crate) fn draw(&self, render: &mut Render, viewport: Bounds) {
    const MARGIN: f64 = 16.0;
    const PADDING: f64 = 10.0;
    const FONT_SIZE: f64 = 16.0;
    const LINE_HEIGHT: f64 = 22.0;
    const SWATCH: f64 = 14.0;
    const MARKER_WIDTH: f64 = 26.0;

    let mut inner_width = 0.0_f64;
    let mut layouts = vec![];
    for item in &self.items {
      let text = DrawText {
        text: &item.label,
        size: FONT_SIZE as f32,
        vertical_align: Align::Center,
        ..Default::default()
      };
      let layout = render.layout_text(&text);
      inner_width = inner_width.max(f64::from(layout.width()));
      layouts.push((layout, text));
    }

    inner_width += MARKER_WIDTH;
    let inner_height = self.items.len() as f64 * LINE_HEIGHT;

    let center_y = viewport.center().y;
    let rect = Rect::new(
      viewport.x.max - inner_width - MARGIN - PADDING * 2.0,
      center_y - inner_height / 2.0 - PADDING,
      viewport.x.max - MARGIN,
      center_y + inner_height / 2.0 + PADDING,
    );
    let background = RoundedRect::from_rect(rect, 5.0);
    render.fill(
      &background,
      Affine::IDENTITY,
      &Brush::Solid(Color::from_rgba8(255, 255, 255, 200)),
    );
    render.stroke(
      &background,
      Affine::IDENTITY,
      &Brush::Solid(Color::from_rgb8(128, 128, 128)),
      &Stroke::new(2.0),
    );

    for (i, (layout, mut text)) in layouts.into_iter().enumerate() {
      let pos = Point::new(
        rect.x0 + PADDING,
        rect.y0 + PADDING + i as f64 * LINE_HEIGHT + LINE_HEIGHT / 2.0,
      );

      let swatch =
        Rect::from_origin_size(pos - Vec2::new(0.0, SWATCH / 2.0), Size::new(SWATCH, SWATCH));
      render.fill(&swatch, Affine::IDENTITY, self.items[i].color);

      text.position = pos + Vec2::new(MARKER_WIDTH, 0.0);
      render.draw_text_layout(layout, text);
    }
  }
}
