mod histogram;
mod pie;

pub use histogram::HistogramAxes;
pub use pie::PieAxes;

use crate::{bounds::Bounds, render::Render};

pub enum Axes {
  Pie(PieAxes),
  Histogram(HistogramAxes),
}

impl Axes {
  pub(crate) fn draw(&self, render: &mut Render, viewport: Bounds) {
    match self {
      Axes::Pie(axes) => axes.draw(render, viewport),
      Axes::Histogram(axes) => axes.draw(render, viewport),
    }
  }
}
