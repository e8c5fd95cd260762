//! Plots the distribution of one tabular feature, split by a label column,
//! as a row of pie charts or histograms plus an aggregate panel over the
//! whole frame.

use kurbo::Point;
use parley::FontWeight;
use peniko::{Brush, Color};
use polars::prelude::*;

use crate::{
  axes::{Axes, HistogramAxes, PieAxes},
  bounds::{Bounds, Range},
  legend::Legend,
  render::{Align, DrawText, Render, RenderConfig},
};

mod axes;
mod bounds;
mod dist;
mod legend;
mod render;
mod theme;

// The cell size keeps the texture width 256-byte aligned for the PNG
// readback at 4 bytes per pixel.
const CELL: f64 = 512.0;
const TITLE_STRIP: f64 = 128.0;

const AGGREGATE_TITLE: &str = "whole dataset";

/// Shows one pie chart of the `feature` value counts per distinct label in
/// `label_column`, plus an aggregate pie over the whole frame with a legend.
/// Null feature values count as the `"-"` category. Blocks until the window
/// is closed.
pub fn plot_pies(
  df: &DataFrame,
  feature: &str,
  label_column: &str,
  options: PieOptions,
) -> PolarsResult<()> {
  Figure::pies(df, feature, label_column, options)?.show();
  Ok(())
}

/// Shows one histogram of the numeric `feature` values per distinct label in
/// `label_column`, plus an aggregate histogram. All panels share the x range
/// `options.xlim`, the bin count, and the y scale. Blocks until the window
/// is closed.
pub fn plot_hists(
  df: &DataFrame,
  feature: &str,
  label_column: &str,
  options: HistOptions,
) -> PolarsResult<()> {
  Figure::hists(df, feature, label_column, options)?.show();
  Ok(())
}

#[derive(Default)]
pub struct PieOptions {
  pub grid: Option<Grid>,
}

pub struct HistOptions {
  pub bins: usize,
  pub xlim: (f64, f64),
  pub grid: Option<Grid>,
}

impl HistOptions {
  pub fn new(xlim: (f64, f64)) -> Self { HistOptions { bins: 10, xlim, grid: None } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
  nrows: usize,
  ncols: usize,
}

impl Grid {
  pub fn new(nrows: usize, ncols: usize) -> Grid {
    Grid { nrows: nrows.max(1), ncols: ncols.max(1) }
  }

  fn single_row(panels: usize) -> Grid { Grid::new(1, panels) }

  pub fn nrows(&self) -> usize { self.nrows }
  pub fn ncols(&self) -> usize { self.ncols }

  fn cells(&self) -> usize { self.nrows * self.ncols }
}

/// A grid of chart panels under one title. Construction is pure; rendering
/// happens in [`Figure::show`] or [`Figure::save`].
pub struct Figure {
  title:  String,
  grid:   Grid,
  panels: Vec<Panel>,
  legend: Option<Legend>,
}

struct Panel {
  title: String,
  axes:  Axes,
}

impl Figure {
  /// Builds the pie-chart figure shown by [`plot_pies`].
  pub fn pies(
    df: &DataFrame,
    feature: &str,
    label_column: &str,
    options: PieOptions,
  ) -> PolarsResult<Figure> {
    let dist = dist::Distribution::from_frame(df, feature, label_column)?;
    let grid = options.grid.unwrap_or_else(|| Grid::single_row(dist.labels.len() + 1));

    let colors: Vec<Color> =
      (0..dist.values.len()).map(|i| theme::ROCKET.indexed(i, dist.values.len())).collect();

    // Label panels fill the leading cells; the aggregate always gets the
    // last cell, even when the grid is too small for every label.
    let mut panels = Vec::with_capacity(grid.cells().min(dist.labels.len() + 1));
    for (label, counts) in dist.labels.iter().zip(&dist.per_label).take(grid.cells() - 1) {
      panels.push(Panel {
        title: label.clone(),
        axes:  Axes::Pie(PieAxes::new(counts.clone(), colors.clone())),
      });
    }
    panels.push(Panel {
      title: AGGREGATE_TITLE.to_string(),
      axes:  Axes::Pie(PieAxes::new(dist.overall, colors.clone())),
    });

    let legend = Legend::new(&dist.values, &colors);
    let legend = if legend.is_empty() { None } else { Some(legend) };

    Ok(Figure { title: feature.to_string(), grid, panels, legend })
  }

  /// Builds the histogram figure shown by [`plot_hists`].
  pub fn hists(
    df: &DataFrame,
    feature: &str,
    label_column: &str,
    options: HistOptions,
  ) -> PolarsResult<Figure> {
    let groups = dist::NumericGroups::from_frame(df, feature, label_column)?;
    let grid = options.grid.unwrap_or_else(|| Grid::single_row(groups.labels.len() + 1));
    let range = Range::new(options.xlim.0, options.xlim.1);

    let mut panels = Vec::with_capacity(grid.cells().min(groups.labels.len() + 1));
    for (label, values) in groups.labels.iter().zip(&groups.per_label).take(grid.cells() - 1) {
      panels.push(Panel {
        title: label.clone(),
        axes:  Axes::Histogram(HistogramAxes::new(values, options.bins, range)),
      });
    }
    panels.push(Panel {
      title: AGGREGATE_TITLE.to_string(),
      axes:  Axes::Histogram(HistogramAxes::new(&groups.overall, options.bins, range)),
    });

    let y_max = panels
      .iter()
      .map(|p| match &p.axes {
        Axes::Histogram(axes) => axes.max_count(),
        Axes::Pie(_) => 0,
      })
      .max()
      .unwrap_or(0);
    for panel in &mut panels {
      if let Axes::Histogram(axes) = &mut panel.axes {
        axes.share_y(y_max);
      }
    }

    Ok(Figure { title: feature.to_string(), grid, panels, legend: None })
  }

  pub fn grid(&self) -> Grid { self.grid }

  pub(crate) fn title(&self) -> &str { &self.title }

  pub(crate) fn render_config(&self) -> RenderConfig {
    RenderConfig {
      width:  (self.grid.ncols as f64 * CELL) as u32,
      height: (TITLE_STRIP + self.grid.nrows as f64 * CELL) as u32,
    }
  }

  fn cell_bounds(&self, index: usize) -> Bounds {
    let row = index / self.grid.ncols;
    let col = index % self.grid.ncols;

    let x = col as f64 * CELL;
    let y = TITLE_STRIP + row as f64 * CELL;
    Bounds::new(Range::new(x, x + CELL), Range::new(y + CELL, y))
  }

  pub(crate) fn draw(&self, render: &mut Render) {
    const TEXT_COLOR: Brush = Brush::Solid(Color::from_rgb8(32, 32, 32));

    render.draw_text(DrawText {
      text: &self.title,
      size: 32.0,
      weight: FontWeight::BOLD,
      brush: TEXT_COLOR,
      position: Point { x: self.grid.ncols as f64 * CELL / 2.0, y: TITLE_STRIP / 2.0 },
      horizontal_align: Align::Center,
      vertical_align: Align::Center,
    });

    for (i, panel) in self.panels.iter().enumerate() {
      let cell_index = if i + 1 == self.panels.len() { self.grid.cells() - 1 } else { i };
      let cell = self.cell_bounds(cell_index);

      render.draw_text(DrawText {
        text: &panel.title,
        size: 20.0,
        brush: TEXT_COLOR,
        position: Point { x: cell.center().x, y: cell.y.max + 30.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });

      panel.axes.draw(render, cell.shrink(64.0));
    }

    if let Some(legend) = &self.legend {
      legend.draw(render, self.cell_bounds(self.grid.cells() - 1));
    }
  }
}

pub(crate) trait ResultExt<T> {
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(value) => Some(value),
      Err(e) => {
        log::warn!("{e}");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn frame() -> DataFrame {
    df! {
      "answer" => &["yes", "no", "yes", "maybe", "no", "yes"],
      "class"  => &["a", "b", "c", "a", "b", "c"],
    }
    .unwrap()
  }

  #[test]
  fn grid_defaults_to_one_row_of_labels_plus_one() {
    let figure = Figure::pies(&frame(), "answer", "class", PieOptions::default()).unwrap();

    assert_eq!(figure.grid(), Grid::new(1, 4));
    assert_eq!(figure.panels.len(), 4);
    assert_eq!(figure.panels.last().unwrap().title, AGGREGATE_TITLE);
  }

  #[test]
  fn explicit_grid_is_kept() {
    let options = PieOptions { grid: Some(Grid::new(2, 2)) };
    let figure = Figure::pies(&frame(), "answer", "class", options).unwrap();

    assert_eq!(figure.grid(), Grid::new(2, 2));
    assert_eq!(figure.panels.len(), 4);
  }

  #[test]
  fn small_grids_truncate_labels_but_keep_the_aggregate() {
    let options = PieOptions { grid: Some(Grid::new(1, 2)) };
    let figure = Figure::pies(&frame(), "answer", "class", options).unwrap();

    assert_eq!(figure.panels.len(), 2);
    assert_eq!(figure.panels[0].title, "a");
    assert_eq!(figure.panels.last().unwrap().title, AGGREGATE_TITLE);
  }

  #[test]
  fn pie_figure_titles_come_from_labels() {
    let figure = Figure::pies(&frame(), "answer", "class", PieOptions::default()).unwrap();

    let titles: Vec<&str> = figure.panels.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, &["a", "b", "c", AGGREGATE_TITLE]);
  }

  #[test]
  fn hist_panels_share_the_y_scale() {
    let df = df! {
      "score" => &[0.1, 0.2, 0.3, 0.15, 0.25, 0.8],
      "class" => &["a", "a", "a", "b", "b", "b"],
    }
    .unwrap();

    let figure = Figure::hists(&df, "score", "class", HistOptions::new((0.0, 1.0))).unwrap();

    let maxes: Vec<u32> = figure
      .panels
      .iter()
      .map(|p| match &p.axes {
        Axes::Histogram(axes) => axes.max_count(),
        Axes::Pie(_) => unreachable!(),
      })
      .collect();
    assert!(maxes.iter().all(|&m| m == maxes[0]));
  }

  #[test]
  fn hist_bins_default_to_ten() {
    assert_eq!(HistOptions::new((0.0, 1.0)).bins, 10);
  }

  #[test]
  fn aggregate_panel_lands_in_the_last_cell() {
    let options = PieOptions { grid: Some(Grid::new(2, 3)) };
    let figure = Figure::pies(&frame(), "answer", "class", options).unwrap();

    // Three label panels in cells 0..3, aggregate in cell 5.
    let last = figure.cell_bounds(figure.grid.cells() - 1);
    assert_eq!(last.x.min, 2.0 * CELL);
    assert_eq!(last.y.max, TITLE_STRIP + CELL);
  }

  #[test]
  fn render_config_matches_the_grid() {
    let figure = Figure::pies(&frame(), "answer", "class", PieOptions::default()).unwrap();

    let config = figure.render_config();
    assert_eq!(config.width, 4 * CELL as u32);
    assert_eq!(config.height, (TITLE_STRIP + CELL) as u32);
  }
}
