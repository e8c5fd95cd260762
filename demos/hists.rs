use labelplot::{HistOptions, plot_hists};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  let score = ChunkedArray::<Float64Type>::rand_standard_normal("score".into(), 1000);
  let class = StringChunked::from_iter_values(
    "class".into(),
    (0..1000).map(|i| if i % 2 == 0 { "early" } else { "late" }),
  );
  let df = DataFrame::new(vec![score.into_series().into(), class.into_series().into()])?;

  plot_hists(&df, "score", "class", HistOptions::new((-4.0, 4.0)))?;

  Ok(())
}
