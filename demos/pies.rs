use labelplot::{PieOptions, plot_pies};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  let df = df! {
    "answer" => &[
      Some("yes"), Some("no"), Some("yes"), Some("maybe"), None, Some("yes"),
      Some("no"), Some("yes"), Some("maybe"), Some("no"), Some("yes"), Some("no"),
    ],
    "class" => &["a", "a", "a", "a", "a", "a", "b", "b", "b", "b", "b", "b"],
  }?;

  plot_pies(&df, "answer", "class", PieOptions::default())?;

  Ok(())
}
