use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;

use crate::ResultExt;

/// Category that null cells are folded into before counting.
pub(crate) const NULL_PLACEHOLDER: &str = "-";

/// Value-count distribution of one feature column, split by a label column.
///
/// `values` is the sorted set of distinct feature values across the whole
/// frame, so every per-label count vector lines up with it and panels share
/// wedge order and colors.
pub(crate) struct Distribution {
  pub values:    Vec<String>,
  pub labels:    Vec<String>,
  pub per_label: Vec<Vec<u32>>,
  pub overall:   Vec<u32>,
}

impl Distribution {
  pub(crate) fn from_frame(
    df: &DataFrame,
    feature: &str,
    label_column: &str,
  ) -> PolarsResult<Distribution> {
    let feature = df.column(feature)?.as_materialized_series();
    let labels = df.column(label_column)?.as_materialized_series();

    let mut values = BTreeSet::new();
    let mut by_label: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();

    for (label, value) in labels.iter().zip(feature.iter()) {
      let value = category(&value);
      values.insert(value.clone());
      *by_label.entry(category(&label)).or_default().entry(value).or_default() += 1;
    }

    let values: Vec<String> = values.into_iter().collect();
    let mut overall = vec![0; values.len()];
    let mut labels = Vec::with_capacity(by_label.len());
    let mut per_label = Vec::with_capacity(by_label.len());

    for (label, counts) in by_label {
      let counts: Vec<u32> =
        values.iter().map(|v| counts.get(v).copied().unwrap_or(0)).collect();
      for (total, count) in overall.iter_mut().zip(&counts) {
        *total += count;
      }
      labels.push(label);
      per_label.push(counts);
    }

    Ok(Distribution { values, labels, per_label, overall })
  }
}

/// Numeric feature values split by a label column, for histogram panels.
pub(crate) struct NumericGroups {
  pub labels:    Vec<String>,
  pub per_label: Vec<Vec<f64>>,
  pub overall:   Vec<f64>,
}

impl NumericGroups {
  pub(crate) fn from_frame(
    df: &DataFrame,
    feature: &str,
    label_column: &str,
  ) -> PolarsResult<NumericGroups> {
    let feature = df.column(feature)?.as_materialized_series();
    let labels = df.column(label_column)?.as_materialized_series();

    let mut by_label: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut overall = vec![];

    for (label, value) in labels.iter().zip(feature.iter()) {
      let bucket = by_label.entry(category(&label)).or_default();
      if matches!(value, AnyValue::Null) {
        continue;
      }
      let Some(value) = value.try_extract::<f64>().log_err() else { continue };

      bucket.push(value);
      overall.push(value);
    }

    let (labels, per_label) = by_label.into_iter().unzip();
    Ok(NumericGroups { labels, per_label, overall })
  }
}

fn category(value: &AnyValue) -> String {
  match value {
    AnyValue::Null => NULL_PLACEHOLDER.to_string(),
    AnyValue::String(s) => (*s).to_string(),
    AnyValue::StringOwned(s) => s.to_string(),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn frame() -> DataFrame {
    df! {
      "answer" => &[Some("yes"), Some("no"), None, Some("yes"), Some("maybe"), Some("no")],
      "class"  => &["a", "b", "a", "b", "a", "a"],
    }
    .unwrap()
  }

  #[test]
  fn counts_sum_to_row_counts() {
    let df = frame();
    let dist = Distribution::from_frame(&df, "answer", "class").unwrap();

    let overall: u32 = dist.overall.iter().sum();
    assert_eq!(overall as usize, df.height());

    for (label, counts) in dist.labels.iter().zip(&dist.per_label) {
      let expected = match label.as_str() {
        "a" => 4,
        "b" => 2,
        other => panic!("unexpected label {other}"),
      };
      assert_eq!(counts.iter().sum::<u32>(), expected);
    }
  }

  #[test]
  fn nulls_become_the_placeholder_category() {
    let dist = Distribution::from_frame(&frame(), "answer", "class").unwrap();

    assert_eq!(dist.values, &["-", "maybe", "no", "yes"]);

    let dash = dist.values.iter().position(|v| v == NULL_PLACEHOLDER).unwrap();
    assert_eq!(dist.overall[dash], 1);
  }

  #[test]
  fn per_label_counts_align_with_the_shared_value_list() {
    let dist = Distribution::from_frame(&frame(), "answer", "class").unwrap();

    assert_eq!(dist.labels, &["a", "b"]);

    let yes = dist.values.iter().position(|v| v == "yes").unwrap();
    assert_eq!(dist.per_label[0][yes], 1);
    assert_eq!(dist.per_label[1][yes], 1);

    // "maybe" never occurs under "b" but still has a slot there.
    let maybe = dist.values.iter().position(|v| v == "maybe").unwrap();
    assert_eq!(dist.per_label[1][maybe], 0);
  }

  #[test]
  fn missing_columns_error() {
    assert!(Distribution::from_frame(&frame(), "nope", "class").is_err());
    assert!(Distribution::from_frame(&frame(), "answer", "nope").is_err());
  }

  #[test]
  fn numeric_groups_skip_nulls_and_keep_empty_buckets() {
    let df = df! {
      "score" => &[Some(1.0), Some(2.0), None, Some(3.0)],
      "class" => &["a", "a", "b", "b"],
    }
    .unwrap();

    let groups = NumericGroups::from_frame(&df, "score", "class").unwrap();

    assert_eq!(groups.labels, &["a", "b"]);
    assert_eq!(groups.per_label[0], &[1.0, 2.0]);
    assert_eq!(groups.per_label[1], &[3.0]);
    assert_eq!(groups.overall, &[1.0, 2.0, 3.0]);

    let nulls_only = df! {
      "score" => &[None::<f64>, None],
      "class" => &["c", "c"],
    }
    .unwrap();
    let groups = NumericGroups::from_frame(&nulls_only, "score", "class").unwrap();

    assert_eq!(groups.labels, &["c"]);
    assert!(groups.per_label[0].is_empty());
    assert!(groups.overall.is_empty());
  }

  #[test]
  fn numeric_feature_values_are_sorted_as_categories() {
    let df = df! {
      "rating" => &[2i64, 1, 2, 3],
      "class"  => &["a", "a", "b", "b"],
    }
    .unwrap();

    let dist = Distribution::from_frame(&df, "rating", "class").unwrap();
    assert_eq!(dist.values, &["1", "2", "3"]);
    assert_eq!(dist.overall, &[1, 2, 1]);
  }
}
