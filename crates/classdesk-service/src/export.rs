//! Column-oriented export shaping.
//!
//! The admin surface exports tables to spreadsheets. The one generic piece
//! is [`columnize`]: turn row tuples plus a column-name list into a
//! column-name → ordered-cell-list mapping. Rendering (CSV here, Excel in
//! the collaborating layer) consumes that mapping.

use std::collections::HashMap;

use classdesk_core::score::ClassScore;
use serde_json::Value;

/// Column headers used by the ranking export.
pub const RANKING_COLUMNS: [&str; 2] = ["class_name", "total_score"];

/// Pivot `rows` (tuples aligned to `columns`) into a column-oriented map.
///
/// Ragged rows contribute only the cells they have; every produced list
/// keeps row order.
pub fn columnize(columns: &[&str], rows: &[Vec<Value>]) -> HashMap<String, Vec<Value>> {
  let mut out: HashMap<String, Vec<Value>> = columns
    .iter()
    .map(|c| ((*c).to_owned(), Vec::with_capacity(rows.len())))
    .collect();

  for row in rows {
    for (column, cell) in columns.iter().zip(row) {
      if let Some(cells) = out.get_mut(*column) {
        cells.push(cell.clone());
      }
    }
  }
  out
}

/// Shape a ranking listing into export rows aligned to [`RANKING_COLUMNS`].
pub fn ranking_rows(ranking: &[ClassScore]) -> Vec<Vec<Value>> {
  ranking
    .iter()
    .map(|c| vec![Value::from(c.class_name.clone()), Value::from(c.total_score)])
    .collect()
}

/// Render rows as CSV with a header line. Cells containing the delimiter,
/// quotes, or newlines are quoted per RFC 4180.
pub fn to_csv(columns: &[&str], rows: &[Vec<Value>]) -> String {
  let mut out = String::new();

  let render = |cell: &str| -> String {
    if cell.contains([',', '"', '\n']) {
      format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
      cell.to_owned()
    }
  };

  out.push_str(&columns.iter().map(|c| render(c)).collect::<Vec<_>>().join(","));
  out.push('\n');

  for row in rows {
    let line: Vec<String> = row
      .iter()
      .map(|cell| match cell {
        Value::String(s) => render(s),
        other => render(&other.to_string()),
      })
      .collect();
    out.push_str(&line.join(","));
    out.push('\n');
  }
  out
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn columnize_pivots_rows() {
    let columns = ["name", "surname", "age"];
    let rows = vec![
      vec![json!("Elon"), json!("Musk"), json!(53)],
      vec![json!("Bill"), json!("Gates"), json!(69)],
      vec![json!("Pavel"), json!("Durov"), json!(40)],
    ];

    let values = columnize(&columns, &rows);
    assert_eq!(values["name"], vec![json!("Elon"), json!("Bill"), json!("Pavel")]);
    assert_eq!(values["surname"], vec![json!("Musk"), json!("Gates"), json!("Durov")]);
    assert_eq!(values["age"], vec![json!(53), json!(69), json!(40)]);
  }

  #[test]
  fn columnize_empty_rows_yields_empty_lists() {
    let values = columnize(&["a", "b"], &[]);
    assert_eq!(values.len(), 2);
    assert!(values["a"].is_empty());
    assert!(values["b"].is_empty());
  }

  #[test]
  fn csv_quotes_awkward_cells() {
    let rows = vec![vec![json!("10 \"A\", bis"), json!(5)]];
    let csv = to_csv(&["class_name", "total_score"], &rows);
    assert_eq!(csv, "class_name,total_score\n\"10 \"\"A\"\", bis\",5\n");
  }

  #[test]
  fn ranking_rows_align_to_columns() {
    let ranking = vec![
      ClassScore { class_name: "10A".into(), total_score: 30 },
      ClassScore { class_name: "9B".into(), total_score: 10 },
    ];
    let rows = ranking_rows(&ranking);
    assert_eq!(rows[0], vec![json!("10A"), json!(30)]);
    assert_eq!(rows[1], vec![json!("9B"), json!(10)]);
  }
}
