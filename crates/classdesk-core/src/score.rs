//! Class score ledger types and the admin score-input parser.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One row of the class leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassScore {
  /// Natural key; there is no surrogate id.
  pub class_name:  String,
  pub total_score: i64,
}

/// A parsed score adjustment, as entered by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDelta {
  pub class_name: String,
  pub score:      i64,
}

impl ScoreDelta {
  /// Parse the admin input format `<class> <points>`, e.g. `"10A 50"`.
  ///
  /// Wrong token count and a non-integer points token are distinct
  /// failures so the collaborating layer can show targeted messages.
  pub fn parse(input: &str) -> Result<Self> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [class_name, points] = parts[..] else {
      return Err(Error::ScoreTokenCount(parts.len()));
    };
    let score: i64 = points
      .parse()
      .map_err(|_| Error::ScoreNotInteger(points.to_owned()))?;
    Ok(Self { class_name: class_name.to_owned(), score })
  }
}

/// Operational health of the score store, as reported to the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHealth {
  /// Number of classes currently on the leaderboard.
  pub class_count: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_class_and_points() {
    let delta = ScoreDelta::parse("10A 50").unwrap();
    assert_eq!(delta, ScoreDelta { class_name: "10A".into(), score: 50 });
  }

  #[test]
  fn parses_negative_points() {
    let delta = ScoreDelta::parse("9B -15").unwrap();
    assert_eq!(delta.score, -15);
  }

  #[test]
  fn single_token_is_a_token_count_error() {
    assert_eq!(ScoreDelta::parse("10A").unwrap_err(), Error::ScoreTokenCount(1));
  }

  #[test]
  fn three_tokens_is_a_token_count_error() {
    assert_eq!(
      ScoreDelta::parse("10A 50 extra").unwrap_err(),
      Error::ScoreTokenCount(3)
    );
  }

  #[test]
  fn non_integer_points_is_its_own_error() {
    assert_eq!(
      ScoreDelta::parse("10A fifty").unwrap_err(),
      Error::ScoreNotInteger("fifty".into())
    );
  }
}
