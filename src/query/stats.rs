//! Statistics over the numeric fields of a card list.
//!
//! Only concrete values take part: absent fields and sentinels such as
//! `"X"` are skipped. Empty inputs produce `0` or `0.0` instead of errors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Field, FieldKind, FieldValue};
use crate::error::{CatalogError, Result};

use super::list::CardList;

/// An aggregate function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatFunction {
    Max,
    Mean,
    Median,
    Min,
    Mode,
    Stdev,
    Total,
}

impl StatFunction {
    pub const ALL: [StatFunction; 7] = [
        StatFunction::Max,
        StatFunction::Mean,
        StatFunction::Median,
        StatFunction::Min,
        StatFunction::Mode,
        StatFunction::Stdev,
        StatFunction::Total,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatFunction::Max => "max",
            StatFunction::Mean => "mean",
            StatFunction::Median => "median",
            StatFunction::Min => "min",
            StatFunction::Mode => "mode",
            StatFunction::Stdev => "stdev",
            StatFunction::Total => "total",
        }
    }
}

impl fmt::Display for StatFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatFunction {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|func| func.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownStatistic(s.to_string()))
    }
}

/// Result of an aggregate: integers for `max`, `min`, `mode` and `total`,
/// floats for the rest.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
}

impl StatValue {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            StatValue::Int(v) => v as f64,
            StatValue::Float(v) => v,
        }
    }

    #[must_use]
    pub fn as_int(self) -> Option<i64> {
        match self {
            StatValue::Int(v) => Some(v),
            StatValue::Float(_) => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{v}"),
            StatValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Decimal places past which rounding no longer changes an `f64`.
const MAX_PRECISION: u32 = 15;

/// Round to `precision` decimals, ties to even.
fn round_to(value: f64, precision: u32) -> f64 {
    if precision > MAX_PRECISION {
        return value;
    }
    let scale = 10f64.powi(precision as i32);
    (value * scale).round_ties_even() / scale
}

/// Exact sum of concrete values, failing when it leaves the `i64` range.
fn checked_total(values: &[i64]) -> Result<i64> {
    let total: i128 = values.iter().map(|v| i128::from(*v)).sum();
    i64::try_from(total)
        .map_err(|_| CatalogError::InvalidArgument(format!("total {total} does not fit in a 64-bit integer")))
}

fn checked_difference(left: i64, right: i64) -> Result<i64> {
    left.checked_sub(right)
        .ok_or_else(|| CatalogError::InvalidArgument(format!("{left} - {right} does not fit in a 64-bit integer")))
}

fn mean(values: &[i64]) -> f64 {
    let total: i128 = values.iter().map(|v| i128::from(*v)).sum();
    total as f64 / values.len() as f64
}

fn median(values: &[i64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (i128::from(sorted[mid - 1]) + i128::from(sorted[mid])) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Most frequent value; ties go to the value seen first.
fn mode(values: &[i64]) -> i64 {
    let mut counts: FxHashMap<i64, usize> = FxHashMap::default();
    for v in values {
        *counts.entry(*v).or_insert(0) += 1;
    }
    let mut best = values[0];
    for v in values {
        if counts[v] > counts[&best] {
            best = *v;
        }
    }
    best
}

/// Sample standard deviation.
fn stdev(values: &[i64]) -> f64 {
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (*v as f64 - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Apply an aggregate to concrete values.
///
/// Fails only when a `total` overflows `i64`.
pub fn aggregate(values: &[i64], function: StatFunction, precision: u32) -> Result<StatValue> {
    Ok(match function {
        StatFunction::Max => StatValue::Int(values.iter().copied().max().unwrap_or(0)),
        StatFunction::Min => StatValue::Int(values.iter().copied().min().unwrap_or(0)),
        StatFunction::Total => StatValue::Int(checked_total(values)?),
        StatFunction::Mode if values.is_empty() => StatValue::Int(0),
        StatFunction::Mode => StatValue::Int(mode(values)),
        StatFunction::Mean | StatFunction::Median if values.is_empty() => StatValue::Float(0.0),
        StatFunction::Mean => StatValue::Float(round_to(mean(values), precision)),
        StatFunction::Median => StatValue::Float(round_to(median(values), precision)),
        StatFunction::Stdev if values.len() < 2 => StatValue::Float(0.0),
        StatFunction::Stdev => StatValue::Float(round_to(stdev(values), precision)),
    })
}

impl CardList {
    /// Concrete values of a numeric field, in list order.
    pub fn numeric_values(&self, field: Field) -> Result<Vec<i64>> {
        if field.kind() != FieldKind::Numeric {
            return Err(CatalogError::Unsupported {
                operation: "aggregate",
                field: field.to_string(),
            });
        }
        Ok(self
            .iter()
            .filter_map(|card| match field.value(card) {
                FieldValue::Numeric(n) => n.concrete(),
                _ => None,
            })
            .collect())
    }

    /// One aggregate over a numeric field.
    ///
    /// ```
    /// use fab_catalog::cards::Card;
    /// use fab_catalog::query::{CardList, StatValue};
    ///
    /// let cards = CardList::from(vec![
    ///     Card::new("A", "Action").with_defense(3),
    ///     Card::new("B", "Action").with_defense(2),
    /// ]);
    /// assert_eq!(cards.statistic("defense", "mean", 2).unwrap(), StatValue::Float(2.5));
    /// ```
    pub fn statistic(
        &self,
        field: impl AsRef<str>,
        function: impl AsRef<str>,
        precision: u32,
    ) -> Result<StatValue> {
        let field = Field::parse(field.as_ref())?;
        let function: StatFunction = function.as_ref().parse()?;
        aggregate(&self.numeric_values(field)?, function, precision)
    }

    /// Every aggregate over every numeric field, plus card counts.
    ///
    /// Keys are `count`, `{function}_{field}` for each function and numeric
    /// field, `num_red`, `num_yellow`, `num_blue`, `pitch_cost_difference`
    /// and `power_defense_difference`.
    pub fn statistics(&self, precision: u32) -> Result<BTreeMap<String, StatValue>> {
        let mut stats = BTreeMap::new();
        stats.insert("count".to_string(), StatValue::Int(self.len() as i64));
        for &field in Field::NUMERIC {
            let values = self.numeric_values(field)?;
            for function in StatFunction::ALL {
                stats.insert(
                    format!("{function}_{field}"),
                    aggregate(&values, function, precision)?,
                );
            }
        }
        stats.insert("num_red".to_string(), StatValue::Int(self.num_red() as i64));
        stats.insert("num_yellow".to_string(), StatValue::Int(self.num_yellow() as i64));
        stats.insert("num_blue".to_string(), StatValue::Int(self.num_blue() as i64));
        stats.insert(
            "pitch_cost_difference".to_string(),
            StatValue::Int(self.pitch_cost_difference()?),
        );
        stats.insert(
            "power_defense_difference".to_string(),
            StatValue::Int(self.power_defense_difference()?),
        );
        Ok(stats)
    }

    /// Total pitch minus total cost.
    pub fn pitch_cost_difference(&self) -> Result<i64> {
        let pitch = checked_total(&self.numeric_values(Field::Pitch)?)?;
        let cost = checked_total(&self.numeric_values(Field::Cost)?)?;
        checked_difference(pitch, cost)
    }

    /// Total power minus total defense.
    pub fn power_defense_difference(&self) -> Result<i64> {
        let power = checked_total(&self.numeric_values(Field::Power)?)?;
        let defense = checked_total(&self.numeric_values(Field::Defense)?)?;
        checked_difference(power, defense)
    }
}
