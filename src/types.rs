use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{InputField, PlanError};

/// Accepts integers as well as integral floats (`1200.0`), which some JSON
/// clients emit for every number.
pub fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntegerVisitor;

    impl Visitor<'_> for IntegerVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a float without fractional part")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(IntegerVisitor)
}

/// A requested piece length (mm) and how many pieces of it are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceDemand {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub length: i64,
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub quantity: i64,
}

impl PieceDemand {
    pub fn new(length: i64, quantity: i64) -> Self {
        Self { length, quantity }
    }

    /// `length * quantity` in mm; non-positive fields count as zero.
    pub fn total_length(&self) -> u64 {
        (self.length.max(0) as u64).saturating_mul(self.quantity.max(0) as u64)
    }

    /// Checks that both fields are positive. `index` is the entry's position
    /// in the caller's list and ends up in the error.
    pub fn validate(&self, index: usize) -> Result<(), PlanError> {
        if self.length <= 0 {
            return Err(PlanError::InvalidInput {
                field: InputField::PieceLength { index },
                value: self.length,
            });
        }
        if self.quantity <= 0 {
            return Err(PlanError::InvalidInput {
                field: InputField::Quantity { index },
                value: self.quantity,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PieceDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.length, self.quantity)
    }
}

/// The pieces a caller has collected so far. Owned by the caller and handed
/// to the planner on each run; the planner never keeps a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemandList {
    items: Vec<PieceDemand>,
}

impl DemandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, rejecting non-positive lengths and quantities.
    pub fn add(&mut self, demand: PieceDemand) -> Result<(), PlanError> {
        demand.validate(self.items.len())?;
        self.items.push(demand);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<PieceDemand> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PieceDemand> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[PieceDemand] {
        &self.items
    }

    /// Sum of `length * quantity` over all entries, in mm.
    pub fn total_length(&self) -> u64 {
        self.items
            .iter()
            .map(PieceDemand::total_length)
            .fold(0, u64::saturating_add)
    }
}

/// Ordered piece lengths cut from one stock bar.
pub type Pattern = Vec<u64>;

/// A run of adjacent bars that are all cut with the same pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub pattern: Pattern,
    pub repeat_count: u64,
}

impl PlanEntry {
    pub fn used_length(&self) -> u64 {
        self.pattern.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuttingPlan {
    pub stock_length: u64,
    pub entries: Vec<PlanEntry>,
    pub total_bars: u64,
    /// Leftover on the final bar only.
    pub last_bar_waste: u64,
    /// Leftover summed over every bar.
    pub total_waste: u64,
}

impl CuttingPlan {
    pub fn empty(stock_length: u64) -> Self {
        Self {
            stock_length,
            entries: Vec::new(),
            total_bars: 0,
            last_bar_waste: 0,
            total_waste: 0,
        }
    }

    /// Expands the entries back into one pattern per bar, in production order.
    pub fn bars(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.entries
            .iter()
            .flat_map(|e| {
                let count = usize::try_from(e.repeat_count).unwrap_or(usize::MAX);
                std::iter::repeat_n(e.pattern.as_slice(), count)
            })
    }

    pub fn cut_length(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.used_length().saturating_mul(e.repeat_count))
            .fold(0, u64::saturating_add)
    }

    pub fn stock_used(&self) -> u64 {
        self.stock_length.saturating_mul(self.total_bars)
    }

    pub fn waste_percent(&self) -> f64 {
        let stock_used = self.stock_used();
        if stock_used == 0 {
            return 0.0;
        }
        self.total_waste as f64 / stock_used as f64 * 100.0
    }
}

/// Which leftover figure a report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteFigure {
    /// Leftover of the last bar.
    Last,
    /// Leftover summed over all bars.
    Total,
    #[default]
    Both,
}
