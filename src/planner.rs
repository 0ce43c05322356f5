use tracing::debug;

use crate::bar::Bar;
use crate::error::{InputField, PlanError, Result};
use crate::types::{CuttingPlan, PieceDemand, PlanEntry};

/// Most pieces a single bar may be cut into.
pub const MAX_PIECES_PER_BAR: u64 = 100_000;

/// Greedy decreasing-length planner: each bar takes the longest pieces that
/// still fit, in one sweep over the remaining pieces.
///
/// Pieces are kept as (length, count) groups and identical consecutive bars
/// are produced as one run, so the work depends on the number of distinct
/// lengths rather than on the quantities.
pub struct Planner<'a> {
    stock_length: i64,
    demands: &'a [PieceDemand],
}

/// All remaining pieces of one length.
#[derive(Debug, Clone, Copy)]
struct Group {
    length: u64,
    count: u64,
}

/// `repeat` identical bars.
struct BarRun {
    bar: Bar,
    repeat: u64,
}

impl<'a> Planner<'a> {
    pub fn new(stock_length: i64, demands: &'a [PieceDemand]) -> Self {
        Self {
            stock_length,
            demands,
        }
    }

    pub fn plan(&self) -> Result<CuttingPlan> {
        let stock_length = self.validate()?;

        let groups = self.group_demands();
        if groups.is_empty() {
            return Ok(CuttingPlan::empty(stock_length));
        }

        let runs = fill_bars(stock_length, groups)?;
        debug!(
            stock_length,
            lengths = self.demands.len(),
            runs = runs.len(),
            "cutting plan computed"
        );

        Ok(summarize(stock_length, runs))
    }

    /// Rejects bad input before any packing starts. An oversized piece would
    /// otherwise never be placed and the fill loop would not terminate.
    fn validate(&self) -> Result<u64> {
        let stock_length = validate_stock_length(self.stock_length)?;
        for (index, demand) in self.demands.iter().enumerate() {
            demand.validate(index)?;
        }

        if let Some(demand) = self
            .demands
            .iter()
            .find(|d| d.length as u64 > stock_length)
        {
            return Err(PlanError::OversizedPiece {
                length: demand.length as u64,
                stock_length,
            });
        }

        // Every bar holds at least one piece, so this bounds the stock used
        // and with it every total in the plan.
        let pieces: u128 = self.demands.iter().map(|d| d.quantity as u128).sum();
        if pieces
            .checked_mul(stock_length as u128)
            .is_none_or(|used| used > u64::MAX as u128)
        {
            return Err(PlanError::TooManyPieces {
                pieces,
                stock_length,
            });
        }

        Ok(stock_length)
    }

    /// Sums quantities per length, longest first.
    fn group_demands(&self) -> Vec<Group> {
        let mut groups: Vec<Group> = self
            .demands
            .iter()
            .map(|d| Group {
                length: d.length as u64,
                count: d.quantity as u64,
            })
            .collect();
        groups.sort_unstable_by(|a, b| b.length.cmp(&a.length));
        groups.dedup_by(|next, kept| {
            if next.length == kept.length {
                kept.count += next.count;
                true
            } else {
                false
            }
        });
        groups
    }
}

/// Checks the stock length on its own, for callers that collect pieces
/// before they plan.
pub fn validate_stock_length(stock_length: i64) -> Result<u64> {
    if stock_length <= 0 {
        return Err(PlanError::InvalidInput {
            field: InputField::StockLength,
            value: stock_length,
        });
    }
    Ok(stock_length as u64)
}

/// Plans `demand` against bars of `stock_length`.
pub fn plan(demand: &[PieceDemand], stock_length: i64) -> Result<CuttingPlan> {
    Planner::new(stock_length, demand).plan()
}

/// Fills bars from `groups`, which must be sorted longest first and hold no
/// length above `stock_length`.
fn fill_bars(stock_length: u64, mut groups: Vec<Group>) -> Result<Vec<BarRun>> {
    let mut runs = Vec::new();

    while !groups.is_empty() {
        let mut bar = Bar::new(stock_length);
        let mut taken = Vec::with_capacity(groups.len());

        for group in &groups {
            let take = group.count.min(bar.room_for(group.length));
            if bar.piece_count() as u64 + take > MAX_PIECES_PER_BAR {
                return Err(PlanError::PatternTooLong {
                    limit: MAX_PIECES_PER_BAR,
                });
            }
            bar.place(group.length, take);
            taken.push(take);
        }
        debug_assert!(!bar.is_empty());

        // The same bar comes out again until some length it uses runs short.
        let repeat = groups
            .iter()
            .zip(&taken)
            .filter(|(_, take)| **take > 0)
            .map(|(group, take)| group.count / take)
            .min()
            .unwrap_or(1);

        for (group, take) in groups.iter_mut().zip(&taken) {
            group.count -= take * repeat;
        }
        groups.retain(|g| g.count > 0);

        runs.push(BarRun { bar, repeat });
    }

    Ok(runs)
}

fn summarize(stock_length: u64, runs: Vec<BarRun>) -> CuttingPlan {
    // Bounded by the stock check in `validate`.
    let total_bars = runs.iter().map(|r| r.repeat).sum();
    let total_waste = runs.iter().map(|r| r.bar.waste() * r.repeat).sum();
    let last_bar_waste = runs.last().map_or(0, |r| r.bar.waste());
    let entries = compact(runs.into_iter().map(|r| PlanEntry {
        pattern: r.bar.into_pieces(),
        repeat_count: r.repeat,
    }));

    CuttingPlan {
        stock_length,
        entries,
        total_bars,
        last_bar_waste,
        total_waste,
    }
}

/// Merges neighbouring entries with the same pattern, keeping order. An
/// identical pattern further down the list starts a new entry.
pub fn compact<I>(runs: I) -> Vec<PlanEntry>
where
    I: IntoIterator<Item = PlanEntry>,
{
    let mut entries: Vec<PlanEntry> = Vec::new();
    for run in runs {
        match entries.last_mut() {
            Some(last) if last.pattern == run.pattern => last.repeat_count += run.repeat_count,
            _ => entries.push(run),
        }
    }
    entries
}
