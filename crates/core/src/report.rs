//! Report aggregates over a fetched gift collection.
//!
//! Pure functions, no I/O. The client computes these over whatever
//! `GET /gifts` returned; the server never stores them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::gift::GiftRecord;

/// Inclusive upper bound of the budget band.
pub const BUDGET_CEILING: f64 = 500.0;
/// Inclusive upper bound of the medium band.
pub const MEDIUM_CEILING: f64 = 1500.0;

/// Price band a gift falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBand {
    Budget,
    Medium,
    Premium,
}

impl PriceBand {
    pub const ALL: [PriceBand; 3] = [Self::Budget, Self::Medium, Self::Premium];

    pub fn for_price(price: f64) -> Self {
        if price <= BUDGET_CEILING {
            Self::Budget
        } else if price <= MEDIUM_CEILING {
            Self::Medium
        } else {
            Self::Premium
        }
    }

    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Medium => "medium",
            Self::Premium => "premium",
        }
    }
}

/// Count and value of the gifts in one price band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSummary {
    pub band: PriceBand,
    pub count: usize,
    /// Share of the whole collection, 0–100.
    pub share_percent: f64,
    pub total_value: f64,
}

/// Number of gifts created in one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

/// Everything the reporting view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiftReport {
    pub total_count: usize,
    pub total_value: f64,
    pub average_price: f64,
    pub price_bands: Vec<BandSummary>,
    pub by_month: Vec<MonthCount>,
    pub most_expensive: Option<GiftRecord>,
    pub cheapest: Option<GiftRecord>,
    pub latest: Option<GiftRecord>,
}

pub fn total_value(gifts: &[GiftRecord]) -> f64 {
    gifts.iter().map(|g| g.base_price).sum()
}

/// Mean base price, `0.0` for an empty collection.
pub fn average_price(gifts: &[GiftRecord]) -> f64 {
    if gifts.is_empty() {
        return 0.0;
    }
    total_value(gifts) / gifts.len() as f64
}

/// One summary per band, in band order, including empty bands.
pub fn price_bands(gifts: &[GiftRecord]) -> Vec<BandSummary> {
    PriceBand::ALL
        .iter()
        .map(|&band| {
            let members: Vec<&GiftRecord> = gifts
                .iter()
                .filter(|g| PriceBand::for_price(g.base_price) == band)
                .collect();
            let share_percent = if gifts.is_empty() {
                0.0
            } else {
                members.len() as f64 / gifts.len() as f64 * 100.0
            };
            BandSummary {
                band,
                count: members.len(),
                share_percent,
                total_value: members.iter().map(|g| g.base_price).sum(),
            }
        })
        .collect()
}

/// Gift counts per creation month, oldest month first.
pub fn by_month(gifts: &[GiftRecord]) -> Vec<MonthCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for gift in gifts {
        *counts
            .entry(gift.created_at.format("%Y-%m").to_string())
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Highest-priced gift; the first one wins on ties.
pub fn most_expensive(gifts: &[GiftRecord]) -> Option<&GiftRecord> {
    gifts.iter().reduce(|best, g| {
        if g.base_price > best.base_price {
            g
        } else {
            best
        }
    })
}

/// Lowest-priced gift; the first one wins on ties.
pub fn cheapest(gifts: &[GiftRecord]) -> Option<&GiftRecord> {
    gifts.iter().reduce(|best, g| {
        if g.base_price < best.base_price {
            g
        } else {
            best
        }
    })
}

/// Most recently created gift.
pub fn latest(gifts: &[GiftRecord]) -> Option<&GiftRecord> {
    gifts.iter().reduce(|best, g| {
        if g.created_at > best.created_at {
            g
        } else {
            best
        }
    })
}

pub fn build_report(gifts: &[GiftRecord]) -> GiftReport {
    GiftReport {
        total_count: gifts.len(),
        total_value: total_value(gifts),
        average_price: average_price(gifts),
        price_bands: price_bands(gifts),
        by_month: by_month(gifts),
        most_expensive: most_expensive(gifts).cloned(),
        cheapest: cheapest(gifts).cloned(),
        latest: latest(gifts).cloned(),
    }
}
