//! Data preparation: raw rows to enriched player records.

use super::types::{PlayerRecord, PositionSet, SEPARATOR};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A player row as delivered by a loader.
///
/// `price` is kept as text so that currency-formatted values
/// (`"$1,234,000"`) and plain numbers go through the same normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerRow {
    pub name: String,
    /// `|`-separated eligibility string, e.g. `"DEF|MID"`.
    pub position: String,
    pub price: String,
    pub expected_avg: f64,
    /// Bye descriptor; `|`-separated when it spans several tokens.
    #[serde(default)]
    pub bye: Option<String>,
}

impl RawPlayerRow {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        price: impl Into<String>,
        expected_avg: f64,
        bye: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            price: price.into(),
            expected_avg,
            bye: bye.map(str::to_string),
        }
    }
}

/// A row that could not be turned into a [`PlayerRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// Position of the row in the input.
    pub row: usize,
    pub name: String,
    pub reason: String,
}

/// The fully materialized pool handed to the model builder.
#[derive(Debug, Clone, Default)]
pub struct PreparedPool {
    /// Usable players; `players[i].index == i`.
    pub players: Vec<PlayerRecord>,
    /// Rows excluded from the pool, with the reason.
    pub rejected: Vec<RejectedRow>,
}

/// Parses a price that may carry a currency symbol and thousands separators.
///
/// Returns `None` for anything that is not a finite, non-negative number
/// after trimming whitespace and an optional leading `$`. Thousands
/// separators (`,` or `_`) are accepted only between digit groups, so
/// `"1,234,000"` parses but `"1,2"` does not. Normalizing the textual form
/// of a returned value yields the same value.
///
/// # Examples
///
/// ```
/// use u_squad::squad::normalize_price;
///
/// assert_eq!(normalize_price("$1,234,000"), Some(1_234_000.0));
/// assert_eq!(normalize_price(" 650000 "), Some(650_000.0));
/// assert_eq!(normalize_price("1200000.0"), Some(1_200_000.0));
/// assert_eq!(normalize_price("1,2"), None);
/// assert_eq!(normalize_price("n/a"), None);
/// assert_eq!(normalize_price("-5"), None);
/// ```
pub fn normalize_price(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_prefix('$').unwrap_or(text).trim_start();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let whole = if whole.contains([',', '_']) {
        ungroup(whole)?
    } else {
        whole.to_string()
    };
    let cleaned = match fraction {
        Some(fraction) => format!("{whole}.{fraction}"),
        None => whole,
    };
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Joins `1,234,567`-style digit groups: a leading group of one to three
/// digits, then groups of exactly three.
fn ungroup(whole: &str) -> Option<String> {
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let mut groups = whole.split([',', '_']);
    let first = groups.next()?;
    if !(1..=3).contains(&first.len()) || !all_digits(first) {
        return None;
    }
    let mut out = String::from(first);
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        out.push_str(group);
    }
    Some(out)
}

/// Whether a bye descriptor marks an early bye.
///
/// A descriptor is early when it holds more than one token, i.e. contains
/// the separator. Missing descriptors are not early.
pub fn is_early_bye(bye: Option<&str>) -> bool {
    bye.is_some_and(|b| b.contains(SEPARATOR))
}

/// Projected average after the early-bye adjustment.
///
/// Early-bye players are shifted by price tier:
///
/// | price | shift |
/// |---|---|
/// | above 1,000,000 | −6 |
/// | 700,000 – 999,999 | −4 |
/// | 400,000 – 699,999 | 0 |
/// | anything else | +3 |
///
/// Prices between tiers (exactly 1,000,000, or fractional values such as
/// 999,999.5) fall through to the last row.
pub fn adjusted_average(expected_avg: f64, price: f64, early_bye: bool) -> f64 {
    if !early_bye {
        return expected_avg;
    }
    if price > 1_000_000.0 {
        expected_avg - 6.0
    } else if (700_000.0..=999_999.0).contains(&price) {
        expected_avg - 4.0
    } else if (400_000.0..=699_999.0).contains(&price) {
        expected_avg
    } else {
        expected_avg + 3.0
    }
}

/// Enriches one row. `index` becomes the record's pool index.
pub fn prepare_player(row: &RawPlayerRow, index: usize) -> Result<PlayerRecord, String> {
    let eligible = PositionSet::parse(&row.position)?;
    let price = normalize_price(&row.price)
        .ok_or_else(|| format!("unparseable price {:?}", row.price))?;
    if !row.expected_avg.is_finite() {
        return Err(format!("non-finite expected_avg {}", row.expected_avg));
    }
    let early_bye = is_early_bye(row.bye.as_deref());

    Ok(PlayerRecord {
        index,
        name: row.name.trim().to_string(),
        position: row.position.trim().to_string(),
        eligible,
        price,
        expected_avg: row.expected_avg,
        early_bye,
        adjusted_avg: adjusted_average(row.expected_avg, price, early_bye),
    })
}

/// Prepares a whole pool.
///
/// Rows that fail preparation are recorded in
/// [`PreparedPool::rejected`] and logged; the remaining players get dense
/// indices in input order.
pub fn prepare_pool(rows: &[RawPlayerRow]) -> PreparedPool {
    let mut pool = PreparedPool::default();

    for (row_index, row) in rows.iter().enumerate() {
        match prepare_player(row, pool.players.len()) {
            Ok(player) => pool.players.push(player),
            Err(reason) => {
                warn!(row = row_index, name = %row.name, %reason, "rejecting player row");
                pool.rejected.push(RejectedRow {
                    row: row_index,
                    name: row.name.clone(),
                    reason,
                });
            }
        }
    }

    debug!(
        players = pool.players.len(),
        rejected = pool.rejected.len(),
        early_bye = pool.players.iter().filter(|p| p.early_bye).count(),
        "pool prepared"
    );
    pool
}
