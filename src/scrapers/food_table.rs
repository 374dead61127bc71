//! Parser for the `Food/All food` wikitext table.
//!
//! Rows are separated by `|-`. Inside a row every cell sits on its own
//! line, so after splitting on `\n` the positions are fixed:
//!
//! ```text
//! |-                                  <- line 0 (rest of the delimiter line)
//! |{{plinkt|Shark}}                   <- line 1: name
//! |20                                 <- line 2: heal amount
//! |{{Members|yes}}                    <- line 3
//! |1                                  <- line 4
//! |{{GEP|Shark}}                      <- line 5: tradeable marker
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{IngestError, Result};
use crate::models::catalog::FoodCandidate;

pub const ROW_DELIMITER: &str = "|-";
/// Template used by the wiki to show an exchange price; only tradeable
/// items carry it.
pub const TRADEABLE_MARKER: &str = "GEP";
pub const SORT_VALUE_ANNOTATION: &str = "data-sort-value";

const NAME_CELL: usize = 1;
const HEAL_CELL: usize = 2;
const TRADE_CELL: usize = 5;

lazy_static! {
    static ref SORT_VALUE_REGEX: Regex =
        Regex::new(r#"data-sort-value\s*=\s*"?([^\s"|]*)"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// Data rows looked at, tradeable or not
    pub rows_scanned: usize,
    pub candidates: Vec<FoodCandidate>,
}

/// Parse every tradeable row of the table.
///
/// Non-tradeable rows are dropped. Anything else that does not look like
/// the expected layout is an error: a silently skipped row would leave a
/// hole in the catalog that nobody notices.
pub fn parse_food_table(wikitext: &str) -> Result<ParsedTable> {
    let normalized = wikitext.replace("\n\n", "\n");
    let mut candidates = Vec::new();
    let mut rows_scanned = 0;

    // Segment 0 is the table header
    for (row, segment) in normalized.split(ROW_DELIMITER).enumerate().skip(1) {
        rows_scanned += 1;
        let cells: Vec<&str> = segment.split('\n').collect();

        let trade_cell = cell(&cells, TRADE_CELL, row)?;
        if !trade_cell.contains(TRADEABLE_MARKER) {
            continue;
        }

        let name = parse_name(cell(&cells, NAME_CELL, row)?, row)?;
        let heal_amount = parse_heal_amount(cell(&cells, HEAL_CELL, row)?, row)?;

        tracing::debug!("Row {}: {} heals {}", row, name, heal_amount);
        candidates.push(FoodCandidate { name, heal_amount });
    }

    Ok(ParsedTable {
        rows_scanned,
        candidates,
    })
}

fn cell<'a>(cells: &[&'a str], index: usize, row: usize) -> Result<&'a str> {
    cells.get(index).copied().ok_or_else(|| IngestError::Parse {
        row,
        reason: format!("expected at least {} cells, found {}", index + 1, cells.len()),
    })
}

/// `|{{plinkt|Shark}}` -> `Shark`
pub fn parse_name(cell: &str, row: usize) -> Result<String> {
    let field = cell.split('|').nth(2).ok_or_else(|| IngestError::Parse {
        row,
        reason: format!("no item link in name cell '{}'", cell),
    })?;

    let name = field.replace("}}", "").trim().to_string();
    if name.is_empty() {
        return Err(IngestError::Parse {
            row,
            reason: format!("empty item name in cell '{}'", cell),
        });
    }

    Ok(name)
}

/// Two encodings are used by the wiki:
/// - `|20` or `|20<ref>...</ref>`: the amount itself;
/// - `| data-sort-value=22 |5-22`: a range, sorted by its maximum. The
///   sort value is what we keep.
pub fn parse_heal_amount(cell: &str, row: usize) -> Result<i32> {
    let token = if cell.contains(SORT_VALUE_ANNOTATION) {
        SORT_VALUE_REGEX
            .captures(cell)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or_default()
    } else {
        cell.split('<')
            .next()
            .and_then(|before_markup| before_markup.split('|').nth(1))
            .unwrap_or_default()
            .trim()
    };

    let amount = token.parse::<i32>().map_err(|_| IngestError::Parse {
        row,
        reason: format!("heal amount '{}' is not a number (cell '{}')", token, cell),
    })?;

    if amount < 0 {
        return Err(IngestError::Parse {
            row,
            reason: format!("negative heal amount {}", amount),
        });
    }

    Ok(amount)
}
