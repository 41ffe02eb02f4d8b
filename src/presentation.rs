//! Presentation helpers: atom record normalization and balance text
//!
//! Indexer records are loosely shaped; the same field can live at the top
//! level or under `value.{thing,person,organization,account}`. These helpers
//! map them to [`Atom`] with a fixed precedence and never fail.

use crate::types::{Atom, BaseUnits, TermId};
use serde_json::Value;

const VALUE_KINDS: [&str; 4] = ["thing", "person", "organization", "account"];

fn text_at<'a>(record: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut node = record;
    for key in path {
        node = node.get(key)?;
    }
    node.as_str().filter(|s| !s.is_empty())
}

fn nested_text<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    VALUE_KINDS
        .iter()
        .find_map(|kind| text_at(record, &["value", *kind, field]))
}

fn name_of(record: &Value) -> Option<&str> {
    text_at(record, &["label"])
        .or_else(|| text_at(record, &["name"]))
        .or_else(|| text_at(record, &["title"]))
        .or_else(|| nested_text(record, "name"))
}

fn description_of(record: &Value) -> Option<&str> {
    nested_text(record, "description")
        .or_else(|| text_at(record, &["description"]))
        .or_else(|| text_at(record, &["summary"]))
}

fn image_of(record: &Value) -> Option<&str> {
    text_at(record, &["image"])
        .or_else(|| nested_text(record, "image"))
        .or_else(|| text_at(record, &["imageUrl"]))
        .or_else(|| {
            record
                .get("images")
                .and_then(Value::as_array)
                .and_then(|images| images.first())
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
}

fn positions_of(record: &Value) -> Option<u64> {
    if let Some(vaults) = record
        .get("term")
        .and_then(|t| t.get("vaults"))
        .and_then(Value::as_array)
    {
        let total: u64 = vaults
            .iter()
            .filter_map(|v| {
                v.get("positions_aggregate")?
                    .get("aggregate")?
                    .get("count")?
                    .as_u64()
            })
            .sum();
        return Some(total);
    }

    record
        .get("positionsCount")
        .and_then(Value::as_u64)
        .or_else(|| {
            record
                .get("positions")
                .and_then(Value::as_array)
                .map(|p| p.len() as u64)
        })
        .or_else(|| record.get("numPositions").and_then(Value::as_u64))
}

/// Map an indexer record to an [`Atom`].
///
/// A missing record yields [`Atom::unknown`]. Absent text fields become
/// empty strings.
pub fn normalize_atom(record: Option<&Value>, id: TermId) -> Atom {
    let Some(record) = record else {
        return Atom::unknown(id);
    };

    Atom {
        id,
        name: name_of(record).unwrap_or_default().to_string(),
        description: description_of(record).unwrap_or_default().to_string(),
        image: image_of(record).unwrap_or_default().to_string(),
        positions_count: positions_of(record),
    }
}

fn group_thousands(n: BaseUnits) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a native balance as e.g. `1,234.5 TRUST`.
///
/// At most two fraction digits (rounded half up, trailing zeros dropped).
/// An unknown balance renders as `— TRUST`.
pub fn format_native_balance(balance: Option<BaseUnits>, decimals: u8, symbol: &str) -> String {
    let Some(balance) = balance else {
        return format!("— {}", symbol);
    };

    let ten = BaseUnits::from(10u8);
    let hundredths = if decimals >= 2 {
        match ten.checked_pow(BaseUnits::from(decimals - 2)) {
            Some(step) => {
                let round_up = balance % step >= step - step / BaseUnits::from(2u8);
                balance / step + BaseUnits::from(u8::from(round_up))
            }
            // 10^(decimals-2) exceeds any uint256 balance
            None => BaseUnits::ZERO,
        }
    } else {
        balance.saturating_mul(ten.pow(BaseUnits::from(2 - decimals)))
    };

    let hundred = BaseUnits::from(100u8);
    let whole = group_thousands(hundredths / hundred);
    // below 100, so the low limb is the whole value
    match (hundredths % hundred).as_limbs()[0] {
        0 => format!("{} {}", whole, symbol),
        f if f % 10 == 0 => format!("{}.{} {}", whole, f / 10, symbol),
        f => format!("{}.{:02} {}", whole, f, symbol),
    }
}
