/// Stock quantities as they are written on shelves and in the store book: "10 mL", "2.5 L",
/// "500 g", "12 units". Parsing, conversion between units of the same kind, and the
/// reorder-level comparison built on them.
use log::warn;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static QUANTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*)\s*(\w+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    Volume,
    Mass,
    Count,
}

/// unit name, family, size in the base unit of the family (mL, g, units)
const UNITS: &[(&str, UnitFamily, f64)] = &[
    ("mL", UnitFamily::Volume, 1.0),
    ("L", UnitFamily::Volume, 1000.0),
    ("mg", UnitFamily::Mass, 0.001),
    ("g", UnitFamily::Mass, 1.0),
    ("kg", UnitFamily::Mass, 1000.0),
    ("units", UnitFamily::Count, 1.0),
    ("unit", UnitFamily::Count, 1.0),
];

fn unit_info(unit: &str) -> Option<(UnitFamily, f64)> {
    UNITS
        .iter()
        .find(|(name, _, _)| *name == unit)
        .map(|&(_, family, factor)| (family, factor))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// "10 mL" -> Quantity { 10.0, "mL" }; a number followed by a unit word, anything after is ignored
pub fn parse_quantity(quantity: &str) -> Option<Quantity> {
    let captures = QUANTITY_REGEX.captures(quantity.trim())?;
    let value = captures[1].parse::<f64>().ok()?;
    Some(Quantity {
        value,
        unit: captures[2].to_string(),
    })
}

pub fn unit_family(unit: &str) -> Option<UnitFamily> {
    unit_info(unit).map(|(family, _)| family)
}

/// None when a unit is unknown or the units measure different things
pub fn try_convert_units(value: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let (from_family, from_factor) = unit_info(from_unit)?;
    let (to_family, to_factor) = unit_info(to_unit)?;
    if from_family != to_family {
        return None;
    }
    Some(value * from_factor / to_factor)
}

/// Converts between units of one family. Unknown or incompatible units leave the value unchanged.
pub fn convert_units(value: f64, from_unit: &str, to_unit: &str) -> f64 {
    match try_convert_units(value, from_unit, to_unit) {
        Some(converted) => converted,
        None => {
            warn!(
                "no conversion from '{}' to '{}', value {} kept as is",
                from_unit, to_unit, value
            );
            value
        }
    }
}

/// true when the stock is at or below the reorder level. A missing, unparsable
/// or zero reorder level never asks for a reorder.
pub fn needs_reorder(stock: &str, reorder_level: &str) -> bool {
    let Some(reorder) = parse_quantity(reorder_level) else {
        return false;
    };
    if reorder.value == 0.0 {
        return false;
    }
    let stock_value = match parse_quantity(stock) {
        Some(q) => convert_units(q.value, &q.unit, &reorder.unit),
        None => 0.0,
    };
    stock_value <= reorder.value
}
