use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Items expiring within this many days are flagged as Expiring.
pub const EXPIRY_WARNING_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Pharmacy,
    Lab,
}

impl Department {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pharmacy" => Some(Department::Pharmacy),
            "lab" => Some(Department::Lab),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Pharmacy => "pharmacy",
            Department::Lab => "lab",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    Good,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    Expiring,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockStatus::Good => "Good",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::Expiring => "Expiring",
        };
        f.write_str(label)
    }
}

/// Pure stock-level rule, first match wins.
pub fn classify(stock: u32, min_level: u32) -> StockStatus {
    if stock == 0 {
        return StockStatus::OutOfStock;
    }
    if stock <= min_level {
        return StockStatus::LowStock;
    }
    StockStatus::Good
}

/// Expiry date, or the "N/A" sentinel for non-perishables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    On(NaiveDate),
    NonPerishable,
}

impl Expiry {
    /// True when the date falls within the warning window of `today`,
    /// past dates included. Non-perishables never expire.
    pub fn within_warning(&self, today: NaiveDate) -> bool {
        match self {
            Expiry::On(date) => (*date - today).num_days() <= EXPIRY_WARNING_DAYS,
            Expiry::NonPerishable => false,
        }
    }

    pub fn is_past(&self, today: NaiveDate) -> bool {
        match self {
            Expiry::On(date) => *date < today,
            Expiry::NonPerishable => false,
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Expiry::NonPerishable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExpiryVisitor;

        impl<'de> Visitor<'de> for ExpiryVisitor {
            type Value = Expiry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a date in YYYY-MM-DD form or \"N/A\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Expiry, E> {
                if value.is_empty() || value.eq_ignore_ascii_case("n/a") {
                    return Ok(Expiry::NonPerishable);
                }
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(Expiry::On)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_str(ExpiryVisitor)
    }
}

/// Department-specific column: pharmacy rows carry a unit price, lab rows
/// a unit of measure. Flattened into item JSON as `price` or `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemDetail {
    Price(Decimal),
    Unit(String),
}

impl ItemDetail {
    pub fn matches(&self, department: Department) -> bool {
        matches!(
            (self, department),
            (ItemDetail::Price(_), Department::Pharmacy) | (ItemDetail::Unit(_), Department::Lab)
        )
    }

    pub fn price(&self) -> Option<Decimal> {
        match self {
            ItemDetail::Price(price) => Some(*price),
            ItemDetail::Unit(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub min_level: u32,
    pub expiry: Expiry,
    #[serde(flatten)]
    pub detail: ItemDetail,
}

impl InventoryItem {
    /// Derived status. Out-of-stock always wins; a near or past expiry
    /// flags the item before the low-stock comparison is consulted.
    pub fn status(&self, today: NaiveDate) -> StockStatus {
        if self.stock == 0 {
            return StockStatus::OutOfStock;
        }
        if self.expiry.within_warning(today) {
            return StockStatus::Expiring;
        }
        classify(self.stock, self.min_level)
    }

    /// Stock on hand times unit price; zero for lab items.
    pub fn stock_value(&self) -> Decimal {
        match self.detail.price() {
            Some(price) => Decimal::from(self.stock) * price,
            None => Decimal::ZERO,
        }
    }
}
