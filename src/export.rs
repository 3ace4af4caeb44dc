use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Department, InventoryItem, ItemDetail};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("nothing to export")]
    NoRows,
}

/// Download name for a department export, e.g.
/// `pharmacy_inventory_2026-08-06.csv`.
pub fn export_filename(department: Department, today: NaiveDate) -> String {
    format!("{}_inventory_{}.csv", department, today.format("%Y-%m-%d"))
}

/// Serializes the (already filtered) rows of one department.
///
/// Seven columns per row; only the fifth differs between departments
/// (`Unit Price` vs `Unit Type`). Names are always quote-wrapped, with
/// embedded quotes doubled. Prices carry exactly two fraction digits.
/// An empty input is an error, not an empty file.
pub fn to_csv(
    items: &[&InventoryItem],
    department: Department,
    today: NaiveDate,
) -> Result<String, ExportError> {
    if items.is_empty() {
        return Err(ExportError::NoRows);
    }

    let fifth_column = match department {
        Department::Pharmacy => "Unit Price",
        Department::Lab => "Unit Type",
    };
    let mut out = format!(
        "Name,Category,Stock,Min Level,{},Expiry,Status\n",
        fifth_column
    );

    for item in items {
        let detail = match &item.detail {
            ItemDetail::Price(price) => format!("{:.2}", price),
            ItemDetail::Unit(unit) => unit.clone(),
        };
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            quote(&item.name),
            item.category,
            item.stock,
            item.min_level,
            detail,
            item.expiry,
            item.status(today),
        ));
    }

    Ok(out)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
