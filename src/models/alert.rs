use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::inventory::InventoryItem;
use super::settings::AlertSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Stock,
    Expiry,
    Payment,
}

impl AlertKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stock" => Some(AlertKind::Stock),
            "expiry" => Some(AlertKind::Expiry),
            "payment" => Some(AlertKind::Payment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub date: NaiveDate,
    pub priority: Priority,
}

/// Rebuilds the alert list from the current inventory and settings.
///
/// Stock alerts compare against the GLOBAL threshold, not the per-item
/// `min_level` — the per-item level drives the status badge, the global
/// one drives notifications. Expiry alerts are gated on the
/// `expiry_warning` preference.
pub fn generate_alerts(
    departments: &[&[InventoryItem]],
    settings: &AlertSettings,
    today: NaiveDate,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for items in departments {
        for item in *items {
            if item.stock == 0 {
                alerts.push(Alert {
                    id: format!("stock-{}", item.id),
                    kind: AlertKind::Stock,
                    title: item.name.clone(),
                    message: "Out of Stock! Immediate restock required.".to_string(),
                    date: today,
                    priority: Priority::High,
                });
            } else if item.stock <= settings.low_stock_threshold {
                alerts.push(Alert {
                    id: format!("stock-{}", item.id),
                    kind: AlertKind::Stock,
                    title: item.name.clone(),
                    message: format!(
                        "Stock level ({}) is below threshold ({}).",
                        item.stock, settings.low_stock_threshold
                    ),
                    date: today,
                    priority: Priority::Medium,
                });
            }

            if settings.expiry_warning {
                if item.expiry.is_past(today) {
                    alerts.push(Alert {
                        id: format!("expiry-{}", item.id),
                        kind: AlertKind::Expiry,
                        title: item.name.clone(),
                        message: format!("Expired on {}.", item.expiry),
                        date: today,
                        priority: Priority::High,
                    });
                } else if item.expiry.within_warning(today) {
                    alerts.push(Alert {
                        id: format!("expiry-{}", item.id),
                        kind: AlertKind::Expiry,
                        title: item.name.clone(),
                        message: format!("Expires on {}.", item.expiry),
                        date: today,
                        priority: Priority::Medium,
                    });
                }
            }
        }
    }

    alerts
}
