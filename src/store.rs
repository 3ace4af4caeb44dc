use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::models::{
    generate_alerts, Alert, AlertSettings, Department, Expiry, InventoryItem, ItemDetail,
};

/// All mutable state of the service. One instance lives behind the
/// router and is handed to every handler through axum state.
#[derive(Debug)]
pub struct HospitalData {
    pub pharmacy: Vec<InventoryItem>,
    pub lab: Vec<InventoryItem>,
    pub settings: AlertSettings,
    pub alerts: Vec<Alert>,
    pub global_search: String,
}

pub type Store = Arc<RwLock<HospitalData>>;

impl HospitalData {
    pub fn department(&self, department: Department) -> &Vec<InventoryItem> {
        match department {
            Department::Pharmacy => &self.pharmacy,
            Department::Lab => &self.lab,
        }
    }

    pub fn department_mut(&mut self, department: Department) -> &mut Vec<InventoryItem> {
        match department {
            Department::Pharmacy => &mut self.pharmacy,
            Department::Lab => &mut self.lab,
        }
    }

    /// Timestamp-derived id, bumped past the current maximum so ids stay
    /// unique across both department lists.
    pub fn next_item_id(&self) -> i64 {
        let candidate = Utc::now().timestamp_millis();
        let max_existing = self
            .pharmacy
            .iter()
            .chain(self.lab.iter())
            .map(|item| item.id)
            .max()
            .unwrap_or(0);
        candidate.max(max_existing + 1)
    }

    /// Recomputes the alert list; called after every inventory or
    /// settings write, like the layout effect it replaces.
    pub fn refresh_alerts(&mut self, today: NaiveDate) {
        self.alerts = generate_alerts(&[&self.pharmacy, &self.lab], &self.settings, today);
    }

    pub fn total_inventory_value(&self) -> Decimal {
        self.pharmacy
            .iter()
            .chain(self.lab.iter())
            .map(|item| item.stock_value())
            .sum()
    }
}

/// Seeds the store with the sample stock both department views ship with.
pub fn create_store() -> Store {
    let mut data = HospitalData {
        pharmacy: seed_pharmacy(),
        lab: seed_lab(),
        settings: AlertSettings::default(),
        alerts: Vec::new(),
        global_search: String::new(),
    };
    data.refresh_alerts(Utc::now().date_naive());
    Arc::new(RwLock::new(data))
}

fn seed_pharmacy() -> Vec<InventoryItem> {
    vec![
        drug(1, "Paracetamol 500mg", "Analgesic", 450, 100, 150, date(2026, 5, 20)),
        drug(2, "Amoxicillin 500mg", "Antibiotic", 12, 50, 1500, date(2025, 12, 10)),
        drug(3, "Artemether-Lum.", "Antimalarial", 80, 30, 3500, date(2024, 2, 15)),
        drug(4, "Ciprofloxacin", "Antibiotic", 0, 20, 1250, date(2025, 8, 1)),
        drug(5, "Multivitamin Syrup", "Supplement", 200, 50, 2500, date(2026, 1, 1)),
    ]
}

fn seed_lab() -> Vec<InventoryItem> {
    vec![
        supply(6, "Malaria RDT Kits", "Test Kits", 15, 10, "Boxes", date(2025, 12, 1)),
        supply(7, "FBC Reagent (Diluent)", "Reagents", 2, 5, "Bottles", date(2026, 1, 15)),
        supply(8, "Urine Containers", "Consumables", 500, 100, "Pcs", Expiry::NonPerishable),
        supply(9, "Lipid Profile Strips", "Reagents", 0, 2, "Packs", date(2025, 10, 20)),
        supply(10, "EDTA Tubes (Purple)", "Consumables", 45, 50, "Packs", date(2024, 11, 1)),
    ]
}

fn date(y: i32, m: u32, d: u32) -> Expiry {
    Expiry::On(NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date"))
}

fn drug(
    id: i64,
    name: &str,
    category: &str,
    stock: u32,
    min_level: u32,
    price_cents: i64,
    expiry: Expiry,
) -> InventoryItem {
    InventoryItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        stock,
        min_level,
        expiry,
        detail: ItemDetail::Price(Decimal::new(price_cents, 2)),
    }
}

fn supply(
    id: i64,
    name: &str,
    category: &str,
    stock: u32,
    min_level: u32,
    unit: &str,
    expiry: Expiry,
) -> InventoryItem {
    InventoryItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        stock,
        min_level,
        expiry,
        detail: ItemDetail::Unit(unit.to_string()),
    }
}
