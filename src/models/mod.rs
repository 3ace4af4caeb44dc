pub mod alert;
pub mod inventory;
pub mod settings;

// Re-export only the types we actually use
pub use alert::{generate_alerts, Alert, AlertKind, Priority};
pub use inventory::{
    classify, Department, Expiry, InventoryItem, ItemDetail, StockStatus,
};
pub use settings::AlertSettings;
