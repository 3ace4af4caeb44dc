use serde::{Deserialize, Serialize};

/// Bounds of the low-stock threshold slider in the settings view.
pub const THRESHOLD_MIN: u32 = 5;
pub const THRESHOLD_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub low_stock_threshold: u32,
    pub expiry_warning: bool,
    pub email_report: bool,
}

impl AlertSettings {
    pub fn threshold_in_range(&self) -> bool {
        (THRESHOLD_MIN..=THRESHOLD_MAX).contains(&self.low_stock_threshold)
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: 20,
            expiry_warning: true,
            email_report: false,
        }
    }
}
