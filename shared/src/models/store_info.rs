//! Restaurant Profile Model

use serde::{Deserialize, Serialize};

/// Restaurant profile printed on report headers
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestaurantProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub phone: Option<String>,
    /// Tax identification number (NIP)
    #[serde(default)]
    pub tax_id: String,
}
