// src/models/car.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub model: String,
    pub plate: String,
    // km/l
    #[serde(default)]
    pub consumption: Decimal,
    // custo fixo mensal
    #[serde(default)]
    pub fixed_cost: Decimal,
}

impl Car {
    /// `Sprinter (ABC1D23)`, como aparece nos selects e no WhatsApp.
    pub fn label(&self) -> String {
        format!("{} ({})", self.model, self.plate)
    }
}

// Corpo do POST /car e do PUT /car/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarPayload {
    pub model: String,
    pub plate: String,
    pub consumption: Decimal,
    pub fixed_cost: Decimal,
}
