// src/models/driver.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub cpf: String,
    pub email: String,
    // custo mensal
    #[serde(default)]
    pub driver_cost: Decimal,
    #[serde(default)]
    pub daily_price_driver: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPayload {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub driver_cost: Decimal,
    pub daily_price_driver: Decimal,
}

// --- REMUNERAÇÃO (projeção calculada pelo backend) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemunerationDriver {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemunerationTrip {
    pub id: String,
    pub origem: String,
    pub destino: String,
    pub data_hora_viagem: String,
    pub data_hora_viagem_retorno: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Remuneration {
    pub driver: RemunerationDriver,
    pub month: u32,
    pub year: i32,
    pub trips: Vec<RemunerationTrip>,
    pub daily_rate: Decimal,
    pub total_days: u32,
    pub total_remuneration: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn driver_uses_camel_case_on_the_wire() {
        let payload = DriverPayload {
            name: "João".into(),
            email: "joao@email.com".into(),
            cpf: "123.456.789-01".into(),
            driver_cost: Decimal::from(3000),
            daily_price_driver: Decimal::from(250),
        };
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["driverCost"], json!(3000.0));
        assert!(body.get("dailyPriceDriver").is_some());
    }

    #[test]
    fn reads_remuneration() {
        let rem: Remuneration = serde_json::from_value(json!({
            "driver": {"id": "d1", "name": "João"},
            "month": 8,
            "year": 2025,
            "trips": [{"id": "b1", "origem": "SP", "destino": "RJ", "data_hora_viagem": "2025-08-10T08:00"}],
            "dailyRate": 250,
            "totalDays": 3,
            "totalRemuneration": 750
        }))
        .unwrap();
        assert_eq!(rem.trips.len(), 1);
        assert_eq!(rem.total_days, 3);
        assert_eq!(rem.total_remuneration, Decimal::from(750));
    }
}
