// src/models/budget.rs

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BudgetStatus {
    #[default]
    Pendente,
    Aprovada,
    // Definido pelo backend; o painel só exibe
    Cancelada,
}

impl BudgetStatus {
    /// Opções do seletor de status do card.
    pub const EDITABLE: [BudgetStatus; 2] = [BudgetStatus::Pendente, BudgetStatus::Aprovada];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Pendente => "Pendente",
            BudgetStatus::Aprovada => "Aprovada",
            BudgetStatus::Cancelada => "Cancelada",
        }
    }

    /// Rótulo do badge no card.
    pub fn badge(&self) -> &'static str {
        match self {
            BudgetStatus::Pendente => "🟡 Pendente",
            BudgetStatus::Aprovada => "🟢 Aprovado",
            BudgetStatus::Cancelada => "🔴 Cancelada",
        }
    }

    pub fn is_editable(&self) -> bool {
        Self::EDITABLE.contains(self)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- ORÇAMENTO ---

// `null` vindo do backend (valor ainda não calculado) vira zero
fn decimal_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub origem: String,
    pub destino: String,
    pub data_hora_viagem: String,
    #[serde(default)]
    pub data_hora_viagem_retorno: Option<String>,
    pub cliente_id: String,
    #[serde(default)]
    pub driver_id: Vec<String>,
    pub car_id: String,

    // Calculada pelo backend
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub distancia_total: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub preco_viagem: Decimal,

    #[serde(rename = "lucroDesejado", default, deserialize_with = "decimal_or_zero")]
    pub lucro_desejado: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub pedagio: Decimal,
    #[serde(rename = "impostoPercent", default, deserialize_with = "decimal_or_zero")]
    pub imposto_percent: Decimal,
    #[serde(rename = "custoExtra", default, deserialize_with = "decimal_or_zero")]
    pub custo_extra: Decimal,
    #[serde(rename = "numMotoristas", default, skip_serializing_if = "Option::is_none")]
    pub num_motoristas: Option<u32>,

    #[serde(default)]
    pub status: BudgetStatus,
}

// --- PAYLOADS ---

/// Corpo do `POST /budget`.
///
/// `numMotoristas` não é público: os construtores calculam a partir da lista
/// de motoristas, então o payload nunca sai com os dois fora de sincronia.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBudget {
    pub origem: String,
    pub destino: String,
    pub data_hora_viagem: String,
    pub data_hora_viagem_retorno: String,
    pub pedagio: Decimal,
    #[serde(rename = "lucroDesejado")]
    pub lucro_desejado: Decimal,
    #[serde(rename = "impostoPercent")]
    pub imposto_percent: Decimal,
    #[serde(rename = "numMotoristas")]
    num_motoristas: u32,
    #[serde(rename = "custoExtra")]
    pub custo_extra: Decimal,
    driver_id: Vec<String>,
    pub car_id: String,
    pub cliente_id: String,
}

/// Campos comuns de viagem/preço usados pelos dois payloads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripFields {
    pub origem: String,
    pub destino: String,
    pub data_hora_viagem: String,
    pub data_hora_viagem_retorno: String,
    pub pedagio: Decimal,
    pub lucro_desejado: Decimal,
    pub imposto_percent: Decimal,
    pub custo_extra: Decimal,
}

impl NewBudget {
    pub fn new(trip: TripFields, cliente_id: String, car_id: String, driver_id: Vec<String>) -> Self {
        Self {
            origem: trip.origem,
            destino: trip.destino,
            data_hora_viagem: trip.data_hora_viagem,
            data_hora_viagem_retorno: trip.data_hora_viagem_retorno,
            pedagio: trip.pedagio,
            lucro_desejado: trip.lucro_desejado,
            imposto_percent: trip.imposto_percent,
            num_motoristas: driver_id.len() as u32,
            custo_extra: trip.custo_extra,
            driver_id,
            car_id,
            cliente_id,
        }
    }

    pub fn num_motoristas(&self) -> u32 {
        self.num_motoristas
    }

    pub fn driver_id(&self) -> &[String] {
        &self.driver_id
    }
}

/// Corpo do `PUT /budget/:id`. `preco_viagem` só vai quando o usuário mudou o
/// preço; sem a chave o backend mantém o cálculo dele.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUpdate {
    pub origem: String,
    pub destino: String,
    pub car_id: String,
    driver_id: Vec<String>,
    pub cliente_id: String,
    pub data_hora_viagem: String,
    pub data_hora_viagem_retorno: String,
    #[serde(rename = "lucroDesejado")]
    pub lucro_desejado: Decimal,
    pub status: BudgetStatus,
    pub pedagio: Decimal,
    #[serde(rename = "impostoPercent")]
    pub imposto_percent: Decimal,
    #[serde(rename = "custoExtra")]
    pub custo_extra: Decimal,
    #[serde(rename = "numMotoristas")]
    num_motoristas: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preco_viagem: Option<Decimal>,
}

impl BudgetUpdate {
    pub fn new(
        trip: TripFields,
        cliente_id: String,
        car_id: String,
        driver_id: Vec<String>,
        status: BudgetStatus,
        preco_viagem: Option<Decimal>,
    ) -> Self {
        Self {
            origem: trip.origem,
            destino: trip.destino,
            car_id,
            num_motoristas: driver_id.len() as u32,
            driver_id,
            cliente_id,
            data_hora_viagem: trip.data_hora_viagem,
            data_hora_viagem_retorno: trip.data_hora_viagem_retorno,
            lucro_desejado: trip.lucro_desejado,
            status,
            pedagio: trip.pedagio,
            imposto_percent: trip.imposto_percent,
            custo_extra: trip.custo_extra,
            preco_viagem,
        }
    }

    pub fn num_motoristas(&self) -> u32 {
        self.num_motoristas
    }

    pub fn driver_id(&self) -> &[String] {
        &self.driver_id
    }
}

/// Corpo do `PATCH /budget/:id/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: BudgetStatus,
}

// --- PROJEÇÃO DE VIAGENS (GET /budget/trips) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TripView {
    pub id: String,
    pub preco: String,
    pub origem: String,
    pub destino: String,
    pub carro: String,
    pub motorista: String,
    pub cliente: String,
    pub dia: String,
    pub hora: String,
    pub status: String,
}
