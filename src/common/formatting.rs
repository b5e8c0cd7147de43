// src/common/formatting.rs

use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime};
use rust_decimal::Decimal;

// Formato do input `datetime-local`, usado também no payload enviado ao backend
pub const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Lê uma data/hora vinda do backend ou do formulário. Valores com fuso são
/// convertidos para o horário local; valores sem fuso já são o horário de parede.
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Normaliza para `YYYY-MM-DDTHH:mm` sem fuso, preservando o horário que o
/// usuário digitou.
pub fn fix_local_datetime(value: &str) -> Option<String> {
    parse_local_datetime(value).map(|dt| dt.format(INPUT_DATETIME_FORMAT).to_string())
}

/// `10/08/2025 08:30`; se não der para interpretar, devolve o texto original.
pub fn format_datetime_pt_br(value: &str) -> String {
    parse_local_datetime(value)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Data da viagem no nome do arquivo do comprovante (`DDMMYYYY`).
pub fn ticket_date(value: &str) -> Option<String> {
    parse_local_datetime(value).map(|dt| dt.format("%d%m%Y").to_string())
}

pub fn format_brl(value: &Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{sign}R$ {grouped},{frac_part}")
}

/// Campo numérico do formulário: vazio vale zero, aceita vírgula ou ponto.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return Some(Decimal::ZERO);
    }
    let normalized = if value.contains(',') {
        value.replace('.', "").replace(',', ".")
    } else {
        value.to_string()
    };
    Decimal::from_str(&normalized).ok()
}
