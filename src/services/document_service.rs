// src/services/document_service.rs

use std::path::{Path, PathBuf};

use genpdf::{Alignment, Element, elements, style};
use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        formatting::{format_brl, format_datetime_pt_br, ticket_date},
    },
    models::{Budget, Remuneration},
};

pub const NO_TRIPS_IN_PERIOD: &str = "Nenhuma viagem encontrada para este período.";

// --- Dados dos comprovantes ---

/// Comprovante de viagem de um orçamento.
#[derive(Debug, Clone, PartialEq)]
pub struct TripReceipt {
    pub cliente_id: String,
    pub cliente: String,
    pub origem: String,
    pub destino: String,
    // Texto original do backend/formulário; formatado só na renderização
    pub ida: String,
    pub retorno: String,
    pub distancia: Decimal,
    pub preco: Decimal,
}

impl TripReceipt {
    pub fn from_budget(budget: &Budget, client_name: Option<&str>) -> Self {
        Self {
            cliente_id: budget.cliente_id.clone(),
            cliente: client_name.unwrap_or(&budget.cliente_id).to_string(),
            origem: budget.origem.clone(),
            destino: budget.destino.clone(),
            ida: budget.data_hora_viagem.clone(),
            retorno: budget.data_hora_viagem_retorno.clone().unwrap_or_default(),
            distancia: budget.distancia_total,
            preco: budget.preco_viagem,
        }
    }

    /// `ticket-<clienteId>-<DDMMYYYY>.pdf`
    pub fn file_name(&self) -> String {
        let date = ticket_date(&self.ida).unwrap_or_else(|| "sem-data".to_string());
        sanitize_file_name(&format!("ticket-{}-{}.pdf", self.cliente_id, date))
    }
}

/// Holerite do motorista para um mês.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollReceipt {
    pub funcionario: String,
    pub mes: String,
    pub ano: String,
    pub quantidade: usize,
    pub valor: Decimal,
    pub total_days: u32,
    pub total_remuneration: Decimal,
}

impl PayrollReceipt {
    pub fn from_remuneration(remuneration: &Remuneration, fallback_name: &str) -> Result<Self, AppError> {
        if remuneration.trips.is_empty() {
            return Err(AppError::NoData(NO_TRIPS_IN_PERIOD.to_string()));
        }

        let funcionario = if remuneration.driver.name.trim().is_empty() {
            fallback_name.to_string()
        } else {
            remuneration.driver.name.clone()
        };

        Ok(Self {
            funcionario,
            mes: format!("{:02}", remuneration.month),
            ano: remuneration.year.to_string(),
            quantidade: remuneration.trips.len(),
            valor: remuneration.daily_rate,
            total_days: remuneration.total_days,
            total_remuneration: remuneration.total_remuneration,
        })
    }

    /// `holerite-<nome>-<MM>-<AAAA>.pdf`
    pub fn file_name(&self) -> String {
        sanitize_file_name(&format!("holerite-{}-{}-{}.pdf", self.funcionario, self.mes, self.ano))
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect()
}

// ---
// Renderização com genpdf
// ---
#[derive(Debug, Clone)]
pub struct DocumentService {
    fonts_dir: PathBuf,
    font_name: String,
}

impl DocumentService {
    pub fn new(fonts_dir: impl Into<PathBuf>, font_name: impl Into<String>) -> Self {
        Self { fonts_dir: fonts_dir.into(), font_name: font_name.into() }
    }

    fn new_document(&self, title: &str) -> Result<genpdf::Document, AppError> {
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, &self.font_name, None).map_err(|_| {
            AppError::FontNotFound(format!(
                "Fonte {} não encontrada na pasta {}",
                self.font_name,
                self.fonts_dir.display()
            ))
        })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(title);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);
        Ok(doc)
    }

    pub fn render_trip_receipt(&self, receipt: &TripReceipt) -> Result<Vec<u8>, AppError> {
        let mut doc = self.new_document("Comprovante de viagem")?;
        let bold = style::Style::new().bold();

        let mut title = elements::Paragraph::new("COMPROVANTE DE VIAGEM");
        title.set_alignment(Alignment::Center);
        doc.push(title.styled(style::Style::new().bold().with_font_size(18)));

        let ida = format_datetime_pt_br(&receipt.ida);
        let retorno = format_datetime_pt_br(&receipt.retorno);
        for line in [format!("Ida: {}", ida), format!("Retorno: {}", retorno)] {
            let mut p = elements::Paragraph::new(line);
            p.set_alignment(Alignment::Center);
            doc.push(p);
        }
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(vec![1, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(false, false, false));
        let rows = [
            ("Cliente:", receipt.cliente.clone()),
            ("Distância Total:", format!("{} km", receipt.distancia.normalize())),
            ("Origem:", receipt.origem.clone()),
            ("Destino:", receipt.destino.clone()),
            ("Data/Horário Ida:", ida),
            ("Data/Horário Retorno:", retorno),
        ];
        for (label, value) in rows {
            table
                .row()
                .element(elements::Paragraph::new(label).styled(bold))
                .element(elements::Paragraph::new(value))
                .push()
                .map_err(|e| AppError::Pdf(e.to_string()))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(2));

        let mut total = elements::Paragraph::new(format!("Valor Total: {}", format_brl(&receipt.preco)));
        total.set_alignment(Alignment::Center);
        doc.push(total.styled(style::Style::new().bold().with_font_size(14)));

        render(doc)
    }

    pub fn render_payroll_receipt(&self, receipt: &PayrollReceipt) -> Result<Vec<u8>, AppError> {
        let mut doc = self.new_document("Holerite")?;
        let bold = style::Style::new().bold();

        let mut title = elements::Paragraph::new("HOLERITE");
        title.set_alignment(Alignment::Center);
        doc.push(title.styled(style::Style::new().bold().with_font_size(18)));

        let mut period = elements::Paragraph::new(format!("{}/{}", receipt.mes, receipt.ano));
        period.set_alignment(Alignment::Center);
        doc.push(period);
        doc.push(elements::Break::new(1.5));

        doc.push(elements::Paragraph::new(format!("Funcionário: {}", receipt.funcionario)).styled(bold));
        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new("Viagens").styled(bold));

        let mut table = elements::TableLayout::new(vec![3, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(false, false, false));
        let rows = [
            ("Quantidade:", receipt.quantidade.to_string()),
            ("Valor por dia:", format_brl(&receipt.valor)),
            ("Dias Totais Fora:", receipt.total_days.to_string()),
        ];
        for (label, value) in rows {
            let mut value = elements::Paragraph::new(value);
            value.set_alignment(Alignment::Right);
            table
                .row()
                .element(elements::Paragraph::new(label))
                .element(value)
                .push()
                .map_err(|e| AppError::Pdf(e.to_string()))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(2));

        let mut total = elements::Paragraph::new(format!(
            "Remuneração Total: {}",
            format_brl(&receipt.total_remuneration)
        ));
        total.set_alignment(Alignment::Right);
        doc.push(total.styled(style::Style::new().bold().with_font_size(14)));

        render(doc)
    }

    /// Grava o PDF em `out_dir` e devolve o caminho final.
    pub async fn save(&self, out_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(out_dir).await?;
        let path = out_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!("📄 PDF salvo em {}", path.display());
        Ok(path)
    }
}

fn render(doc: genpdf::Document) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(|e| AppError::Pdf(e.to_string()))?;
    Ok(buffer)
}
