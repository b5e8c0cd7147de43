// src/panels/registration.rs

use crate::{
    api::resource::{Entity, Resource},
    common::{
        error::AppError,
        feedback::AlertSlot,
        formatting::parse_decimal,
        validation::{format_cpf, is_valid_cpf, is_valid_email, require},
    },
    models::{Car, CarPayload, Client, ClientPayload, Driver, DriverPayload},
};

/// Campos de um formulário de cadastro. `validate` roda as regras em ordem e
/// para na primeira que falhar.
pub trait FormFields: Default + Send {
    type Entity: Entity;

    fn validate(&self) -> Result<<Self::Entity as Entity>::Draft, AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Validação local falhou; nenhuma requisição foi feita.
    Invalid(String),
    Created(T),
    Failed(String),
}

// ---
// Formulário genérico
// ---
#[derive(Debug, Default)]
pub struct RegistrationForm<F> {
    pub fields: F,
    submitting: bool,
    alert: AlertSlot,
}

impl<F: FormFields> RegistrationForm<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(alert: AlertSlot) -> Self {
        Self { fields: F::default(), submitting: false, alert }
    }

    /// Enquanto `true`, o botão de enviar fica desabilitado.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn alert(&self) -> &AlertSlot {
        &self.alert
    }

    pub async fn submit<R>(&mut self, resource: &R) -> SubmitOutcome<F::Entity>
    where
        R: Resource<F::Entity> + ?Sized,
    {
        let draft = match self.fields.validate() {
            Ok(draft) => draft,
            Err(e) => {
                let message = e.to_string();
                self.alert.error(message.clone());
                return SubmitOutcome::Invalid(message);
            }
        };

        let labels = <F::Entity as Entity>::LABELS;
        self.submitting = true;
        let result = resource.create(&draft).await;
        self.submitting = false;

        match result {
            Ok(created) => {
                self.alert.success(labels.created);
                self.fields = F::default();
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                tracing::warn!("❌ Cadastro falhou: {}", e);
                let message = e.user_message(labels.create_failed);
                self.alert.error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

fn decimal_field(value: &str, message: &str) -> Result<rust_decimal::Decimal, AppError> {
    parse_decimal(value).ok_or_else(|| AppError::Validation(message.to_string()))
}

// --- Carro ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFields {
    pub model: String,
    pub plate: String,
    pub consumption: String,
    pub fixed_cost: String,
}

impl FormFields for CarFields {
    type Entity = Car;

    fn validate(&self) -> Result<CarPayload, AppError> {
        require(&self.model, "Modelo é obrigatório")?;
        require(&self.plate, "Placa é obrigatória")?;
        Ok(CarPayload {
            model: self.model.trim().to_string(),
            plate: self.plate.trim().to_string(),
            consumption: decimal_field(&self.consumption, "Consumo inválido")?,
            fixed_cost: decimal_field(&self.fixed_cost, "Custo fixo inválido")?,
        })
    }
}

// --- Motorista ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverFields {
    pub name: String,
    cpf: String,
    pub email: String,
    pub driver_cost: String,
    pub daily_price_driver: String,
}

impl DriverFields {
    /// Cada tecla passa pela máscara `000.000.000-00`.
    pub fn set_cpf(&mut self, raw: &str) {
        self.cpf = format_cpf(raw);
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }
}

impl FormFields for DriverFields {
    type Entity = Driver;

    fn validate(&self) -> Result<DriverPayload, AppError> {
        require(&self.name, "Nome é obrigatório")?;
        if !is_valid_cpf(&self.cpf) {
            return Err(AppError::Validation("CPF inválido".to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("Email inválido".to_string()));
        }
        Ok(DriverPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            cpf: self.cpf.clone(),
            driver_cost: decimal_field(&self.driver_cost, "Custo do motorista inválido")?,
            daily_price_driver: decimal_field(&self.daily_price_driver, "Valor da diária inválido")?,
        })
    }
}

// --- Cliente ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFields {
    pub name: String,
    pub telephone: String,
    pub email: String,
}

impl FormFields for ClientFields {
    type Entity = Client;

    fn validate(&self) -> Result<ClientPayload, AppError> {
        require(&self.name, "Nome é obrigatório")?;
        require(&self.telephone, "Telefone é obrigatório")?;
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("Email inválido".to_string()));
        }
        Ok(ClientPayload {
            name: self.name.trim().to_string(),
            telephone: self.telephone.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}
