// src/api/http.rs

use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::common::error::AppError;

/// Cliente HTTP do painel. A sessão vai nos cookies, guardados pelo próprio
/// `reqwest`, então nenhuma chamada precisa montar cabeçalho de autenticação.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send(Method::GET, path, self.request(Method::GET, path)).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(Method::GET, path, self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, AppError> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("🔥 {} {} falhou: {}", method, path, e);
            AppError::Network(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = extract_message(&bytes);
            tracing::warn!("⚠️ {} {} -> {} {:?}", method, path, status.as_u16(), message);
            return Err(AppError::Backend { status: status.as_u16(), message });
        }

        tracing::debug!("{} {} -> {}", method, path, status.as_u16());

        // DELETE e alguns POST de autenticação respondem sem corpo
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// `response.data.message` do backend: texto simples ou lista de textos.
fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        Value::String(msg) => Some(msg.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_string_message() {
        let body = br#"{"statusCode":409,"message":"violates foreign key constraint"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("violates foreign key constraint"));
    }

    #[test]
    fn joins_array_message() {
        let body = br#"{"message":["email must be an email","name should not be empty"]}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("email must be an email, name should not be empty")
        );
    }

    #[test]
    fn ignores_bodies_without_message() {
        assert_eq!(extract_message(b"<html>502</html>"), None);
        assert_eq!(extract_message(br#"{"error":"x"}"#), None);
    }

    #[test]
    fn trims_trailing_slash() {
        let api = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000");
    }
}
