// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use vanguard_painel::config::{AppConfig, AppState};

pub const TWO_FACTOR_EMAIL: &str = "2fa@vanguard.com";
pub const PASSWORD: &str = "senha123";
pub const TWO_FACTOR_CODE: &str = "ABC123";
pub const RESET_CODE: &str = "123456";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct BackendState {
    collections: HashMap<String, Vec<Value>>,
    requests: Vec<Recorded>,
    session: Option<String>,
    pending_two_factor: Option<String>,
    referenced: Vec<String>,
    fail_next: Option<(u16, String)>,
    remuneration: HashMap<String, Value>,
    me_body: Option<Value>,
    next_id: u64,
}

/// Backend REST em memória que grava cada requisição recebida.
#[derive(Clone, Default)]
pub struct FakeBackend(Arc<Mutex<BackendState>>);

impl FakeBackend {
    pub async fn spawn() -> (Self, AppState) {
        let backend = Self::default();
        let app = Router::new().fallback(handle).with_state(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = AppConfig {
            api_base_url: format!("http://{addr}"),
            output_dir: std::env::temp_dir(),
            ..AppConfig::default()
        };
        let state = AppState::new(config).unwrap();
        (backend, state)
    }

    pub fn seed(&self, collection: &str, items: Value) {
        let items = items.as_array().cloned().unwrap_or_default();
        self.0.lock().unwrap().collections.insert(collection.to_string(), items);
    }

    pub fn collection(&self, collection: &str) -> Vec<Value> {
        self.0.lock().unwrap().collections.get(collection).cloned().unwrap_or_default()
    }

    pub fn login_as(&self, email: &str) {
        self.0.lock().unwrap().session = Some(email.to_string());
    }

    /// Corpo devolvido por `/auth/me` enquanto houver sessão.
    pub fn set_me_body(&self, body: Value) {
        self.0.lock().unwrap().me_body = Some(body);
    }

    pub fn reference(&self, id: &str) {
        self.0.lock().unwrap().referenced.push(id.to_string());
    }

    pub fn fail_next(&self, status: u16, message: &str) {
        self.0.lock().unwrap().fail_next = Some((status, message.to_string()));
    }

    pub fn set_remuneration(&self, driver_id: &str, value: Value) {
        self.0.lock().unwrap().remuneration.insert(driver_id.to_string(), value);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.0.lock().unwrap().requests.clear();
    }
}

fn reply(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

fn error(status: u16, message: &str) -> Response {
    reply(status, json!({ "statusCode": status, "message": message }))
}

pub fn user(email: &str) -> Value {
    let username = email.split('@').next().unwrap_or(email);
    json!({ "id": format!("u-{username}"), "username": username, "email": email })
}

async fn handle(State(backend): State<FakeBackend>, method: Method, uri: Uri, body: Bytes) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();

    let mut st = backend.0.lock().unwrap();
    st.requests.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body: body.clone(),
    });

    if let Some((status, message)) = st.fail_next.take() {
        return error(status, &message);
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        // --- Autenticação ---
        ("POST", ["auth", "signin"]) => {
            let email = body["email"].as_str().unwrap_or_default().to_string();
            if body["password"] != json!(PASSWORD) {
                return error(401, "Credenciais inválidas");
            }
            if email == TWO_FACTOR_EMAIL {
                st.pending_two_factor = Some(email.clone());
                return reply(200, json!({ "twoFactorRequired": true, "email": email }));
            }
            st.session = Some(email.clone());
            reply(200, json!({ "user": user(&email) }))
        }
        ("POST", ["auth", "2fa", "verify"]) => {
            let email = body["email"].as_str().unwrap_or_default();
            if st.pending_two_factor.as_deref() == Some(email) && body["code"] == json!(TWO_FACTOR_CODE) {
                st.pending_two_factor = None;
                st.session = Some(email.to_string());
                return reply(200, json!({ "ok": true }));
            }
            error(400, "Código inválido")
        }
        ("POST", ["auth", "logout"]) => {
            st.session = None;
            reply(200, json!({}))
        }
        ("GET", ["auth", "me"]) => {
            let Some(email) = st.session.clone() else {
                return error(401, "Unauthorized");
            };
            if let Some(body) = st.me_body.clone() {
                return reply(200, body);
            }
            let stored = st
                .collections
                .get("users")
                .and_then(|users| users.iter().find(|u| u["email"] == json!(email)).cloned());
            reply(200, stored.unwrap_or_else(|| user(&email)))
        }
        ("POST", ["users", "forgot-password"]) => {
            if body["email"] == json!("desconhecido@vanguard.com") {
                return error(404, "Usuário não encontrado");
            }
            reply(200, json!({}))
        }
        ("POST", ["users", "reset-password"]) => {
            if body["code"] == json!(RESET_CODE) && body["newPassword"].is_string() {
                return reply(200, json!({}));
            }
            error(400, "Código inválido")
        }

        // --- Endpoints específicos ---
        ("GET", ["budget", "trips"]) => {
            let trips: Vec<Value> = st
                .collections
                .get("budget")
                .into_iter()
                .flatten()
                .map(|b| {
                    json!({
                        "id": b["id"],
                        "preco": b["preco_viagem"].to_string(),
                        "origem": b["origem"],
                        "destino": b["destino"],
                        "dia": "10/08/2025",
                        "hora": "08:00",
                        "status": b["status"],
                    })
                })
                .collect();
            reply(200, Value::Array(trips))
        }
        ("PATCH", ["budget", id, "status"]) => {
            let id = id.to_string();
            match st.collections.get_mut("budget").and_then(|c| c.iter_mut().find(|b| b["id"] == json!(id))) {
                Some(budget) => {
                    budget["status"] = body["status"].clone();
                    reply(200, budget.clone())
                }
                None => error(404, "Orçamento não encontrado"),
            }
        }
        ("GET", ["driver", id, "remuneration"]) => {
            let value = st.remuneration.get(*id).cloned().unwrap_or_else(|| {
                json!({
                    "driver": { "id": id, "name": "" },
                    "month": 0, "year": 0, "trips": [],
                    "dailyRate": 0, "totalDays": 0, "totalRemuneration": 0
                })
            });
            reply(200, value)
        }

        // --- CRUD genérico ---
        ("GET", [collection]) => {
            let items = st.collections.get(*collection).cloned().unwrap_or_default();
            reply(200, Value::Array(items))
        }
        ("POST", [collection]) => {
            st.next_id += 1;
            let mut item = body;
            item["id"] = json!(format!("{}-{}", collection, st.next_id));
            if *collection == "budget" {
                item["status"] = json!("Pendente");
                item["preco_viagem"] = json!(500);
                item["distancia_total"] = json!(100);
            }
            st.collections.entry(collection.to_string()).or_default().push(item.clone());
            reply(201, item)
        }
        ("PUT", [collection, id]) => {
            let id = id.to_string();
            let Some(item) = st
                .collections
                .get_mut(*collection)
                .and_then(|c| c.iter_mut().find(|i| i["id"] == json!(id)))
            else {
                return error(404, "Registro não encontrado");
            };
            if let (Some(target), Some(patch)) = (item.as_object_mut(), body.as_object()) {
                for (key, value) in patch {
                    target.insert(key.clone(), value.clone());
                }
            }
            reply(200, item.clone())
        }
        ("DELETE", [collection, id]) => {
            if st.referenced.iter().any(|r| r == id) {
                return error(
                    409,
                    "update or delete on table violates foreign key constraint \"budget_car_id_fkey\"",
                );
            }
            let id = id.to_string();
            if let Some(items) = st.collections.get_mut(*collection) {
                items.retain(|i| i["id"] != json!(id));
            }
            StatusCode::NO_CONTENT.into_response()
        }
        _ => error(404, "Rota não encontrada"),
    }
}
