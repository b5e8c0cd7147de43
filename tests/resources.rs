mod common;

use common::FakeBackend;
use serde_json::json;
use vanguard_painel::{
    api::{Resource, RestResource},
    common::{
        feedback::AlertStatus,
        store::{QueryCache, QueryKey},
    },
    models::{Car, Client},
    panels::{CarFields, ClientFields, DataGrid, DriverFields, RegistrationForm, SubmitOutcome},
};

#[tokio::test]
async fn car_form_validates_before_any_request() {
    let (backend, state) = FakeBackend::spawn().await;
    let mut form: RegistrationForm<CarFields> = RegistrationForm::new();

    let outcome = form.submit(&state.cars).await;
    assert_eq!(outcome, SubmitOutcome::Invalid("Modelo é obrigatório".into()));
    assert!(backend.requests().is_empty());

    form.fields.model = "Sprinter".into();
    let outcome = form.submit(&state.cars).await;
    assert_eq!(outcome, SubmitOutcome::Invalid("Placa é obrigatória".into()));
    assert!(backend.requests().is_empty());

    form.fields.plate = "ABC1D23".into();
    form.fields.consumption = "10".into();
    form.fields.fixed_cost = "1500".into();
    let SubmitOutcome::Created(car) = form.submit(&state.cars).await else {
        panic!("carro deveria ter sido criado");
    };
    assert_eq!(car.model, "Sprinter");

    let posts = backend.requests_to("POST", "/car");
    assert_eq!(posts.len(), 1);
    let body = &posts[0].body;
    assert_eq!(body["model"], json!("Sprinter"));
    assert_eq!(body["plate"], json!("ABC1D23"));
    assert_eq!(body["consumption"].as_f64(), Some(10.0));
    assert_eq!(body["fixed_cost"].as_f64(), Some(1500.0));

    // Sucesso limpa o formulário e mostra o aviso
    assert_eq!(form.fields, CarFields::default());
    assert!(!form.is_submitting());
    let alert = form.alert().current().unwrap();
    assert_eq!(alert.status, AlertStatus::Success);
    assert_eq!(alert.message, "Carro cadastrado com sucesso");
}

#[tokio::test]
async fn backend_message_wins_over_fallback() {
    let (backend, state) = FakeBackend::spawn().await;
    let mut form: RegistrationForm<ClientFields> = RegistrationForm::new();
    form.fields = ClientFields {
        name: "Maria".into(),
        telephone: "(11) 99999-9999".into(),
        email: "maria@email.com".into(),
    };

    backend.fail_next(400, "Email já cadastrado");
    let outcome = form.submit(&state.clients).await;
    assert_eq!(outcome, SubmitOutcome::Failed("Email já cadastrado".into()));
    // Em caso de erro os campos continuam preenchidos
    assert_eq!(form.fields.name, "Maria");

    backend.fail_next(500, "");
    let outcome = form.submit(&state.clients).await;
    assert_eq!(outcome, SubmitOutcome::Failed("Falha ao cadastrar cliente".into()));

    // Depois de uma falha o formulário aceita um novo envio
    assert!(!form.is_submitting());
    assert!(matches!(form.submit(&state.clients).await, SubmitOutcome::Created(_)));
    assert_eq!(backend.requests_to("POST", "/client").len(), 3);
}

#[tokio::test]
async fn driver_payload_uses_camel_case() {
    let (backend, state) = FakeBackend::spawn().await;
    let mut form: RegistrationForm<DriverFields> = RegistrationForm::new();
    form.fields.name = "João".into();
    form.fields.set_cpf("12345678901");
    form.fields.email = "joao@email.com".into();
    form.fields.daily_price_driver = "250".into();

    assert!(matches!(form.submit(&state.drivers).await, SubmitOutcome::Created(_)));
    let body = &backend.requests_to("POST", "/driver")[0].body;
    assert_eq!(body["cpf"], json!("123.456.789-01"));
    assert_eq!(body["dailyPriceDriver"].as_f64(), Some(250.0));
    assert!(body.get("driverCost").is_some());
}

#[tokio::test]
async fn list_is_cached_until_a_mutation_invalidates_it() {
    let (backend, state) = FakeBackend::spawn().await;
    backend.seed("car", json!([{ "id": "car1", "model": "Sprinter", "plate": "AAA0001", "consumption": 9, "fixed_cost": 100 }]));

    assert!(state.cars.snapshot().is_loading);
    assert_eq!(state.cars.list().await.unwrap().len(), 1);
    assert_eq!(state.cars.list().await.unwrap().len(), 1);
    assert_eq!(backend.requests_to("GET", "/car").len(), 1);
    assert!(!state.cars.snapshot().is_loading);

    state.cars.delete("car1").await.unwrap();
    assert!(state.cache.read(&QueryKey::new("car")).is_none());
    assert!(state.cars.list().await.unwrap().is_empty());
    assert_eq!(backend.requests_to("GET", "/car").len(), 2);
}

#[tokio::test]
async fn grid_edit_sends_put_with_snapshot() {
    let (backend, state) = FakeBackend::spawn().await;
    backend.seed("car", json!([{ "id": "car1", "model": "Sprinter", "plate": "AAA0001", "consumption": 9, "fixed_cost": 100 }]));

    let mut grid: DataGrid<Car, RestResource<Car>> = DataGrid::new(state.cars.clone());
    grid.refresh().await.unwrap();
    grid.start_edit("car1");
    grid.edit_snapshot().unwrap().model = "Master".into();
    grid.save().await.unwrap();

    let puts = backend.requests_to("PUT", "/car/car1");
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body["model"], json!("Master"));
    assert!(puts[0].body.get("id").is_none());
    assert_eq!(grid.rows()[0].model, "Master");
}

#[tokio::test]
async fn referenced_client_cannot_be_deleted() {
    let (backend, state) = FakeBackend::spawn().await;
    backend.seed("client", json!([{ "id": "c1", "name": "Maria", "telephone": "11999999999", "email": "m@e.com" }]));
    backend.reference("c1");

    let mut grid: DataGrid<Client, RestResource<Client>> = DataGrid::new(state.clients.clone());
    grid.refresh().await.unwrap();
    grid.request_delete("c1");
    assert!(grid.confirm_delete().await.is_err());

    assert_eq!(grid.pending_delete(), None);
    assert_eq!(
        grid.alert().current().unwrap().message,
        "Não é possível excluir: este cliente está vinculado a um orçamento."
    );
    assert_eq!(backend.collection("client").len(), 1);
}
