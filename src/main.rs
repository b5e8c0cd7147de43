//src/main.rs

use anyhow::{Context, bail};
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use vanguard_painel::{
    api::{Resource, RestResource},
    common::formatting::{format_brl, format_datetime_pt_br},
    config::{AppConfig, AppState},
    middleware::{
        connectivity::banner,
        session::{GateDecision, SessionGate},
    },
    models::{Driver, User},
    panels::{
        BudgetList, DataGrid, LoginForm, LoginOutcome, ProfileSettings, SignupForm, SignupOutcome, TwoFactorModal,
    },
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env().expect("Falha ao carregar a configuração.");
    let state = AppState::new(config).expect("Falha ao inicializar o estado da aplicação.");

    if let Err(e) = run(state).await {
        tracing::error!("🔥 {:#}", e);
        std::process::exit(1);
    }
}

async fn run(state: AppState) -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("status");

    // Estes não dependem de sessão
    match command {
        "monitor" => return monitor(&state).await,
        "cadastrar" => return signup(&state, &args[1..]).await,
        _ => {}
    }

    let user = authenticate(&state).await?;

    match command {
        "status" => status(&state, user.as_ref()).await,
        "perfil" => profile(&state, &args[1..]).await,
        "sair" => logout(&state).await,
        "orcamentos" => budgets(&state).await,
        "viagens" => trips(&state).await,
        "recibo" => {
            let id = args.get(1).context("Uso: recibo <orcamento_id>")?;
            trip_receipt(&state, id).await
        }
        "holerite" => {
            let id = args.get(1).context("Uso: holerite <motorista_id>")?;
            payroll(&state, id).await
        }
        other => bail!("Comando desconhecido: {other}"),
    }
}

// --- Sessão ---

async fn authenticate(state: &AppState) -> anyhow::Result<Option<User>> {
    let mut gate = SessionGate::new();
    if let GateDecision::Render(user) = gate.check(&state.auth).await {
        return Ok(user);
    }

    let (Some(email), Some(password)) = (&state.config.email, &state.config.password) else {
        bail!("Sessão expirada. Defina PAINEL_EMAIL e PAINEL_PASSWORD para entrar.");
    };

    let mut form = LoginForm::new(email.clone(), password.clone());
    match form.submit(&state.auth, &state.config.recaptcha_token).await {
        LoginOutcome::LoggedIn(_) => {}
        LoginOutcome::TwoFactorRequired { email } => two_factor(state, email).await?,
        LoginOutcome::Invalid => {
            let detail = ["email", "password"]
                .iter()
                .filter_map(|f| form.field_error(f))
                .collect::<Vec<_>>()
                .join("; ");
            bail!("Credenciais inválidas: {detail}");
        }
        LoginOutcome::Failed(message) => bail!(message),
    }

    gate.reset();
    match gate.check(&state.auth).await {
        GateDecision::Render(user) => Ok(user),
        _ => bail!("Não foi possível confirmar a sessão."),
    }
}

async fn two_factor(state: &AppState, email: String) -> anyhow::Result<()> {
    let mut modal = TwoFactorModal::new(email);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("Código 2FA enviado para {}: ", modal.email());
        let Some(line) = lines.next_line().await? else {
            bail!("Verificação 2FA cancelada.");
        };
        modal.set_code(&line);

        match modal.verify(&state.auth, || tracing::info!("🔓 Verificação concluída")).await {
            Ok(()) => return Ok(()),
            Err(_) => {
                if let Some(alert) = modal.alert().current() {
                    println!("{}", alert.message);
                }
            }
        }
    }
}

// --- Comandos ---

async fn signup(state: &AppState, args: &[String]) -> anyhow::Result<()> {
    let [email, username, password] = args else {
        bail!("Uso: cadastrar <email> <username> <senha>");
    };

    let mut form = SignupForm::new();
    form.fields.email = email.clone();
    form.fields.username = username.clone();
    form.fields.password = password.clone();

    match form.submit(&state.users, &state.config.recaptcha_token).await {
        SignupOutcome::Created(user) => {
            println!("Conta criada para {}. Entre com PAINEL_EMAIL e PAINEL_PASSWORD.", user.email);
            Ok(())
        }
        SignupOutcome::Invalid => {
            let detail = ["email", "username", "password"]
                .iter()
                .filter_map(|f| form.field_error(f))
                .collect::<Vec<_>>()
                .join("; ");
            bail!("Dados inválidos: {detail}")
        }
        SignupOutcome::Failed(message) => bail!(message),
    }
}

async fn status(state: &AppState, user: Option<&User>) -> anyhow::Result<()> {
    match user {
        Some(user) => println!("Usuário: {} <{}>", user.username, user.email),
        None => println!("Sessão ativa"),
    }
    println!("Carros: {}", state.cars.list().await?.len());
    println!("Motoristas: {}", state.drivers.list().await?.len());
    println!("Clientes: {}", state.clients.list().await?.len());
    println!("Orçamentos: {}", state.budgets.list().await?.len());
    Ok(())
}

async fn profile(state: &AppState, args: &[String]) -> anyhow::Result<()> {
    let mut settings = ProfileSettings::new();
    settings.load(&state.auth).await?;
    if settings.user().is_none() {
        bail!("Não foi possível carregar o perfil.");
    }

    if let Some(username) = args.first() {
        settings.username = username.clone();
    }
    if let Some(email) = args.get(1) {
        settings.email = email.clone();
    }
    if !args.is_empty() {
        settings.save(&state.users, &state.auth).await?;
    }

    println!("Perfil: {} <{}>", settings.username, settings.email);
    Ok(())
}

async fn logout(state: &AppState) -> anyhow::Result<()> {
    let mut settings = ProfileSettings::new();
    let route = settings.logout(&state.auth).await;
    println!("Sessão encerrada. Próxima tela: {}", route.path());
    Ok(())
}

async fn budgets(state: &AppState) -> anyhow::Result<()> {
    let mut list = BudgetList::new();
    list.refresh(&state.budgets).await?;

    for page in 1..=list.total_pages() {
        list.go_to_page(page);
        println!("--- Página {}/{} ---", list.page(), list.total_pages());
        for card in list.visible_cards() {
            let b = card.budget();
            println!(
                "[{}] {} {} -> {} | {} | {}",
                b.id,
                b.status.badge(),
                b.origem,
                b.destino,
                format_datetime_pt_br(&b.data_hora_viagem),
                format_brl(&b.preco_viagem)
            );
        }
    }
    Ok(())
}

async fn trips(state: &AppState) -> anyhow::Result<()> {
    for trip in state.budgets.trips().await? {
        println!(
            "{} {} | {} -> {} | {} | {} | {} | {}",
            trip.dia, trip.hora, trip.origem, trip.destino, trip.carro, trip.motorista, trip.cliente, trip.preco
        );
    }
    Ok(())
}

async fn trip_receipt(state: &AppState, budget_id: &str) -> anyhow::Result<()> {
    let mut list = BudgetList::new();
    list.refresh(&state.budgets).await?;
    let clients = state.clients.list().await?;

    let card = list
        .card_mut(budget_id)
        .with_context(|| format!("Orçamento {budget_id} não encontrado"))?;
    let path = card
        .download_trip_receipt(&clients, &state.documents, &state.config.output_dir)
        .await?;
    println!("Comprovante salvo em {}", path.display());
    Ok(())
}

async fn payroll(state: &AppState, driver_id: &str) -> anyhow::Result<()> {
    let mut grid: DataGrid<Driver, RestResource<Driver>> = DataGrid::new(state.drivers.clone());
    grid.refresh().await?;

    let path = grid
        .generate_payroll(driver_id, Local::now().date_naive(), &state.documents, &state.config.output_dir)
        .await?;
    println!("Holerite salvo em {}", path.display());
    Ok(())
}

async fn monitor(state: &AppState) -> anyhow::Result<()> {
    let handle = state.spawn_connectivity_monitor()?;
    let mut rx = handle.subscribe();
    tracing::info!("📡 Monitorando conectividade (Ctrl+C para sair)");

    loop {
        tokio::select! {
            changed = rx.changed() => {
                changed?;
                let current = *rx.borrow_and_update();
                match banner(current) {
                    Some(text) => println!("{text}"),
                    None => println!("✅ Conectado"),
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
