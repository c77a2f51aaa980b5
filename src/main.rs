// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod db;
mod error;
mod models;
mod pagination;
mod services;
mod state;
mod templates;
mod web;

// --- Imports ---
use crate::{
    config::Config,
    services::{sector_service, user_service},
    state::AppState,
    web::{mw_auth::PublicScheme, mw_sector::SectorAllowList},
};
use axum::{serve, Extension};
use clap::{Parser, Subcommand};
use time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "transporte")]
#[command(about = "Intranet de requisições de transporte")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Inicia o servidor web (padrão)")]
    Serve,

    #[command(about = "Cria um utilizador com a senha em hash bcrypt")]
    CreateUser {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TRANSPORTE_SENHA", hide_env_values = true)]
        senha: String,
        #[arg(long)]
        setor: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env antes do clap, para `TRANSPORTE_SENHA` e afins
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "transporte=debug,tower_http=info,sqlx=warn,tower_sessions=info".into()
        }))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().map_err(|e| {
        tracing::error!("❌ Configuração inválida: {}", e);
        e
    })?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::CreateUser { nome, email, senha, setor } => {
            let db_pool = db::create_db_pool(&config.database_url).await?;
            let id = user_service::create_user(&db_pool, &nome, &email, &senha, &setor).await?;
            println!("Utilizador '{}' criado (id_user = {}).", email, id);
            Ok(())
        }
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("🚀 Iniciando servidor de requisições de transporte...");

    // Validar o segredo antes de tocar na DB
    let secret = config.require_session_secret()?;
    let key = Key::try_from(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("SESSION_SECRET inválida: {}", e))?;

    // --- Configuração da Base de Dados ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };

    // --- Configuração das Sessões ---
    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
    session_store.migrate().await?;

    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.session_secure)
        .with_http_only(true)
        .with_signed(key)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));
    tracing::info!("🔑 Camada de sessão configurada.");

    // --- Setores que podem submeter requisições ---
    let request_sectors = SectorAllowList::new(sector_service::list_all_sectors(&db_pool).await);
    tracing::info!("Setores com acesso a requisições: {:?}", request_sectors.sectors());

    let app_state = AppState {
        db_pool,
        request_sectors,
    };

    // --- Listener ---
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("📡 Servidor escutando em http://{}", config.bind_addr);

    let app = web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer)
            .layer(Extension(PublicScheme::from_secure(config.session_secure))),
    );

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
