use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use tenki_bot::application::errors::BotError;
use tenki_bot::application::messaging::MessageDispatcher;
use tenki_bot::domain::traits::ReplyTransport;
use tenki_bot::infrastructure::adapters::{ConsoleAdapter, LineAdapter};
use tenki_bot::infrastructure::config::Config;
use tenki_bot::infrastructure::forecast::JmaForecastClient;
use tenki_bot::infrastructure::server::{self, AppState};

#[derive(Parser)]
#[command(name = "tenki-bot")]
#[command(about = "LINE echo bot with JMA weather answers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Listen port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Run,
    /// Chat with the bot on stdin (dev mode)
    Console,
    /// Print the reply for a single message
    Ask {
        /// Message text
        text: String,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            println!("tenki-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
        command => {
            let mut config = load_config(&cli.config);
            if let Some(port) = cli.port {
                config.server.port = port;
            }
            block_on(run_command(command, config))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn block_on<F: std::future::Future<Output = Result<(), BotError>>>(future: F) -> Result<(), BotError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(future)
}

fn load_config(path: &str) -> Config {
    if std::path::Path::new(path).exists() {
        Config::load(path)
            .map(Config::with_env)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            })
    } else {
        Config::load_env()
    }
}

fn init_config(path: &str) -> Result<(), BotError> {
    if std::path::Path::new(path).exists() {
        return Err(BotError::Internal(format!("{} already exists", path)));
    }
    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)
        .map_err(|e| BotError::Internal(format!("Failed to write {}: {}", path, e)))?;
    println!("Wrote default config to {}", path);
    Ok(())
}

fn build_dispatcher(config: &Config) -> Result<MessageDispatcher, BotError> {
    let regions = Arc::new(config.region_table());
    tracing::info!("Loaded {} regions", regions.len());

    let source = JmaForecastClient::from_config(&config.forecast)
        .map_err(|e| BotError::Network(e.to_string()))?;

    Ok(MessageDispatcher::with_source(regions, Arc::new(source)))
}

async fn run_command(command: Commands, config: Config) -> Result<(), BotError> {
    let dispatcher = build_dispatcher(&config)?;

    match command {
        Commands::Run => run_server(config, dispatcher).await,
        Commands::Console => run_console(dispatcher).await,
        Commands::Ask { text } => {
            println!("{}", dispatcher.handle_text(&text).await);
            Ok(())
        }
        Commands::Version | Commands::InitConfig => Ok(()),
    }
}

async fn run_server(config: Config, dispatcher: MessageDispatcher) -> Result<(), BotError> {
    let credentials = config.line_credentials()?;
    tracing::info!("Starting {}", config.bot.name);

    let transport = LineAdapter::new(credentials.channel_access_token, &config.line.api_base)
        .with_name(&config.bot.name);

    let state = AppState {
        dispatcher,
        transport: Arc::new(transport),
        channel_secret: credentials.channel_secret,
    };

    server::serve(&config.bind_addr(), state).await
}

async fn run_console(dispatcher: MessageDispatcher) -> Result<(), BotError> {
    let bot = ConsoleAdapter::new();
    tracing::info!("Starting console bot (dev mode), {}", bot.bot_info().name);

    while let Some(line) = bot.read_line("> ").await {
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }
        let reply = dispatcher.handle_text(&line).await;
        bot.reply("console", &reply).await?;
    }

    Ok(())
}
