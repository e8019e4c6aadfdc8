//! Ponto de entrada CLI do solarmap

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use solarmap::cli::{self, Commands};

// Carregar .env na inicialização
fn load_env() {
    // Procurar .env no diretório corrente ou no do binário
    if dotenvy::dotenv().is_err() {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Pipeline de potencial solar por edificação (São Luís)
#[derive(Parser)]
#[command(name = "solarmap")]
#[command(author, version)]
#[command(about = "Reprojeta, vincula e agrega o potencial solar por edificação")]
struct Cli {
    /// Aumentar a verbosidade (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Modo silencioso
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Carregar .env antes de tudo
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Build {
            config,
            geojson,
            tabular,
            output,
            bairros,
            metric,
            min_value,
            max_value,
        } => {
            info!(config = %config, output = %output.display(), "Executando o pipeline");
            let criteria = solarmap::filter::FilterCriteria {
                bairros,
                metric,
                min_value,
                max_value,
            };
            cli::cmd_build(
                &config,
                geojson.as_deref(),
                tabular.as_deref(),
                &output,
                &criteria,
            )
            .await?;
        }
        Commands::Check {
            config,
            geojson,
            tabular,
        } => {
            info!(config = %config, "Validando as entradas");
            cli::cmd_check(&config, geojson.as_deref(), tabular.as_deref()).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
