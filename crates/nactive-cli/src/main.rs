mod cli;
mod commands;
mod config;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use nactive_auth::session::SessionStore;
use nactive_client::{ApiClient, AuthGateway};

use cli::{
    AuditCommands, Cli, Commands, EncountersCommands, OutputFormat, PatientsCommands,
    PrescriptionsCommands,
};
use output::print_error;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("NACTIVE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let profile = &cli.profile;
    let format = resolve_format(&cli)?;

    // One session store for the whole process, shared by reference.
    let session = Arc::new(SessionStore::open(profile)?);

    match &cli.command {
        Commands::Login(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            let gateway = AuthGateway::new(&server, session);
            commands::auth::login(&gateway, args).await?;
        }
        Commands::Logout => {
            let server = config::resolve_server(&cli.server, profile)?;
            let gateway = AuthGateway::new(&server, session);
            commands::auth::logout(&gateway).await?;
        }
        Commands::Whoami => {
            commands::auth::whoami(&session, profile)?;
        }
        Commands::Patients(args) => {
            let client = make_client(&cli, session)?;
            match &args.command {
                PatientsCommands::List(list_args) => {
                    commands::patients::list(&client, list_args, format).await?;
                }
                PatientsCommands::Register(register_args) => {
                    commands::patients::register(&client, register_args, format).await?;
                }
                PatientsCommands::Records(records_args) => {
                    commands::patients::records(&client, records_args.id, format).await?;
                }
            }
        }
        Commands::Encounters(args) => {
            let client = make_client(&cli, session)?;
            match &args.command {
                EncountersCommands::Add(add_args) => {
                    commands::encounters::add(&client, add_args).await?;
                }
            }
        }
        Commands::Prescriptions(args) => {
            let client = make_client(&cli, session)?;
            match &args.command {
                PrescriptionsCommands::Add(add_args) => {
                    commands::prescriptions::add(&client, add_args).await?;
                }
            }
        }
        Commands::Audit(args) => {
            let client = make_client(&cli, session)?;
            match &args.command {
                AuditCommands::List => {
                    commands::audit::list(&client, format).await?;
                }
            }
        }
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                let cfg = config::load_profile(profile)?;
                println!("{}: {}", "Profile".cyan(), profile);
                println!(
                    "{}: {}",
                    "Server".cyan(),
                    cfg.server.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "{}: {}",
                    "Format".cyan(),
                    cfg.format.as_deref().unwrap_or("table")
                );
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = config::load_profile(profile)?;
                match set_args.key.as_str() {
                    "server" => cfg.server = Some(set_args.value.clone()),
                    "format" => cfg.format = Some(set_args.value.clone()),
                    other => {
                        anyhow::bail!("Unknown config key: {other}. Valid keys: server, format")
                    }
                }
                config::save_profile(profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
    }

    Ok(())
}

fn make_client(cli: &Cli, session: Arc<SessionStore>) -> Result<ApiClient> {
    let server = config::resolve_server(&cli.server, &cli.profile)?;
    Ok(ApiClient::new(&server, session).with_session_expired_hook(|| {
        print_error("Session expired. Log in again with: nactive login");
    }))
}

fn resolve_format(cli: &Cli) -> Result<OutputFormat> {
    if let Some(format) = cli.format {
        return Ok(format);
    }
    let cfg = config::load_profile(&cli.profile)?;
    Ok(match cfg.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    })
}
