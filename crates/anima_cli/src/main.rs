use anima_brain::{Brain, PipelineResult};
use anima_core::{AnimaConfig, InputContext, StoreBackend};
use clap::Parser;
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "anima.toml")]
    config: String,

    /// Store backend (memory, sqlite, json_dir); overrides the config file
    #[arg(long, env = "ANIMA_STORE_BACKEND")]
    store: Option<StoreBackend>,

    /// SQLite file or JSON directory; overrides the config file
    #[arg(long, env = "ANIMA_STORE_PATH")]
    path: Option<String>,

    /// Role of the person talking, e.g. "mamãe"
    #[arg(short, long)]
    role: Option<String>,

    /// Identifier of the person talking
    #[arg(long, default_value = "terminal")]
    participant: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut config = AnimaConfig::load_or_default(&args.config);
    if let Some(backend) = args.store {
        config.store.backend = backend;
    }
    if let Some(path) = args.path {
        config.store.path = path;
    }

    info!("Starting Anima with {:?} store at {}", config.store.backend, config.store.path);
    let brain = Brain::from_config(&config).await?;
    let mut role = args.role;

    println!("Anima online. Type 'quit' to exit, '/help' for commands.");
    prompt()?;

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }
        if trimmed.is_empty() {
            prompt()?;
            continue;
        }

        if let Some(command) = trimmed.strip_prefix('/') {
            let mut parts = command.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or("");
            let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());
            match name {
                "state" => {
                    let global = brain.global_state();
                    println!("{}", serde_json::to_string_pretty(&global)?);
                    println!("{}", global.describe_for_context());
                }
                "stats" => {
                    println!("{}", serde_json::to_string_pretty(&brain.stats())?);
                }
                "reset" => match arg {
                    Some(module) => match brain.reset_module(module).await? {
                        true => println!("Module '{}' reset.", module),
                        false => println!("No module named '{}'.", module),
                    },
                    None => {
                        brain.reset_all().await?;
                        println!("All modules reset.");
                    }
                },
                "flush" => {
                    let saved = brain.flush().await?;
                    println!("Saved {} modules.", saved);
                }
                "role" => {
                    role = arg.map(str::to_string);
                    println!("Role: {}", role.as_deref().unwrap_or("(none)"));
                }
                _ => {
                    println!("Commands: /state, /stats, /reset [module], /flush, /role [name], quit");
                }
            }
            prompt()?;
            continue;
        }

        let mut ctx = InputContext::default().with_participant(args.participant.as_str());
        if let Some(r) = &role {
            ctx = ctx.with_role(r.as_str());
        }

        match brain.submit(trimmed, ctx).await {
            Ok(result) => report(&result),
            Err(e) => {
                error!("Pass failed: {}", e);
                println!("\n[System Error]: {}\n", e);
            }
        }
        prompt()?;
    }

    brain.shutdown().await;
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn report(result: &PipelineResult) {
    println!();
    for module in &result.results {
        if let Some(error) = &module.error {
            println!("  ! {}: {}", module.module, error);
        }
        for insight in &module.emitted_insights {
            println!("  * {}: {}", insight.module, insight.text);
        }
    }
    let elevated: Vec<String> = result
        .global
        .most_elevated(3)
        .into_iter()
        .map(|(name, value)| format!("{}={:.2}", name, value))
        .collect();
    println!("  pass {} | {}", result.pass, elevated.join(" "));
    println!("  {}\n", result.global.describe_for_context());
}
