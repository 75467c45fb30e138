// src/main.rs — reprompt entry point

use clap::Parser;

use reprompt::cli::Cli;
use reprompt::core::types::RunStatus;
use reprompt::infra::config::Config;
use reprompt::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    config.validate()?;

    let initial_prompt = read_prompt(&cli)?;

    let outcome = reprompt::cli::run::run_refinement(
        &initial_prompt,
        &config,
        cli.model.as_deref(),
        cli.meta_model.as_deref(),
        cli.iterate,
        cli.rubric.as_deref(),
        cli.quiet,
    )
    .await?;

    // Exit codes: 0 rubric satisfied, 1 service failure, 2 budget exhausted.
    Ok(match outcome.status {
        RunStatus::Succeeded => 0,
        RunStatus::Exhausted => 2,
        RunStatus::Failed(e) => {
            eprintln!("error: generation failed: {e}");
            1
        }
    })
}

fn read_prompt(cli: &Cli) -> anyhow::Result<String> {
    if cli.stdin {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        let buf = buf.trim().to_string();
        if buf.is_empty() {
            anyhow::bail!("stdin was empty");
        }
        return Ok(buf);
    }

    let joined = cli.prompt.join(" ");
    if joined.trim().is_empty() {
        anyhow::bail!("no prompt given; pass it as arguments or use --stdin");
    }
    Ok(joined)
}
