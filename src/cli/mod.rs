// src/cli/mod.rs — CLI definition (clap derive)

pub mod progress;
pub mod run;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "reprompt",
    about = "Refine a prompt until the model's output satisfies a rubric",
    version,
    after_help = "EXAMPLE:\n  reprompt -r brief.toml \"Write a market research brief for entering the North American smart-wearables market. Make it useful for a Product Manager.\""
)]
pub struct Cli {
    /// Initial prompt for the task model
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,

    /// Model for the task role
    #[arg(short, long)]
    pub model: Option<String>,

    /// Model for the meta (prompt-rewriting) role
    #[arg(long)]
    pub meta_model: Option<String>,

    /// Max refinement iterations
    #[arg(short, long)]
    pub iterate: Option<u32>,

    /// Rubric file (TOML); the built-in market-brief rubric when omitted
    #[arg(short, long)]
    pub rubric: Option<String>,

    /// Suppress progress output (only emit the final text)
    #[arg(long)]
    pub quiet: bool,

    /// Read the prompt from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<String>,
}
