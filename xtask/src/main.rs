use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for viewstage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and the headless smoke run
    Ci,
    /// Check formatting of all crates
    Fmt,
    /// Lint all targets with warnings denied
    Clippy,
    /// Run the workspace test suite
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Drive a short headless session through viewstage-cli
    Smoke {
        #[arg(long, default_value = "120")]
        frames: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => {
            fmt()?;
            clippy()?;
            test()?;
            smoke(30)?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Smoke { frames } => smoke(frames)?,
    }

    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn smoke(frames: u64) -> Result<()> {
    let frames = frames.to_string();
    cargo(
        "smoke",
        &[
            "run",
            "-p",
            "viewstage-cli",
            "--",
            "simulate",
            "--frames",
            &frames,
            "--pointer",
            "400,300",
            "--picking",
        ],
    )
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> {step}: cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("spawning cargo for {step}"))?;
    if !status.success() {
        bail!("{step} failed ({status})");
    }
    Ok(())
}
