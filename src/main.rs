// src/main.rs

use cmdstub::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("cmdstub error: {err:#}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let output = run(args).await?;
    if let Some(output) = output {
        println!("{output}");
    }
    Ok(())
}
