use anyhow::Context;

fn main() -> anyhow::Result<()> {
    stockelec_observability::init();

    let mut args = std::env::args().skip(1);
    let Some(batch_path) = args.next() else {
        anyhow::bail!("usage: stockelec <batch.json> [config.json]");
    };

    let config_raw = match args.next() {
        Some(path) => Some(std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?),
        None => {
            tracing::info!("no config file given; using defaults");
            None
        }
    };
    let config = stockelec_cli::load_config(config_raw.as_deref())?;

    let raw = std::fs::read_to_string(&batch_path).with_context(|| format!("reading {batch_path}"))?;
    let batch = stockelec_cli::parse_batch(&raw)?;
    let outcome = stockelec_cli::run_batch(&config, &batch, chrono::Utc::now())?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
