use dindin_tui::{app, config, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // Stderr keeps log lines off the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(format!("dindin_tui={}", config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
