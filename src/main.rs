use comanda::{init_logger_with_file, Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    std::fs::create_dir_all(config.log_dir())?;
    init_logger_with_file(&config.log_level, config.log_dir().to_str());

    tracing::info!("Comanda server starting...");

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    server.run().await
}
