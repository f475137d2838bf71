use clap::Parser;
use mozestuda_api::{names, store::Store, utils, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The port to listen on.
    #[arg(short, long, env, default_value_t = 3000)]
    port: u16,

    /// Directory holding the JSON data files.
    #[arg(long, env, default_value = "data")]
    data_dir: std::path::PathBuf,

    /// Directory where uploaded files are stored.
    #[arg(long, env, default_value = "uploads")]
    uploads_dir: std::path::PathBuf,

    /// Public base URL used to build upload links.
    #[arg(long, env, default_value = "http://localhost:3000")]
    base_url: String,

    /// Include respostaCorreta in question responses instead of stripping it.
    #[arg(long, env, default_value_t = false)]
    include_answers: bool,

    /// Upper bound on the number of questions returned per request.
    #[arg(long, env, default_value_t = names::MAX_LIMIT)]
    max_limit: usize,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,mozestuda_api=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let store = Store::new(&args.data_dir).await?;
    let state = AppState {
        store,
        uploads_dir: args.uploads_dir,
        base_url: args.base_url.trim_end_matches('/').to_owned(),
        include_answers: args.include_answers,
        max_limit: args.max_limit,
    };
    let routes = mozestuda_api::router(state);

    let address = std::net::SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("mozestuda-api v{} listening on {address}", utils::VERSION);
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, routes).await?;

    Ok(())
}
