use animagen::config::{Config, LlmConfig};
use animagen::llm::client::{LlmClient, OPENROUTER_URL};
use animagen::render::RenderConfig;
use animagen::server::{self, AppState};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "animagen",
    about = "Turn a natural-language prompt into a rendered Manim animation",
    version
)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: String,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Chat-completions endpoint URL
    #[arg(long, env = "OPENROUTER_API_URL", default_value = OPENROUTER_URL)]
    api_url: String,

    /// Model identifier
    #[arg(long, env = "ANIMAGEN_MODEL", default_value = "meta-llama/llama-3-70b-instruct")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.5)]
    temperature: f32,

    /// Root directory for rendered media (served under /media)
    #[arg(long, default_value = "media")]
    media_dir: PathBuf,

    /// Directory for per-request scratch scene files
    #[arg(long, default_value = "temp")]
    scratch_dir: PathBuf,

    /// Render timeout in seconds
    #[arg(long, default_value_t = 120)]
    render_timeout: u64,

    /// Renderer executable
    #[arg(long, default_value = "manim")]
    manim_bin: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config {
        bind_addr: args.bind,
        llm: LlmConfig {
            api_key: args.api_key,
            api_url: args.api_url,
            model: args.model,
            temperature: args.temperature,
        },
        render: RenderConfig {
            manim_bin: args.manim_bin,
            media_dir: args.media_dir,
            scratch_dir: args.scratch_dir,
            timeout: Duration::from_secs(args.render_timeout),
        },
    };

    tokio::fs::create_dir_all(&config.render.media_dir).await?;

    let llm = LlmClient::new(config.llm.clone());
    let state = Arc::new(AppState { llm, config });
    server::run(state).await
}
