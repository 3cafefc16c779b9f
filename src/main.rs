use clap::Parser;
use imgseek::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "imgseek", about = "Search and browse Pixabay images in the terminal")]
struct Args {
    /// Search for this query on startup
    #[arg(short, long)]
    query: Option<String>,

    /// Images fetched per page
    #[arg(long)]
    per_page: Option<u32>,

    /// Pixabay API key (overrides PIXABAY_API_KEY and the config file)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = config::load_config();
    let cli = CliOverrides {
        per_page: args.per_page,
        api_key: args.api_key,
    };
    let fallback = config::ImgseekConfig::default();
    let resolved = config::resolve(loaded.as_ref().unwrap_or(&fallback), &cli);

    // Initialize file logger - writes to imgseek.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("imgseek.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Err(e) = &loaded {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "imgseek starting up (per_page={}, base_url={})",
        resolved.per_page,
        resolved.base_url
    );

    imgseek::tui::run(resolved, args.query)
}
