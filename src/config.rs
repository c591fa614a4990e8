use clap::Parser;

// CLI argument structure; every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "weathergate")]
#[command(about = "Rate-limited caching proxy for a weather API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Upstream weather API endpoint
    #[arg(
        long,
        env = "WEATHER_BASE_URL",
        default_value = "https://api.openweathermap.org/data/2.5/weather"
    )]
    pub weather_url: String,

    // Upstream API credential; absence fails weather requests, not startup
    #[arg(long, env = "WEATHER_API_KEY")]
    pub api_key: Option<String>,

    // Upstream call timeout in seconds
    #[arg(long, env = "WEATHER_TIMEOUT_SECONDS", default_value_t = 5)]
    pub upstream_timeout: u64,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT_REQUESTS", default_value_t = 30)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECONDS", default_value_t = 60)]
    pub rate_window: u64,
}
