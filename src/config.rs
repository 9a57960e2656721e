use clap::Parser;

/// Runtime configuration; every flag has an environment fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "snapi", about = "Social network data API")]
pub struct Config {
    /// Redis connection URL.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Key prefix for all stored documents.
    #[arg(long, env = "SNAPI_PREFIX", default_value = "snapi")]
    pub prefix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let config = Config::parse_from(["snapi"]);
        assert_eq!(config.port, 3001);
        assert_eq!(config.prefix, "snapi");
    }
}
