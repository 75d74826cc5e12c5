/// Default upload limit: 5MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Maximum request body size for uploads.
    pub max_upload_bytes: usize,
    /// Seconds to replenish one request of the per-IP quota on the analyze
    /// endpoint. Rate limiting is disabled when `None`.
    pub rate_limit_period_secs: Option<u64>,
    /// Requests a client may make before the quota applies.
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rate_limit_period_secs: None,
            rate_limit_burst: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|raw| {
                    raw.trim()
                        .parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a positive number"))
                        .and_then(|bytes| {
                            if bytes == 0 {
                                anyhow::bail!("MAX_UPLOAD_BYTES cannot be zero");
                            }
                            Ok(bytes)
                        })
                })
                .transpose()?
                .unwrap_or(defaults.max_upload_bytes),
            rate_limit_period_secs: std::env::var("RATE_LIMIT_PERIOD_SECS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .map_err(|_| {
                            anyhow::anyhow!("RATE_LIMIT_PERIOD_SECS must be a positive number")
                        })
                        .and_then(|period| {
                            if period == 0 {
                                anyhow::bail!("RATE_LIMIT_PERIOD_SECS cannot be zero");
                            }
                            Ok(period)
                        })
                })
                .transpose()?,
            rate_limit_burst: std::env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| defaults.rate_limit_burst.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST must be a valid number"))
                .and_then(|burst: u32| {
                    if burst == 0 {
                        anyhow::bail!("RATE_LIMIT_BURST cannot be zero");
                    }
                    Ok(burst)
                })?,
        };

        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Max upload bytes: {}", config.max_upload_bytes);
        match config.rate_limit_period_secs {
            Some(period) => tracing::info!(
                "Rate limiting enabled: 1 request per {}s per IP, burst of {}",
                period,
                config.rate_limit_burst
            ),
            None => tracing::info!("Rate limiting disabled"),
        }

        Ok(config)
    }
}
