use clap::Parser;
use forest_auth::AuthConfig;
use forest_auth::Cost;
use std::time::Duration;

/// Command line and environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "forest", about = "Social network REST backend")]
pub struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,
    /// PostgreSQL connection string.
    #[arg(long, env = "DB_URL")]
    pub db: String,
    /// HTTP worker threads.
    #[arg(long, default_value_t = 6)]
    pub workers: usize,
    /// Lifetime of a new session, in hours.
    #[arg(long, default_value_t = 168)]
    pub session_hours: u64,
    /// Deadline for each database call, in seconds.
    #[arg(long, default_value_t = 45)]
    pub timeout_secs: u64,
    /// Argon2 memory cost in KiB.
    #[arg(long)]
    pub hash_memory_kib: Option<u32>,
    /// Argon2 iteration count.
    #[arg(long)]
    pub hash_iterations: Option<u32>,
    /// Argon2 lanes.
    #[arg(long)]
    pub hash_parallelism: Option<u32>,
    /// Accept sessions past their expiry.
    #[arg(long)]
    pub lenient_expiry: bool,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
    pub fn auth(&self) -> AuthConfig {
        let base = Cost::default();
        AuthConfig {
            ttl: Duration::from_secs(self.session_hours * 60 * 60),
            timeout: self.timeout(),
            cost: Cost {
                memory: self.hash_memory_kib.unwrap_or(base.memory),
                iterations: self.hash_iterations.unwrap_or(base.iterations),
                parallelism: self.hash_parallelism.unwrap_or(base.parallelism),
            },
            strict_expiry: !self.lenient_expiry,
        }
    }
}
