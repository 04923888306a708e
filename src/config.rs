use crate::gate::GatePolicy;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "lmsd", version, about = "LMS dashboard daemon (JSON lines over stdin/stdout)")]
pub struct Config {
    /// Simulated latency applied to deferred mutations.
    #[arg(long, env = "LMSD_DELAY_MS", default_value_t = 300)]
    pub delay_ms: u64,

    /// tracing filter directive, e.g. `info` or `lmsd=debug`.
    #[arg(long, env = "LMSD_LOG", default_value = "warn")]
    pub log: String,

    /// Start with empty collections instead of the seed data.
    #[arg(long, env = "LMSD_EMPTY")]
    pub empty: bool,

    /// Redirect session-less requests for role-scoped routes to the login page.
    #[arg(long, env = "LMSD_REQUIRE_SESSION")]
    pub require_session: bool,
}

impl Config {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn gate_policy(&self) -> GatePolicy {
        GatePolicy {
            require_session: self.require_session,
        }
    }
}
