//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign and verify session tokens
    #[arg(long, env = "SESSION_SECRET")]
    pub session_secret: String,
}
