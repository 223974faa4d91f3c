use anyhow::{Context, Result, bail};
use clap::Parser;

use ambulance_api::config::TokenSecret;
use ambulance_api::services::auth::TokenIssuer;

/// Mint an access token the API will accept, for local development.
///
/// The token is HS256-signed with the same secret the API verifies with and
/// carries `{id, iat, exp}`. Send it verbatim as the `authorization` header
/// (no `Bearer ` prefix).
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// User id to embed as the `id` claim
    #[arg(long)]
    id: String,

    /// Signing secret. Default: TOKEN_SECRET from the environment / .env
    #[arg(long)]
    secret: Option<String>,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl: u64,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    iat: Option<i64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let raw_secret = match args.secret {
        Some(s) => s,
        None => std::env::var("TOKEN_SECRET")
            .context("TOKEN_SECRET is not set and --secret was not given")?,
    };
    let Some(secret) = TokenSecret::new(raw_secret) else {
        bail!("secret must not be empty");
    };

    let issuer = TokenIssuer::new(&secret, args.ttl);
    let token = match args.iat {
        Some(iat) => issuer.issue_at(&args.id, iat)?,
        None => issuer.issue(&args.id)?,
    };

    println!("{}", token);
    Ok(())
}
