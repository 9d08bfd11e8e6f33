use anyhow::{Context, Result};
use pal_crypto::{
    base64_decode, FingerprintParams, MAX_SESSION_TOKEN_LIFETIME_SECONDS, MIN_SIGNING_KEY_SIZE,
};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Transport peers allowed to supply the client address in `x-real-ip`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrustedProxies {
    /// IPv4 `127.0.0.0/8` and IPv6 `::1`
    #[default]
    Loopback,
    /// Exactly these addresses
    List(Vec<IpAddr>),
    /// Never read forwarding headers
    None,
}

impl TrustedProxies {
    /// Whether a direct peer address is a trusted proxy hop
    ///
    /// IPv4-mapped peers (`::ffff:127.0.0.1` on a dual-stack socket) are
    /// compared as their IPv4 form.
    pub fn is_trusted(&self, peer: IpAddr) -> bool {
        let peer = peer.to_canonical();
        match self {
            TrustedProxies::Loopback => peer.is_loopback(),
            TrustedProxies::List(addrs) => addrs.contains(&peer),
            TrustedProxies::None => false,
        }
    }
}

impl FromStr for TrustedProxies {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "loopback" => Ok(TrustedProxies::Loopback),
            "none" => Ok(TrustedProxies::None),
            list => {
                let addrs = list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        s.parse::<IpAddr>()
                            .map(|addr| addr.to_canonical())
                            .with_context(|| format!("Invalid trusted proxy address: {}", s))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(TrustedProxies::List(addrs))
            }
        }
    }
}

impl fmt::Display for TrustedProxies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustedProxies::Loopback => write!(f, "loopback"),
            TrustedProxies::None => write!(f, "none"),
            TrustedProxies::List(addrs) => {
                let joined: Vec<String> = addrs.iter().map(ToString::to_string).collect();
                write!(f, "{}", joined.join(","))
            }
        }
    }
}

/// Server configuration
#[derive(Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// Path to RocksDB database
    pub database_path: PathBuf,

    /// HMAC key for session tokens
    pub jwt_key: Zeroizing<Vec<u8>>,

    /// JWT issuer
    pub jwt_issuer: String,

    /// JWT audience
    pub jwt_audience: String,

    /// Session token lifetime (seconds)
    pub token_lifetime: u64,

    /// Peers whose `x-real-ip` header is honored
    pub trusted_proxies: TrustedProxies,

    /// PBKDF2 settings for address fingerprints
    pub fingerprint: FingerprintParams,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_address = var("BIND_ADDRESS", "127.0.0.1:8080")
            .parse()
            .context("BIND_ADDRESS must be a socket address")?;

        let database_path = var("DATABASE_PATH", "./data/pal.db").into();

        let jwt_key = {
            let encoded = lookup("JWT_KEY").context("JWT_KEY environment variable required")?;
            let bytes = Zeroizing::new(base64_decode(&encoded).context("JWT_KEY must be base64")?);
            if bytes.len() < MIN_SIGNING_KEY_SIZE {
                anyhow::bail!("JWT_KEY must decode to at least {} bytes", MIN_SIGNING_KEY_SIZE);
            }
            bytes
        };

        let jwt_issuer = var("JWT_ISSUER", "pal-server");
        let jwt_audience = var("JWT_AUDIENCE", "pal-client");

        let token_lifetime: u64 = var("TOKEN_LIFETIME_SECONDS", "86400") // 24 hours
            .parse()
            .context("TOKEN_LIFETIME_SECONDS must be an integer")?;
        if token_lifetime > MAX_SESSION_TOKEN_LIFETIME_SECONDS {
            anyhow::bail!(
                "TOKEN_LIFETIME_SECONDS must not exceed {}",
                MAX_SESSION_TOKEN_LIFETIME_SECONDS
            );
        }

        let trusted_proxies = var("TRUSTED_PROXIES", "loopback").parse()?;

        let fingerprint = FingerprintParams {
            prf: var("FINGERPRINT_PRF", "sha1").parse()?,
            iterations: var("FINGERPRINT_ITERATIONS", "10000")
                .parse()
                .context("FINGERPRINT_ITERATIONS must be an integer")?,
            ..FingerprintParams::default()
        };

        Ok(Config {
            bind_address,
            database_path,
            jwt_key,
            jwt_issuer,
            jwt_audience,
            token_lifetime,
            trusted_proxies,
            fingerprint,
        })
    }
}
