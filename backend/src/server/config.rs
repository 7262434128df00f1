//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use board::settings::BoardSettings;
use tracing::warn;

/// Shortest key material accepted for deriving the session key.
const MIN_KEY_BYTES: usize = 32;

/// Settings resolved into the values the server needs.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Resolve settings, reading the session key from disk.
    ///
    /// # Errors
    /// Fails when the key file is unreadable or too short and neither a
    /// debug build nor `allow_ephemeral_key` permits a generated key.
    pub fn from_settings(settings: &BoardSettings) -> io::Result<Self> {
        let key = load_session_key(settings)?;
        Ok(Self::new(
            key,
            settings.cookie_secure,
            SameSite::Lax,
            settings.bind_addr(),
        ))
    }
}

fn load_session_key(settings: &BoardSettings) -> io::Result<Key> {
    let key_path = settings.session_key_file();
    let failure = match std::fs::read(key_path) {
        Ok(bytes) if bytes.len() >= MIN_KEY_BYTES => return Ok(Key::derive_from(&bytes)),
        Ok(bytes) => format!(
            "session key at {} has {} bytes; at least {MIN_KEY_BYTES} required",
            key_path.display(),
            bytes.len()
        ),
        Err(e) => format!("failed to read session key at {}: {e}", key_path.display()),
    };

    if cfg!(debug_assertions) || settings.allow_ephemeral_key {
        warn!(path = %key_path.display(), reason = %failure, "using temporary session key (dev only)");
        Ok(Key::generate())
    } else {
        Err(io::Error::other(failure))
    }
}
