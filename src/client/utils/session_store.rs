use keyring::Entry;

use crate::client::services::api_client::SessionUser;

const SERVICE: &str = "ritrovo_app";
const USER: &str = "ritrovo_session";

/// Persist the logged-in profile so the identity survives restarts.
///
/// The profile goes into the OS keyring as JSON. When the keyring is
/// unavailable, a plain-file fallback can be enabled explicitly with
/// `KEYRING_FALLBACK=true`; nothing is written to disk silently.
pub fn save_session(user: &SessionUser) -> anyhow::Result<()> {
    let payload = serde_json::to_string(user)?;
    let entry = Entry::new(SERVICE, USER);
    match entry.set_password(&payload) {
        Ok(()) => Ok(()),
        Err(_e) => {
            let allow_fallback = std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true";
            if allow_fallback {
                let path = fallback_path();
                if let Some(parent) = path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                std::fs::write(&path, payload)?;
                log::warn!("keyring unavailable, persisted session to fallback file");
                Ok(())
            } else {
                Err(anyhow::anyhow!(
                    "keyring unavailable and file fallback disabled"
                ))
            }
        }
    }
}

/// Load the cached profile, if any. Read once at startup; the cached
/// identity still gets revalidated against the server before use.
pub fn load_session() -> Option<SessionUser> {
    let entry = Entry::new(SERVICE, USER);
    let payload = match entry.get_password() {
        Ok(p) if !p.trim().is_empty() => Some(p),
        Ok(_) => None,
        Err(_e) => {
            let allow_fallback = std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true";
            if allow_fallback {
                std::fs::read_to_string(fallback_path())
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            } else {
                None
            }
        }
    }?;
    match serde_json::from_str(&payload) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("discarding unreadable cached session: {}", e);
            None
        }
    }
}

pub fn clear_session() -> anyhow::Result<()> {
    let entry = Entry::new(SERVICE, USER);
    let _ = entry.delete_password();
    let allow_fallback = std::env::var("KEYRING_FALLBACK").unwrap_or_default() == "true";
    if allow_fallback {
        let path = fallback_path();
        if path.exists() {
            let _ = std::fs::remove_file(&path);
        }
    }
    Ok(())
}

fn fallback_path() -> std::path::PathBuf {
    std::path::Path::new("data").join("session.json")
}
