use anyhow::{Context, Result};

pub const TOKEN_ENV: &str = "GOGS_TOKEN";

const KEYRING_SERVICE: &str = "gogs-branch";

/// Where a token is kept between runs, and how a fresh one is asked for.
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<bool>;
    fn ask(&self) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Env,
    ConfigFile,
    Keyring,
    Prompt,
}

impl TokenSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Env => TOKEN_ENV,
            Self::ConfigFile => "config file",
            Self::Keyring => "keyring",
            Self::Prompt => "prompt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    pub value: String,
    pub source: TokenSource,
}

/// Picks the token for this run: `GOGS_TOKEN`, then the config file `token`,
/// then the stored token. Only a prompted token is written back to the store.
pub fn resolve_token<F, S>(lookup: F, file_token: Option<&str>, store: &S) -> Result<ResolvedToken>
where
    F: Fn(&str) -> Option<String>,
    S: TokenStore + ?Sized,
{
    let plain = lookup(TOKEN_ENV)
        .and_then(|value| normalize_token(&value).map(|value| (value, TokenSource::Env)))
        .or_else(|| {
            file_token
                .and_then(normalize_token)
                .map(|value| (value, TokenSource::ConfigFile))
        });
    if let Some((value, source)) = plain {
        return Ok(ResolvedToken { value, source });
    }

    if let Some(value) = store.load()?.as_deref().and_then(normalize_token) {
        return Ok(ResolvedToken {
            value,
            source: TokenSource::Keyring,
        });
    }

    let value = normalize_token(&store.ask()?).context("Token cannot be empty")?;
    store.save(&value)?;
    Ok(ResolvedToken {
        value,
        source: TokenSource::Prompt,
    })
}

/// OS keyring entry keyed by server URL, with a terminal prompt for new tokens.
pub struct KeyringStore {
    server: String,
}

impl KeyringStore {
    pub fn new(server: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, &self.server)
            .context("Failed to initialize keyring entry")
    }
}

impl TokenStore for KeyringStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    fn ask(&self) -> Result<String> {
        let prompt = format!("Paste a Gogs access token for {}: ", self.server);
        Ok(rpassword::prompt_password(prompt)?)
    }
}

fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
