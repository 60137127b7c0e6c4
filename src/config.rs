use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub journal: JournalConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory the static frontend is served from.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JournalConfig {
    /// How many recent journal entries are scanned when discovering invocations.
    #[serde(default = "default_scan_lines")]
    pub scan_lines: u32,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    5173
}

fn default_public_dir() -> String {
    "public".into()
}

fn default_scan_lines() -> u32 {
    20_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            scan_lines: default_scan_lines(),
        }
    }
}

impl AppConfig {
    /// Load from CONFIG_FILE (default ./config.toml). A missing file yields
    /// the defaults; the tool runs without any configuration.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("failed to read {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            !self.server.public_dir.is_empty(),
            "server.public_dir must be non-empty"
        );
        anyhow::ensure!(
            self.journal.scan_lines > 0,
            "journal.scan_lines must be > 0, got {}",
            self.journal.scan_lines
        );
        Ok(())
    }
}
