use std::time::Duration;

use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::backend::Variant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Backend contract used by the widget
    #[arg(long, env = "CHAT_VARIANT", value_enum)]
    pub variant: Option<Variant>,

    /// Remote backend the widget talks to (in-process when unset)
    #[arg(long, env = "CHAT_BACKEND_URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the chat page and the chat API (default)
    Serve,
    /// Chat from the terminal against a running backend
    Chat {
        /// Send a single message and exit
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub widget: WidgetConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub request_timeout_secs: u64,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub variant: Variant,
    #[serde(default)]
    pub backend_url: Option<String>,
    pub avatar_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub history_limit: usize,
    pub idle_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl SessionConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl WidgetConfig {
    /// Base URL the terminal client should talk to.
    #[must_use]
    pub fn remote_base_url(&self, server: &ServerConfig) -> String {
        self.backend_url.clone().unwrap_or_else(|| {
            let host = if server.host == "0.0.0.0" {
                "127.0.0.1"
            } else {
                server.host.as_str()
            };
            format!("http://{host}:{}", server.port)
        })
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Layer defaults, config file, `IEUM_` environment and CLI flags.
    ///
    /// Priority: CLI flag (or its env var) > `IEUM_*` env > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("server.static_dir", "static")?
            .set_default("widget.variant", Variant::default().as_str())?
            .set_default("widget.avatar_path", "/static/assets/images/avatar.png")?
            .set_default("session.history_limit", 3)?
            .set_default("session.idle_timeout_secs", 30 * 60)?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. IEUM_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("IEUM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(variant) = cli.variant {
            builder = builder.set_override("widget.variant", variant.as_str())?;
        }
        if let Some(url) = &cli.backend_url {
            builder = builder.set_override("widget.backend_url", url.as_str())?;
        }

        builder.build()?.try_deserialize()
    }
}
