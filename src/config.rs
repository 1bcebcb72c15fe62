use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::html::{HtmlRenderer, RenderOptions};
use crate::pretty::{Indenter, PostFormat, Verbatim};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Widest indent honoured from a config file.
pub const MAX_INDENT: usize = 16;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub code: CodeConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 2,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CodeConfig {
    pub language_class: bool,
}

impl Config {
    /// The config bundled with the crate. `build.rs` checks that it parses.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return the compiled default if it is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::compiled_default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}");
                log::warn!("Falling back to the default config");
                Self::compiled_default()
            }
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            code_language_class: self.code.language_class,
        }
    }

    pub fn renderer(&self) -> HtmlRenderer {
        HtmlRenderer::new(self.render_options())
    }

    /// The post-format step selected by `[output]`.
    pub fn post_formatter(&self) -> Box<dyn PostFormat> {
        if self.output.pretty {
            Box::new(Indenter::new(self.output.indent.min(MAX_INDENT)))
        } else {
            Box::new(Verbatim)
        }
    }
}
