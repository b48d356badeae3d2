use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::cli::Cli;
use crate::form::script::{ScriptFlavor, ScriptPlacement};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub render: RenderSettings,
}

/// Options controlling the shape of rendered forms
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    /// Inline `<script>` siblings, or deferred to the page assembler
    pub script_placement: ScriptPlacement,
    /// Client-side library targeted by generated scripts
    pub script_flavor: ScriptFlavor,
    /// Pretty-print serialized HTML
    pub pretty: bool,
    /// Spaces per nesting level when pretty-printing
    pub indent: usize,
    /// Prepended to generated element ids
    pub id_prefix: String,
    /// `method` attribute of the `<form>` element
    pub form_method: String,
    /// Optional `action` attribute of the `<form>` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_action: Option<String>,
    /// Mark controls of non-nullable fields `required`
    pub emit_required: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            script_placement: ScriptPlacement::default(),
            script_flavor: ScriptFlavor::default(),
            pretty: false,
            indent: default_indent(),
            id_prefix: String::new(),
            form_method: default_form_method(),
            form_action: None,
            emit_required: true,
        }
    }
}

fn default_indent() -> usize {
    2
}

fn default_form_method() -> String {
    "post".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, then env vars, then CLI flags)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Self::builder(File::from(cli.config.clone()).required(false))?.build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load `htmlform.{toml,yaml,json}` from `root`, if present
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("htmlform");
        let s = Self::builder(File::from(config_path).required(false))?.build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn builder<S>(file: S) -> Result<config::ConfigBuilder<config::builder::DefaultState>, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .set_default("render.indent", default_indent() as i64)?
            .set_default("render.form_method", default_form_method())?
            .add_source(file)
            .add_source(
                Environment::with_prefix("HTMLFORM")
                    .separator("__")
                    .try_parsing(true),
            ))
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.pretty {
            self.render.pretty = true;
        }
        if cli.deferred_scripts {
            self.render.script_placement = ScriptPlacement::Deferred;
        }
        if let Some(flavor) = cli.flavor {
            self.render.script_flavor = flavor;
        }
        if let Some(prefix) = &cli.id_prefix {
            self.render.id_prefix = prefix.clone();
        }
    }
}
