use clap::Parser;
use std::path::PathBuf;

use crate::form::script::ScriptFlavor;

/// Render a typed form document as HTML
#[derive(Parser, Debug, Clone)]
#[command(name = "htmlform", version, about, long_about = None)]
pub struct Cli {
    /// Form document (JSON or YAML) holding the schema and the instance
    pub document: PathBuf,

    /// Path to the configuration file
    #[arg(short, long, env = "HTMLFORM_CONFIG", default_value = "htmlform.toml")]
    pub config: PathBuf,

    /// Pretty-print the generated HTML
    #[arg(long)]
    pub pretty: bool,

    /// Collect scripts after the form instead of placing them inline
    #[arg(long)]
    pub deferred_scripts: bool,

    /// Script flavor: vanilla or jquery-ui
    #[arg(long, env = "HTMLFORM_FLAVOR")]
    pub flavor: Option<ScriptFlavor>,

    /// Prefix for generated element ids
    #[arg(long)]
    pub id_prefix: Option<String>,
}
