use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use htmlform::adapters::document::FormDocument;
use htmlform::cli::Cli;
use htmlform::config::Settings;
use htmlform::domain::markup::Element;
use htmlform::form::FormRenderer;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the rendered HTML
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    let document = FormDocument::from_path(&cli.document)?;
    let (root, instance) = document
        .build()
        .with_context(|| format!("Invalid form document {}", cli.document.display()))?;

    let renderer = FormRenderer::new(settings.render.clone())?;
    let name = root.type_name().to_string();
    let rendered = renderer.render_named(&root, &name, &instance)?;

    let html = if settings.render.pretty {
        rendered.to_pretty_html(settings.render.indent)
    } else {
        rendered.to_html()
    };
    println!("{}", html);

    for fragment in &rendered.scripts {
        tracing::debug!(target_id = %fragment.target_id, "emitting deferred script");
        println!("{}", Element::script(fragment.body.as_str()).to_html());
    }

    tracing::info!(
        document = %cli.document.display(),
        deferred_scripts = rendered.scripts.len(),
        "form rendered"
    );
    Ok(())
}
