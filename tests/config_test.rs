use htmlform::config::Settings;
use htmlform::form::{ScriptFlavor, ScriptPlacement};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_render_settings_from_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let htmlform_toml = r#"
[render]
script_placement = "deferred"
script_flavor = "jquery_ui"
pretty = true
indent = 4
id_prefix = "f-"
form_action = "/save"
"#;
    fs::write(root.join("htmlform.toml"), htmlform_toml)?;

    let settings = Settings::from_root(root.to_str().unwrap())?;

    assert_eq!(settings.render.script_placement, ScriptPlacement::Deferred);
    assert_eq!(settings.render.script_flavor, ScriptFlavor::JqueryUi);
    assert!(settings.render.pretty);
    assert_eq!(settings.render.indent, 4);
    assert_eq!(settings.render.id_prefix, "f-");
    assert_eq!(settings.render.form_action.as_deref(), Some("/save"));
    assert_eq!(settings.render.form_method, "post");
    Ok(())
}

#[test]
fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;
    assert_eq!(settings.render.indent, 2);
    assert!(settings.render.emit_required);
    Ok(())
}

#[test]
fn test_invalid_settings_fail_validation() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("htmlform.toml"), "[render]\nform_method = \"put\"\n")?;

    let err = Settings::from_root(temp_dir.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("render.form_method"));
    Ok(())
}
