use chrono::NaiveDate;
use htmlform::config::RenderSettings;
use htmlform::domain::instance::{Instance, RecordInstance};
use htmlform::domain::schema::{FieldSpec, FieldsetGroup, RecordSchema, TabGroup, TypeDescriptor};
use htmlform::form::{FormRenderer, RenderError, ScriptFlavor};

fn address() -> TypeDescriptor {
    TypeDescriptor::record(RecordSchema::new(
        "Address",
        vec![
            FieldSpec::new("street", TypeDescriptor::text().not_null()),
            FieldSpec::new("zip", TypeDescriptor::integer()),
        ],
    ))
}

fn person() -> TypeDescriptor {
    let contact = FieldsetGroup::new("Contact");
    let extra = TabGroup::with_id("Extra", "extra");
    TypeDescriptor::record(RecordSchema::new(
        "Person",
        vec![
            FieldSpec::new("name", TypeDescriptor::text()),
            FieldSpec::new("email", TypeDescriptor::text()).in_fieldset(&contact),
            FieldSpec::new("home", address()).in_fieldset(&contact),
            FieldSpec::new("born", TypeDescriptor::date()).in_tab(&extra),
            FieldSpec::new("vip", TypeDescriptor::boolean()).in_tab(&extra),
        ],
    ))
}

#[test]
fn test_render_person_document() -> anyhow::Result<()> {
    let value = RecordInstance::new()
        .with("name", "Arthur")
        .with("email", "arthur@example.com")
        .with("home", RecordInstance::new().with("street", "Main <1>").with("zip", 12345i64))
        .with("born", NaiveDate::from_ymd_opt(1952, 3, 11).unwrap())
        .with("vip", true);

    let renderer = FormRenderer::new(RenderSettings::default())?;
    let html = renderer.render_to_string(&person(), &value.into())?;

    assert!(html.starts_with(r#"<form method="post"><fieldset>"#));
    assert!(html.contains(r#"<input type="text" name="name" value="Arthur">"#));
    assert!(html.contains("<legend>Contact</legend>"));
    assert!(html.contains(r#"name="home.street" value="Main &lt;1&gt;" required"#));
    assert!(html.contains(r##"<a href="#extra">Extra</a>"##));
    assert!(html.contains(r#"<div id="extra">"#));
    assert!(html.contains(r#"name="vip" checked"#));
    assert!(html.ends_with("</fieldset></form>"));
    Ok(())
}

#[test]
fn test_jquery_ui_flavor_scripts() -> anyhow::Result<()> {
    let settings = RenderSettings {
        script_flavor: ScriptFlavor::JqueryUi,
        ..RenderSettings::default()
    };
    let renderer = FormRenderer::new(settings)?;
    let html = renderer.render_to_string(&person(), &Instance::Null)?;

    assert!(html.contains(".tabs("));
    Ok(())
}

#[test]
fn test_render_is_deterministic() -> anyhow::Result<()> {
    let renderer = FormRenderer::new(RenderSettings::default())?;
    let root = person();
    let first = renderer.render_to_string(&root, &Instance::Null)?;
    let second = renderer.render_to_string(&root, &Instance::Null)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_pretty_output_indents() -> anyhow::Result<()> {
    let settings = RenderSettings {
        pretty: true,
        indent: 4,
        ..RenderSettings::default()
    };
    let renderer = FormRenderer::new(settings)?;
    let html = renderer.render_to_string(&address(), &Instance::Null)?;

    assert!(html.contains("\n    <fieldset>"));
    Ok(())
}

#[test]
fn test_duplicate_field_names_fail() {
    let root = TypeDescriptor::record(RecordSchema::new(
        "Twice",
        vec![
            FieldSpec::new("x", TypeDescriptor::text()),
            FieldSpec::new("x", TypeDescriptor::integer()),
        ],
    ));
    let renderer = FormRenderer::new(RenderSettings::default()).unwrap();
    let err = renderer.render(&root, &Instance::Null).unwrap_err();
    assert!(matches!(err, RenderError::DuplicateField { .. }));
}

#[test]
fn test_clashing_tab_ids_are_ambiguous() {
    let a = TabGroup::with_id("A", "same");
    let b = TabGroup::with_id("B", "same");
    let root = TypeDescriptor::record(RecordSchema::new(
        "Clash",
        vec![
            FieldSpec::new("x", TypeDescriptor::text()).in_tab(&a),
            FieldSpec::new("y", TypeDescriptor::text()).in_tab(&b),
        ],
    ));
    let renderer = FormRenderer::new(RenderSettings::default()).unwrap();
    let err = renderer.render(&root, &Instance::Null).unwrap_err();
    assert!(matches!(err, RenderError::AmbiguousGrouping { .. }));
}
