//! Primitive Renderer
//!
//! Renders one scalar field as a single form control named after its path.

use crate::domain::instance::Instance;
use crate::domain::markup::Element;
use crate::domain::path::RenderPath;
use crate::domain::schema::TypeDescriptor;

use super::error::{RenderError, RenderResult};
use super::script::ScriptFragment;
use super::widget::{widget_for, FormattedValue, ScriptHook, ValueEncoding};
use super::RenderContext;

/// A rendered control and the script that must follow it
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub element: Element,
    pub script: Option<ScriptFragment>,
}

/// Render the scalar `instance` of type `ty` at `path`
pub fn render(ctx: &RenderContext<'_>, ty: &TypeDescriptor, instance: &Instance, path: &RenderPath) -> RenderResult<Control> {
    let rule = widget_for(ty, path)?;
    let name = path.to_string();

    let mut element = Element::new(rule.tag)
        .attr("type", rule.input_type)
        .attr("name", name.as_str());

    if let Some(step) = &rule.step {
        element.set_attr("step", step.as_str());
    }

    let value = rule.format_value(instance, path)?;
    match &value {
        FormattedValue::Absent | FormattedValue::Checked(false) => {}
        FormattedValue::Value(text) => element.set_attr("value", text.as_str()),
        FormattedValue::Checked(true) => element.set_flag("checked"),
    }

    if !ty.nullable
        && ctx.settings().emit_required
        && rule.encoding != ValueEncoding::CheckedFlag
        && rule.input_type != "hidden"
    {
        element.set_flag("required");
    }

    let script = match rule.script {
        None => None,
        Some(ScriptHook::DateTimePicker) => {
            let element_id = path.dom_id(&ctx.settings().id_prefix);
            element.set_attr("id", element_id.as_str());

            let iso = match &value {
                FormattedValue::Value(text) => Some(text.as_str()),
                _ => None,
            };
            let fragment = ctx
                .templates()
                .datetime_picker(&element_id, iso)
                .map_err(|source| RenderError::Script {
                    path: path.describe(),
                    source,
                })?;
            Some(fragment)
        }
    };

    tracing::trace!(name = %name, input_type = rule.input_type, "rendered control");

    Ok(Control { element, script })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderSettings;
    use crate::form::script::{ScriptFlavor, ScriptTemplates};
    use chrono::NaiveDate;

    fn render_with(settings: &RenderSettings, ty: &TypeDescriptor, instance: Instance) -> Control {
        let templates = ScriptTemplates::new(ScriptFlavor::Vanilla).unwrap();
        let ctx = RenderContext::new(settings, &templates);
        render(&ctx, ty, &instance, &RenderPath::root().extend("f")).unwrap()
    }

    #[test]
    fn test_name_is_path() {
        let settings = RenderSettings::default();
        let control = render_with(&settings, &TypeDescriptor::text(), Instance::from("foo"));
        assert_eq!(control.element.get_attr("name"), Some("f"));
        assert_eq!(control.element.get_attr("value"), Some("foo"));
        assert!(control.script.is_none());
    }

    #[test]
    fn test_required_for_non_nullable() {
        let settings = RenderSettings::default();
        let control = render_with(&settings, &TypeDescriptor::integer().not_null(), Instance::Integer(1));
        assert!(control.element.has_attr("required"));

        let optional = render_with(&settings, &TypeDescriptor::integer(), Instance::Integer(1));
        assert!(!optional.element.has_attr("required"));
    }

    #[test]
    fn test_required_can_be_disabled() {
        let settings = RenderSettings {
            emit_required: false,
            ..Default::default()
        };
        let control = render_with(&settings, &TypeDescriptor::integer().not_null(), Instance::Integer(1));
        assert!(!control.element.has_attr("required"));
    }

    #[test]
    fn test_checkbox_never_required() {
        let settings = RenderSettings::default();
        let control = render_with(&settings, &TypeDescriptor::boolean().not_null(), Instance::Boolean(false));
        assert!(!control.element.has_attr("required"));
        assert!(!control.element.has_attr("checked"));
    }

    #[test]
    fn test_datetime_gets_id_and_script() {
        let settings = RenderSettings {
            id_prefix: "form-".to_string(),
            ..Default::default()
        };
        let value = NaiveDate::from_ymd_opt(2013, 12, 11)
            .unwrap()
            .and_hms_opt(10, 9, 8)
            .unwrap();
        let control = render_with(&settings, &TypeDescriptor::datetime(), Instance::DateTime(value));
        assert_eq!(control.element.get_attr("id"), Some("form-f"));

        let script = control.script.expect("datetime emits a script");
        assert_eq!(script.target_id, "form-f");
        assert!(script.body.contains("2013-12-11T10:09:08"));
    }
}
