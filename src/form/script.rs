//! Client-side script generation
//!
//! Script bodies come from small built-in Tera templates, one set per
//! [`ScriptFlavor`]. Every value interpolated into a template is passed as a
//! pre-encoded JSON literal, so instance data can neither break out of its
//! string nor close the surrounding `<script>` element.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tera::{Context, Tera};

const DATETIME_TEMPLATE: &str = "datetime.js";
const TABS_TEMPLATE: &str = "tabs.js";

const VANILLA_DATETIME: &str = r#"(function () {
    var input = document.getElementById({{ element_id | safe }});
    if (!input) { return; }
    input.type = "datetime-local";
    input.step = "1";
{% if value %}    input.value = {{ value | safe }}.slice(0, 19);
{% endif %}})();"#;

const VANILLA_TABS: &str = r##"(function () {
    var container = document.getElementById({{ container_id | safe }});
    if (!container) { return; }
    var panelIds = {{ panel_ids | safe }};
    var links = container.querySelectorAll("ul > li > a");
    function show(activeId) {
        panelIds.forEach(function (id) {
            var panel = document.getElementById(id);
            if (panel) { panel.hidden = (id !== activeId); }
        });
        links.forEach(function (link) {
            link.classList.toggle("active", link.getAttribute("href") === "#" + activeId);
        });
    }
    links.forEach(function (link) {
        link.addEventListener("click", function (event) {
            event.preventDefault();
            show(link.getAttribute("href").slice(1));
        });
    });
    show(panelIds[0]);
})();"##;

const JQUERY_UI_DATETIME: &str = r#"$(function () {
    var field = $(document.getElementById({{ element_id | safe }}));
    field.datetimepicker({ dateFormat: "yy-mm-dd", timeFormat: "HH:mm:ss", showSecond: true });
{% if value %}    field.datetimepicker("setDate", new Date({{ value | safe }}));
{% endif %}});"#;

const JQUERY_UI_TABS: &str = r#"$(function () {
    var panelIds = {{ panel_ids | safe }};
    $(document.getElementById({{ container_id | safe }})).tabs({ active: 0 });
    $.each(panelIds, function (_, id) { $(document.getElementById(id)).addClass("ui-tabs-panel"); });
});"#;

// ============================================================================
// Flavor and Placement
// ============================================================================

/// Which client-side library the generated scripts target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptFlavor {
    /// Plain DOM APIs, no dependencies
    #[default]
    Vanilla,
    /// jQuery UI `tabs()` and the timepicker addon's `datetimepicker()`
    JqueryUi,
}

impl FromStr for ScriptFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vanilla" => Ok(ScriptFlavor::Vanilla),
            "jquery-ui" | "jquery_ui" | "jqueryui" => Ok(ScriptFlavor::JqueryUi),
            other => Err(format!("Unknown script flavor: {}", other)),
        }
    }
}

impl fmt::Display for ScriptFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptFlavor::Vanilla => f.write_str("vanilla"),
            ScriptFlavor::JqueryUi => f.write_str("jquery-ui"),
        }
    }
}

/// Where generated scripts end up
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPlacement {
    /// `<script>` siblings next to the element they wire up
    #[default]
    Inline,
    /// Collected in [`RenderedForm::scripts`](super::RenderedForm) for the page assembler
    Deferred,
}

// ============================================================================
// Fragments
// ============================================================================

/// One generated script, tied to the DOM id it operates on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptFragment {
    pub target_id: String,
    pub body: String,
}

/// Encode a string as a JavaScript string literal safe to embed in HTML
pub fn js_literal(value: &str) -> String {
    // serde_json never fails on a plain string
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

fn js_array(values: &[&str]) -> String {
    let items: Vec<String> = values.iter().map(|v| js_literal(v)).collect();
    format!("[{}]", items.join(", "))
}

// ============================================================================
// Templates
// ============================================================================

/// Compiled script templates for one flavor
pub struct ScriptTemplates {
    tera: Tera,
    flavor: ScriptFlavor,
}

impl ScriptTemplates {
    pub fn new(flavor: ScriptFlavor) -> Result<Self, tera::Error> {
        let (datetime, tabs) = match flavor {
            ScriptFlavor::Vanilla => (VANILLA_DATETIME, VANILLA_TABS),
            ScriptFlavor::JqueryUi => (JQUERY_UI_DATETIME, JQUERY_UI_TABS),
        };

        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(DATETIME_TEMPLATE, datetime), (TABS_TEMPLATE, tabs)])?;

        Ok(Self { tera, flavor })
    }

    pub fn flavor(&self) -> ScriptFlavor {
        self.flavor
    }

    /// Picker initialisation for the datetime input with DOM id `element_id`
    pub fn datetime_picker(&self, element_id: &str, iso_value: Option<&str>) -> Result<ScriptFragment, tera::Error> {
        let mut context = Context::new();
        context.insert("element_id", &js_literal(element_id));
        context.insert("value", &iso_value.map(js_literal));

        Ok(ScriptFragment {
            target_id: element_id.to_string(),
            body: self.tera.render(DATETIME_TEMPLATE, &context)?,
        })
    }

    /// Navigation wiring for a tab container and its panels
    pub fn tab_wiring(&self, container_id: &str, panel_ids: &[&str]) -> Result<ScriptFragment, tera::Error> {
        let mut context = Context::new();
        context.insert("container_id", &js_literal(container_id));
        context.insert("panel_ids", &js_array(panel_ids));

        Ok(ScriptFragment {
            target_id: container_id.to_string(),
            body: self.tera.render(TABS_TEMPLATE, &context)?,
        })
    }
}
