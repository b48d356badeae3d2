//! Recursive form rendering
//!
//! Turns a typed schema plus an instance into a `<form>` subtree:
//! - scalars become single controls named after their render path
//! - records become nested `<fieldset>`s
//! - fieldset and tab groups partition a record's fields visually
//!
//! A render call is a pure tree walk. Script fragments and the set of
//! emitted tab ids live in a [`RenderContext`] owned by that call only.

pub mod error;
pub mod planner;
pub mod primitive;
pub mod record;
pub mod script;
pub mod tabs;
pub mod widget;


use std::collections::HashSet;

use crate::config::RenderSettings;
use crate::domain::instance::Instance;
use crate::domain::markup::Element;
use crate::domain::path::RenderPath;
use crate::domain::schema::{TypeDescriptor, TypeKind};

pub use error::{RenderError, RenderResult};
pub use script::{ScriptFlavor, ScriptFragment, ScriptPlacement, ScriptTemplates};

// ============================================================================
// Render Context
// ============================================================================

/// Per-call state threaded through the recursive renderers
pub struct RenderContext<'r> {
    settings: &'r RenderSettings,
    templates: &'r ScriptTemplates,
    deferred: Vec<ScriptFragment>,
    tab_ids: HashSet<String>,
}

impl<'r> RenderContext<'r> {
    pub fn new(settings: &'r RenderSettings, templates: &'r ScriptTemplates) -> Self {
        Self {
            settings,
            templates,
            deferred: Vec::new(),
            tab_ids: HashSet::new(),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        self.settings
    }

    pub fn templates(&self) -> &ScriptTemplates {
        self.templates
    }

    /// Append `element` to `container`, followed by its script if any.
    ///
    /// Inline placement puts the script right after the element; deferred
    /// placement records it for the caller instead.
    pub fn place(&mut self, container: &mut Element, element: Element, script: Option<ScriptFragment>) {
        container.push(element);
        if let Some(fragment) = script {
            match self.settings.script_placement {
                ScriptPlacement::Inline => container.push(Element::script(fragment.body)),
                ScriptPlacement::Deferred => self.deferred.push(fragment),
            }
        }
    }

    /// Record a tab panel id, failing if this pass already emitted it
    pub fn claim_tab_id(&mut self, id: &str, path: &RenderPath) -> RenderResult<()> {
        if self.tab_ids.insert(id.to_string()) {
            Ok(())
        } else {
            Err(RenderError::DuplicateTabId {
                id: id.to_string(),
                path: path.describe(),
            })
        }
    }

    fn into_scripts(self) -> Vec<ScriptFragment> {
        self.deferred
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Output of one render call
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedForm {
    /// The `<form>` element
    pub form: Element,
    /// Script fragments in document order (deferred placement only)
    pub scripts: Vec<ScriptFragment>,
}

impl RenderedForm {
    pub fn to_html(&self) -> String {
        self.form.to_html()
    }

    pub fn to_pretty_html(&self, indent: usize) -> String {
        self.form.to_pretty_html(indent)
    }
}

/// Entry point: renders instances against schemas with fixed settings
pub struct FormRenderer {
    settings: RenderSettings,
    templates: ScriptTemplates,
}

impl FormRenderer {
    pub fn new(settings: RenderSettings) -> RenderResult<Self> {
        let templates =
            ScriptTemplates::new(settings.script_flavor).map_err(|source| RenderError::Script {
                path: RenderPath::root().describe(),
                source,
            })?;
        Ok(Self {
            settings,
            templates,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render `instance` as `root`; a scalar root is named after its type
    pub fn render(&self, root: &TypeDescriptor, instance: &Instance) -> RenderResult<RenderedForm> {
        self.render_named(root, root.type_name(), instance)
    }

    /// Render `instance` as `root`, naming a scalar or array root `name`.
    ///
    /// Record roots start from the empty path, so `name` does not prefix
    /// their fields.
    pub fn render_named(&self, root: &TypeDescriptor, name: &str, instance: &Instance) -> RenderResult<RenderedForm> {
        let mut ctx = RenderContext::new(&self.settings, &self.templates);
        let mut form = Element::new("form").attr("method", self.settings.form_method.as_str());
        if let Some(action) = &self.settings.form_action {
            form.set_attr("action", action.as_str());
        }

        match &root.kind {
            TypeKind::Record(schema) => {
                let fieldset = record::render_record(&mut ctx, schema, instance, &RenderPath::root())?;
                form.push(fieldset);
            }
            _ => {
                let path = RenderPath::root().extend(name);
                record::render_field_into(&mut ctx, &mut form, name, root, instance, &path)?;
            }
        }

        tracing::debug!(root = root.type_name(), "rendered form");

        Ok(RenderedForm {
            form,
            scripts: ctx.into_scripts(),
        })
    }

    /// Render and serialize according to the `pretty`/`indent` settings
    pub fn render_to_string(&self, root: &TypeDescriptor, instance: &Instance) -> RenderResult<String> {
        let rendered = self.render(root, instance)?;
        Ok(if self.settings.pretty {
            rendered.to_pretty_html(self.settings.indent)
        } else {
            rendered.to_html()
        })
    }
}
