//! Tab Widget Builder
//!
//! Markup shape:
//!
//! ```text
//! <div id="{first panel id}-tabs">
//!   <ul><li><a href="#{panel id}">{legend}</a></li>...</ul>
//!   <div id="{panel id}">...fields...</div>...
//! </div>
//! <script>...wiring...</script>
//! ```
//!
//! Panel ids come from the tab groups themselves, so they are stable across
//! renders of the same schema.

use tracing::debug;

use crate::domain::instance::RecordInstance;
use crate::domain::markup::Element;
use crate::domain::path::RenderPath;

use super::error::{RenderError, RenderResult};
use super::planner::TabPanel;
use super::record::render_member;
use super::script::ScriptFragment;
use super::RenderContext;

/// Rendered tab strip, before it is attached to its record
#[derive(Clone, Debug)]
pub struct TabWidget {
    pub container_id: String,
    pub nav: Element,
    pub panels: Vec<Element>,
    pub script: ScriptFragment,
}

impl TabWidget {
    /// Assemble the container `<div>` and hand back the wiring script
    pub fn into_parts(self) -> (Element, ScriptFragment) {
        let mut container = Element::new("div")
            .attr("id", self.container_id)
            .child(self.nav);
        container.extend(self.panels);
        (container, self.script)
    }
}

/// Render the merged tab panels of the record at `path`
pub fn render_tabs(
    ctx: &mut RenderContext<'_>,
    panels: &[TabPanel<'_>],
    values: Option<&RecordInstance>,
    path: &RenderPath,
) -> RenderResult<TabWidget> {
    let Some(first) = panels.first() else {
        return Err(RenderError::AmbiguousGrouping {
            path: path.describe(),
            reason: "tab set without panels".to_string(),
        });
    };
    let container_id = format!("{}-tabs", first.group.generated_id());

    let mut nav = Element::new("ul");
    let mut panel_elements = Vec::with_capacity(panels.len());

    for panel in panels {
        let id = panel.group.generated_id();
        ctx.claim_tab_id(id, path)?;

        nav.push(
            Element::new("li").child(
                Element::new("a")
                    .attr("href", format!("#{}", id))
                    .text(panel.group.legend.as_str()),
            ),
        );

        let mut panel_elt = Element::new("div").attr("id", id);
        for field in &panel.fields {
            render_member(ctx, &mut panel_elt, field, values, path)?;
        }
        panel_elements.push(panel_elt);
    }

    let ids: Vec<&str> = panels.iter().map(|p| p.group.generated_id()).collect();
    let script = ctx
        .templates()
        .tab_wiring(&container_id, &ids)
        .map_err(|source| RenderError::Script {
            path: path.describe(),
            source,
        })?;

    debug!(path = %path.describe(), panels = panels.len(), container = %container_id, "rendered tabs");

    Ok(TabWidget {
        container_id,
        nav,
        panels: panel_elements,
        script,
    })
}
