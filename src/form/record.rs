//! Record Renderer
//!
//! Renders a record as one `<fieldset>`, laying its fields out according to
//! the grouping plan and recursing into nested records and arrays. Fieldsets
//! and tab panels never add a path segment; only record fields and array
//! indices do.

use tracing::{debug, warn};

use crate::domain::instance::{Instance, RecordInstance};
use crate::domain::markup::Element;
use crate::domain::path::RenderPath;
use crate::domain::schema::{FieldSpec, RecordSchema, TypeDescriptor, TypeKind};

use super::error::{RenderError, RenderResult};
use super::planner::{self, Segment};
use super::{primitive, tabs, RenderContext};

/// Render the record `instance` of `schema` located at `path`.
///
/// A null instance renders the full structure with every control empty.
pub fn render_record(
    ctx: &mut RenderContext<'_>,
    schema: &RecordSchema,
    instance: &Instance,
    path: &RenderPath,
) -> RenderResult<Element> {
    let values = match instance {
        Instance::Record(rec) => Some(rec),
        Instance::Null => None,
        other => {
            return Err(RenderError::InstanceMismatch {
                path: path.describe(),
                expected: format!("record {}", schema.name),
                found: other.kind_name().to_string(),
            })
        }
    };

    if let Some(rec) = values {
        for name in rec.names().filter(|n| schema.field(n).is_none()) {
            warn!(path = %path.describe(), field = name, "ignoring value for undeclared field");
        }
    }

    let plan = planner::plan(&schema.fields, path)?;
    debug!(
        path = %path.describe(),
        record = %schema.name,
        segments = plan.len(),
        "rendering record"
    );

    let mut fieldset = Element::new("fieldset");
    for segment in &plan.segments {
        match segment {
            Segment::Ungrouped(field) => render_member(ctx, &mut fieldset, field, values, path)?,
            Segment::Fieldset { group, fields } => {
                let mut group_elt =
                    Element::new("fieldset").child(Element::new("legend").text(group.legend.as_str()));
                for field in fields {
                    render_member(ctx, &mut group_elt, field, values, path)?;
                }
                fieldset.push(group_elt);
            }
            Segment::Tabs(panels) => {
                let widget = tabs::render_tabs(ctx, panels, values, path)?;
                let (element, script) = widget.into_parts();
                ctx.place(&mut fieldset, element, Some(script));
            }
        }
    }

    Ok(fieldset)
}

/// Render one field of the record at `parent` into `container`
pub(crate) fn render_member(
    ctx: &mut RenderContext<'_>,
    container: &mut Element,
    field: &FieldSpec,
    values: Option<&RecordInstance>,
    parent: &RenderPath,
) -> RenderResult<()> {
    let null = Instance::Null;
    let value = values.and_then(|rec| rec.get(&field.name)).unwrap_or(&null);
    let path = parent.extend(&field.name);
    render_field_into(ctx, container, &field.name, &field.ty, value, &path)
}

/// Dispatch on the declared type: records and arrays nest, scalars become controls
pub fn render_field_into(
    ctx: &mut RenderContext<'_>,
    container: &mut Element,
    label: &str,
    ty: &TypeDescriptor,
    instance: &Instance,
    path: &RenderPath,
) -> RenderResult<()> {
    match &ty.kind {
        TypeKind::Record(schema) => {
            let nested = render_record(ctx, schema, instance, path)?;
            container.push(nested);
        }
        TypeKind::Array(items) => {
            let nested = render_array(ctx, label, items, instance, path)?;
            container.push(nested);
        }
        _ => {
            let control = primitive::render(ctx, ty, instance, path)?;
            ctx.place(container, control.element, control.script);
        }
    }
    Ok(())
}

/// Render an array as a `<fieldset class="array">` with one entry per element.
///
/// Element `i` lives at `path.i` and follows the rules of the item type.
pub fn render_array(
    ctx: &mut RenderContext<'_>,
    label: &str,
    items: &TypeDescriptor,
    instance: &Instance,
    path: &RenderPath,
) -> RenderResult<Element> {
    let elements: &[Instance] = match instance {
        Instance::Array(values) => values,
        Instance::Null => &[],
        other => {
            return Err(RenderError::InstanceMismatch {
                path: path.describe(),
                expected: format!("array of {}", items.type_name()),
                found: other.kind_name().to_string(),
            })
        }
    };

    debug!(path = %path.describe(), len = elements.len(), "rendering array");

    let mut container = Element::new("fieldset")
        .attr("class", "array")
        .child(Element::new("legend").text(label));

    for (idx, element) in elements.iter().enumerate() {
        let item_path = path.extend_index(idx);
        render_field_into(ctx, &mut container, &idx.to_string(), items, element, &item_path)?;
    }

    Ok(container)
}
