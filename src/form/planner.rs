//! Group Planner
//!
//! Partitions a record's ordered field list into layout segments in a single
//! pass. Grouping is a layout concern only: it never changes a field's path.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::path::RenderPath;
use crate::domain::schema::{FieldSpec, FieldsetGroup, GroupRef, TabGroup};

use super::error::{RenderError, RenderResult};

/// One panel of the record's tab strip
#[derive(Debug)]
pub struct TabPanel<'a> {
    pub group: &'a Arc<TabGroup>,
    pub fields: Vec<&'a FieldSpec>,
}

/// A contiguous unit of the record's layout
#[derive(Debug)]
pub enum Segment<'a> {
    Ungrouped(&'a FieldSpec),
    Fieldset {
        group: &'a Arc<FieldsetGroup>,
        fields: Vec<&'a FieldSpec>,
    },
    /// All tab panels of the record, merged into one strip
    Tabs(Vec<TabPanel<'a>>),
}

/// Ordered layout of a record's fields
#[derive(Debug, Default)]
pub struct GroupingPlan<'a> {
    pub segments: Vec<Segment<'a>>,
}

impl<'a> GroupingPlan<'a> {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Plan the layout of `fields`, the field list of the record at `path`.
///
/// - ungrouped fields stay in place as singleton segments
/// - fields of one fieldset are collected at the position of its first member
/// - every tab field joins one merged tab segment, placed at the first tab
///   field; panels are ordered by first appearance
pub fn plan<'a>(fields: &'a [FieldSpec], path: &RenderPath) -> RenderResult<GroupingPlan<'a>> {
    let mut segments: Vec<Segment<'a>> = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut tabs_at: Option<usize> = None;
    let mut tab_panels: Vec<TabPanel<'a>> = Vec::new();

    for field in fields {
        if !seen_names.insert(field.name.as_str()) {
            return Err(RenderError::DuplicateField {
                path: path.extend(&field.name).describe(),
            });
        }

        match &field.group {
            None => segments.push(Segment::Ungrouped(field)),
            Some(GroupRef::Fieldset(group)) => {
                let existing = segments.iter_mut().find_map(|seg| match seg {
                    Segment::Fieldset { group: g, fields } if Arc::ptr_eq(*g, group) => Some(fields),
                    _ => None,
                });
                match existing {
                    Some(members) => members.push(field),
                    None => segments.push(Segment::Fieldset {
                        group,
                        fields: vec![field],
                    }),
                }
            }
            Some(GroupRef::Tab(group)) => {
                if tabs_at.is_none() {
                    tabs_at = Some(segments.len());
                    segments.push(Segment::Tabs(Vec::new()));
                }
                add_to_panel(&mut tab_panels, group, field, path)?;
            }
        }
    }

    if let Some(idx) = tabs_at {
        segments[idx] = Segment::Tabs(tab_panels);
    }

    Ok(GroupingPlan { segments })
}

fn add_to_panel<'a>(
    panels: &mut Vec<TabPanel<'a>>,
    group: &'a Arc<TabGroup>,
    field: &'a FieldSpec,
    path: &RenderPath,
) -> RenderResult<()> {
    if let Some(panel) = panels.iter_mut().find(|p| Arc::ptr_eq(p.group, group)) {
        panel.fields.push(field);
        return Ok(());
    }

    if let Some(clash) = panels
        .iter()
        .find(|p| p.group.generated_id() == group.generated_id())
    {
        return Err(RenderError::AmbiguousGrouping {
            path: path.extend(&field.name).describe(),
            reason: format!(
                "tabs '{}' and '{}' are distinct groups sharing id '{}'",
                clash.group.legend,
                group.legend,
                group.generated_id()
            ),
        });
    }

    panels.push(TabPanel {
        group,
        fields: vec![field],
    });
    Ok(())
}
