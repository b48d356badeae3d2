//! Schema-time types describing what a form renders
//!
//! These objects are built once by the schema author (or a host loader) and
//! are never mutated while rendering. Groups are shared through [`Arc`] and
//! compared by identity, so two fields pointing at the same group object land
//! in the same visual container.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// UI Overrides
// ============================================================================

/// Per-field widget override supplied by the schema annotations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiOverride {
    /// Render a text field as a masked password input; the value is never emitted
    Password,
    /// Render the field as `<input type="hidden">`
    Hidden,
}

impl fmt::Display for UiOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiOverride::Password => f.write_str("password"),
            UiOverride::Hidden => f.write_str("hidden"),
        }
    }
}

// ============================================================================
// Type Descriptors
// ============================================================================

/// Kind of a declared field type
#[derive(Clone, Debug)]
pub enum TypeKind {
    Text,
    Decimal {
        /// Declared number of fraction digits, drives the `step` attribute
        fraction_digits: Option<u32>,
    },
    Boolean,
    Date,
    Time,
    DateTime,
    Integer,
    Record(Arc<RecordSchema>),
    Array(Box<TypeDescriptor>),
}

/// Declared type of a field: kind, nullability and optional widget override
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub nullable: bool,
    pub ui: Option<UiOverride>,
}

impl TypeDescriptor {
    fn of(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: true,
            ui: None,
        }
    }

    pub fn text() -> Self {
        Self::of(TypeKind::Text)
    }

    pub fn decimal() -> Self {
        Self::of(TypeKind::Decimal {
            fraction_digits: None,
        })
    }

    /// Decimal constrained to `digits` fraction digits
    pub fn decimal_with_digits(digits: u32) -> Self {
        Self::of(TypeKind::Decimal {
            fraction_digits: Some(digits),
        })
    }

    pub fn boolean() -> Self {
        Self::of(TypeKind::Boolean)
    }

    pub fn date() -> Self {
        Self::of(TypeKind::Date)
    }

    pub fn time() -> Self {
        Self::of(TypeKind::Time)
    }

    pub fn datetime() -> Self {
        Self::of(TypeKind::DateTime)
    }

    pub fn integer() -> Self {
        Self::of(TypeKind::Integer)
    }

    pub fn record(schema: RecordSchema) -> Self {
        Self::of(TypeKind::Record(Arc::new(schema)))
    }

    /// Record type sharing an already-built schema
    pub fn shared_record(schema: Arc<RecordSchema>) -> Self {
        Self::of(TypeKind::Record(schema))
    }

    pub fn array(items: TypeDescriptor) -> Self {
        Self::of(TypeKind::Array(Box::new(items)))
    }

    /// Mark the type as non-nullable
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_ui(mut self, ui: UiOverride) -> Self {
        self.ui = Some(ui);
        self
    }

    /// Shorthand for `with_ui(UiOverride::Password)`
    pub fn password(self) -> Self {
        self.with_ui(UiOverride::Password)
    }

    /// Schema name of the type.
    ///
    /// Scalars use their XML Schema names; records use their declared name.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            TypeKind::Text => "string",
            TypeKind::Decimal { .. } => "decimal",
            TypeKind::Boolean => "boolean",
            TypeKind::Date => "date",
            TypeKind::Time => "time",
            TypeKind::DateTime => "dateTime",
            TypeKind::Integer => "integer",
            TypeKind::Record(schema) => &schema.name,
            TypeKind::Array(_) => "array",
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Record(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array(_))
    }

    pub fn is_scalar(&self) -> bool {
        !self.is_record() && !self.is_array()
    }
}

// ============================================================================
// Groups
// ============================================================================

/// Always-visible labelled box around sibling fields
#[derive(Debug, PartialEq, Eq)]
pub struct FieldsetGroup {
    pub legend: String,
}

impl FieldsetGroup {
    pub fn new(legend: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            legend: legend.into(),
        })
    }
}

/// One panel of a mutually exclusive tab strip
#[derive(Debug, PartialEq, Eq)]
pub struct TabGroup {
    pub legend: String,
    generated_id: String,
}

impl TabGroup {
    /// Create a tab with an id generated once for the lifetime of the group
    pub fn new(legend: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            legend: legend.into(),
            generated_id: format!("tab-{}", Uuid::new_v4().simple()),
        })
    }

    /// Create a tab with a caller-chosen DOM id
    pub fn with_id(legend: impl Into<String>, id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            legend: legend.into(),
            generated_id: id.into(),
        })
    }

    /// DOM id of the panel, also the target of its navigation anchor
    pub fn generated_id(&self) -> &str {
        &self.generated_id
    }
}

/// Reference from a field to the container it is laid out in
#[derive(Clone, Debug)]
pub enum GroupRef {
    Fieldset(Arc<FieldsetGroup>),
    Tab(Arc<TabGroup>),
}

impl GroupRef {
    /// Identity comparison: true only for the very same group object
    pub fn same_group(&self, other: &GroupRef) -> bool {
        match (self, other) {
            (GroupRef::Fieldset(a), GroupRef::Fieldset(b)) => Arc::ptr_eq(a, b),
            (GroupRef::Tab(a), GroupRef::Tab(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// Fields and Records
// ============================================================================

/// One named field of a record
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeDescriptor,
    pub group: Option<GroupRef>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            group: None,
        }
    }

    pub fn in_fieldset(mut self, group: &Arc<FieldsetGroup>) -> Self {
        self.group = Some(GroupRef::Fieldset(Arc::clone(group)));
        self
    }

    pub fn in_tab(mut self, group: &Arc<TabGroup>) -> Self {
        self.group = Some(GroupRef::Tab(Arc::clone(group)));
        self
    }
}

/// Ordered field list of a record type
///
/// Record schemas form a tree. Cyclic schemas cannot be expressed through
/// [`Arc`] without interior mutability and are not supported by the renderer.
#[derive(Clone, Debug)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
