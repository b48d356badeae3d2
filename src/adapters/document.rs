//! Form documents: schema and instance in one JSON or YAML file
//!
//! This is the host-side collaborator used by the binary. It resolves named
//! group declarations into shared group objects (one object per key, so
//! identity semantics hold) and converts JSON values into instances by the
//! declared type.
//!
//! ```yaml
//! fieldsets:
//!   contact: Contact
//! tabs:
//!   extra: { legend: Extra }
//! root:
//!   type: record
//!   name: Person
//!   fields:
//!     - { name: name, type: text }
//!     - { name: email, type: text, fieldset: contact }
//!     - { name: born, type: date, tab: extra }
//! value:
//!   name: Arthur
//!   email: arthur@example.com
//!   born: 1952-03-11
//! ```

use anyhow::Context as _;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::domain::instance::{Decimal, Instance, RecordInstance};
use crate::domain::path::RenderPath;
use crate::domain::schema::{
    FieldSpec, FieldsetGroup, RecordSchema, TabGroup, TypeDescriptor, TypeKind, UiOverride,
};
use crate::form::error::RenderError;
use crate::form::widget::{DATE_FORMAT, MAX_FRACTION_DIGITS, TIME_FORMAT};

/// Errors raised while turning a document into schema and instance
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Schema(#[from] RenderError),

    #[error("Invalid value at {path}: {reason}")]
    InvalidValue { path: String, reason: String },
}

// ============================================================================
// Document Model
// ============================================================================

/// Tab declaration: legend plus an optional fixed DOM id
#[derive(Debug, Clone, Deserialize)]
pub struct TabDecl {
    pub legend: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Declared type of the root, a field, or array items
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDecl {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub widget: Option<UiOverride>,
    #[serde(default)]
    pub fraction_digits: Option<u32>,
    /// Record type name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub items: Option<Box<TypeDecl>>,
}

fn default_nullable() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    /// Key into the document's `fieldsets` table
    #[serde(default)]
    pub fieldset: Option<String>,
    /// Key into the document's `tabs` table
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(flatten)]
    pub ty: TypeDecl,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormDocument {
    pub root: TypeDecl,
    #[serde(default)]
    pub value: Value,
    /// Fieldset key -> legend
    #[serde(default)]
    pub fieldsets: BTreeMap<String, String>,
    #[serde(default)]
    pub tabs: BTreeMap<String, TabDecl>,
}

impl FormDocument {
    pub fn from_json_str(content: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read a `.json`, `.yaml` or `.yml` document
    pub fn from_path(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form document {}", path.display()))?;

        let document = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => anyhow::bail!(
                "Unsupported document format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ),
        };

        document.with_context(|| format!("Failed to parse form document {}", path.display()))
    }

    /// Build the root type descriptor and the instance to render
    pub fn build(&self) -> Result<(TypeDescriptor, Instance), DocumentError> {
        let groups = GroupTable::new(self);
        let root = build_type(&self.root, "form", &groups, &RenderPath::root())?;
        let instance = to_instance(&root, &self.value, &RenderPath::root())?;
        Ok((root, instance))
    }
}

// ============================================================================
// Schema Construction
// ============================================================================

/// One shared group object per declared key
struct GroupTable {
    fieldsets: HashMap<String, Arc<FieldsetGroup>>,
    tabs: HashMap<String, Arc<TabGroup>>,
}

impl GroupTable {
    fn new(document: &FormDocument) -> Self {
        let fieldsets = document
            .fieldsets
            .iter()
            .map(|(key, legend)| (key.clone(), FieldsetGroup::new(legend.as_str())))
            .collect();
        let tabs = document
            .tabs
            .iter()
            .map(|(key, decl)| {
                let tab = match &decl.id {
                    Some(id) => TabGroup::with_id(decl.legend.as_str(), id.as_str()),
                    None => TabGroup::new(decl.legend.as_str()),
                };
                (key.clone(), tab)
            })
            .collect();
        Self { fieldsets, tabs }
    }
}

fn build_type(
    decl: &TypeDecl,
    default_name: &str,
    groups: &GroupTable,
    path: &RenderPath,
) -> Result<TypeDescriptor, DocumentError> {
    let mut ty = match decl.type_name.as_str() {
        "text" | "string" => TypeDescriptor::text(),
        "decimal" | "number" => match decl.fraction_digits {
            Some(digits) if digits > MAX_FRACTION_DIGITS => {
                return Err(invalid(
                    path,
                    format!("fraction_digits {} exceeds {}", digits, MAX_FRACTION_DIGITS),
                ))
            }
            Some(digits) => TypeDescriptor::decimal_with_digits(digits),
            None => TypeDescriptor::decimal(),
        },
        "boolean" => TypeDescriptor::boolean(),
        "date" => TypeDescriptor::date(),
        "time" => TypeDescriptor::time(),
        "datetime" | "dateTime" => TypeDescriptor::datetime(),
        "integer" => TypeDescriptor::integer(),
        "record" => {
            let fields = decl
                .fields
                .iter()
                .map(|field| build_field(field, groups, path))
                .collect::<Result<Vec<_>, _>>()?;
            let name = decl.name.clone().unwrap_or_else(|| default_name.to_string());
            TypeDescriptor::record(RecordSchema::new(name, fields))
        }
        "array" => {
            let items = decl.items.as_deref().ok_or_else(|| RenderError::UnsupportedType {
                type_name: "array without items".to_string(),
                path: path.describe(),
            })?;
            TypeDescriptor::array(build_type(items, default_name, groups, &path.extend_index(0))?)
        }
        other => {
            return Err(RenderError::UnsupportedType {
                type_name: other.to_string(),
                path: path.describe(),
            }
            .into())
        }
    };

    ty.nullable = decl.nullable;
    ty.ui = decl.widget;
    Ok(ty)
}

fn build_field(field: &FieldDecl, groups: &GroupTable, parent: &RenderPath) -> Result<FieldSpec, DocumentError> {
    let path = parent.extend(&field.name);
    let ambiguous = |reason: String| RenderError::AmbiguousGrouping {
        path: path.describe(),
        reason,
    };

    let ty = build_type(&field.ty, &field.name, groups, &path)?;
    let spec = FieldSpec::new(field.name.as_str(), ty);

    let spec = match (&field.fieldset, &field.tab) {
        (Some(fs), Some(tab)) => {
            return Err(ambiguous(format!("field names both fieldset '{}' and tab '{}'", fs, tab)).into())
        }
        (Some(fs), None) => {
            let group = groups
                .fieldsets
                .get(fs)
                .ok_or_else(|| ambiguous(format!("unknown fieldset '{}'", fs)))?;
            spec.in_fieldset(group)
        }
        (None, Some(tab)) => {
            let group = groups
                .tabs
                .get(tab)
                .ok_or_else(|| ambiguous(format!("unknown tab '{}'", tab)))?;
            spec.in_tab(group)
        }
        (None, None) => spec,
    };

    Ok(spec)
}

// ============================================================================
// Instance Conversion
// ============================================================================

fn invalid(path: &RenderPath, reason: impl Into<String>) -> DocumentError {
    DocumentError::InvalidValue {
        path: path.describe(),
        reason: reason.into(),
    }
}

/// Convert a JSON value into an instance of `ty`
pub fn to_instance(ty: &TypeDescriptor, value: &Value, path: &RenderPath) -> Result<Instance, DocumentError> {
    if value.is_null() {
        return Ok(Instance::Null);
    }

    let expect_str = || {
        value
            .as_str()
            .ok_or_else(|| invalid(path, format!("expected a string for {}", ty.type_name())))
    };

    let instance = match &ty.kind {
        TypeKind::Text => Instance::Text(expect_str()?.to_string()),
        TypeKind::Decimal { .. } => {
            let literal = match value {
                Value::Number(n) if n.is_f64() => n
                    .as_f64()
                    .and_then(Decimal::from_f64)
                    .map(|d| d.as_str().to_string())
                    .ok_or_else(|| invalid(path, format!("'{}' is not a finite decimal", n)))?,
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                _ => return Err(invalid(path, "expected a number")),
            };
            let decimal = literal
                .parse::<Decimal>()
                .map_err(|e| invalid(path, e.to_string()))?;
            Instance::Decimal(decimal)
        }
        TypeKind::Boolean => Instance::Boolean(
            value
                .as_bool()
                .ok_or_else(|| invalid(path, "expected a boolean"))?,
        ),
        TypeKind::Integer => Instance::Integer(
            value
                .as_i64()
                .ok_or_else(|| invalid(path, "expected an integer"))?,
        ),
        TypeKind::Date => {
            let s = expect_str()?;
            let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| invalid(path, format!("'{}': {}", s, e)))?;
            Instance::Date(date)
        }
        TypeKind::Time => {
            let s = expect_str()?;
            let time = NaiveTime::parse_from_str(s, &format!("{}%.f", TIME_FORMAT))
                .map_err(|e| invalid(path, format!("'{}': {}", s, e)))?;
            Instance::Time(time)
        }
        TypeKind::DateTime => {
            let s = expect_str()?;
            let datetime = s
                .parse::<NaiveDateTime>()
                .map_err(|e| invalid(path, format!("'{}': {}", s, e)))?;
            Instance::DateTime(datetime)
        }
        TypeKind::Record(schema) => {
            let object = value
                .as_object()
                .ok_or_else(|| invalid(path, format!("expected an object for {}", schema.name)))?;

            for key in object.keys().filter(|k| schema.field(k).is_none()) {
                warn!(path = %path.describe(), field = %key, "dropping undeclared field from document");
            }

            let mut record = RecordInstance::new();
            for field in &schema.fields {
                let child = object.get(&field.name).unwrap_or(&Value::Null);
                let child = to_instance(&field.ty, child, &path.extend(&field.name))?;
                record.set(field.name.as_str(), child);
            }
            Instance::Record(record)
        }
        TypeKind::Array(items) => {
            let values = value
                .as_array()
                .ok_or_else(|| invalid(path, "expected an array"))?;
            let elements = values
                .iter()
                .enumerate()
                .map(|(idx, v)| to_instance(items, v, &path.extend_index(idx)))
                .collect::<Result<Vec<_>, _>>()?;
            Instance::Array(elements)
        }
    };

    Ok(instance)
}
