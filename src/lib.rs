//! # htmlform - typed HTML form rendering
//!
//! Renders a typed value as an HTML `<form>`. The schema drives the output:
//! scalars become input controls, records become nested fieldsets, and
//! fields can be grouped visually into fieldsets or tabs. Every control is
//! named after its dotted path from the root (`address.street`,
//! `phones.0`), so a submitted form maps straight back onto the value.
//!
//! ## Quick Start
//!
//! ```rust
//! use htmlform::config::RenderSettings;
//! use htmlform::domain::instance::RecordInstance;
//! use htmlform::domain::schema::{FieldSpec, RecordSchema, TypeDescriptor};
//! use htmlform::form::FormRenderer;
//!
//! let schema = RecordSchema::new(
//!     "Person",
//!     vec![
//!         FieldSpec::new("name", TypeDescriptor::text()),
//!         FieldSpec::new("age", TypeDescriptor::integer()),
//!     ],
//! );
//! let person = RecordInstance::new().with("name", "Arthur").with("age", 42i64);
//!
//! let renderer = FormRenderer::new(RenderSettings::default()).unwrap();
//! let html = renderer
//!     .render_to_string(&TypeDescriptor::record(schema), &person.into())
//!     .unwrap();
//! assert!(html.contains(r#"name="age""#));
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema, instance, render path and markup tree types
//! - **Form**: the recursive renderer and its script templates
//! - **Adapters**: the form document loader used by the CLI
//! - **Config**: layered settings (file, environment, CLI)

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod form;

pub use form::{FormRenderer, RenderError, RenderResult, RenderedForm};
