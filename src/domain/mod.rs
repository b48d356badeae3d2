//! Schema, instance and markup types shared by the renderer and its hosts

pub mod instance;
pub mod markup;
pub mod path;
pub mod schema;
