//! Query schema for Kaltura blocks.
//!
//! The host's query layer is abstracted behind [`SchemaRegistry`]; this
//! module only describes what to register. [`SchemaDocument`] is an
//! in-memory registry that renders SDL.

use std::fmt::Write;

/// Name of the object type describing one block.
pub const KALTURA_BLOCK_TYPE: &str = "KalturaBlock";
/// Name of the list field added to host content types.
pub const KALTURA_BLOCKS_FIELD: &str = "kalturaBlocks";
/// Host content types that receive the list field.
pub const HOST_CONTENT_TYPES: [&str; 2] = ["Post", "Page"];

/// Scalar types used by the block schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Boolean,
}

impl ScalarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Boolean => "Boolean",
        }
    }
}

/// A scalar field of an object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: ScalarType,
}

impl FieldDef {
    pub const fn new(name: &'static str, ty: ScalarType) -> Self {
        Self { name, ty }
    }
}

/// An object type with scalar fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldDef>,
}

/// A list field added to an existing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListField {
    pub name: &'static str,
    pub of_type: &'static str,
    pub description: &'static str,
}

/// Registration surface of the host's query layer.
pub trait SchemaRegistry {
    /// Register a new object type.
    fn register_object_type(&mut self, ty: ObjectType);

    /// Add a list field to an existing type.
    fn register_field(&mut self, on_type: &str, field: ListField);
}

/// The `KalturaBlock` object type.
pub fn kaltura_block_type() -> ObjectType {
    ObjectType {
        name: KALTURA_BLOCK_TYPE,
        description: "Kaltura video block attributes",
        fields: vec![
            FieldDef::new("partnerId", ScalarType::String),
            FieldDef::new("entryId", ScalarType::String),
            FieldDef::new("poster", ScalarType::String),
            FieldDef::new("autoplay", ScalarType::Boolean),
            FieldDef::new("consentRequired", ScalarType::Boolean),
        ],
    }
}

/// Register the `KalturaBlock` type and the `kalturaBlocks` field on every
/// host content type.
pub fn register_kaltura_schema<R: SchemaRegistry + ?Sized>(registry: &mut R) {
    registry.register_object_type(kaltura_block_type());
    for host in HOST_CONTENT_TYPES {
        registry.register_field(
            host,
            ListField {
                name: KALTURA_BLOCKS_FIELD,
                of_type: KALTURA_BLOCK_TYPE,
                description: "Kaltura video blocks in this content, in document order",
            },
        );
    }
}

/// In-memory registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    types: Vec<ObjectType>,
    extensions: Vec<(String, ListField)>,
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered object types.
    pub fn types(&self) -> &[ObjectType] {
        &self.types
    }

    /// Fields registered on a type.
    pub fn fields_on(&self, ty: &str) -> Vec<&ListField> {
        self.extensions
            .iter()
            .filter(|(on, _)| on == ty)
            .map(|(_, field)| field)
            .collect()
    }

    /// Render the registered schema as SDL.
    pub fn to_sdl(&self) -> String {
        let mut sdl = String::new();

        for ty in &self.types {
            let _ = writeln!(sdl, "\"\"\"{}\"\"\"", ty.description);
            let _ = writeln!(sdl, "type {} {{", ty.name);
            for field in &ty.fields {
                let _ = writeln!(sdl, "  {}: {}", field.name, field.ty.as_str());
            }
            sdl.push_str("}\n\n");
        }

        for (on, field) in &self.extensions {
            let _ = writeln!(sdl, "extend type {} {{", on);
            let _ = writeln!(sdl, "  \"\"\"{}\"\"\"", field.description);
            let _ = writeln!(sdl, "  {}: [{}]", field.name, field.of_type);
            sdl.push_str("}\n\n");
        }

        sdl.truncate(sdl.trim_end().len());
        sdl.push('\n');
        sdl
    }
}

impl SchemaRegistry for SchemaDocument {
    fn register_object_type(&mut self, ty: ObjectType) {
        self.types.retain(|existing| existing.name != ty.name);
        self.types.push(ty);
    }

    fn register_field(&mut self, on_type: &str, field: ListField) {
        self.extensions
            .retain(|(on, existing)| !(on == on_type && existing.name == field.name));
        self.extensions.push((on_type.to_string(), field));
    }
}
