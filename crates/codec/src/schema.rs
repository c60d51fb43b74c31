//! Layout descriptors and the schema registry.
//!
//! Every encodable type reports its wire shape as a [`FieldType`]. Records and
//! tagged unions additionally describe their [`Layout`], which a
//! [`SchemaRegistry`] collects by name. The registry is built once and never
//! mutated, so it can be shared freely between threads.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SchemaError};

/// Wire shape of a field or payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// No bytes at all (payload of a unit variant).
    Unit,
    U8,
    U16,
    U32,
    U64,
    U128,
    /// u32 byte length followed by UTF-8.
    String,
    /// Exactly N elements, no prefix.
    Array(Box<FieldType>, usize),
    /// u32 element count followed by the elements.
    Seq(Box<FieldType>),
    /// Presence byte followed by the value when present.
    Option(Box<FieldType>),
    /// A record or tagged union registered under this name.
    Named(&'static str),
}

impl FieldType {
    /// Encoded size in bytes, when it does not depend on the value.
    pub fn fixed_size(&self, registry: &SchemaRegistry) -> Option<usize> {
        match self {
            FieldType::Unit => Some(0),
            FieldType::U8 => Some(1),
            FieldType::U16 => Some(2),
            FieldType::U32 => Some(4),
            FieldType::U64 => Some(8),
            FieldType::U128 => Some(16),
            FieldType::String | FieldType::Seq(_) | FieldType::Option(_) => None,
            FieldType::Array(item, len) => item.fixed_size(registry).map(|size| size * len),
            FieldType::Named(name) => match registry.get(name).ok()? {
                Layout::Record(fields) => fields
                    .iter()
                    .map(|field| field.ty.fixed_size(registry))
                    .sum(),
                Layout::Union(variants) => {
                    let mut sizes = variants.iter().map(|v| v.payload.fixed_size(registry));
                    let first = sizes.next()??;
                    sizes.all(|size| size == Some(first)).then_some(1 + first)
                }
            },
        }
    }

    fn named_refs(&self, out: &mut Vec<&'static str>) {
        match self {
            FieldType::Array(item, _) | FieldType::Seq(item) | FieldType::Option(item) => {
                item.named_refs(out)
            }
            FieldType::Named(name) => out.push(*name),
            _ => {}
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Unit => write!(f, "()"),
            FieldType::U8 => write!(f, "u8"),
            FieldType::U16 => write!(f, "u16"),
            FieldType::U32 => write!(f, "u32"),
            FieldType::U64 => write!(f, "u64"),
            FieldType::U128 => write!(f, "u128"),
            FieldType::String => write!(f, "string"),
            FieldType::Array(item, len) => write!(f, "[{}; {}]", item, len),
            FieldType::Seq(item) => write!(f, "[{}]", item),
            FieldType::Option(item) => write!(f, "{}?", item),
            FieldType::Named(name) => write!(f, "{}", name),
        }
    }
}

/// One field of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
}

/// One variant of a tagged union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: &'static str,
    pub discriminant: u8,
    pub payload: FieldType,
}

/// Layout of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Fields encoded back to back in declared order.
    Record(Vec<Field>),
    /// One discriminant byte, then the payload of that variant.
    Union(Vec<Variant>),
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Record(fields) => {
                write!(f, "record {{")?;
                for (i, field) in fields.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{}{}: {}", sep, field.name, field.ty)?;
                }
                write!(f, " }}")
            }
            Layout::Union(variants) => {
                write!(f, "union {{")?;
                for (i, variant) in variants.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(
                        f,
                        "{}{} = {} ({})",
                        sep, variant.name, variant.discriminant, variant.payload
                    )?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// Types that know their own wire shape.
pub trait Schema {
    fn field_type() -> FieldType;
}

/// Records and tagged unions: types with a name and a layout.
pub trait Declared: Schema {
    const NAME: &'static str;

    fn layout() -> Layout;
}

macro_rules! impl_schema {
    ($($ty:ty => $field:expr),* $(,)?) => {
        $(
            impl Schema for $ty {
                fn field_type() -> FieldType {
                    $field
                }
            }
        )*
    };
}

impl_schema! {
    u8 => FieldType::U8,
    u16 => FieldType::U16,
    u32 => FieldType::U32,
    u64 => FieldType::U64,
    u128 => FieldType::U128,
    String => FieldType::String,
}

impl<T: Schema> Schema for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::Seq(Box::new(T::field_type()))
    }
}

impl<T: Schema> Schema for Option<T> {
    fn field_type() -> FieldType {
        FieldType::Option(Box::new(T::field_type()))
    }
}

impl<T: Schema, const N: usize> Schema for [T; N] {
    fn field_type() -> FieldType {
        FieldType::Array(Box::new(T::field_type()), N)
    }
}

/// Immutable table of layouts keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    layouts: BTreeMap<&'static str, Layout>,
}

/// Collects layouts before they are frozen into a [`SchemaRegistry`].
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    layouts: BTreeMap<&'static str, Layout>,
}

impl SchemaRegistryBuilder {
    /// Add the layout of `T`.
    pub fn register<T: Declared>(mut self) -> Self {
        self.layouts.insert(T::NAME, T::layout());
        self
    }

    /// Validate and freeze the registry.
    pub fn build(self) -> Result<SchemaRegistry> {
        let registry = SchemaRegistry {
            layouts: self.layouts,
        };
        registry.validate()?;
        Ok(registry)
    }
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Look up a layout by type name.
    pub fn get(&self, name: &str) -> Result<&Layout> {
        self.layouts
            .get(name)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }

    /// Wire discriminant of `variant` within the union `type_name`.
    pub fn discriminant(&self, type_name: &str, variant: &str) -> Result<u8> {
        match self.get(type_name)? {
            Layout::Union(variants) => variants
                .iter()
                .find(|v| v.name == variant)
                .map(|v| v.discriminant)
                .ok_or_else(|| SchemaError::UnknownVariant {
                    type_name: type_name.to_string(),
                    variant: variant.to_string(),
                }),
            Layout::Record(_) => Err(SchemaError::NotAUnion(type_name.to_string())),
        }
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.layouts.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Every named reference must resolve and every union must number its
    /// variants `0..n` in declaration order.
    fn validate(&self) -> Result<()> {
        for (&type_name, layout) in &self.layouts {
            let mut refs = Vec::new();
            match layout {
                Layout::Record(fields) => {
                    for field in fields {
                        field.ty.named_refs(&mut refs);
                    }
                }
                Layout::Union(variants) => {
                    for (expected, variant) in variants.iter().enumerate() {
                        if usize::from(variant.discriminant) != expected {
                            return Err(SchemaError::DiscriminantGap {
                                type_name,
                                expected,
                                found: variant.discriminant,
                            });
                        }
                        variant.payload.named_refs(&mut refs);
                    }
                }
            }
            for name in refs {
                if !self.layouts.contains_key(name) {
                    return Err(SchemaError::UnknownType(name.to_string()));
                }
            }
        }
        Ok(())
    }
}
