//! Declarative schema macros.
//!
//! Each macro takes the type declaration itself and emits the type together
//! with its `Encode`, `Decode`, `Schema` and `Declared` impls, so the order
//! of fields and variants on the wire is written down exactly once.

/// Declare a record whose fields are encoded back to back in declared order.
///
/// ```
/// nearlite_codec::record! {
///     #[derive(Debug, Clone, PartialEq, Eq)]
///     pub struct Point {
///         pub x: u32,
///         pub y: u32,
///     }
/// }
///
/// use nearlite_codec::{Decode, Encode};
///
/// let bytes = Point { x: 1, y: 2 }.encode().unwrap();
/// assert_eq!(bytes, [1, 0, 0, 0, 2, 0, 0, 0]);
/// assert_eq!(Point::decode(&bytes).unwrap(), Point { x: 1, y: 2 });
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Encode for $name {
            fn encode_to(&self, _out: &mut ::std::vec::Vec<u8>) -> $crate::Result<()> {
                $( $crate::Encode::encode_to(&self.$field, _out)?; )*
                Ok(())
            }
        }

        impl $crate::Decode for $name {
            fn decode_from(_reader: &mut $crate::Reader<'_>) -> $crate::Result<Self> {
                // struct expressions evaluate their fields in source order
                Ok(Self {
                    $( $field: <$ty as $crate::Decode>::decode_from(_reader)?, )*
                })
            }
        }

        impl $crate::Schema for $name {
            fn field_type() -> $crate::FieldType {
                $crate::FieldType::Named(stringify!($name))
            }
        }

        impl $crate::Declared for $name {
            const NAME: &'static str = stringify!($name);

            fn layout() -> $crate::Layout {
                $crate::Layout::Record(::std::vec![
                    $(
                        $crate::Field {
                            name: stringify!($field),
                            ty: <$ty as $crate::Schema>::field_type(),
                        },
                    )*
                ])
            }
        }
    };
}

/// Declare a tagged union: one discriminant byte followed by the payload of
/// the single variant that is present.
///
/// Discriminants are written out next to each variant and must count up
/// from zero in declaration order; a registry built over the type rejects
/// anything else. Decoding a byte outside the declared range fails with
/// `SchemaError::InvalidDiscriminant`.
///
/// ```
/// nearlite_codec::record! {
///     #[derive(Debug, Clone, PartialEq, Eq)]
///     pub struct Dot {}
/// }
///
/// nearlite_codec::tagged_union! {
///     #[derive(Debug, Clone, PartialEq, Eq)]
///     pub enum Mark {
///         Dot(Dot) = 0,
///         Count(u32) = 1,
///     }
/// }
///
/// use nearlite_codec::{Decode, Encode};
///
/// assert_eq!(Mark::Count(5).encode().unwrap(), [1, 5, 0, 0, 0]);
/// assert!(Mark::decode(&[2]).is_err());
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident ( $payload:ty ) = $index:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($payload),
            )+
        }

        impl $name {
            /// Variant names in discriminant order.
            pub const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];

            /// Wire discriminant of this value.
            pub fn discriminant(&self) -> u8 {
                match self {
                    $( Self::$variant(_) => $index, )+
                }
            }

            /// Name of the variant that is present.
            pub fn variant_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )+
                }
            }
        }

        impl $crate::Encode for $name {
            fn encode_to(&self, out: &mut ::std::vec::Vec<u8>) -> $crate::Result<()> {
                match self {
                    $(
                        Self::$variant(payload) => {
                            out.push($index);
                            $crate::Encode::encode_to(payload, out)
                        }
                    )+
                }
            }
        }

        impl $crate::Decode for $name {
            fn decode_from(reader: &mut $crate::Reader<'_>) -> $crate::Result<Self> {
                match reader.read_u8()? {
                    $(
                        $index => Ok(Self::$variant(
                            <$payload as $crate::Decode>::decode_from(reader)?,
                        )),
                    )+
                    value => Err($crate::SchemaError::InvalidDiscriminant {
                        type_name: stringify!($name),
                        value,
                        variants: Self::VARIANTS.len(),
                    }),
                }
            }
        }

        impl $crate::Schema for $name {
            fn field_type() -> $crate::FieldType {
                $crate::FieldType::Named(stringify!($name))
            }
        }

        impl $crate::Declared for $name {
            const NAME: &'static str = stringify!($name);

            fn layout() -> $crate::Layout {
                $crate::Layout::Union(::std::vec![
                    $(
                        $crate::Variant {
                            name: stringify!($variant),
                            discriminant: $index,
                            payload: <$payload as $crate::Schema>::field_type(),
                        },
                    )+
                ])
            }
        }
    };
}
