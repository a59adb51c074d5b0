//! Structural type descriptors.
//!
//! Rust has no runtime reflection, so every documented type exposes a
//! [`TypeInfo`] through the [`Reflect`] trait. Structs get theirs from
//! `#[derive(Reflect)]`, which emits one [`FieldInfo`] per field carrying the
//! field's declared name, a lazy handle to the field type's descriptor and
//! the field's metadata tags.
//!
//! Field types are resolved lazily (`fn() -> TypeInfo`), so describing a
//! self-referential type terminates: the descriptor of `Node` does not build
//! the descriptor of its `children: Vec<Node>` until the generator asks for it.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::Result;
use crate::generator::Generator;
use crate::schema::SchemaRef;

/// A type that can describe its own structure.
pub trait Reflect: 'static {
    fn type_info() -> TypeInfo;
}

/// A type that produces its own schema instead of being walked structurally.
///
/// The generator calls [`CustomSchemaProvider::schema`] and uses the result
/// as-is. Providers that want a named component register it themselves via
/// [`Generator::register_component`].
///
/// ```ignore
/// struct Money;
///
/// impl CustomSchemaProvider for Money {
///     fn schema(_: &mut Generator) -> Result<SchemaRef> {
///         Ok(Schema { pattern: Some(r"^\d+\.\d{2}$".into()), ..Schema::string() }.into())
///     }
/// }
///
/// impl Reflect for Money {
///     fn type_info() -> TypeInfo {
///         TypeInfo::custom::<Self>()
///     }
/// }
/// ```
pub trait CustomSchemaProvider {
    fn schema(generator: &mut Generator) -> Result<SchemaRef>;
}

/// Function pointer to a [`CustomSchemaProvider::schema`] implementation.
pub type CustomSchemaFn = fn(&mut Generator) -> Result<SchemaRef>;

/// Descriptor of one type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Identity used for de-duplication and cycle detection.
    pub id: TypeId,
    /// Fully-qualified name; `None` for anonymous descriptors.
    pub name: Option<&'static str>,
    /// Component name chosen by the type's author (`#[oai(name = "...")]`).
    pub default_name: Option<&'static str>,
    pub kind: TypeKind,
}

/// Structural shape of a type.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Bool,
    Int { signed: bool, bits: u8 },
    Float { bits: u8 },
    String,
    /// `Option<T>`: a pointer that may be absent.
    Optional(Box<TypeInfo>),
    /// `Box<T>`, `Arc<T>`, `Rc<T>`: a pointer that is always present.
    Pointer(Box<TypeInfo>),
    /// Variable-length sequence; `unique` for sets.
    Seq { elem: Box<TypeInfo>, unique: bool },
    /// Fixed-length array `[T; N]`.
    Array { elem: Box<TypeInfo>, len: usize },
    Map { key: Box<TypeInfo>, value: Box<TypeInfo> },
    Struct(StructInfo),
    WellKnown(WellKnown),
    Custom(CustomSchemaFn),
    /// Any JSON value.
    Any,
    /// `()`: no value on the wire.
    Unit,
    /// A type with no wire representation.
    Unsupported(&'static str),
}

impl TypeKind {
    /// Short label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Bool => "bool",
            TypeKind::Int { .. } => "integer",
            TypeKind::Float { .. } => "float",
            TypeKind::String => "string",
            TypeKind::Optional(_) => "option",
            TypeKind::Pointer(_) => "pointer",
            TypeKind::Seq { .. } => "sequence",
            TypeKind::Array { .. } => "array",
            TypeKind::Map { .. } => "map",
            TypeKind::Struct(_) => "struct",
            TypeKind::WellKnown(_) => "well-known",
            TypeKind::Custom(_) => "custom",
            TypeKind::Any => "any",
            TypeKind::Unit => "unit",
            TypeKind::Unsupported(_) => "unsupported",
        }
    }
}

/// Concrete types with a fixed string representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnown {
    /// RFC 3339 timestamp.
    DateTime,
    /// Calendar date.
    Date,
    Ipv4,
    Ipv6,
    /// IPv4 or IPv6 address.
    Ip,
    /// Base64-encoded bytes.
    Bytes,
    /// Raw binary payload (uploads, downloads).
    Binary,
    /// Pre-serialized JSON carried as an opaque string.
    RawJson,
    Uuid,
}

/// Fields of a struct, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct StructInfo {
    pub fields: Vec<FieldInfo>,
}

/// One struct field.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    /// Declared field name.
    pub name: &'static str,
    /// Descriptor of the field type, resolved on demand.
    pub ty: fn() -> TypeInfo,
    /// Metadata tags as `(key, raw value)` pairs.
    pub tags: &'static [(&'static str, &'static str)],
    /// The field's own fields are promoted into the parent (`#[serde(flatten)]`).
    pub embedded: bool,
}

impl FieldInfo {
    pub fn new(name: &'static str, ty: fn() -> TypeInfo) -> Self {
        Self {
            name,
            ty,
            tags: &[],
            embedded: false,
        }
    }

    pub fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Raw value of the tag `key`, like a Go struct tag lookup.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().rev().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn type_info(&self) -> TypeInfo {
        (self.ty)()
    }
}

impl TypeInfo {
    /// Descriptor for `T` with the given shape.
    pub fn of<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: Some(std::any::type_name::<T>()),
            default_name: None,
            kind,
        }
    }

    /// Struct descriptor for `T`.
    pub fn structure<T: ?Sized + 'static>(fields: Vec<FieldInfo>) -> Self {
        Self::of::<T>(TypeKind::Struct(StructInfo { fields }))
    }

    /// Descriptor that defers to `T`'s [`CustomSchemaProvider`] impl.
    pub fn custom<T: CustomSchemaProvider + ?Sized + 'static>() -> Self {
        Self::of::<T>(TypeKind::Custom(T::schema))
    }

    /// Drop the qualified name. Composite anonymous types need an explicit
    /// component name.
    pub fn anonymous(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn with_default_name(mut self, name: &'static str) -> Self {
        self.default_name = Some(name);
        self
    }

    /// Strip every pointer layer. The flag is `true` when any layer is an
    /// `Option`.
    pub fn dereference(&self) -> (&TypeInfo, bool) {
        let mut current = self;
        let mut optional = false;
        loop {
            match &current.kind {
                TypeKind::Optional(inner) => {
                    optional = true;
                    current = inner;
                }
                TypeKind::Pointer(inner) => current = inner,
                _ => return (current, optional),
            }
        }
    }

    /// `true` when the type may be absent on the wire.
    pub fn is_optional(&self) -> bool {
        self.dereference().1
    }

    /// Name for diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.unwrap_or("<anonymous>")
    }
}

// ── Primitives ──────────────────────────────────────────────────────────────

macro_rules! reflect_int {
    ($($t:ty => $signed:expr, $bits:expr;)*) => {
        $(
            impl Reflect for $t {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$t>(TypeKind::Int { signed: $signed, bits: $bits })
                }
            }
        )*
    };
}

reflect_int! {
    i8 => true, 8;
    i16 => true, 16;
    i32 => true, 32;
    i64 => true, 64;
    i128 => true, 128;
    isize => true, 64;
    u8 => false, 8;
    u16 => false, 16;
    u32 => false, 32;
    u64 => false, 64;
    u128 => false, 128;
    usize => false, 64;
}

impl Reflect for f32 {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<f32>(TypeKind::Float { bits: 32 })
    }
}

impl Reflect for f64 {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<f64>(TypeKind::Float { bits: 64 })
    }
}

impl Reflect for bool {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<bool>(TypeKind::Bool)
    }
}

macro_rules! reflect_string {
    ($($t:ty),*) => {
        $(
            impl Reflect for $t {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$t>(TypeKind::String)
                }
            }
        )*
    };
}

reflect_string!(String, str, char, Cow<'static, str>);

impl Reflect for () {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<()>(TypeKind::Unit)
    }
}

// ── Pointers ────────────────────────────────────────────────────────────────

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Optional(Box::new(T::type_info())))
    }
}

macro_rules! reflect_pointer {
    ($($p:ident),*) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $p<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<Self>(TypeKind::Pointer(Box::new(T::type_info())))
                }
            }
        )*
    };
}

reflect_pointer!(Box, Arc, Rc);

impl<T: Reflect + ?Sized> Reflect for &'static T {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Pointer(Box::new(T::type_info())))
    }
}

// ── Containers ──────────────────────────────────────────────────────────────

macro_rules! reflect_seq {
    ($($c:ident => $unique:expr),*) => {
        $(
            impl<T: Reflect> Reflect for $c<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<Self>(TypeKind::Seq {
                        elem: Box::new(T::type_info()),
                        unique: $unique,
                    })
                }
            }
        )*
    };
}

reflect_seq!(Vec => false, VecDeque => false, LinkedList => false, HashSet => true, BTreeSet => true);

impl<T: Reflect> Reflect for [T] {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Seq {
            elem: Box::new(T::type_info()),
            unique: false,
        })
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Array {
            elem: Box::new(T::type_info()),
            len: N,
        })
    }
}

impl<K: Reflect, V: Reflect> Reflect for HashMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Map {
            key: Box::new(K::type_info()),
            value: Box::new(V::type_info()),
        })
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Map {
            key: Box::new(K::type_info()),
            value: Box::new(V::type_info()),
        })
    }
}

// ── Well-known types ────────────────────────────────────────────────────────

macro_rules! reflect_well_known {
    ($($t:ty => $wk:ident),* $(,)?) => {
        $(
            impl Reflect for $t {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$t>(TypeKind::WellKnown(WellKnown::$wk))
                }
            }
        )*
    };
}

reflect_well_known! {
    chrono::NaiveDateTime => DateTime,
    chrono::NaiveDate => Date,
    std::time::SystemTime => DateTime,
    Ipv4Addr => Ipv4,
    Ipv6Addr => Ipv6,
    IpAddr => Ip,
    bytes::Bytes => Bytes,
    serde_json::value::RawValue => RawJson,
    uuid::Uuid => Uuid,
}

impl<Tz: chrono::TimeZone + 'static> Reflect for chrono::DateTime<Tz> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::WellKnown(WellKnown::DateTime))
    }
}

impl Reflect for serde_json::Value {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Any)
    }
}

// ── Types without a wire representation ─────────────────────────────────────

impl<T: 'static> Reflect for std::sync::mpsc::Sender<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Unsupported("channels have no wire representation"))
    }
}

impl<T: 'static> Reflect for std::sync::mpsc::Receiver<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Unsupported("channels have no wire representation"))
    }
}

impl<R: 'static> Reflect for fn() -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Unsupported("functions have no wire representation"))
    }
}

impl<A: 'static, R: 'static> Reflect for fn(A) -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>(TypeKind::Unsupported("functions have no wire representation"))
    }
}
