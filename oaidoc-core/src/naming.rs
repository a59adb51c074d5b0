//! Component names derived from type identities.
//!
//! Names come from [`std::any::type_name`]. The string is parsed into a small
//! type tree so generic arguments and containers can be folded into the name:
//!
//! | type | qualified | short |
//! |------|-----------|-------|
//! | `my_app::models::User` | `my_app.models.User` | `User` |
//! | `my_app::Page<alloc::vec::Vec<my_app::User>>` | `my_app.PageUserList` | `PageUserList` |
//! | `Vec<my_app::User>` | `my_app.UserList` | `UserList` |
//! | `HashMap<String, my_app::User>` | `my_app.UserMap` | `UserMap` |

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::reflect::TypeInfo;

/// How much of the type path ends up in a component name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// Module path joined with `.`, then the type name.
    #[default]
    Qualified,
    /// Type name only.
    Short,
}

/// Name under which `ty` is registered.
///
/// An explicit name wins and is used verbatim, then the type's own
/// `#[oai(name = "...")]`, then the derived name. A type without a
/// qualified identity cannot be named.
pub fn name_for(ty: &TypeInfo, explicit: Option<&str>, style: NameStyle) -> Result<String> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }
    let (ty, _) = ty.dereference();
    if let Some(name) = ty.default_name {
        return Ok(name.to_string());
    }
    let raw = ty.name.ok_or(Error::AnonymousType {
        kind: ty.kind.label(),
    })?;
    Ok(derive_name(raw, style))
}

/// Derive a component name from a `type_name` string.
pub fn derive_name(type_name: &str, style: NameStyle) -> String {
    let parsed = Parser::new(type_name).parse_type();
    let name = match style {
        NameStyle::Qualified => qualified(&parsed),
        NameStyle::Short => short(&parsed),
    };
    sanitize(&name)
}

/// Drop every character outside `[A-Za-z0-9._-]`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// `create_pet`, `create-pet` and `createPet` all become `CreatePet`.
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    out
}

// ── type_name parsing ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum TypeName {
    Path { segments: Vec<String>, args: Vec<TypeName> },
    Slice(Box<TypeName>),
    Array(Box<TypeName>),
    Ref(Box<TypeName>),
    Tuple(Vec<TypeName>),
    Lifetime,
    Other(String),
}

const TRANSPARENT: &[&str] = &["Option", "Box", "Arc", "Rc", "Cow"];
const SEQUENCES: &[&str] = &["Vec", "VecDeque", "LinkedList", "HashSet", "BTreeSet"];
const MAPS: &[&str] = &["HashMap", "BTreeMap"];
const STD_ROOTS: &[&str] = &["std", "core", "alloc"];

impl TypeName {
    fn ident(&self) -> Option<&str> {
        match self {
            TypeName::Path { segments, .. } => segments.last().map(String::as_str),
            _ => None,
        }
    }

    fn type_args(&self) -> Vec<&TypeName> {
        match self {
            TypeName::Path { args, .. } => args
                .iter()
                .filter(|a| !matches!(a, TypeName::Lifetime))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Inner type and name suffix when `self` wraps another type.
    fn unwrap_container(&self) -> Option<(&TypeName, &'static str)> {
        match self {
            TypeName::Slice(inner) | TypeName::Array(inner) => Some((inner, "List")),
            TypeName::Ref(inner) => Some((inner, "")),
            TypeName::Path { .. } => {
                let ident = self.ident()?;
                let args = self.type_args();
                match args.as_slice() {
                    [inner] if TRANSPARENT.contains(&ident) => Some((inner, "")),
                    [inner] if SEQUENCES.contains(&ident) => Some((inner, "List")),
                    [_, value] if MAPS.contains(&ident) => Some((value, "Map")),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

fn qualified(ty: &TypeName) -> String {
    if let Some((inner, suffix)) = ty.unwrap_container() {
        return format!("{}{suffix}", qualified(inner));
    }
    match ty {
        TypeName::Path { segments, .. } => {
            let module = &segments[..segments.len().saturating_sub(1)];
            let keep_module = module
                .first()
                .is_some_and(|root| !STD_ROOTS.contains(&root.as_str()));
            if keep_module {
                format!("{}.{}", module.join("."), short(ty))
            } else {
                short(ty)
            }
        }
        _ => short(ty),
    }
}

fn short(ty: &TypeName) -> String {
    if let Some((inner, suffix)) = ty.unwrap_container() {
        return format!("{}{suffix}", short(inner));
    }
    match ty {
        TypeName::Path { .. } => {
            let mut name = ty.ident().unwrap_or_default().to_string();
            for arg in ty.type_args() {
                name.push_str(&short(arg));
            }
            name
        }
        TypeName::Tuple(items) if items.is_empty() => "Unit".to_string(),
        TypeName::Tuple(items) => items.iter().map(short).collect(),
        TypeName::Other(raw) => raw.clone(),
        TypeName::Lifetime => String::new(),
        TypeName::Slice(_) | TypeName::Array(_) | TypeName::Ref(_) => {
            unreachable!("containers are unwrapped above")
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn parse_type(&mut self) -> TypeName {
        self.skip_ws();
        if self.eat("&") {
            self.skip_ws();
            if self.eat("'") {
                self.ident();
                self.skip_ws();
            }
            self.eat("mut ");
            return TypeName::Ref(Box::new(self.parse_type()));
        }
        if self.eat("'") {
            self.ident();
            return TypeName::Lifetime;
        }
        if self.eat("[") {
            let elem = self.parse_type();
            self.skip_ws();
            let ty = if self.eat(";") {
                self.balanced();
                TypeName::Array(Box::new(elem))
            } else {
                TypeName::Slice(Box::new(elem))
            };
            self.eat("]");
            return ty;
        }
        if self.eat("(") {
            let items = self.list(')');
            return TypeName::Tuple(items);
        }
        if self.rest().starts_with("dyn ") || self.rest().starts_with("fn(") {
            return TypeName::Other(self.balanced());
        }

        let mut segments = Vec::new();
        loop {
            let ident = self.ident();
            if ident.is_empty() {
                break;
            }
            segments.push(ident.to_string());
            if !self.eat("::") {
                break;
            }
        }
        if segments.is_empty() {
            return TypeName::Other(self.balanced());
        }
        let args = if self.eat("<") { self.list('>') } else { Vec::new() };
        TypeName::Path { segments, args }
    }

    /// Comma-separated types up to and including `close`.
    fn list(&mut self, close: char) -> Vec<TypeName> {
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(c) if c == close => {
                    self.bump();
                    break;
                }
                _ => {}
            }
            let start = self.pos;
            items.push(self.parse_type());
            self.skip_ws();
            if !self.eat(",") && self.pos == start {
                // Unparseable token; skip it to make progress.
                self.bump();
            }
        }
        items
    }

    /// Raw text up to the next top-level delimiter.
    fn balanced(&mut self) -> String {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '<' | '(' | '[' => depth += 1,
                '>' | ')' | ']' if depth == 0 => break,
                '>' | ')' | ']' => depth -= 1,
                ',' | ';' if depth == 0 => break,
                _ => {}
            }
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }
}
