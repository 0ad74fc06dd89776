//! Java type names.
//!
//! `TypeName` is the structured representation used whenever generated code
//! mentions a type: casts, class literals, listener callback signatures,
//! field declarations. `TypeName::resolve` is the textual type resolver that
//! turns the descriptor strings found in binding manifests and listener
//! descriptors into this representation.

use std::fmt;
use thiserror::Error;

/// Failure to interpret a textual type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeNameError {
    #[error("couldn't make a guess for '{0}'")]
    CannotGuess(String),
    #[error("empty type name")]
    Empty,
}

/// Java primitive types, including `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
}

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "void" => Self::Void,
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "double" => Self::Double,
            "float" => Self::Float,
            "int" => Self::Int,
            "long" => Self::Long,
            "short" => Self::Short,
            _ => return None,
        })
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

/// A declared class or interface, possibly nested.
///
/// `simple_names` holds the enclosing chain: `android.view.View.OnClickListener`
/// is package `android.view` with simple names `["View", "OnClickListener"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// A class nested inside this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// Parse a dotted name by convention: leading segments starting with a
    /// lower-case letter form the package, every remaining segment must start
    /// with an upper-case letter and names a (nested) class.
    pub fn best_guess(name: &str) -> Result<Self, TypeNameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TypeNameError::Empty);
        }

        let segments: Vec<&str> = name.split('.').collect();
        let package_len = segments
            .iter()
            .take_while(|segment| segment.chars().next().is_some_and(char::is_lowercase))
            .count();
        if package_len == segments.len() {
            return Err(TypeNameError::CannotGuess(name.to_string()));
        }

        let simple_names: Vec<String> = segments[package_len..]
            .iter()
            .map(|segment| segment.to_string())
            .collect();
        let valid = simple_names.iter().all(|simple| {
            simple.chars().next().is_some_and(char::is_uppercase)
                && simple.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });
        if !valid {
            return Err(TypeNameError::CannotGuess(name.to_string()));
        }

        Ok(Self {
            package: segments[..package_len].join("."),
            simple_names,
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// Innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or("")
    }

    /// Outermost enclosing class (itself when not nested).
    pub fn top_level(&self) -> Self {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names.iter().take(1).cloned().collect(),
        }
    }

    /// Fully qualified, dot-separated name.
    pub fn canonical_name(&self) -> String {
        let nested = self.simple_names.join(".");
        if self.package.is_empty() {
            nested
        } else {
            format!("{}.{}", self.package, nested)
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// Any Java type that generated code can mention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Primitive(Primitive),
    Class(ClassName),
    /// `Raw<A, B>`
    Parameterized {
        raw: ClassName,
        arguments: Vec<TypeName>,
    },
    /// `? extends Bound`; printed as `?` when the bound is `java.lang.Object`.
    Wildcard { upper_bound: Box<TypeName> },
}

impl TypeName {
    pub const VOID: Self = Self::Primitive(Primitive::Void);
    pub const BOOLEAN: Self = Self::Primitive(Primitive::Boolean);
    pub const INT: Self = Self::Primitive(Primitive::Int);

    /// Resolve a textual type descriptor.
    ///
    /// - primitive keywords map to `Primitive`;
    /// - a name containing `<` becomes a parameterized type whose raw type is
    ///   the text before the first `<`, with one unbounded wildcard argument per
    ///   `<` occurrence (argument structure is not tracked, which is enough for
    ///   cast expressions);
    /// - anything else is a best-guess dotted class name.
    pub fn resolve(text: &str) -> Result<Self, TypeNameError> {
        let text = text.trim();
        if let Some(primitive) = Primitive::from_keyword(text) {
            return Ok(Self::Primitive(primitive));
        }

        if let Some(left) = text.find('<') {
            let raw = ClassName::best_guess(&text[..left])?;
            let count = text.matches('<').count();
            let arguments = (0..count).map(|_| Self::wildcard()).collect();
            return Ok(Self::Parameterized { raw, arguments });
        }

        ClassName::best_guess(text).map(Self::Class)
    }

    pub fn object() -> Self {
        Self::Class(ClassName::new("java.lang", "Object"))
    }

    /// Unbounded wildcard, `?`.
    pub fn wildcard() -> Self {
        Self::Wildcard {
            upper_bound: Box::new(Self::object()),
        }
    }

    pub fn class(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self::Class(ClassName::new(package, simple_name))
    }

    /// The erased type: parameterized types lose their arguments.
    pub fn raw_type(&self) -> Self {
        match self {
            Self::Parameterized { raw, .. } => Self::Class(raw.clone()),
            other => other.clone(),
        }
    }

    /// Class component of a declared or parameterized type.
    pub fn class_name(&self) -> Option<&ClassName> {
        match self {
            Self::Class(name) | Self::Parameterized { raw: name, .. } => Some(name),
            _ => None,
        }
    }

    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Void))
    }

    fn is_unbounded_wildcard(&self) -> bool {
        match self {
            Self::Wildcard { upper_bound } => **upper_bound == Self::object(),
            _ => false,
        }
    }

    /// Visit every class name mentioned by this type, outermost first.
    pub fn for_each_class_name(&self, f: &mut dyn FnMut(&ClassName)) {
        match self {
            Self::Primitive(_) => {}
            Self::Class(name) => f(name),
            Self::Parameterized { raw, arguments } => {
                f(raw);
                for argument in arguments {
                    argument.for_each_class_name(f);
                }
            }
            Self::Wildcard { upper_bound } => {
                if !self.is_unbounded_wildcard() {
                    upper_bound.for_each_class_name(f);
                }
            }
        }
    }

    /// Render the type, letting `class_name` decide how each class is spelled.
    pub fn render_with(&self, class_name: &dyn Fn(&ClassName) -> String) -> String {
        match self {
            Self::Primitive(primitive) => primitive.keyword().to_string(),
            Self::Class(name) => class_name(name),
            Self::Parameterized { raw, arguments } => {
                let arguments: Vec<String> = arguments
                    .iter()
                    .map(|argument| argument.render_with(class_name))
                    .collect();
                format!("{}<{}>", class_name(raw), arguments.join(", "))
            }
            Self::Wildcard { upper_bound } => {
                if self.is_unbounded_wildcard() {
                    "?".to_string()
                } else {
                    format!("? extends {}", upper_bound.render_with(class_name))
                }
            }
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&ClassName::canonical_name))
    }
}

impl From<ClassName> for TypeName {
    fn from(name: ClassName) -> Self {
        Self::Class(name)
    }
}
