//! Intermediate Representation for generated binder types
//!
//! This module defines a tree-structured IR that binder synthesis produces
//! instead of strings. The IR nodes represent the Java constructs a binder
//! needs: field declarations, constructors, method bodies, anonymous listener
//! objects, and the statements inside them.
//!
//! # Architecture
//!
//! Synthesis (`viewbind-binder`) walks a binding set and produces an `IRFile`.
//! The printer then walks the IR and emits Java source text.
//!
//! - Synthesis decides *what* exists (fields, statements, control flow)
//! - The printer decides *how* it is spelled (imports, indentation, punctuation)
//!
//! # IR Structure
//!
//! `IRNode` covers expressions and statements. Declarations are plain structs:
//! `IRFile` holds one `IRClass`, which holds `IRField`s and `IRMethod`s.

use viewbind_common::{ClassName, TypeName};

/// Intermediate Representation node for generated Java code
#[derive(Debug, Clone, PartialEq)]
pub enum IRNode {
    // =========================================================================
    // Literals
    // =========================================================================
    /// Numeric literal: `42`, `2131230801`
    NumericLiteral(String),

    /// String literal: `"field 'title'"`
    StringLiteral(String),

    /// Boolean literal: `true`, `false`
    BooleanLiteral(bool),

    /// Null literal: `null`
    NullLiteral,

    // =========================================================================
    // Names
    // =========================================================================
    /// Identifier: `target`, `view`, `p0`
    Identifier(String),

    /// `this`
    This,

    /// `super`
    Super,

    /// A type used as an expression, e.g. the receiver of a static call: `Utils`
    TypeRef(TypeName),

    /// Class literal: `TextView.class`
    ClassLiteral(TypeName),

    // =========================================================================
    // Expressions
    // =========================================================================
    /// Binary expression: `left op right`
    BinaryExpr {
        left: Box<Self>,
        operator: String,
        right: Box<Self>,
    },

    /// Method call: `receiver.<T>name(args)`; no receiver means an unqualified call
    MethodCall {
        receiver: Option<Box<Self>>,
        type_arguments: Vec<TypeName>,
        name: String,
        arguments: Vec<Self>,
    },

    /// Field access: `object.field`
    FieldAccess { object: Box<Self>, field: String },

    /// Cast expression: `(Type) expr`
    Cast { ty: TypeName, expr: Box<Self> },


    /// Instance creation: `new Type(args)`
    NewExpr { ty: TypeName, arguments: Vec<Self> },

    /// Anonymous class: `new Type(args) { methods }`
    AnonymousClass {
        superclass: TypeName,
        arguments: Vec<Self>,
        methods: Vec<IRMethod>,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    /// Local variable declaration: `Type name = init;`
    LocalVarDecl {
        ty: TypeName,
        name: String,
        initializer: Option<Box<Self>>,
    },

    /// Expression statement: `expr;`
    ExpressionStatement(Box<Self>),

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<Self>>),

    /// Throw statement: `throw expr;`
    ThrowStatement(Box<Self>),

    /// If statement: `if (cond) { then } else { else }`
    IfStatement {
        condition: Box<Self>,
        then_branch: Vec<Self>,
        else_branch: Option<Vec<Self>>,
    },

    /// Explicit superclass constructor call: `super(args);`
    SuperCall(Vec<Self>),

    /// Empty line separating groups of statements
    BlankLine,

    // =========================================================================
    // Special
    // =========================================================================
    /// Raw Java text (escape hatch)
    Raw(String),

    /// Line comment: `// text`
    Comment(String),

    /// Sequence of statements emitted in order
    Sequence(Vec<Self>),
}

bitflags::bitflags! {
    /// Java declaration modifiers, printed in canonical order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
    }
}

impl Modifiers {
    /// Keywords in declaration order.
    pub fn keywords(self) -> Vec<&'static str> {
        [
            (Self::PUBLIC, "public"),
            (Self::PROTECTED, "protected"),
            (Self::PRIVATE, "private"),
            (Self::ABSTRACT, "abstract"),
            (Self::STATIC, "static"),
            (Self::FINAL, "final"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, keyword)| keyword)
        .collect()
    }
}

/// Method or constructor parameter
#[derive(Debug, Clone, PartialEq)]
pub struct IRParam {
    pub ty: TypeName,
    pub name: String,
    pub is_final: bool,
}

/// Field declaration
#[derive(Debug, Clone, PartialEq)]
pub struct IRField {
    pub ty: TypeName,
    pub name: String,
    pub modifiers: Modifiers,
}

/// Constructor vs. named method
#[derive(Debug, Clone, PartialEq)]
pub enum IRMethodKind {
    Constructor,
    Method { name: String, return_type: TypeName },
}

/// Method or constructor declaration
#[derive(Debug, Clone, PartialEq)]
pub struct IRMethod {
    pub kind: IRMethodKind,
    pub annotations: Vec<ClassName>,
    pub modifiers: Modifiers,
    pub parameters: Vec<IRParam>,
    pub body: Vec<IRNode>,
}

/// Class declaration
#[derive(Debug, Clone, PartialEq)]
pub struct IRClass {
    pub name: String,
    pub modifiers: Modifiers,
    pub superclass: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub fields: Vec<IRField>,
    pub methods: Vec<IRMethod>,
}

/// One generated compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct IRFile {
    pub package: String,
    pub file_comment: Option<String>,
    pub class: IRClass,
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl IRNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringLiteral(s.into())
    }

    /// Create a numeric literal
    pub fn number(n: impl Into<String>) -> Self {
        Self::NumericLiteral(n.into())
    }

    /// Create a type reference (static call receiver)
    pub fn type_ref(ty: impl Into<TypeName>) -> Self {
        Self::TypeRef(ty.into())
    }

    /// Create a class literal: `Type.class`
    pub fn class_literal(ty: TypeName) -> Self {
        Self::ClassLiteral(ty)
    }

    /// Create a method call on a receiver: `receiver.name(args)`
    pub fn call(receiver: Self, name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::MethodCall {
            receiver: Some(Box::new(receiver)),
            type_arguments: Vec::new(),
            name: name.into(),
            arguments: args,
        }
    }

    /// Create a static call: `Type.name(args)`
    pub fn static_call(owner: ClassName, name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::call(Self::type_ref(owner), name, args)
    }

    /// Create a static call with explicit type arguments: `Type.<T>name(args)`
    pub fn generic_static_call(
        owner: ClassName,
        type_arguments: Vec<TypeName>,
        name: impl Into<String>,
        args: Vec<Self>,
    ) -> Self {
        Self::MethodCall {
            receiver: Some(Box::new(Self::type_ref(owner))),
            type_arguments,
            name: name.into(),
            arguments: args,
        }
    }

    /// Create a field access
    pub fn field(object: Self, field: impl Into<String>) -> Self {
        Self::FieldAccess {
            object: Box::new(object),
            field: field.into(),
        }
    }

    /// Create `this.field`
    pub fn this_field(field: impl Into<String>) -> Self {
        Self::field(Self::This, field)
    }

    /// Create a binary expression
    pub fn binary(left: Self, op: impl Into<String>, right: Self) -> Self {
        Self::BinaryExpr {
            left: Box::new(left),
            operator: op.into(),
            right: Box::new(right),
        }
    }

    /// Create an assignment expression
    pub fn assign(target: Self, value: Self) -> Self {
        Self::binary(target, "=", value)
    }

    /// Create `left != right`
    pub fn not_equal(left: Self, right: Self) -> Self {
        Self::binary(left, "!=", right)
    }

    /// Create `left == right`
    pub fn equal(left: Self, right: Self) -> Self {
        Self::binary(left, "==", right)
    }

    /// Create a cast: `(Type) expr`
    pub fn cast(ty: TypeName, expr: Self) -> Self {
        Self::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    /// Create a new expression: `new Type(args)`
    pub fn new_expr(ty: TypeName, args: Vec<Self>) -> Self {
        Self::NewExpr { ty, arguments: args }
    }

    /// Create an expression statement
    pub fn expr_stmt(expr: Self) -> Self {
        Self::ExpressionStatement(Box::new(expr))
    }

    /// Create an assignment statement: `target = value;`
    pub fn assign_stmt(target: Self, value: Self) -> Self {
        Self::expr_stmt(Self::assign(target, value))
    }

    /// Create a local variable declaration
    pub fn local(ty: TypeName, name: impl Into<String>, init: Option<Self>) -> Self {
        Self::LocalVarDecl {
            ty,
            name: name.into(),
            initializer: init.map(Box::new),
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Create `throw new Type(args);`
    pub fn throw_new(ty: ClassName, args: Vec<Self>) -> Self {
        Self::ThrowStatement(Box::new(Self::new_expr(ty.into(), args)))
    }

    /// Create an if statement without else
    pub fn if_then(condition: Self, then_branch: Vec<Self>) -> Self {
        Self::IfStatement {
            condition: Box::new(condition),
            then_branch,
            else_branch: None,
        }
    }

    /// Create `super(args);`
    pub const fn super_call(args: Vec<Self>) -> Self {
        Self::SuperCall(args)
    }

    /// True for nodes that print as a standalone statement.
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::LocalVarDecl { .. }
                | Self::ExpressionStatement(_)
                | Self::ReturnStatement(_)
                | Self::ThrowStatement(_)
                | Self::IfStatement { .. }
                | Self::SuperCall(_)
                | Self::BlankLine
                | Self::Comment(_)
                | Self::Sequence(_)
        )
    }
}

impl IRParam {
    pub fn new(ty: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            is_final: false,
        }
    }

    pub fn final_param(ty: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            is_final: true,
            ..Self::new(ty, name)
        }
    }
}

impl IRField {
    pub fn new(ty: impl Into<TypeName>, name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            modifiers,
        }
    }
}

impl IRMethod {
    pub const fn constructor() -> Self {
        Self {
            kind: IRMethodKind::Constructor,
            annotations: Vec::new(),
            modifiers: Modifiers::empty(),
            parameters: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn method(name: impl Into<String>, return_type: TypeName) -> Self {
        Self {
            kind: IRMethodKind::Method {
                name: name.into(),
                return_type,
            },
            ..Self::constructor()
        }
    }

    pub fn with_annotation(mut self, annotation: ClassName) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn with_param(mut self, param: IRParam) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_statement(mut self, statement: IRNode) -> Self {
        self.body.push(statement);
        self
    }

    pub fn push(&mut self, statement: IRNode) {
        self.body.push(statement);
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            IRMethodKind::Constructor => None,
            IRMethodKind::Method { name, .. } => Some(name.as_str()),
        }
    }

    pub const fn is_constructor(&self) -> bool {
        matches!(self.kind, IRMethodKind::Constructor)
    }
}

impl IRClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::empty(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a field unless one with the same name is already declared.
    pub fn add_field(&mut self, field: IRField) {
        if !self.fields.iter().any(|existing| existing.name == field.name) {
            self.fields.push(field);
        }
    }

    pub fn field(&self, name: &str) -> Option<&IRField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&IRMethod> {
        self.methods.iter().find(|method| method.name() == Some(name))
    }

    pub fn constructors(&self) -> impl Iterator<Item = &IRMethod> {
        self.methods.iter().filter(|method| method.is_constructor())
    }
}
