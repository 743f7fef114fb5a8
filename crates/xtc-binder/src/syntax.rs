//! Fragment syntax model.
//!
//! These are the values an external parser hands to the declaration table:
//! one `TypeDeclarationFragment` per syntactic occurrence of a type, with its
//! members and the unresolved `TypeSyntax` trees for its underlying type, base
//! list, constraints and member signatures.
//!
//! Every type is serde-serializable so a front end can stream fragments as
//! JSON. The builder methods exist for hosts and tests that construct
//! fragments in code.

use crate::modifiers::Modifiers;
use serde::{Deserialize, Serialize};
use xtc_common::Span;

// =============================================================================
// Declarations
// =============================================================================

/// Nullable-reference-type context in effect at a piece of syntax.
///
/// Types written in a `Disabled` region are "oblivious": their nullability is
/// unknown and acts as a wildcard when reconciling mismatches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NullableContext {
    #[default]
    Disabled,
    Enabled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Extension,
}

impl TypeKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
            TypeKind::Extension => "extension",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionModifier {
    Implicit,
    Explicit,
}

impl ExtensionModifier {
    pub const fn keyword(self) -> &'static str {
        match self {
            ExtensionModifier::Implicit => "implicit",
            ExtensionModifier::Explicit => "explicit",
        }
    }
}

/// One syntactic occurrence of a (possibly partial) type declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclarationFragment {
    pub name: String,
    #[serde(default)]
    pub name_span: Span,
    #[serde(default)]
    pub file: String,
    /// Dotted namespace name; empty for the global namespace.
    #[serde(default)]
    pub namespace: String,
    pub kind: TypeKind,
    /// `implicit` / `explicit`; only meaningful for extensions.
    #[serde(default)]
    pub extension_modifier: Option<ExtensionModifier>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSyntax>,
    /// The `for T` clause of an extension.
    #[serde(default)]
    pub underlying_type: Option<TypeSyntax>,
    /// Base extensions of an extension; base class and interfaces otherwise.
    #[serde(default)]
    pub base_list: Vec<TypeSyntax>,
    #[serde(default)]
    pub members: Vec<MemberFragment>,
    #[serde(default)]
    pub nullable_context: NullableContext,
}

impl TypeDeclarationFragment {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        TypeDeclarationFragment {
            name: name.into(),
            name_span: Span::dummy(),
            file: String::new(),
            namespace: String::new(),
            kind,
            extension_modifier: None,
            modifiers: Modifiers::empty(),
            type_parameters: Vec::new(),
            underlying_type: None,
            base_list: Vec::new(),
            members: Vec::new(),
            nullable_context: NullableContext::Disabled,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Struct, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    pub fn delegate(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Delegate, name)
    }

    pub fn extension(name: impl Into<String>, modifier: ExtensionModifier) -> Self {
        let mut fragment = Self::new(TypeKind::Extension, name);
        fragment.extension_modifier = Some(modifier);
        fragment
    }

    pub fn explicit_extension(name: impl Into<String>) -> Self {
        Self::extension(name, ExtensionModifier::Explicit)
    }

    pub fn implicit_extension(name: impl Into<String>) -> Self {
        Self::extension(name, ExtensionModifier::Implicit)
    }

    #[must_use]
    pub fn partial(mut self) -> Self {
        self.modifiers |= Modifiers::PARTIAL;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    #[must_use]
    pub fn for_type(mut self, underlying: TypeSyntax) -> Self {
        self.underlying_type = Some(underlying);
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: TypeSyntax) -> Self {
        self.base_list.push(base);
        self
    }

    #[must_use]
    pub fn with_bases(mut self, bases: impl IntoIterator<Item = TypeSyntax>) -> Self {
        self.base_list.extend(bases);
        self
    }

    #[must_use]
    pub fn with_type_parameter(mut self, parameter: TypeParameterSyntax) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_type_parameters<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.type_parameters
            .extend(names.into_iter().map(TypeParameterSyntax::new));
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberFragment) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_nested(mut self, nested: TypeDeclarationFragment) -> Self {
        self.members.push(MemberFragment::nested(nested));
        self
    }

    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn at(mut self, start: u32, len: u32) -> Self {
        self.name_span = Span::at(start, len);
        self
    }

    #[must_use]
    pub fn nullable(mut self, context: NullableContext) -> Self {
        self.nullable_context = context;
        self
    }

    #[inline]
    pub fn arity(&self) -> u32 {
        self.type_parameters.len() as u32
    }

    #[inline]
    pub fn is_partial(&self) -> bool {
        self.modifiers.contains(Modifiers::PARTIAL)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterSyntax {
    pub name: String,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub constraints: Vec<ConstraintSyntax>,
}

impl TypeParameterSyntax {
    pub fn new(name: impl Into<String>) -> Self {
        TypeParameterSyntax {
            name: name.into(),
            span: Span::dummy(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: ConstraintSyntax) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// One entry of a `where T : ...` clause.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintSyntax {
    /// `class` or `class?`
    ReferenceType { annotated: bool },
    /// `struct`
    ValueType,
    /// `notnull`
    NotNull,
    /// An explicit base class or interface.
    Type(TypeSyntax),
}

// =============================================================================
// Members
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAccessors {
    pub get: bool,
    pub set: bool,
    pub init: bool,
    /// All accessors are bodiless, so the compiler synthesizes a backing field.
    pub is_auto: bool,
}

impl PropertyAccessors {
    pub const fn auto_get_set() -> Self {
        PropertyAccessors {
            get: true,
            set: true,
            init: false,
            is_auto: true,
        }
    }

    pub const fn computed_get() -> Self {
        PropertyAccessors {
            get: true,
            set: false,
            init: false,
            is_auto: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorKind {
    Plus,
    Minus,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    True,
    False,
    Implicit,
    Explicit,
}

impl OperatorKind {
    pub const fn token(self) -> &'static str {
        match self {
            OperatorKind::Plus => "+",
            OperatorKind::Minus => "-",
            OperatorKind::Equality => "==",
            OperatorKind::Inequality => "!=",
            OperatorKind::LessThan => "<",
            OperatorKind::GreaterThan => ">",
            OperatorKind::LessThanOrEqual => "<=",
            OperatorKind::GreaterThanOrEqual => ">=",
            OperatorKind::True => "true",
            OperatorKind::False => "false",
            OperatorKind::Implicit => "implicit",
            OperatorKind::Explicit => "explicit",
        }
    }

    /// The operator that must be declared alongside this one, if any.
    pub const fn matching(self) -> Option<OperatorKind> {
        match self {
            OperatorKind::Equality => Some(OperatorKind::Inequality),
            OperatorKind::Inequality => Some(OperatorKind::Equality),
            OperatorKind::LessThan => Some(OperatorKind::GreaterThan),
            OperatorKind::GreaterThan => Some(OperatorKind::LessThan),
            OperatorKind::LessThanOrEqual => Some(OperatorKind::GreaterThanOrEqual),
            OperatorKind::GreaterThanOrEqual => Some(OperatorKind::LessThanOrEqual),
            OperatorKind::True => Some(OperatorKind::False),
            OperatorKind::False => Some(OperatorKind::True),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Field,
    Constant,
    Method,
    Property(PropertyAccessors),
    Indexer,
    Event { field_like: bool },
    Operator(OperatorKind),
    NestedType(Box<TypeDeclarationFragment>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSyntax {
    pub name: String,
    pub ty: TypeSyntax,
    /// The receiver of an extension method (`this T t`).
    #[serde(default)]
    pub is_this: bool,
}

impl ParameterSyntax {
    pub fn new(name: impl Into<String>, ty: TypeSyntax) -> Self {
        ParameterSyntax {
            name: name.into(),
            ty,
            is_this: false,
        }
    }

    pub fn receiver(name: impl Into<String>, ty: TypeSyntax) -> Self {
        ParameterSyntax {
            name: name.into(),
            ty,
            is_this: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFragment {
    pub name: String,
    #[serde(default)]
    pub name_span: Span,
    pub kind: MemberKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Field/property/event type, or method/operator return type.
    #[serde(default)]
    pub ty: Option<TypeSyntax>,
    #[serde(default)]
    pub parameters: Vec<ParameterSyntax>,
}

impl MemberFragment {
    pub fn new(kind: MemberKind, name: impl Into<String>) -> Self {
        MemberFragment {
            name: name.into(),
            name_span: Span::dummy(),
            kind,
            modifiers: Modifiers::empty(),
            ty: None,
            parameters: Vec::new(),
        }
    }

    pub fn field(name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self::new(MemberKind::Field, name).of_type(ty)
    }

    pub fn constant(name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self::new(MemberKind::Constant, name).of_type(ty)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(MemberKind::Method, name).of_type(TypeSyntax::predefined(PredefinedType::Void))
    }

    pub fn property(name: impl Into<String>, ty: TypeSyntax, accessors: PropertyAccessors) -> Self {
        Self::new(MemberKind::Property(accessors), name).of_type(ty)
    }

    pub fn indexer(ty: TypeSyntax, parameter: ParameterSyntax) -> Self {
        Self::new(MemberKind::Indexer, "this[]")
            .of_type(ty)
            .with_parameter(parameter)
    }

    pub fn event(name: impl Into<String>, ty: TypeSyntax, field_like: bool) -> Self {
        Self::new(MemberKind::Event { field_like }, name).of_type(ty)
    }

    pub fn operator(op: OperatorKind, return_type: TypeSyntax) -> Self {
        Self::new(MemberKind::Operator(op), format!("operator {}", op.token())).of_type(return_type)
    }

    pub fn nested(fragment: TypeDeclarationFragment) -> Self {
        MemberFragment {
            name: fragment.name.clone(),
            name_span: fragment.name_span,
            modifiers: fragment.modifiers,
            kind: MemberKind::NestedType(Box::new(fragment)),
            ty: None,
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    #[must_use]
    pub fn of_type(mut self, ty: TypeSyntax) -> Self {
        self.ty = Some(ty);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSyntax) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn at(mut self, start: u32, len: u32) -> Self {
        self.name_span = Span::at(start, len);
        self
    }
}

// =============================================================================
// Type syntax
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PredefinedType {
    Object,
    Dynamic,
    String,
    Bool,
    Char,
    Int,
    Long,
    Double,
    NInt,
    Void,
}

impl PredefinedType {
    pub const fn keyword(self) -> &'static str {
        match self {
            PredefinedType::Object => "object",
            PredefinedType::Dynamic => "dynamic",
            PredefinedType::String => "string",
            PredefinedType::Bool => "bool",
            PredefinedType::Char => "char",
            PredefinedType::Int => "int",
            PredefinedType::Long => "long",
            PredefinedType::Double => "double",
            PredefinedType::NInt => "nint",
            PredefinedType::Void => "void",
        }
    }
}

/// A type as written in source, before name resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSyntax {
    pub kind: TypeSyntaxKind,
    #[serde(default)]
    pub span: Span,
    /// Context where the type was written; `None` inherits the fragment's.
    #[serde(default)]
    pub nullable_context: Option<NullableContext>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeSyntaxKind {
    Predefined(PredefinedType),
    /// A possibly qualified name: `Outer.Inner<int>`.
    Name(Vec<NameSegment>),
    Array { element: Box<TypeSyntax>, rank: u32 },
    Tuple(Vec<TupleElementSyntax>),
    /// `T?`
    Nullable(Box<TypeSyntax>),
    /// `T*`
    Pointer(Box<TypeSyntax>),
    /// `delegate*<P1, P2, R>`
    FunctionPointer {
        parameters: Vec<TypeSyntax>,
        return_type: Box<TypeSyntax>,
    },
    /// `ref T`
    Ref(Box<TypeSyntax>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSegment {
    pub name: String,
    #[serde(default)]
    pub type_arguments: Vec<TypeSyntax>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleElementSyntax {
    pub ty: TypeSyntax,
    #[serde(default)]
    pub name: Option<String>,
}

impl TypeSyntax {
    pub fn new(kind: TypeSyntaxKind) -> Self {
        TypeSyntax {
            kind,
            span: Span::dummy(),
            nullable_context: None,
        }
    }

    pub fn predefined(ty: PredefinedType) -> Self {
        Self::new(TypeSyntaxKind::Predefined(ty))
    }

    pub fn object() -> Self {
        Self::predefined(PredefinedType::Object)
    }

    pub fn dynamic() -> Self {
        Self::predefined(PredefinedType::Dynamic)
    }

    pub fn string() -> Self {
        Self::predefined(PredefinedType::String)
    }

    pub fn int() -> Self {
        Self::predefined(PredefinedType::Int)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    pub fn generic(name: impl Into<String>, type_arguments: Vec<TypeSyntax>) -> Self {
        Self::new(TypeSyntaxKind::Name(vec![NameSegment {
            name: name.into(),
            type_arguments,
        }]))
    }

    /// `Outer.Inner`, with type arguments on none of the segments.
    pub fn qualified<S: AsRef<str>>(segments: &[S]) -> Self {
        Self::new(TypeSyntaxKind::Name(
            segments
                .iter()
                .map(|s| NameSegment {
                    name: s.as_ref().to_string(),
                    type_arguments: Vec::new(),
                })
                .collect(),
        ))
    }

    pub fn tuple<S: Into<String>>(elements: Vec<(TypeSyntax, Option<S>)>) -> Self {
        Self::new(TypeSyntaxKind::Tuple(
            elements
                .into_iter()
                .map(|(ty, name)| TupleElementSyntax {
                    ty,
                    name: name.map(Into::into),
                })
                .collect(),
        ))
    }

    pub fn function_pointer(parameters: Vec<TypeSyntax>, return_type: TypeSyntax) -> Self {
        Self::new(TypeSyntaxKind::FunctionPointer {
            parameters,
            return_type: Box::new(return_type),
        })
    }

    #[must_use]
    pub fn array(self) -> Self {
        Self::new(TypeSyntaxKind::Array {
            element: Box::new(self),
            rank: 1,
        })
    }

    #[must_use]
    pub fn nullable(self) -> Self {
        Self::new(TypeSyntaxKind::Nullable(Box::new(self)))
    }

    #[must_use]
    pub fn pointer(self) -> Self {
        Self::new(TypeSyntaxKind::Pointer(Box::new(self)))
    }

    #[must_use]
    pub fn by_ref(self) -> Self {
        Self::new(TypeSyntaxKind::Ref(Box::new(self)))
    }

    #[must_use]
    pub fn at(mut self, start: u32, len: u32) -> Self {
        self.span = Span::at(start, len);
        self
    }

    /// Mark the type (and everything nested in it without its own context) as
    /// written under the given nullable context.
    #[must_use]
    pub fn in_context(mut self, context: NullableContext) -> Self {
        self.nullable_context = Some(context);
        self
    }

    /// Source-like rendering, used when a name cannot be resolved.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    fn write_source(&self, out: &mut String) {
        match &self.kind {
            TypeSyntaxKind::Predefined(p) => out.push_str(p.keyword()),
            TypeSyntaxKind::Name(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(&segment.name);
                    if !segment.type_arguments.is_empty() {
                        out.push('<');
                        for (j, arg) in segment.type_arguments.iter().enumerate() {
                            if j > 0 {
                                out.push_str(", ");
                            }
                            arg.write_source(out);
                        }
                        out.push('>');
                    }
                }
            }
            TypeSyntaxKind::Array { element, rank } => {
                element.write_source(out);
                out.push('[');
                for _ in 1..*rank {
                    out.push(',');
                }
                out.push(']');
            }
            TypeSyntaxKind::Tuple(elements) => {
                out.push('(');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    element.ty.write_source(out);
                    if let Some(name) = &element.name {
                        out.push(' ');
                        out.push_str(name);
                    }
                }
                out.push(')');
            }
            TypeSyntaxKind::Nullable(inner) => {
                inner.write_source(out);
                out.push('?');
            }
            TypeSyntaxKind::Pointer(inner) => {
                inner.write_source(out);
                out.push('*');
            }
            TypeSyntaxKind::FunctionPointer {
                parameters,
                return_type,
            } => {
                out.push_str("delegate*<");
                for parameter in parameters {
                    parameter.write_source(out);
                    out.push_str(", ");
                }
                return_type.write_source(out);
                out.push('>');
            }
            TypeSyntaxKind::Ref(inner) => {
                out.push_str("ref ");
                inner.write_source(out);
            }
        }
    }
}
