//! Type display for diagnostic messages.
//!
//! Types print the way they are written in source, qualified with their
//! namespace and containing types: `N.Outer.Inner<object?>`, `(int i, int j)`,
//! `int*`, `delegate*<int, void>`, `ref int`, `int?`.

use crate::def::{DefId, DefinitionStore};
use crate::intern::TypeInterner;
use crate::types::{AnnotatedType, TypeData, TypeId};
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    types: &'a TypeInterner,
    defs: &'a DefinitionStore,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(types: &'a TypeInterner, defs: &'a DefinitionStore) -> Self {
        TypeFormatter { types, defs }
    }

    pub fn display(&self, ty: AnnotatedType) -> String {
        let mut out = String::new();
        self.write_annotated(&mut out, ty);
        out
    }

    pub fn display_type(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    /// A definition with its own type parameters: `N.R<T>`.
    pub fn display_def(&self, def: DefId) -> String {
        let mut out = String::new();
        self.write_def_name(&mut out, def);
        let params = self.defs.get_type_params(def).unwrap_or_default();
        if !params.is_empty() {
            out.push('<');
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.types.resolve_atom(param.name));
            }
            out.push('>');
        }
        out
    }

    fn write_def_name(&self, out: &mut String, def: DefId) {
        let Some(info) = self.defs.get(def) else {
            out.push('?');
            return;
        };
        match info.container {
            Some(container) => {
                out.push_str(&self.display_def(container));
                out.push('.');
            }
            None if !info.namespace.is_none() => {
                out.push_str(&self.types.resolve_atom(info.namespace));
                out.push('.');
            }
            None => {}
        }
        out.push_str(&self.types.resolve_atom(info.name));
    }

    fn write_annotated(&self, out: &mut String, ty: AnnotatedType) {
        self.write_type(out, ty.ty);
        if ty.is_annotated() && !matches!(self.types.lookup(ty.ty), TypeData::NullableValue(_)) {
            out.push('?');
        }
    }

    fn write_args(&self, out: &mut String, args: &[AnnotatedType]) {
        if args.is_empty() {
            return;
        }
        out.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_annotated(out, *arg);
        }
        out.push('>');
    }

    fn write_type(&self, out: &mut String, ty: TypeId) {
        match self.types.lookup(ty) {
            TypeData::Intrinsic(kind) => out.push_str(kind.keyword()),
            TypeData::Named { def, args } => {
                self.write_def_name(out, def);
                self.write_args(out, &args);
            }
            TypeData::TypeParameter { name, .. } => out.push_str(&self.types.resolve_atom(name)),
            TypeData::Array { element, rank } => {
                self.write_annotated(out, element);
                out.push('[');
                for _ in 1..rank {
                    out.push(',');
                }
                out.push(']');
            }
            TypeData::Tuple(elements) => {
                out.push('(');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_annotated(out, element.ty);
                    if let Some(name) = element.name {
                        let _ = write!(out, " {}", self.types.resolve_atom(name));
                    }
                }
                out.push(')');
            }
            TypeData::NullableValue(inner) => {
                self.write_type(out, inner);
                out.push('?');
            }
            TypeData::Pointer(inner) => {
                self.write_type(out, inner);
                out.push('*');
            }
            TypeData::FunctionPointer {
                parameters,
                return_type,
            } => {
                out.push_str("delegate*<");
                for parameter in parameters {
                    self.write_type(out, parameter);
                    out.push_str(", ");
                }
                self.write_type(out, return_type);
                out.push('>');
            }
            TypeData::ByRef(inner) => {
                out.push_str("ref ");
                self.write_type(out, inner);
            }
            TypeData::Error { name, args } => {
                if name.is_none() {
                    out.push('?');
                } else {
                    out.push_str(&self.types.resolve_atom(name));
                }
                self.write_args(out, &args);
            }
        }
    }
}
