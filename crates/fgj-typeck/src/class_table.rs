//! The class table: a validated registry of class declarations and the
//! `fields`, `mtype` and `mbody` lookups over it.

use std::collections::{HashMap, HashSet};
use fgj_ast::*;

use crate::error::ClassTableError;
use crate::subst::Substitution;

/// A method's signature as seen from a particular instantiation of its
/// class. The method's own type parameters are still abstract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodType {
    pub type_params: Vec<TypeParam>,
    pub param_types: Vec<Type>,
    pub return_type: Type,
}

impl MethodType {
    pub fn of(method: &Method) -> Self {
        Self {
            type_params: method.type_params.clone(),
            param_types: method.param_types(),
            return_type: method.return_type.clone(),
        }
    }
}

/// A method body closed over one call's type arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBody {
    pub params: Vec<String>,
    pub body: Term,
}

/// Immutable name-to-declaration registry. Built once per program.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<String, ClassDecl>,
}

impl ClassTable {
    /// Builds and validates the table.
    ///
    /// Checks, in order: duplicate or reserved class names, unknown
    /// supertypes, inheritance cycles, duplicate method names, duplicate
    /// type variables, and fields that repeat an inherited or own field.
    pub fn new(decls: Vec<ClassDecl>) -> Result<Self, ClassTableError> {
        let mut classes = HashMap::with_capacity(decls.len());
        let mut order = Vec::with_capacity(decls.len());
        for decl in decls {
            if decl.name == OBJECT {
                return Err(ClassTableError::RedefinedObject);
            }
            if classes.contains_key(&decl.name) {
                return Err(ClassTableError::DuplicateClass(decl.name));
            }
            order.push(decl.name.clone());
            classes.insert(decl.name.clone(), decl);
        }
        let table = Self { classes };

        for name in &order {
            let super_type = &table.classes[name].super_type;
            if !super_type.is_object() && !table.classes.contains_key(&super_type.name) {
                return Err(ClassTableError::UnknownClass(super_type.name.clone()));
            }
        }

        for name in &order {
            table.check_acyclic(name)?;
        }

        for name in &order {
            table.check_members(&table.classes[name])?;
        }

        tracing::debug!(classes = order.len(), "class table built");
        Ok(table)
    }

    fn check_acyclic(&self, start: &str) -> Result<(), ClassTableError> {
        let mut seen = HashSet::new();
        let mut current = &self.classes[start].super_type;
        while !current.is_object() {
            if current.name == start {
                return Err(ClassTableError::Cycle(start.to_string()));
            }
            if !seen.insert(current.name.as_str()) {
                // A cycle above us; it is reported for a class on it
                break;
            }
            current = &self.lookup(&current.name)?.super_type;
        }
        Ok(())
    }

    fn check_members(&self, decl: &ClassDecl) -> Result<(), ClassTableError> {
        let mut methods = HashSet::new();
        for method in &decl.methods {
            if !methods.insert(method.name.as_str()) {
                return Err(ClassTableError::DuplicateMethod(method.name.clone()));
            }
        }

        check_distinct_type_vars(&decl.type_params)?;
        for method in &decl.methods {
            check_distinct_type_vars(&method.type_params)?;
        }

        let mut fields = HashSet::new();
        for field in self.fields(&decl.this_type())? {
            if !fields.insert(field.name.clone()) {
                return Err(ClassTableError::DuplicateField(field.name));
            }
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&ClassDecl, ClassTableError> {
        self.classes
            .get(name)
            .ok_or_else(|| ClassTableError::UnknownClass(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn type_params(&self, name: &str) -> Result<&[TypeParam], ClassTableError> {
        Ok(&self.lookup(name)?.type_params)
    }

    pub fn super_type(&self, name: &str) -> Result<&ClassType, ClassTableError> {
        Ok(&self.lookup(name)?.super_type)
    }

    /// The class-level substitution for `ty` together with its declaration
    fn instantiate(&self, ty: &ClassType) -> Result<(&ClassDecl, Substitution), ClassTableError> {
        let decl = self.lookup(&ty.name)?;
        let subst = Substitution::new(&ty.args, &decl.type_params)?;
        Ok((decl, subst))
    }

    /// All fields of `ty`, inherited ones first, with types instantiated
    pub fn fields(&self, ty: &ClassType) -> Result<Vec<Declaration>, ClassTableError> {
        if ty.is_object() {
            return Ok(Vec::new());
        }
        let (decl, subst) = self.instantiate(ty)?;
        let mut fields = self.fields(&subst.apply_class(&decl.super_type))?;
        fields.extend(
            decl.fields
                .iter()
                .map(|field| Declaration::new(subst.apply(&field.ty), field.name.clone())),
        );
        Ok(fields)
    }

    /// Signature of `method` as seen from `ty`, or `None` if no class on the
    /// way up to the root declares it
    pub fn mtype(&self, method: &str, ty: &ClassType) -> Result<Option<MethodType>, ClassTableError> {
        if ty.is_object() {
            return Ok(None);
        }
        let (decl, subst) = self.instantiate(ty)?;
        match decl.methods.iter().find(|m| m.name == method) {
            Some(m) => Ok(Some(MethodType {
                type_params: m.type_params.iter().map(|p| subst.apply_param(p)).collect(),
                param_types: m.params.iter().map(|p| subst.apply(&p.ty)).collect(),
                return_type: subst.apply(&m.return_type),
            })),
            None => self.mtype(method, &subst.apply_class(&decl.super_type)),
        }
    }

    /// Parameter names and body of `method` as seen from `ty`, with the
    /// class's and then the method's type variables substituted
    pub fn mbody(
        &self,
        method: &str,
        type_args: &[Type],
        ty: &ClassType,
    ) -> Result<MethodBody, ClassTableError> {
        if ty.is_object() {
            return Err(ClassTableError::UnknownMethod(method.to_string()));
        }
        let (decl, subst) = self.instantiate(ty)?;
        match decl.methods.iter().find(|m| m.name == method) {
            Some(m) => {
                let method_subst = Substitution::new(type_args, &m.type_params)?;
                Ok(MethodBody {
                    params: m.param_names(),
                    body: method_subst.apply_term(&subst.apply_term(&m.body)),
                })
            }
            None => self.mbody(method, type_args, &subst.apply_class(&decl.super_type)),
        }
    }
}

fn check_distinct_type_vars(params: &[TypeParam]) -> Result<(), ClassTableError> {
    let mut seen = HashSet::new();
    for param in params {
        if !seen.insert(param.name.as_str()) {
            return Err(ClassTableError::DuplicateTypeVar(param.name.clone()));
        }
    }
    Ok(())
}
