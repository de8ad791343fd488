//! Type variable environment: subtyping, well-formedness and override checks

use std::collections::HashMap;
use fgj_ast::*;

use crate::class_table::{ClassTable, MethodType};
use crate::error::{ClassTableError, TypeErrorKind};
use crate::subst::Substitution;

/// Maps the type variables currently in scope to their bounds
#[derive(Debug, Clone)]
pub struct TypeEnv<'a> {
    table: &'a ClassTable,
    bounds: HashMap<String, ClassType>,
}

impl<'a> TypeEnv<'a> {
    pub fn new(table: &'a ClassTable) -> Self {
        Self {
            table,
            bounds: HashMap::new(),
        }
    }

    pub fn table(&self) -> &'a ClassTable {
        self.table
    }

    /// Binds each parameter to its bound. A name that is already bound is
    /// rebound.
    pub fn add_bounds(&mut self, params: &[TypeParam]) {
        for param in params {
            self.bounds.insert(param.name.clone(), param.bound.clone());
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bounds.contains_key(name)
    }

    /// Decides `sub <: sup`.
    ///
    /// Reflexive; a type variable is a subtype of whatever its bound is;
    /// class types are invariant in their arguments and otherwise climb the
    /// instantiated supertype chain.
    pub fn subtype(&self, sub: &Type, sup: &Type) -> Result<bool, ClassTableError> {
        if sub == sup {
            return Ok(true);
        }
        match sub {
            Type::Var(name) => match self.bounds.get(name) {
                Some(bound) => self.subtype(&Type::Class(bound.clone()), sup),
                None => Ok(false),
            },
            Type::Class(class) => {
                if class.is_object() {
                    return Ok(false);
                }
                let decl_params = self.table.type_params(&class.name)?;
                let subst = Substitution::new(&class.args, decl_params)?;
                let parent = subst.apply_class(self.table.super_type(&class.name)?);
                self.subtype(&Type::Class(parent), sup)
            }
        }
    }

    pub fn check_well_formed(&self, ty: &Type) -> Result<(), TypeErrorKind> {
        match ty {
            Type::Var(name) => {
                if self.is_bound(name) {
                    Ok(())
                } else {
                    Err(TypeErrorKind::UnboundTypeVar(name.clone()))
                }
            }
            Type::Class(class) => self.check_class_well_formed(class),
        }
    }

    /// Each argument must be well formed and lie below its parameter's
    /// bound, where the bound may mention the type's own arguments.
    pub fn check_class_well_formed(&self, class: &ClassType) -> Result<(), TypeErrorKind> {
        if class.is_object() {
            return Ok(());
        }
        for arg in &class.args {
            self.check_well_formed(arg)?;
        }
        let params = self.table.type_params(&class.name)?;
        let subst = Substitution::new(&class.args, params)?;
        for (arg, param) in class.args.iter().zip(params) {
            let bound = subst.apply_class(&param.bound);
            if !self.subtype(arg, &Type::Class(bound.clone()))? {
                return Err(TypeErrorKind::BoundViolation {
                    arg: arg.clone(),
                    bound,
                });
            }
        }
        Ok(())
    }

    /// The nearest class type above `ty`
    pub fn bound(&self, ty: &Type) -> Result<ClassType, TypeErrorKind> {
        match ty {
            Type::Class(class) => Ok(class.clone()),
            Type::Var(name) => self
                .bounds
                .get(name)
                .cloned()
                .ok_or_else(|| TypeErrorKind::UnboundTypeVar(name.clone())),
        }
    }

    /// Whether a method with signature `candidate` may override whatever
    /// `method` means in `super_type`.
    ///
    /// Bounds and parameter types must match exactly once the overridden
    /// method's type variables are renamed to the candidate's; the return
    /// type may be narrowed.
    pub fn override_ok(
        &self,
        method: &str,
        super_type: &ClassType,
        candidate: &MethodType,
    ) -> Result<bool, ClassTableError> {
        let overridden = match self.table.mtype(method, super_type)? {
            Some(overridden) => overridden,
            None => return Ok(true),
        };

        if candidate.type_params.len() != overridden.type_params.len()
            || candidate.param_types.len() != overridden.param_types.len()
        {
            return Ok(false);
        }

        let renamed: Vec<Type> = candidate
            .type_params
            .iter()
            .map(|p| Type::var(p.name.clone()))
            .collect();
        let subst = Substitution::new(&renamed, &overridden.type_params)?;

        let bounds_match = candidate
            .type_params
            .iter()
            .zip(&overridden.type_params)
            .all(|(mine, theirs)| mine.bound == subst.apply_class(&theirs.bound));
        if !bounds_match {
            return Ok(false);
        }

        let params_match = candidate
            .param_types
            .iter()
            .zip(&overridden.param_types)
            .all(|(mine, theirs)| *mine == subst.apply(theirs));
        if !params_match {
            return Ok(false);
        }

        self.subtype(&candidate.return_type, &subst.apply(&overridden.return_type))
    }
}
