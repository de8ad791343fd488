//! Call-by-value evaluator

use fgj_ast::*;
use fgj_typeck::{ClassTable, TypeEnv};

use crate::env::Env;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Evaluates closed terms against a finished class table
pub struct Evaluator<'a> {
    table: &'a ClassTable,
    /// No type variables are in scope at run time
    types: TypeEnv<'a>,
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a ClassTable) -> Self {
        Self {
            table,
            types: TypeEnv::new(table),
        }
    }

    /// Evaluates a term with no variables in scope
    pub fn eval(&self, term: &Term) -> EvalResult<Value> {
        self.eval_in(&Env::empty(), term)
    }

    pub fn eval_in(&self, env: &Env, term: &Term) -> EvalResult<Value> {
        match term {
            Term::Var(name) => env
                .lookup(name)
                .cloned()
                .ok_or_else(|| EvalError::UnknownVariable(name.clone())),

            Term::Field { base, field } => {
                let base = self.eval_in(env, base)?;
                let position = self
                    .table
                    .fields(&base.ty)?
                    .iter()
                    .position(|f| f.name == *field);
                match position.and_then(|i| base.fields.get(i)) {
                    Some(value) => Ok(value.clone()),
                    None => Err(EvalError::UnknownField {
                        ty: base.ty,
                        field: field.clone(),
                    }),
                }
            }

            Term::Call {
                base,
                method,
                type_args,
                args,
            } => {
                let receiver = self.eval_in(env, base)?;
                let args = self.eval_args(env, args)?;
                self.invoke(env, receiver, method, type_args, args)
            }

            Term::New { ty, args } => Ok(Value::new(ty.clone(), self.eval_args(env, args)?)),

            Term::Cast { target, term } => {
                let value = self.eval_in(env, term)?;
                let runtime = Type::Class(value.ty.clone());
                if self.types.subtype(&runtime, &Type::Class(target.clone()))? {
                    Ok(value)
                } else {
                    tracing::debug!(%value, %target, "bad cast");
                    Err(EvalError::BadCast {
                        value,
                        target: target.clone(),
                    })
                }
            }
        }
    }

    /// Left to right
    fn eval_args(&self, env: &Env, args: &[Term]) -> EvalResult<Vec<Value>> {
        args.iter().map(|arg| self.eval_in(env, arg)).collect()
    }

    /// Runs the body `mbody` finds for the receiver's runtime type, in a new
    /// frame over `env` binding the parameters and `this`
    #[tracing::instrument(level = "trace", skip(self, env, receiver, type_args, args), fields(receiver = %receiver.ty, depth = env.depth()))]
    fn invoke(
        &self,
        env: &Env,
        receiver: Value,
        method: &str,
        type_args: &[Type],
        args: Vec<Value>,
    ) -> EvalResult<Value> {
        let body = self.table.mbody(method, type_args, &receiver.ty)?;
        if body.params.len() != args.len() {
            return Err(EvalError::ArgumentCount {
                expected: body.params.len(),
                found: args.len(),
            });
        }

        let mut bindings: Vec<(String, Value)> = body.params.into_iter().zip(args).collect();
        bindings.push(("this".to_string(), receiver));
        let frame = env.extend(bindings);

        let result = self.eval_in(&frame, &body.body)?;
        tracing::trace!(%result, "returned");
        Ok(result)
    }
}
