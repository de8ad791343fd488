//! Variable environments for evaluation

use std::rc::Rc;

use crate::value::Value;

/// An immutable chain of variable frames.
///
/// Extending an environment allocates one frame pointing at its parent;
/// the parent is shared, never copied or mutated.
#[derive(Debug, Clone, Default)]
pub struct Env {
    head: Option<Rc<Frame>>,
}

#[derive(Debug)]
struct Frame {
    bindings: Vec<(String, Value)>,
    parent: Env,
}

impl Env {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A new environment whose innermost frame holds `bindings`
    pub fn extend(&self, bindings: Vec<(String, Value)>) -> Self {
        Self {
            head: Some(Rc::new(Frame {
                bindings,
                parent: self.clone(),
            })),
        }
    }

    /// Searches the innermost frame first, then each parent in turn
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut env = self;
        while let Some(frame) = &env.head {
            if let Some((_, value)) = frame.bindings.iter().find(|(n, _)| n == name) {
                return Some(value);
            }
            env = &frame.parent;
        }
        None
    }

    /// Number of frames in the chain
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut env = self;
        while let Some(frame) = &env.head {
            depth += 1;
            env = &frame.parent;
        }
        depth
    }
}
