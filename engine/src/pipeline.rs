//! Ordered modifier hooks
//!
//! A value is threaded through hooks contributed by items, field-wide
//! abilities, the holder's own ability, allies and the move. Hooks run grouped
//! by [`Scope`] in that order; within a scope they keep registration order.
//! A hook that [claims](Flow::Claim) the value stops the rest of its scope, so
//! two field effects can never both apply. [`Flow::Cancel`] stops the whole
//! pipeline and marks the result cancelled.

/// Hook groups, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    Item,
    Field,
    Own,
    Ally,
    Move,
}

/// What a hook tells the pipeline to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Skip the remaining hooks of this scope
    Claim,
    /// Skip every remaining hook
    Cancel,
}

/// Result of running a pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied<T> {
    pub value: T,
    pub cancelled: bool,
}

type Hook<'h, T> = Box<dyn FnMut(&mut T) -> Flow + 'h>;

pub struct Pipeline<'h, T> {
    hooks: Vec<(Scope, Hook<'h, T>)>,
}

impl<'h, T> Default for Pipeline<'h, T> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<'h, T> Pipeline<'h, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope, hook: impl FnMut(&mut T) -> Flow + 'h) {
        self.hooks.push((scope, Box::new(hook)));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn run(mut self, mut value: T) -> Applied<T> {
        // Stable: registration order survives inside a scope.
        self.hooks.sort_by_key(|(scope, _)| *scope);

        let mut claimed: Option<Scope> = None;
        for (scope, hook) in self.hooks.iter_mut() {
            if claimed == Some(*scope) {
                continue;
            }
            match hook(&mut value) {
                Flow::Continue => {}
                Flow::Claim => {
                    tracing::trace!(?scope, "pipeline scope claimed");
                    claimed = Some(*scope);
                }
                Flow::Cancel => {
                    tracing::trace!(?scope, "pipeline cancelled");
                    return Applied {
                        value,
                        cancelled: true,
                    };
                }
            }
        }
        Applied {
            value,
            cancelled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pipeline_returns_input() {
        let result = Pipeline::<f64>::new().run(3.0);
        assert_eq!(result.value, 3.0);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_scopes_run_in_order() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Scope::Own, |v: &mut Vec<u8>| {
            v.push(3);
            Flow::Continue
        });
        pipeline.push(Scope::Item, |v: &mut Vec<u8>| {
            v.push(1);
            Flow::Continue
        });
        pipeline.push(Scope::Field, |v: &mut Vec<u8>| {
            v.push(2);
            Flow::Continue
        });
        assert_eq!(pipeline.run(Vec::new()).value, vec![1, 2, 3]);
    }

    #[test]
    fn test_claim_skips_rest_of_scope_only() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Scope::Field, |v: &mut f64| {
            *v *= 0.75;
            Flow::Claim
        });
        pipeline.push(Scope::Field, |v: &mut f64| {
            *v *= 0.75;
            Flow::Claim
        });
        pipeline.push(Scope::Own, |v: &mut f64| {
            *v *= 2.0;
            Flow::Continue
        });
        let result = pipeline.run(100.0);
        assert_eq!(result.value, 150.0);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_cancel_stops_everything() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Scope::Item, |v: &mut f64| {
            *v = 0.0;
            Flow::Cancel
        });
        pipeline.push(Scope::Own, |v: &mut f64| {
            *v = 99.0;
            Flow::Continue
        });
        let result = pipeline.run(1.0);
        assert_eq!(result.value, 0.0);
        assert!(result.cancelled);
    }
}
