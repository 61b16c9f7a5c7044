//! Ordered composites.
//!
//! Both composites tick their children left to right and stop as soon as the
//! outcome is decided. Children after that point are not ticked at all, so
//! their side effects on the context never happen.

use crate::{Behavior, Status};

/// Succeeds when every child succeeds; stops at the first failure.
///
/// An empty sequence succeeds.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Succeeds with the first child that succeeds; fails when all fail.
///
/// Child order is priority order. An empty selector fails.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;

    #[derive(Default)]
    struct Trace {
        budget: u32,
        visited: Vec<&'static str>,
    }

    /// Spends one point of budget; fails when the budget is gone.
    struct Spend(&'static str);

    impl Behavior<Trace> for Spend {
        fn tick(&self, ctx: &mut Trace) -> Status {
            ctx.visited.push(self.0);
            if ctx.budget == 0 {
                return Status::Failure;
            }
            ctx.budget -= 1;
            Status::Success
        }
    }

    fn spend(name: &'static str) -> Box<dyn Behavior<Trace>> {
        Box::new(Spend(name))
    }

    #[test]
    fn sequence_runs_every_child_on_success() {
        let sequence = Sequence::new(vec![spend("a"), spend("b")]);
        let mut ctx = Trace {
            budget: 5,
            ..Trace::default()
        };
        assert_eq!(sequence.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.visited, ["a", "b"]);
        assert_eq!(ctx.budget, 3);
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let sequence = Sequence::new(vec![spend("a"), spend("b"), spend("c")]);
        let mut ctx = Trace {
            budget: 1,
            ..Trace::default()
        };
        assert_eq!(sequence.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.visited, ["a", "b"]);
    }

    #[test]
    fn selector_stops_at_first_success() {
        let selector = Selector::new(vec![
            Box::new(Condition::new(|ctx: &Trace| ctx.budget > 10)),
            spend("fallback"),
            spend("never"),
        ]);
        let mut ctx = Trace {
            budget: 2,
            ..Trace::default()
        };
        assert_eq!(selector.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.visited, ["fallback"]);
    }

    #[test]
    fn selector_fails_when_every_child_fails() {
        let selector = Selector::new(vec![spend("a"), spend("b")]);
        let mut ctx = Trace::default();
        assert_eq!(selector.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.visited, ["a", "b"]);
    }

    #[test]
    fn empty_composites() {
        let mut ctx = Trace::default();
        assert!(Sequence::<Trace>::new(Vec::new()).tick(&mut ctx).is_success());
        assert!(Selector::<Trace>::new(Vec::new()).tick(&mut ctx).is_failure());
    }

    #[test]
    fn guarded_sequence() {
        let guarded = Sequence::new(vec![
            Box::new(Condition::new(|ctx: &Trace| ctx.budget >= 2)),
            spend("act"),
        ]);
        let mut poor = Trace {
            budget: 1,
            ..Trace::default()
        };
        assert!(guarded.tick(&mut poor).is_failure());
        assert!(poor.visited.is_empty());

        let mut rich = Trace {
            budget: 2,
            ..Trace::default()
        };
        assert!(guarded.tick(&mut rich).is_success());
        assert_eq!(rich.visited, ["act"]);
    }
}
