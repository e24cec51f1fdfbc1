//! Core node trait.

use crate::Status;

/// A behavior tree node evaluated against a context `C`.
///
/// `C` is usually a short-lived view over one agent's state plus whatever
/// read-only world data the leaves need. Nodes may mutate the context
/// (leaves set state labels, reset timers, ...).
pub trait Behavior<C>: Send + Sync {
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
