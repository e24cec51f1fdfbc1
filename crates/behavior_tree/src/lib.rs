//! Minimal behavior tree evaluator for per-tick agent decisions.
//!
//! Every tick evaluates the whole tree synchronously against a mutable
//! context (the agent's blackboard). There is no `Running` state: a node
//! either succeeds or fails before `tick` returns, so the tree can be
//! re-evaluated from the root on the next simulation tick without any
//! resumable bookkeeping.
//!
//! - [`Behavior`]: the node trait
//! - [`Status`]: `Success` / `Failure`
//! - Composites: [`Selector`] (priority OR), [`Sequence`] (AND)
//! - Leaves: [`Condition`] (predicate), [`Action`] (effect)

pub mod behavior;
pub mod composite;
pub mod leaf;
pub mod status;

pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use leaf::{Action, Condition};
pub use status::Status;
