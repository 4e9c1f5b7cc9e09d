//! Compile-time path templates
//!
//! A [`Template`] is the compiler's intermediate form. Parameter-free runs are
//! already concrete navigators (`Ready`); everything that still contains a
//! late-bound placeholder keeps its combinator shape until binding.

use std::slice;
use std::sync::Arc;

use serde_json::Value;

use super::fuse;
use crate::binder::{LateBound, ParamSlot};
use crate::combinators::{
    CollectMany, CollectOne, CondPath, IfPath, MultiPath, Selected, Subselect, Transformed,
};
use crate::error::{PathResult, arity_mismatch};
use crate::navigator::{NavRef, UpdateFn};

type Node = Box<Template>;

#[derive(Debug)]
pub(crate) enum Template {
    Ready(Vec<NavRef>),
    Late(LateBound),
    Chain(Vec<Template>),
    CollectOne(Node),
    CollectMany(Node),
    Subselect(Node),
    Selected {
        path: Node,
        negate: bool,
    },
    Transformed {
        path: Node,
        update: UpdateFn,
    },
    If {
        cond: Node,
        then: Node,
        otherwise: Option<Node>,
    },
    Multi(Vec<(Option<Template>, Template)>),
    Cond(Vec<(Template, Template)>),
}

impl Template {
    /// A single concrete step; identity steps vanish
    pub(crate) fn ready(nav: NavRef) -> Self {
        if nav.is_identity() {
            Template::Ready(Vec::new())
        } else {
            Template::Ready(vec![nav])
        }
    }

    /// Sequence `parts`, splicing nested chains and merging adjacent ready runs
    pub(crate) fn chain(parts: Vec<Template>) -> Self {
        let mut merged: Vec<Template> = Vec::with_capacity(parts.len());
        for part in parts {
            let pieces = match part {
                Template::Chain(inner) => inner,
                other => vec![other],
            };
            for piece in pieces {
                match piece {
                    Template::Ready(more) => {
                        if let Some(Template::Ready(steps)) = merged.last_mut() {
                            steps.extend(more);
                        } else {
                            merged.push(Template::Ready(more));
                        }
                    }
                    other => merged.push(other),
                }
            }
        }
        merged.retain(|piece| !matches!(piece, Template::Ready(steps) if steps.is_empty()));
        match merged.len() {
            0 => Template::Ready(Vec::new()),
            1 => merged.pop().unwrap_or(Template::Ready(Vec::new())),
            _ => Template::Chain(merged),
        }
    }

    /// Number of late-bound arguments below this node
    pub(crate) fn arity(&self) -> usize {
        match self {
            Template::Ready(_) => 0,
            Template::Late(late) => late.arity(),
            Template::Chain(parts) => parts.iter().map(Template::arity).sum(),
            Template::CollectOne(path)
            | Template::CollectMany(path)
            | Template::Subselect(path)
            | Template::Selected { path, .. }
            | Template::Transformed { path, .. } => path.arity(),
            Template::If {
                cond,
                then,
                otherwise,
            } => cond.arity() + then.arity() + otherwise.as_ref().map_or(0, |o| o.arity()),
            Template::Multi(branches) => branches
                .iter()
                .map(|(guard, path)| guard.as_ref().map_or(0, Template::arity) + path.arity())
                .sum(),
            Template::Cond(pairs) => pairs
                .iter()
                .map(|(guard, path)| guard.arity() + path.arity())
                .sum(),
        }
    }

    /// Append this node's parameter slots, in binding order
    pub(crate) fn collect_params(&self, out: &mut Vec<ParamSlot>) {
        match self {
            Template::Ready(_) => {}
            Template::Late(late) => {
                for argument in 0..late.arity() {
                    out.push(ParamSlot {
                        position: out.len(),
                        navigator: late.name().to_owned(),
                        argument,
                    });
                }
            }
            Template::Chain(parts) => parts.iter().for_each(|part| part.collect_params(out)),
            Template::CollectOne(path)
            | Template::CollectMany(path)
            | Template::Subselect(path)
            | Template::Selected { path, .. }
            | Template::Transformed { path, .. } => path.collect_params(out),
            Template::If {
                cond,
                then,
                otherwise,
            } => {
                cond.collect_params(out);
                then.collect_params(out);
                if let Some(otherwise) = otherwise {
                    otherwise.collect_params(out);
                }
            }
            Template::Multi(branches) => {
                for (guard, path) in branches {
                    if let Some(guard) = guard {
                        guard.collect_params(out);
                    }
                    path.collect_params(out);
                }
            }
            Template::Cond(pairs) => {
                for (guard, path) in pairs {
                    guard.collect_params(out);
                    path.collect_params(out);
                }
            }
        }
    }

    /// Build this node into one fused navigator, consuming arguments from `args`
    pub(crate) fn instantiate(&self, args: &mut slice::Iter<'_, Value>) -> PathResult<NavRef> {
        let mut steps = Vec::new();
        self.instantiate_steps(args, &mut steps)?;
        Ok(fuse(steps))
    }

    fn instantiate_steps(
        &self,
        args: &mut slice::Iter<'_, Value>,
        out: &mut Vec<NavRef>,
    ) -> PathResult<()> {
        match self {
            Template::Ready(steps) => out.extend(steps.iter().cloned()),
            Template::Chain(parts) => {
                for part in parts {
                    part.instantiate_steps(args, out)?;
                }
            }
            Template::Late(late) => {
                let taken: Vec<Value> = args.by_ref().take(late.arity()).cloned().collect();
                if taken.len() != late.arity() {
                    return Err(arity_mismatch(
                        format!("late-bound '{}'", late.name()),
                        late.arity(),
                        taken.len(),
                    ));
                }
                let nav = late.bind(&taken)?;
                if !nav.is_identity() {
                    out.push(nav);
                }
            }
            other => out.push(other.build(args)?),
        }
        Ok(())
    }

    /// Build a combinator node from its instantiated children
    fn build(&self, args: &mut slice::Iter<'_, Value>) -> PathResult<NavRef> {
        let nav: NavRef = match self {
            Template::CollectOne(path) => Arc::new(CollectOne::new(path.instantiate(args)?)),
            Template::CollectMany(path) => Arc::new(CollectMany::new(path.instantiate(args)?)),
            Template::Subselect(path) => Arc::new(Subselect::new(path.instantiate(args)?)),
            Template::Selected { path, negate } => {
                Arc::new(Selected::new(path.instantiate(args)?, *negate))
            }
            Template::Transformed { path, update } => {
                Arc::new(Transformed::new(path.instantiate(args)?, update.clone()))
            }
            Template::If {
                cond,
                then,
                otherwise,
            } => {
                let cond = cond.instantiate(args)?;
                let then = then.instantiate(args)?;
                let otherwise = otherwise
                    .as_ref()
                    .map(|o| o.instantiate(args))
                    .transpose()?;
                Arc::new(IfPath::new(cond, then, otherwise))
            }
            Template::Multi(branches) => {
                let mut built = Vec::with_capacity(branches.len());
                for (guard, path) in branches {
                    let guard = guard.as_ref().map(|g| g.instantiate(args)).transpose()?;
                    built.push((guard, path.instantiate(args)?));
                }
                Arc::new(MultiPath::new(built))
            }
            Template::Cond(pairs) => {
                let mut built = Vec::with_capacity(pairs.len());
                for (guard, path) in pairs {
                    let guard = guard.instantiate(args)?;
                    built.push((guard, path.instantiate(args)?));
                }
                Arc::new(CondPath::new(built))
            }
            Template::Ready(_) | Template::Late(_) | Template::Chain(_) => self.instantiate(args)?,
        };
        Ok(nav)
    }

    /// Instantiate now if nothing below this node is late-bound
    pub(crate) fn settle(self) -> PathResult<Template> {
        if matches!(self, Template::Ready(_)) || self.arity() > 0 {
            return Ok(self);
        }
        let nav = self.instantiate(&mut [].iter())?;
        Ok(Template::ready(nav))
    }
}
