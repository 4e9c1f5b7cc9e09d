//! Path compiler
//!
//! Turns a [`Path`] into a [`CompiledPath`]: one fused navigator whose
//! `select_step`/`transform_step` run the whole path in a single
//! continuation-passing traversal, without materializing intermediate results
//! between steps.
//!
//! Compilation walks the path left to right into a [`template::Template`].
//! Sequencing is flattened, identity steps are dropped, and every
//! parameter-free subtree is instantiated immediately. Only combinators that
//! contain late-bound placeholders stay symbolic until parameters are bound.

use std::sync::Arc;

use crate::combinators::{CaptureCurrent, InjectConstant};
use crate::config::EngineConfig;
use crate::error::{PathResult, malformed};
use crate::path::{Path, PathElem};
use crate::telemetry::global_stats;

mod compiled;
mod fused;
pub(crate) mod template;

pub use compiled::{CompiledPath, Selection};
pub use fused::FusedChain;
pub(crate) use fused::fuse;

use template::Template;

/// Compile `path`
///
/// Compilation is pure: compiling the same path twice yields compiled paths
/// with identical behavior.
///
/// # Errors
///
/// Returns `PathError::MalformedPath` for structurally invalid paths, or any
/// error raised while eagerly instantiating parameter-free navigators.
pub fn compile(path: &Path) -> PathResult<CompiledPath> {
    let template = compile_elems(path.elems())?;
    let compiled =
        CompiledPath::from_template(template, EngineConfig::global().max_recursion_depth)?;
    global_stats().record_compilation();
    tracing::debug!(
        target: "navpath::compiler",
        elements = path.len(),
        arity = compiled.arity(),
        "compiled path"
    );
    Ok(compiled)
}

fn compile_elems(elems: &[PathElem]) -> PathResult<Template> {
    let parts = elems
        .iter()
        .map(compile_elem)
        .collect::<PathResult<Vec<_>>>()?;
    Ok(Template::chain(parts))
}

fn compile_sub(path: &Path) -> PathResult<Box<Template>> {
    compile_elems(path.elems()).map(Box::new)
}

fn compile_elem(elem: &PathElem) -> PathResult<Template> {
    let template = match elem {
        PathElem::Nav(nav) => return Ok(Template::ready(nav.clone())),
        PathElem::Late(late) => return Ok(Template::Late(late.clone())),
        PathElem::CaptureCurrent => return Ok(Template::ready(Arc::new(CaptureCurrent))),
        PathElem::Inject(value) => {
            return Ok(Template::ready(Arc::new(InjectConstant::new(value.clone()))));
        }
        PathElem::Recursive(cell) => return Ok(Template::ready(cell.navigator())),
        PathElem::Protocol(protocol) => return Ok(Template::ready(protocol.navigator())),
        PathElem::CollectOne(path) => Template::CollectOne(compile_sub(path)?),
        PathElem::CollectMany(path) => Template::CollectMany(compile_sub(path)?),
        PathElem::Subselect(path) => Template::Subselect(compile_sub(path)?),
        PathElem::Selected { path, negate } => Template::Selected {
            path: compile_sub(path)?,
            negate: *negate,
        },
        PathElem::Transformed { path, update } => Template::Transformed {
            path: compile_sub(path)?,
            update: update.clone(),
        },
        PathElem::IfPath {
            cond,
            then,
            otherwise,
        } => Template::If {
            cond: compile_sub(cond)?,
            then: compile_sub(then)?,
            otherwise: otherwise.as_ref().map(compile_sub).transpose()?,
        },
        PathElem::MultiPath(branches) => {
            if branches.is_empty() {
                return Err(malformed("multi_path requires at least one branch"));
            }
            let branches = branches
                .iter()
                .map(|branch| {
                    let guard = branch
                        .guard
                        .as_ref()
                        .map(|guard| compile_elems(guard.elems()))
                        .transpose()?;
                    Ok((guard, compile_elems(branch.path.elems())?))
                })
                .collect::<PathResult<Vec<_>>>()?;
            Template::Multi(branches)
        }
        PathElem::CondPath(pairs) => {
            if pairs.is_empty() {
                return Err(malformed("cond_path requires at least one branch"));
            }
            let pairs = pairs
                .iter()
                .map(|(guard, path)| Ok((compile_elems(guard.elems())?, compile_elems(path.elems())?)))
                .collect::<PathResult<Vec<_>>>()?;
            Template::Cond(pairs)
        }
    };
    template.settle()
}
