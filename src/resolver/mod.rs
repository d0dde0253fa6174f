mod error;
mod graph;
mod resolution;
mod traversal;

pub use error::{ResolveError, ResolveResult};
pub use resolution::Resolution;

use crate::pattern::PatternSource;
use graph::DependencyGraph;
use std::collections::BTreeMap;
use traversal::Traversal;

/// Resolves a set of interdependent definitions into denormalized patterns.
#[tracing::instrument(level = "trace", skip_all, fields(externals=externals.len() as u64))]
pub fn resolve<I, K, V>(definitions: I, externals: &[&dyn PatternSource]) -> Resolution
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let definitions: BTreeMap<String, String> = definitions
        .into_iter()
        .map(|(name, body)| (name.into(), body.into()))
        .collect();

    let graph = DependencyGraph::build(definitions, externals);
    let resolution = Traversal::new(&graph, externals).run();

    tracing::event!(
        tracing::Level::TRACE,
        operation = "resolve",
        definitions = graph.len() as u64,
        resolved = resolution.resolved.len() as u64,
        failed = resolution.failed.len() as u64,
        "pattern resolution finished"
    );

    resolution
}
