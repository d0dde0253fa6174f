use crate::pattern::{PatternError, PatternSource, denormalize};
use crate::types::PatternLayer;
use hashbrown::HashMap as FastHashMap;
use smallvec::SmallVec;
use std::sync::Arc;

use super::graph::{Dependency, DependencyGraph};
use super::{ResolveError, ResolveResult, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Pending,
    Resolved,
    Failed,
}

// Cycle failures depend on where the walk started and are recorded against the
// starting definition only; other failures are memoized per node.
pub(crate) struct Traversal<'g, 'e> {
    graph: &'g DependencyGraph,
    externals: &'e [&'e dyn PatternSource],
    states: Vec<NodeState>,
    on_path: Vec<bool>,
    path: SmallVec<[usize; 16]>,
    resolved: PatternLayer,
    failed: FastHashMap<String, ResolveError>,
}

impl<'g, 'e> Traversal<'g, 'e> {
    pub fn new(graph: &'g DependencyGraph, externals: &'e [&'e dyn PatternSource]) -> Self {
        let len = graph.len();
        Self {
            graph,
            externals,
            states: vec![NodeState::Pending; len],
            on_path: vec![false; len],
            path: SmallVec::new(),
            resolved: PatternLayer::with_capacity(len),
            failed: FastHashMap::new(),
        }
    }

    pub fn run(mut self) -> Resolution {
        for idx in 0..self.graph.len() {
            if self.states[idx] != NodeState::Pending {
                continue;
            }

            if let Err(err) = self.visit(idx)
                && err.is_cycle()
            {
                self.failed.insert(self.graph.name(idx).to_string(), err);
            }
        }

        Resolution {
            resolved: self.resolved,
            failed: self.failed,
        }
    }

    fn visit(&mut self, idx: usize) -> ResolveResult<()> {
        if self.on_path[idx] {
            return Err(self.cycle_error(idx));
        }

        match self.states[idx] {
            NodeState::Resolved => return Ok(()),
            NodeState::Failed => return Err(self.unresolved(idx)),
            NodeState::Pending => {}
        }

        self.on_path[idx] = true;
        self.path.push(idx);

        let outcome = self
            .visit_dependencies(idx)
            .and_then(|()| self.denormalize_node(idx));

        self.path.pop();
        self.on_path[idx] = false;

        match &outcome {
            Ok(()) => self.states[idx] = NodeState::Resolved,
            Err(err) if err.is_cycle() => {}
            Err(err) => {
                self.states[idx] = NodeState::Failed;
                self.failed
                    .insert(self.graph.name(idx).to_string(), err.clone());
            }
        }

        outcome
    }

    fn visit_dependencies(&mut self, idx: usize) -> ResolveResult<()> {
        let graph = self.graph;

        for dependency in &graph.nodes[idx].dependencies {
            match dependency {
                Dependency::Internal(child) => {
                    if let Err(err) = self.visit(*child) {
                        return Err(if err.is_cycle() {
                            err
                        } else {
                            self.unresolved(*child)
                        });
                    }
                }
                Dependency::External => {}
                Dependency::Missing(name) => {
                    return Err(PatternError::UnresolvedReference { name: name.clone() }.into());
                }
            }
        }

        Ok(())
    }

    fn denormalize_node(&mut self, idx: usize) -> ResolveResult<()> {
        let graph = self.graph;
        let node = &graph.nodes[idx];

        let pattern = {
            let mut sources: SmallVec<[&dyn PatternSource; 4]> = SmallVec::new();
            sources.push(&self.resolved);
            sources.extend(self.externals.iter().copied());
            denormalize(&node.body, &sources)?
        };

        self.resolved.insert(node.name.clone(), Arc::new(pattern));
        Ok(())
    }

    fn unresolved(&self, idx: usize) -> ResolveError {
        PatternError::UnresolvedReference {
            name: self.graph.name(idx).to_string(),
        }
        .into()
    }

    fn cycle_error(&self, idx: usize) -> ResolveError {
        let mut path: Vec<String> = self
            .path
            .iter()
            .map(|&node| self.graph.name(node).to_string())
            .collect();
        path.push(self.graph.name(idx).to_string());

        ResolveError::CircularDependency { path }
    }
}
