use crate::pattern::{PatternSource, lookup, referenced_syntax, scan_tokens};
use hashbrown::HashMap as FastHashMap;
use smallvec::SmallVec;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Dependency {
    Internal(usize),
    External,
    Missing(String),
}

#[derive(Debug, Clone)]
pub(crate) struct DependencyNode {
    pub name: String,
    pub body: String,
    pub dependencies: SmallVec<[Dependency; 4]>,
}

#[derive(Debug, Default)]
pub(crate) struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
}

impl DependencyGraph {
    pub fn build(
        definitions: BTreeMap<String, String>,
        externals: &[&dyn PatternSource],
    ) -> Self {
        let index: FastHashMap<String, usize> = definitions
            .keys()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        let nodes = definitions
            .into_iter()
            .map(|(name, body)| {
                let dependencies = scan_tokens(&body)
                    .filter_map(|span| referenced_syntax(span.body))
                    .map(|syntax| classify(syntax, &index, externals))
                    .collect();
                DependencyNode {
                    name,
                    body,
                    dependencies,
                }
            })
            .collect();

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.nodes[idx].name
    }
}

fn classify(
    syntax: &str,
    index: &FastHashMap<String, usize>,
    externals: &[&dyn PatternSource],
) -> Dependency {
    if let Some(&idx) = index.get(syntax) {
        Dependency::Internal(idx)
    } else if lookup(syntax, externals).is_some() {
        Dependency::External
    } else {
        Dependency::Missing(syntax.to_string())
    }
}
