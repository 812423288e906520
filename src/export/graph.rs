use std::collections::HashMap;

use super::{ExportError, ExportResult};
use crate::model::{Category, Environment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

#[derive(Debug)]
struct Node<'a> {
    name: &'a str,
    category: Category,
    /// Indices of the bindings this one references.
    edges: Vec<usize>,
}

/// Reference graph over the bindings of an [`Environment`].
///
/// Nodes live in an arena in environment order; edges point from a binding
/// to every binding it names.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    nodes: Vec<Node<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph, failing on the first reference to an unbound name.
    pub fn build(environment: &'a Environment) -> ExportResult<Self> {
        let mut nodes = Vec::with_capacity(environment.len());
        let mut index = HashMap::with_capacity(environment.len());
        for (name, binding) in environment.iter() {
            index.insert(name, nodes.len());
            nodes.push(Node {
                name,
                category: binding.category(),
                edges: Vec::new(),
            });
        }

        for (from, (name, binding)) in environment.iter().enumerate() {
            for target in binding.references() {
                let to = *index
                    .get(target)
                    .ok_or_else(|| ExportError::UndefinedName {
                        name: target.to_string(),
                        referenced_by: name.to_string(),
                    })?;
                nodes[from].edges.push(to);
            }
        }

        Ok(Self { nodes, index })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Names that `name` references directly, in encounter order.
    pub fn dependencies(&self, name: &str) -> Option<Vec<&'a str>> {
        let node = &self.nodes[*self.index.get(name)?];
        Some(node.edges.iter().map(|&to| self.nodes[to].name).collect())
    }

    /// Fails with the first cycle found, reported as `a -> b -> a`.
    pub fn check_acyclic(&self) -> ExportResult<()> {
        self.postorder(|_| true)?;
        Ok(())
    }

    /// Deterministic bindings, each after the deterministic bindings it
    /// references and otherwise in declaration order.
    pub fn deterministic_order(&self) -> ExportResult<Vec<&'a str>> {
        let order = self.postorder(|category| category == Category::Deterministic)?;
        Ok(order.into_iter().map(|i| self.nodes[i].name).collect())
    }

    /// Depth-first postorder over the nodes whose category passes `include`,
    /// roots taken in declaration order.
    fn postorder(&self, include: impl Fn(Category) -> bool) -> ExportResult<Vec<usize>> {
        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut order = Vec::new();

        for root in 0..self.nodes.len() {
            if marks[root] != Mark::Unvisited || !include(self.nodes[root].category) {
                continue;
            }
            marks[root] = Mark::InProgress;
            // (node, next edge to follow)
            let mut path: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(frame) = path.last_mut() {
                let node = frame.0;
                let Some(&next) = self.nodes[node].edges.get(frame.1) else {
                    marks[node] = Mark::Done;
                    order.push(node);
                    path.pop();
                    continue;
                };
                frame.1 += 1;
                if !include(self.nodes[next].category) {
                    continue;
                }
                match marks[next] {
                    Mark::Unvisited => {
                        marks[next] = Mark::InProgress;
                        path.push((next, 0));
                    }
                    Mark::InProgress => return Err(self.cycle_error(&path, next)),
                    Mark::Done => {}
                }
            }
        }
        Ok(order)
    }

    fn cycle_error(&self, path: &[(usize, usize)], back_to: usize) -> ExportError {
        let start = path
            .iter()
            .position(|&(node, _)| node == back_to)
            .unwrap_or(0);
        let mut cycle: Vec<String> = path[start..]
            .iter()
            .map(|&(node, _)| self.nodes[node].name.to_string())
            .collect();
        cycle.push(self.nodes[back_to].name.to_string());
        ExportError::CyclicDependency { cycle }
    }
}
