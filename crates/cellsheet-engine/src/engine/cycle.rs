//! Circular reference detection for formula cells.
//!
//! When a cell's formula reads a set of names, the cell closes a cycle if any
//! of those names already (transitively) reads the cell. This module searches
//! the dependency graph depth-first from the edited cell, following "is read
//! by" edges, and reports the first referenced name it reaches.

use std::collections::{HashMap, HashSet};

use super::deps::DependencyGraph;

/// Detect whether `cell` reaching any of `referenced` closes a cycle.
/// Returns Some(path) from `cell` to the referenced name if so, None otherwise.
pub fn detect_cycle<'a>(
    graph: &'a DependencyGraph,
    cell: &'a str,
    referenced: &[String],
) -> Option<Vec<String>> {
    let targets: HashSet<&str> = referenced.iter().map(String::as_str).collect();
    let mut visited = HashSet::from([cell]);
    // Reached cell -> the cell it was reached from
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut stack = vec![cell];

    while let Some(current) = stack.pop() {
        if targets.contains(current) {
            return Some(path_to(current, &parent));
        }
        for dependent in graph.dependents_of(current) {
            if visited.insert(dependent) {
                parent.insert(dependent, current);
                stack.push(dependent);
            }
        }
    }
    None
}

fn path_to<'a>(target: &'a str, parent: &HashMap<&'a str, &'a str>) -> Vec<String> {
    let mut path = vec![target.to_string()];
    let mut current = target;
    while let Some(&previous) = parent.get(current) {
        path.push(previous.to_string());
        current = previous;
    }
    path.reverse();
    path
}
