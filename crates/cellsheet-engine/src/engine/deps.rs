//! Reverse dependency graph between cells.
//!
//! Edges run from a referenced name to the tags of the cells whose formulas
//! read it. Names are stored as written in the formula, so a reference that
//! does not resolve to a cell (e.g. `Z99` or `Ba`) still gets an entry.
//! A second index maps each dependent back to the names it reads, so edges
//! of one cell can be dropped without scanning the graph.

use std::collections::{BTreeSet, HashMap, HashSet};

/// Referenced name -> tags of the cells that read it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyGraph {
    dependents: HashMap<String, BTreeSet<String>>,
    /// Dependent tag -> names its formula reads
    precedents: HashMap<String, BTreeSet<String>>,
}

/// What one cascade has to visit, computed before any cell is recomputed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecalcPlan {
    /// Transitive readers of the start, each after the cells it reads.
    pub order: Vec<String>,
    /// Readers that sit on a cycle through other readers.
    pub cyclic: HashSet<String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent`'s formula reads `name`.
    pub fn add_dependency(&mut self, name: &str, dependent: &str) {
        self.dependents
            .entry(name.to_string())
            .or_default()
            .insert(dependent.to_string());
        self.precedents
            .entry(dependent.to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Remove every edge into `dependent`.
    pub fn remove_dependent(&mut self, dependent: &str) {
        let Some(names) = self.precedents.remove(dependent) else {
            return;
        };
        for name in names {
            if let Some(set) = self.dependents.get_mut(&name) {
                set.remove(dependent);
                if set.is_empty() {
                    self.dependents.remove(&name);
                }
            }
        }
    }

    pub fn dependents_of(&self, name: &str) -> impl Iterator<Item = &str> + '_ {
        self.dependents
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Names read by `dependent`, sorted.
    pub fn precedents_of(&self, dependent: &str) -> Vec<&str> {
        self.precedents
            .get(dependent)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn contains_edge(&self, name: &str, dependent: &str) -> bool {
        self.dependents
            .get(name)
            .is_some_and(|set| set.contains(dependent))
    }

    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Every cell transitively reading `start`, ordered so that each cell comes
    /// after all of the cells it reads. `start` itself is not included.
    ///
    /// Cycles do not loop: a cell already visited is skipped.
    pub fn recalc_order(&self, start: &str) -> Vec<String> {
        let mut post = self.post_order(start);
        post.pop();
        post.reverse();
        post.into_iter().map(str::to_string).collect()
    }

    /// [`DependencyGraph::recalc_order`] plus the readers that lie on a cycle,
    /// found in one pass over the strongly connected components of the
    /// reachable subgraph.
    pub fn recalc_plan(&self, start: &str) -> RecalcPlan {
        let post = self.post_order(start);
        let reachable: HashSet<&str> = post.iter().copied().collect();

        // Second Kosaraju pass: decreasing finish time, following "reads" edges.
        let mut assigned = HashSet::new();
        let mut cyclic = HashSet::new();
        for &root in post.iter().rev() {
            if !assigned.insert(root) {
                continue;
            }
            let mut component = vec![root];
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                for name in self.precedents_of(node) {
                    if reachable.contains(name) && assigned.insert(name) {
                        component.push(name);
                        stack.push(name);
                    }
                }
            }
            if component.len() > 1 {
                cyclic.extend(component.into_iter().map(str::to_string));
            }
        }

        let order = post
            .iter()
            .rev()
            .skip(1)
            .map(|tag| tag.to_string())
            .collect();
        RecalcPlan { order, cyclic }
    }

    /// Depth-first post-order over "is read by" edges from `start`, with an
    /// explicit stack. `start` comes last.
    fn post_order<'a>(&'a self, start: &'a str) -> Vec<&'a str> {
        let mut post = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut stack = vec![(start, self.pending_dependents(start))];

        while let Some(frame) = stack.last_mut() {
            let cell = frame.0;
            match frame.1.pop() {
                Some(dependent) => {
                    if seen.insert(dependent) {
                        stack.push((dependent, self.pending_dependents(dependent)));
                    }
                }
                None => {
                    post.push(cell);
                    stack.pop();
                }
            }
        }
        post
    }

    /// Dependents of `name`, reversed so popping yields them in tag order.
    fn pending_dependents(&self, name: &str) -> Vec<&str> {
        let mut pending: Vec<&str> = self.dependents_of(name).collect();
        pending.reverse();
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_and_remove_dependent() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A1", "C1");
        graph.add_dependency("B1", "C1");
        graph.add_dependency("A1", "D1");

        assert_eq!(graph.precedents_of("C1"), vec!["A1", "B1"]);
        assert_eq!(graph.edge_count(), 3);

        graph.remove_dependent("C1");
        assert!(!graph.contains_edge("A1", "C1"));
        assert!(graph.contains_edge("A1", "D1"));
        assert_eq!(graph.dependents_of("B1").count(), 0);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_recalc_order_puts_readers_after_sources() {
        // A1 -> B1 -> D1, A1 -> D1, A1 -> C1
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A1", "B1");
        graph.add_dependency("A1", "C1");
        graph.add_dependency("A1", "D1");
        graph.add_dependency("B1", "D1");

        let order = graph.recalc_order("A1");
        assert_eq!(order.len(), 3);
        let pos = |tag: &str| order.iter().position(|t| t == tag).unwrap();
        assert!(pos("B1") < pos("D1"));
        assert!(!order.contains(&"A1".to_string()));
    }

    #[test]
    fn test_recalc_order_terminates_on_cycles() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A1", "B1");
        graph.add_dependency("B1", "C1");
        graph.add_dependency("C1", "A1");

        assert_eq!(graph.recalc_order("A1"), vec!["B1", "C1"]);
    }

    #[test]
    fn test_precedents_index_follows_edits() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("B1", "C1");
        graph.add_dependency("A1", "C1");
        graph.add_dependency("A1", "D1");
        assert_eq!(graph.precedents_of("C1"), vec!["A1", "B1"]);

        graph.remove_dependent("C1");
        assert!(graph.precedents_of("C1").is_empty());
        assert_eq!(graph.precedents_of("D1"), vec!["A1"]);

        graph.remove_dependent("D1");
        assert!(graph.is_empty());
        assert_eq!(graph, DependencyGraph::new());
    }

    #[test]
    fn test_recalc_order_on_long_chain() {
        let mut graph = DependencyGraph::new();
        for row in 2..=200_000 {
            graph.add_dependency(&format!("A{}", row - 1), &format!("A{row}"));
        }

        let order = graph.recalc_order("A1");
        assert_eq!(order.len(), 199_999);
        assert_eq!(order.first().map(String::as_str), Some("A2"));
        assert_eq!(order.last().map(String::as_str), Some("A200000"));
    }

    #[test]
    fn test_recalc_plan_marks_cycle_members() {
        // A1 -> B1 -> C1 -> B1, and A1 -> D1
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A1", "B1");
        graph.add_dependency("B1", "C1");
        graph.add_dependency("C1", "B1");
        graph.add_dependency("A1", "D1");

        let plan = graph.recalc_plan("A1");
        assert_eq!(plan.order, graph.recalc_order("A1"));
        assert_eq!(
            plan.cyclic,
            HashSet::from(["B1".to_string(), "C1".to_string()])
        );
    }

    #[test]
    fn test_recalc_plan_of_acyclic_graph_has_no_cycle_members() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A1", "B1");
        graph.add_dependency("A1", "C1");
        graph.add_dependency("B1", "D1");
        graph.add_dependency("C1", "D1");

        let plan = graph.recalc_plan("A1");
        assert_eq!(plan.order.len(), 3);
        assert!(plan.cyclic.is_empty());
    }

    #[test]
    fn test_recalc_order_of_unknown_name_is_empty() {
        assert!(DependencyGraph::new().recalc_order("Q7").is_empty());
    }
}
