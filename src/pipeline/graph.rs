//! Dependency graph for extraction stages.
//!
//! Tracks which stages consume which other stages' output, giving the run
//! order for `pokedex all` and catching cycles.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::Stage;

/// A dependency graph over stages.
#[derive(Debug, Default)]
pub struct StageGraph {
    /// Stage -> stages it depends on.
    dependencies: BTreeMap<Stage, BTreeSet<Stage>>,

    /// Stage -> stages that depend on it.
    dependents: BTreeMap<Stage, BTreeSet<Stage>>,

    /// All known stages, including those with no dependencies.
    stages: BTreeSet<Stage>,
}

impl StageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph for every stage and its soft dependencies.
    pub fn standard() -> Self {
        let mut graph = Self::new();
        for stage in Stage::ALL {
            graph.register(stage);
            for &dependency in stage.dependencies() {
                graph.add_dependency(stage, dependency);
            }
        }
        graph
    }

    /// Register a stage even if it has no dependencies.
    pub fn register(&mut self, stage: Stage) {
        self.stages.insert(stage);
    }

    /// Add a dependency: `from` depends on `to`.
    ///
    /// Both stages are registered.
    pub fn add_dependency(&mut self, from: Stage, to: Stage) {
        self.stages.insert(from);
        self.stages.insert(to);
        self.dependencies.entry(from).or_default().insert(to);
        self.dependents.entry(to).or_default().insert(from);
    }

    /// Direct dependencies of `stage`.
    pub fn dependencies_of(&self, stage: Stage) -> impl Iterator<Item = Stage> + '_ {
        self.dependencies
            .get(&stage)
            .into_iter()
            .flatten()
            .copied()
    }

    /// Stages that depend directly on `stage`.
    pub fn dependents_of(&self, stage: Stage) -> impl Iterator<Item = Stage> + '_ {
        self.dependents.get(&stage).into_iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Topological sort using Kahn's algorithm.
    ///
    /// Dependencies come before dependents; ties break in [`Stage`] order so
    /// the result is stable between runs.
    pub fn topological_sort(&self) -> Result<Vec<Stage>, CycleError> {
        let mut in_degree: BTreeMap<Stage, usize> = self
            .stages
            .iter()
            .map(|&stage| {
                let count = self.dependencies.get(&stage).map_or(0, |deps| deps.len());
                (stage, count)
            })
            .collect();

        let mut queue: VecDeque<Stage> = in_degree
            .iter()
            .filter(|(_, &count)| count == 0)
            .map(|(&stage, _)| stage)
            .collect();

        let mut order = Vec::with_capacity(self.stages.len());
        while let Some(stage) = queue.pop_front() {
            order.push(stage);
            for dependent in self.dependents_of(stage) {
                if let Some(count) = in_degree.get_mut(&dependent) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if order.len() != self.stages.len() {
            return Err(CycleError {
                cycle: self.find_cycle(),
            });
        }
        Ok(order)
    }

    fn find_cycle(&self) -> Vec<Stage> {
        let mut visited = BTreeSet::new();
        let mut on_stack = BTreeSet::new();
        let mut path = Vec::new();

        for &start in &self.stages {
            if !visited.contains(&start) {
                if let Some(cycle) = self.dfs_find_cycle(start, &mut visited, &mut on_stack, &mut path) {
                    return cycle;
                }
            }
        }
        Vec::new()
    }

    fn dfs_find_cycle(
        &self,
        node: Stage,
        visited: &mut BTreeSet<Stage>,
        on_stack: &mut BTreeSet<Stage>,
        path: &mut Vec<Stage>,
    ) -> Option<Vec<Stage>> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(node);

        for dep in self.dependencies_of(node) {
            if !visited.contains(&dep) {
                if let Some(cycle) = self.dfs_find_cycle(dep, visited, on_stack, path) {
                    return Some(cycle);
                }
            } else if on_stack.contains(&dep) {
                let start = path.iter().position(|&s| s == dep).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(dep);
                return Some(cycle);
            }
        }

        path.pop();
        on_stack.remove(&node);
        None
    }
}

/// A cycle in the stage graph.
#[derive(Debug)]
pub struct CycleError {
    pub cycle: Vec<Stage>,
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Circular dependency detected: ")?;
        for (i, stage) in self.cycle.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", stage)?;
        }
        Ok(())
    }
}

impl std::error::Error for CycleError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_graph() {
        let graph = StageGraph::new();
        assert!(graph.is_empty());
        assert!(graph.topological_sort().unwrap().is_empty());
    }

    #[test]
    fn test_standard_order() {
        let order = StageGraph::standard().topological_sort().unwrap();
        assert_eq!(
            order,
            vec![
                Stage::Abilities,
                Stage::Items,
                Stage::Moves,
                Stage::Pokemon,
                Stage::Trainers,
                Stage::Routes,
            ]
        );
    }

    #[test]
    fn test_dependents_follow_dependencies() {
        let mut graph = StageGraph::new();
        graph.add_dependency(Stage::Routes, Stage::Trainers);
        graph.add_dependency(Stage::Trainers, Stage::Pokemon);
        graph.register(Stage::Abilities);

        let order = graph.topological_sort().unwrap();
        let pos = |s| order.iter().position(|&x| x == s).unwrap();
        assert!(pos(Stage::Pokemon) < pos(Stage::Trainers));
        assert!(pos(Stage::Trainers) < pos(Stage::Routes));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = StageGraph::new();
        graph.add_dependency(Stage::Pokemon, Stage::Trainers);
        graph.add_dependency(Stage::Trainers, Stage::Routes);
        graph.add_dependency(Stage::Routes, Stage::Pokemon);

        let err = graph.topological_sort().unwrap_err();
        assert!(err.cycle.len() >= 4);
        assert_eq!(err.cycle.first(), err.cycle.last());
        assert!(err.to_string().starts_with("Circular dependency detected: "));
    }

    #[test]
    fn test_self_reference_cycle() {
        let mut graph = StageGraph::new();
        graph.add_dependency(Stage::Moves, Stage::Moves);
        assert!(graph.topological_sort().is_err());
    }

    #[test]
    fn test_dependencies_of() {
        let graph = StageGraph::standard();
        let deps: Vec<_> = graph.dependencies_of(Stage::Trainers).collect();
        assert_eq!(deps, vec![Stage::Pokemon]);

        let dependents: Vec<_> = graph.dependents_of(Stage::Trainers).collect();
        assert_eq!(dependents, vec![Stage::Routes]);
    }
}
