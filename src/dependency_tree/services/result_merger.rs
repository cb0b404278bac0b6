use crate::dependency_tree::domain::{ComponentId, DependencyNode};
use crate::ports::outbound::ComponentScanResult;
use std::collections::{BTreeSet, HashMap};

/// ResultMerger attaches scan results to the dependency nodes they belong to
///
/// Pure domain logic: the merger never performs I/O and never decides
/// which components to scan.
pub struct ResultMerger;

impl ResultMerger {
    /// Component ids of every dependency node, each listed once, in
    /// discovery order
    pub fn components_to_scan(tree: &DependencyNode) -> Vec<ComponentId> {
        let mut seen = BTreeSet::new();
        let mut components = Vec::new();
        tree.visit(&mut |node| {
            if node.is_dependency() {
                let id = node.component_id();
                if seen.insert(id.clone()) {
                    components.push(id);
                }
            }
        });
        components
    }

    /// Replaces the issues and licenses of every dependency node that has a
    /// result, then re-aggregates the tree.
    ///
    /// Nodes without a result keep what they had. Merging the same results
    /// twice yields the same tree.
    ///
    /// # Returns
    /// Number of nodes that received a result
    pub fn merge(
        tree: &mut DependencyNode,
        results: &HashMap<ComponentId, ComponentScanResult>,
    ) -> usize {
        let mut merged = 0;
        tree.visit_mut(&mut |node| {
            if !node.is_dependency() {
                return;
            }
            if let Some(result) = results.get(&node.component_id()) {
                node.set_issues(result.issues.clone());
                node.set_licenses(result.licenses.clone());
                merged += 1;
            }
        });
        tree.process_tree_issues();
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_tree::domain::{Ecosystem, GeneralInfo, Issue, License, Severity};

    fn maven_dep(artifact: &str, version: &str) -> DependencyNode {
        DependencyNode::dependency(
            format!("org.acme:{}:{}", artifact, version),
            GeneralInfo::new(artifact, version, Ecosystem::Maven).with_group("org.acme"),
        )
    }

    fn app_tree() -> DependencyNode {
        let mut lib_a = maven_dep("lib-a", "2.0");
        lib_a.add(maven_dep("lib-b", "1.5"));
        let mut app = DependencyNode::module(
            "app",
            GeneralInfo::new("app", "1.0", Ecosystem::Maven).with_group("org.acme"),
        );
        app.add(lib_a);
        app
    }

    fn lib_b_result() -> (ComponentId, ComponentScanResult) {
        let id = GeneralInfo::new("lib-b", "1.5", Ecosystem::Maven)
            .with_group("org.acme")
            .component_id();
        let issue = Issue::new("CVE-2024-0001", Severity::High, "overflow", id.to_string());
        (
            id,
            ComponentScanResult::new(
                [issue].into_iter().collect(),
                [License::new("Apache-2.0")].into_iter().collect(),
            ),
        )
    }

    #[test]
    fn test_components_to_scan_skips_modules() {
        let components = ResultMerger::components_to_scan(&app_tree());
        let rendered: Vec<String> = components.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["gav://org.acme:lib-a:2.0", "gav://org.acme:lib-b:1.5"]
        );
    }

    #[test]
    fn test_merge_attaches_and_aggregates() {
        let mut tree = app_tree();
        let results: HashMap<_, _> = [lib_b_result()].into_iter().collect();

        let merged = ResultMerger::merge(&mut tree, &results);

        assert_eq!(merged, 1);
        assert_eq!(tree.aggregated_issues().len(), 1);
        assert_eq!(tree.aggregated_licenses().len(), 1);
        assert!(tree.issues().is_empty());
        let lib_a = &tree.children()[0];
        assert!(lib_a.issues().is_empty());
        assert_eq!(lib_a.aggregated_issues().len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut once = app_tree();
        let results: HashMap<_, _> = [lib_b_result()].into_iter().collect();
        ResultMerger::merge(&mut once, &results);

        let mut twice = once.clone();
        ResultMerger::merge(&mut twice, &results);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_replaces_previous_results() {
        let mut tree = app_tree();
        let (id, _) = lib_b_result();
        let first: HashMap<_, _> = [lib_b_result()].into_iter().collect();
        ResultMerger::merge(&mut tree, &first);

        let cleared: HashMap<_, _> = [(id, ComponentScanResult::default())].into_iter().collect();
        ResultMerger::merge(&mut tree, &cleared);

        assert!(tree.aggregated_issues().is_empty());
        assert!(tree.all_licenses().is_empty());
    }
}
