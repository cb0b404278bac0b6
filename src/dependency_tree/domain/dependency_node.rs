use super::component_id::ComponentId;
use super::general_info::GeneralInfo;
use super::issue::Issue;
use super::license::License;
use serde::Serialize;
use std::collections::BTreeSet;

/// Role of a node in the dependency tree.
///
/// Only `Dependency` nodes are submitted to the scan service; roots and
/// modules are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Module,
    Dependency,
}

/// A node of a per-project dependency tree.
///
/// Children are exclusively owned and kept in discovery order. `issues` and
/// `licenses` hold what the scan attached to this node directly; the
/// `aggregated_*` sets are the union over the node and all its descendants
/// and are only valid after `process_tree_issues`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyNode {
    name: String,
    general_info: GeneralInfo,
    kind: NodeKind,
    scopes: BTreeSet<String>,
    issues: BTreeSet<Issue>,
    licenses: BTreeSet<License>,
    aggregated_issues: BTreeSet<Issue>,
    aggregated_licenses: BTreeSet<License>,
    children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(name: impl Into<String>, general_info: GeneralInfo, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            general_info,
            kind,
            scopes: BTreeSet::new(),
            issues: BTreeSet::new(),
            licenses: BTreeSet::new(),
            aggregated_issues: BTreeSet::new(),
            aggregated_licenses: BTreeSet::new(),
            children: Vec::new(),
        }
    }

    pub fn root(name: impl Into<String>, general_info: GeneralInfo) -> Self {
        Self::new(name, general_info, NodeKind::Root)
    }

    pub fn module(name: impl Into<String>, general_info: GeneralInfo) -> Self {
        Self::new(name, general_info, NodeKind::Module)
    }

    pub fn dependency(name: impl Into<String>, general_info: GeneralInfo) -> Self {
        Self::new(name, general_info, NodeKind::Dependency)
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn general_info(&self) -> &GeneralInfo {
        &self.general_info
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dependency(&self) -> bool {
        self.kind == NodeKind::Dependency
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [DependencyNode] {
        &mut self.children
    }

    pub fn issues(&self) -> &BTreeSet<Issue> {
        &self.issues
    }

    pub fn licenses(&self) -> &BTreeSet<License> {
        &self.licenses
    }

    pub fn aggregated_issues(&self) -> &BTreeSet<Issue> {
        &self.aggregated_issues
    }

    pub fn aggregated_licenses(&self) -> &BTreeSet<License> {
        &self.aggregated_licenses
    }

    pub fn set_issues(&mut self, issues: BTreeSet<Issue>) {
        self.issues = issues;
    }

    pub fn set_licenses(&mut self, licenses: BTreeSet<License>) {
        self.licenses = licenses;
    }

    pub fn component_id(&self) -> ComponentId {
        self.general_info.component_id()
    }

    /// Appends `child` unless a sibling with the same display name exists.
    ///
    /// Returns `false` when the child was rejected.
    pub fn add(&mut self, child: DependencyNode) -> bool {
        if self.children.iter().any(|c| c.name == child.name) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Removes and returns the only child when there is exactly one
    pub fn into_single_child(mut self) -> Result<DependencyNode, DependencyNode> {
        if self.children.len() == 1 {
            if let Some(child) = self.children.pop() {
                return Ok(child);
            }
        }
        Err(self)
    }

    /// Deep copy with metadata, scopes and children kept, and every issue,
    /// license and aggregate cleared.
    pub fn clone_without_issues(&self) -> DependencyNode {
        DependencyNode {
            name: self.name.clone(),
            general_info: self.general_info.clone(),
            kind: self.kind,
            scopes: self.scopes.clone(),
            issues: BTreeSet::new(),
            licenses: BTreeSet::new(),
            aggregated_issues: BTreeSet::new(),
            aggregated_licenses: BTreeSet::new(),
            children: self
                .children
                .iter()
                .map(DependencyNode::clone_without_issues)
                .collect(),
        }
    }

    /// Union of the issues attached anywhere in this subtree
    pub fn all_issues(&self) -> BTreeSet<Issue> {
        let mut all = BTreeSet::new();
        self.visit(&mut |node| all.extend(node.issues.iter().cloned()));
        all
    }

    /// Union of the licenses attached anywhere in this subtree
    pub fn all_licenses(&self) -> BTreeSet<License> {
        let mut all = BTreeSet::new();
        self.visit(&mut |node| all.extend(node.licenses.iter().cloned()));
        all
    }

    /// Recomputes `aggregated_issues` and `aggregated_licenses` bottom-up
    /// for the whole subtree and returns the aggregate issues of `self`.
    pub fn process_tree_issues(&mut self) -> &BTreeSet<Issue> {
        let mut issues = self.issues.clone();
        let mut licenses = self.licenses.clone();
        for child in &mut self.children {
            child.process_tree_issues();
            issues.extend(child.aggregated_issues.iter().cloned());
            licenses.extend(child.aggregated_licenses.iter().cloned());
        }
        self.aggregated_issues = issues;
        self.aggregated_licenses = licenses;
        &self.aggregated_issues
    }

    /// Pre-order traversal
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&DependencyNode),
    {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Pre-order traversal with mutable access
    pub fn visit_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut DependencyNode),
    {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// First dependency node (pre-order) whose component id equals `id`
    pub fn find_by_component(&self, id: &ComponentId) -> Option<&DependencyNode> {
        if self.is_dependency() && &self.component_id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_component(id))
    }

    /// Direct child by display name
    pub fn child(&self, name: &str) -> Option<&DependencyNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}
