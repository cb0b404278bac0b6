use crate::dependency_tree::domain::{DependencyNode, Severity};
use std::collections::BTreeSet;

/// Selected values of each filter dimension.
///
/// `None` means every value of that dimension is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub severities: Option<BTreeSet<Severity>>,
    pub licenses: Option<BTreeSet<String>>,
    pub scopes: Option<BTreeSet<String>>,
}

impl FilterState {
    /// Selects everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_severities<I: IntoIterator<Item = Severity>>(mut self, severities: I) -> Self {
        self.severities = Some(severities.into_iter().collect());
        self
    }

    pub fn with_licenses<I, S>(mut self, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.licenses = Some(licenses.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Filter state selecting exactly the severities, licenses and scopes
    /// present in `trees`; used to populate filter menus
    pub fn available_from<'a, I>(trees: I) -> Self
    where
        I: IntoIterator<Item = &'a DependencyNode>,
    {
        let mut severities = BTreeSet::new();
        let mut licenses = BTreeSet::new();
        let mut scopes = BTreeSet::new();
        for tree in trees {
            tree.visit(&mut |node| {
                severities.extend(node.issues().iter().map(|i| i.severity()));
                licenses.extend(node.licenses().iter().map(|l| l.name().to_string()));
                scopes.extend(node.scopes().iter().cloned());
            });
        }
        Self {
            severities: Some(severities),
            licenses: Some(licenses),
            scopes: Some(scopes),
        }
    }

    fn severity_selected(&self, severity: Severity) -> bool {
        self.severities
            .as_ref()
            .map_or(true, |selected| selected.contains(&severity))
    }

    fn license_selected(&self, license: &str) -> bool {
        self.licenses
            .as_ref()
            .map_or(true, |selected| selected.contains(license))
    }

    /// Nodes without scopes always match
    fn scopes_match(&self, node: &DependencyNode) -> bool {
        match &self.scopes {
            None => true,
            Some(_) if node.scopes().is_empty() => true,
            Some(selected) => node.scopes().iter().any(|s| selected.contains(s)),
        }
    }
}

/// TreeFilter derives display trees from canonical trees
pub struct TreeFilter;

impl TreeFilter {
    /// Filtered projection of `canonical`.
    ///
    /// The result has the same shape as `canonical`; nodes whose issues are
    /// all filtered out stay with empty sets. `canonical` is not modified.
    pub fn apply_filters(canonical: &DependencyNode, filter: &FilterState) -> DependencyNode {
        let mut projection = canonical.clone_without_issues();
        Self::reattach(canonical, &mut projection, filter);
        projection.process_tree_issues();
        projection
    }

    fn reattach(source: &DependencyNode, target: &mut DependencyNode, filter: &FilterState) {
        if filter.scopes_match(source) {
            target.set_issues(
                source
                    .issues()
                    .iter()
                    .filter(|issue| filter.severity_selected(issue.severity()))
                    .cloned()
                    .collect(),
            );
            target.set_licenses(
                source
                    .licenses()
                    .iter()
                    .filter(|license| filter.license_selected(license.name()))
                    .cloned()
                    .collect(),
            );
        }

        // Both trees share a shape, so the children line up
        for (source_child, target_child) in source.children().iter().zip(target.children_mut()) {
            Self::reattach(source_child, target_child, filter);
        }
    }
}
