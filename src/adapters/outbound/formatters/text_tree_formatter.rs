use crate::application::read_models::{ProjectReportView, ScanReport};
use crate::dependency_tree::domain::{DependencyNode, Issue, Severity};
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

/// TextTreeFormatter adapter drawing each projection as an indented tree
///
/// Nodes show their scopes and licenses; nodes with issues in their
/// subtree show the count and worst severity, and directly affected
/// nodes list their issues underneath.
#[derive(Debug)]
pub struct TextTreeFormatter {
    colored: bool,
}

impl TextTreeFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_style(severity: Severity) -> Style {
        match severity {
            Severity::Critical => Style::new().red().bold(),
            Severity::High => Style::new().red(),
            Severity::Medium => Style::new().yellow(),
            Severity::Low => Style::new().blue(),
            Severity::Information | Severity::Unknown => Style::new().dimmed(),
        }
    }

    fn write_project(&self, out: &mut String, project: &ProjectReportView) -> std::fmt::Result {
        let heading = format!("📦 {} ({})", project.name, project.ecosystem);
        write!(out, "{}", self.paint(&heading, Style::new().bold()))?;
        if project.name != project.path.display().to_string() {
            write!(out, " {}", project.path.display())?;
        }
        writeln!(
            out,
            "  [{} components, {} from cache]",
            project.components, project.from_cache
        )?;
        if project.failed_components > 0 {
            writeln!(
                out,
                "   {}",
                self.paint(
                    &format!("{} components could not be scanned", project.failed_components),
                    Style::new().yellow()
                )
            )?;
        }

        self.write_node_line(out, &project.tree)?;
        self.write_issues(out, &project.tree, "")?;
        self.write_children(out, &project.tree, "")?;
        writeln!(out)
    }

    fn write_children(&self, out: &mut String, node: &DependencyNode, prefix: &str) -> std::fmt::Result {
        let count = node.children().len();
        for (index, child) in node.children().iter().enumerate() {
            let last = index + 1 == count;
            let branch = if last { "└── " } else { "├── " };
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });

            write!(out, "{}{}", prefix, branch)?;
            self.write_node_line(out, child)?;
            self.write_issues(out, child, &child_prefix)?;
            self.write_children(out, child, &child_prefix)?;
        }
        Ok(())
    }

    fn write_node_line(&self, out: &mut String, node: &DependencyNode) -> std::fmt::Result {
        write!(out, "{}", node.name())?;
        if !node.scopes().is_empty() {
            let scopes: Vec<&str> = node.scopes().iter().map(String::as_str).collect();
            write!(out, " {}", self.paint(&format!("[{}]", scopes.join(", ")), Style::new().dimmed()))?;
        }
        if !node.licenses().is_empty() {
            let licenses: Vec<&str> = node.licenses().iter().map(|l| l.name()).collect();
            write!(out, " {{{}}}", licenses.join(", "))?;
        }
        let aggregated = node.aggregated_issues();
        if let Some(worst) = aggregated.iter().map(Issue::severity).max() {
            let badge = format!("({} issues, worst: {})", aggregated.len(), worst);
            write!(out, " {}", self.paint(&badge, Self::severity_style(worst)))?;
        }
        writeln!(out)
    }

    fn write_issues(&self, out: &mut String, node: &DependencyNode, prefix: &str) -> std::fmt::Result {
        let mut issues: Vec<&Issue> = node.issues().iter().collect();
        issues.sort_by(|a, b| b.severity().cmp(&a.severity()).then_with(|| a.id().cmp(b.id())));
        let rail = if node.children().is_empty() { "  " } else { "│ " };
        for issue in issues {
            let label = format!("{:<11}", issue.severity().as_str());
            write!(
                out,
                "{}{} ⚠ {} {} {}",
                prefix,
                rail,
                self.paint(&label, Self::severity_style(issue.severity())),
                issue.id(),
                issue.summary()
            )?;
            if !issue.fixed_versions().is_empty() {
                write!(out, " (fixed in {})", issue.fixed_versions().join(", "))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_summary(&self, out: &mut String, report: &ScanReport) -> std::fmt::Result {
        for failed in &report.failed_projects {
            writeln!(
                out,
                "{} {}: {}",
                self.paint("❌", Style::new().red()),
                failed.name,
                failed.reason
            )?;
        }

        if report.has_issues() {
            let breakdown: Vec<String> = report
                .severity_counts
                .iter()
                .map(|c| format!("{} {}", c.count, c.severity))
                .collect();
            writeln!(
                out,
                "⚠️  Found {} distinct issue(s): {}",
                report.distinct_issues,
                breakdown.join(", ")
            )
        } else {
            writeln!(out, "{}", self.paint("✅ No issues found", Style::new().green()))
        }
    }
}

impl TreeFormatter for TextTreeFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut out = String::new();
        for project in &report.projects {
            self.write_project(&mut out, project)?;
        }
        if report.projects.is_empty() && report.failed_projects.is_empty() {
            writeln!(out, "No projects found")?;
        }
        self.write_summary(&mut out, report)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{
        FailedProjectView, ReportMetadataView, SeverityCountView,
    };
    use crate::dependency_tree::domain::{Ecosystem, GeneralInfo, License};
    use std::path::PathBuf;

    fn metadata() -> ReportMetadataView {
        ReportMetadataView {
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            tool_name: "polyscan".to_string(),
            tool_version: "0.1.0".to_string(),
            run_id: "urn:uuid:test".to_string(),
        }
    }

    fn project_tree() -> DependencyNode {
        let mut root = DependencyNode::module("app", GeneralInfo::new("app", "1.0", Ecosystem::Maven));
        let mut lib_a = DependencyNode::dependency(
            "org.acme:lib-a:1.0",
            GeneralInfo::new("lib-a", "1.0", Ecosystem::Maven).with_group("org.acme"),
        )
        .with_scopes(["compile"]);
        let mut lib_b = DependencyNode::dependency(
            "org.acme:lib-b:2.0",
            GeneralInfo::new("lib-b", "2.0", Ecosystem::Maven).with_group("org.acme"),
        );
        lib_b.set_issues(
            [Issue::new("CVE-2024-1", Severity::High, "Remote code execution", "gav://org.acme:lib-b:2.0")
                .with_fixed_versions(vec!["2.1".to_string()])]
            .into_iter()
            .collect(),
        );
        lib_b.set_licenses([License::new("Apache-2.0")].into_iter().collect());
        lib_a.add(lib_b);
        root.add(lib_a);
        root.process_tree_issues();
        root
    }

    fn report() -> ScanReport {
        ScanReport {
            metadata: metadata(),
            projects: vec![ProjectReportView {
                name: "shop".to_string(),
                path: PathBuf::from("/ws"),
                ecosystem: Ecosystem::Maven,
                components: 2,
                from_cache: 0,
                failed_components: 0,
                issues: 1,
                tree: project_tree(),
            }],
            failed_projects: vec![FailedProjectView {
                name: "/ws/api".to_string(),
                path: PathBuf::from("/ws/api"),
                reason: "go not installed".to_string(),
            }],
            severity_counts: vec![SeverityCountView {
                severity: Severity::High,
                count: 1,
            }],
            distinct_issues: 1,
        }
    }

    #[test]
    fn test_tree_layout() {
        let output = TextTreeFormatter::new(false).format(&report()).unwrap();

        assert!(output.contains("📦 shop (maven) /ws"));
        assert!(output.contains("app (1 issues, worst: High)"));
        assert!(output.contains("└── org.acme:lib-a:1.0 [compile] (1 issues, worst: High)"));
        assert!(output.contains("    └── org.acme:lib-b:2.0 {Apache-2.0} (1 issues, worst: High)"));
        assert!(output.contains("⚠ High        CVE-2024-1 Remote code execution (fixed in 2.1)"));
    }

    #[test]
    fn test_summary_lists_failures_and_counts() {
        let output = TextTreeFormatter::new(false).format(&report()).unwrap();
        assert!(output.contains("❌ /ws/api: go not installed"));
        assert!(output.contains("Found 1 distinct issue(s): 1 High"));
    }

    #[test]
    fn test_clean_report() {
        let mut report = report();
        report.projects.clear();
        report.failed_projects.clear();
        report.severity_counts.clear();
        report.distinct_issues = 0;

        let output = TextTreeFormatter::new(false).format(&report).unwrap();
        assert!(output.contains("No projects found"));
        assert!(output.contains("✅ No issues found"));
    }

    #[test]
    fn test_colored_output_has_escape_codes() {
        let output = TextTreeFormatter::new(true).format(&report()).unwrap();
        assert!(output.contains("\u{1b}["));
    }
}
