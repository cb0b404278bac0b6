pub mod component_id;
pub mod dependency_node;
pub mod ecosystem;
pub mod general_info;
pub mod issue;
pub mod license;
pub mod project_key;

pub use component_id::ComponentId;
pub use dependency_node::{DependencyNode, NodeKind};
pub use ecosystem::{ComponentPrefix, Ecosystem};
pub use general_info::GeneralInfo;
pub use issue::{Issue, Severity};
pub use license::License;
pub use project_key::ProjectKey;
