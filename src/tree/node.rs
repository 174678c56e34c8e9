//! Leaf and composite check nodes.

use std::sync::Arc;

use thiserror::Error;

use crate::probe::Probe;

/// Construction-time tree errors; never raised during evaluation.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("duplicate child name '{name}' in composite '{parent}'")]
    DuplicateChildName { parent: String, name: String },
}

/// One node of the check tree: either a named probe or a named group of
/// children in declaration order.
pub enum CheckNode {
    Leaf {
        name: String,
        probe: Arc<dyn Probe>,
    },
    Composite {
        name: String,
        children: Vec<CheckNode>,
    },
}

impl std::fmt::Debug for CheckNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckNode::Leaf { name, .. } => f
                .debug_struct("Leaf")
                .field("name", name)
                .finish_non_exhaustive(),
            CheckNode::Composite { name, children } => f
                .debug_struct("Composite")
                .field("name", name)
                .field("children", children)
                .finish(),
        }
    }
}

impl CheckNode {
    pub fn leaf(name: impl Into<String>, probe: Arc<dyn Probe>) -> Self {
        CheckNode::Leaf {
            name: name.into(),
            probe,
        }
    }

    /// Build a composite, rejecting duplicate child names.
    pub fn composite(
        name: impl Into<String>,
        children: Vec<CheckNode>,
    ) -> Result<Self, TreeError> {
        let name = name.into();
        for (i, child) in children.iter().enumerate() {
            if children[..i].iter().any(|c| c.name() == child.name()) {
                return Err(TreeError::DuplicateChildName {
                    parent: name,
                    name: child.name().to_string(),
                });
            }
        }
        Ok(CheckNode::Composite { name, children })
    }

    pub fn name(&self) -> &str {
        match self {
            CheckNode::Leaf { name, .. } => name,
            CheckNode::Composite { name, .. } => name,
        }
    }

    /// Depth-first traversal over all leaves, yielding dotted paths built
    /// from ancestor names. The root's own name is not part of any path.
    pub fn visit(&self, f: &mut impl FnMut(&str, &Arc<dyn Probe>)) {
        match self {
            CheckNode::Composite { children, .. } => {
                for child in children {
                    child.visit_at(child.name(), f);
                }
            }
            // A bare leaf used as the root has no ancestors; its own name
            // is the path.
            CheckNode::Leaf { name, probe } => f(name, probe),
        }
    }

    fn visit_at(&self, path: &str, f: &mut impl FnMut(&str, &Arc<dyn Probe>)) {
        match self {
            CheckNode::Leaf { probe, .. } => f(path, probe),
            CheckNode::Composite { children, .. } => {
                for child in children {
                    let child_path = format!("{}.{}", path, child.name());
                    child.visit_at(&child_path, f);
                }
            }
        }
    }

    /// Ordered `(path, probe)` list of all leaves; the flattening used by
    /// the concurrent evaluator.
    pub fn leaves(&self) -> Vec<(String, Arc<dyn Probe>)> {
        let mut out = Vec::new();
        self.visit(&mut |path, probe| out.push((path.to_string(), Arc::clone(probe))));
        out
    }
}
