use crate::graph::VertexId;

/// How the traversal root is treated by the joint detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootRule {
    /// The root is never reported, whatever its degree in the tree.
    Excluded,
    /// The root is reported when it has two or more tree children.
    Classic,
}

impl Default for RootRule {
    fn default() -> Self {
        RootRule::Excluded
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Vertex to start from; the lowest vertex id when unset.
    pub root: Option<VertexId>,
    pub root_rule: RootRule,
}

impl Config {
    pub fn with_root(mut self, root: VertexId) -> Config {
        self.root = Some(root);
        self
    }

    pub fn with_root_rule(mut self, root_rule: RootRule) -> Config {
        self.root_rule = root_rule;
        self
    }
}
