//! Access policy types.

use std::fmt;

/// A capability granted on a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Read,
    Update,
    List,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Update => "update",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `path "..." { capabilities = [...] }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub path: String,
    pub capabilities: Vec<Capability>,
    /// Rendered as a `#` line above the block
    pub comment: Option<String>,
}

impl Rule {
    pub fn new(path: impl Into<String>, capabilities: &[Capability]) -> Self {
        Self {
            path: path.into(),
            capabilities: capabilities.to_vec(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A named, ordered set of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Policy {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Render as an HCL policy document.
    pub fn to_hcl(&self) -> String {
        let blocks: Vec<String> = self
            .rules
            .iter()
            .map(|rule| {
                let caps = rule
                    .capabilities
                    .iter()
                    .map(|c| format!("\"{}\"", c))
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut block = String::new();
                if let Some(comment) = &rule.comment {
                    block.push_str(&format!("# {}\n", comment));
                }
                block.push_str(&format!(
                    "path \"{}\" {{\n  capabilities = [{}]\n}}\n",
                    rule.path, caps
                ));
                block
            })
            .collect();
        blocks.join("\n")
    }
}
