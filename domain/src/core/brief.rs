//! Project brief value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The business project submitted for review (Value Object)
///
/// This is the text every advisor ultimately comments on. It opens both
/// conversation histories and is what the offline fallback classifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBrief {
    content: String,
}

impl ProjectBrief {
    /// Try to create a brief, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyBrief);
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for ProjectBrief {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for ProjectBrief {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        ProjectBrief::try_new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_creation() {
        let brief = ProjectBrief::try_new("Build a marketplace app").unwrap();
        assert_eq!(brief.content(), "Build a marketplace app");
    }

    #[test]
    fn test_empty_brief_rejected() {
        assert_eq!(ProjectBrief::try_new(""), Err(DomainError::EmptyBrief));
        assert_eq!(ProjectBrief::try_new("  \n "), Err(DomainError::EmptyBrief));
    }
}
