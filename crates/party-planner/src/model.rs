//! Domain Models
//!
//! Core data types for the guest list. Records are immutable once loaded.

use serde::{Deserialize, Serialize};

/// One invited guest
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Full name (e.g., "Ada Lovelace")
    pub name: String,

    /// Relation to the host (e.g., "best friend", "mathematician")
    pub relation: String,

    /// Free-text description
    pub description: String,

    /// Contact email
    pub email: String,
}

impl GuestRecord {
    pub fn new(
        name: impl Into<String>,
        relation: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            description: description.into(),
            email: email.into(),
        }
    }

    /// Canonical multi-line text form, the unit both indexed and returned
    /// by retrieval.
    pub fn profile_block(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Relation: {}", self.relation),
            format!("Description: {}", self.description),
            format!("Email: {}", self.email),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_block_layout() {
        let guest = GuestRecord::new(
            "Ada Lovelace",
            "best friend",
            "Pioneer of computer programming.",
            "ada.lovelace@example.com",
        );

        let block = guest.profile_block();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Name: Ada Lovelace");
        assert_eq!(lines[1], "Relation: best friend");
        assert_eq!(lines[3], "Email: ada.lovelace@example.com");
    }
}
