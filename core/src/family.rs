//! Families and their members.

use std::fmt;

pub mod index;
pub use index::Index;

pub mod subset;
pub use subset::Subset;

/// The family structure analysed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Proband, father and mother.
    #[default]
    Trio,
    /// Proband, father, mother and an unaffected sibling.
    Quad,
}

impl Mode {
    /// Returns the roles of family members in the order they appear in a structure file.
    pub fn roles(self) -> &'static [Role] {
        match self {
            Mode::Trio => &[Role::Proband, Role::Father, Role::Mother],
            Mode::Quad => &[Role::Proband, Role::Father, Role::Mother, Role::Sibling],
        }
    }

    /// Returns `true` if siblings are included.
    pub fn has_sibling(self) -> bool {
        self == Mode::Quad
    }

    /// Returns the number of members per family.
    pub fn members(self) -> usize {
        self.roles().len()
    }
}

/// The role of a member within a family.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Role {
    /// The affected offspring.
    Proband,
    /// The father.
    Father,
    /// The mother.
    Mother,
    /// The unaffected sibling.
    Sibling,
}

impl Role {
    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Proband => "proband",
            Role::Father => "father",
            Role::Mother => "mother",
            Role::Sibling => "sibling",
        })
    }
}

/// A family and the individual IDs of its members.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Family {
    id: String,
    members: Vec<String>,
}

impl Family {
    /// Creates a new family.
    ///
    /// Members should be ordered as proband, father, mother and, optionally, sibling.
    /// Trailing members may be left out, in which case they are considered absent.
    pub fn new<S>(id: S, members: Vec<String>) -> Self
    where
        S: ToString,
    {
        Self {
            id: id.to_string(),
            members,
        }
    }

    /// Returns the family ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the individual ID of the family member with the provided role, if present.
    pub fn member(&self, role: Role) -> Option<&str> {
        self.members.get(role.position()).map(String::as_str)
    }

    /// Returns the individual IDs of all family members present.
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_member() {
        let family = Family::new("f1", vec!["p1".into(), "d1".into(), "m1".into()]);

        assert_eq!(family.id(), "f1");
        assert_eq!(family.member(Role::Proband), Some("p1"));
        assert_eq!(family.member(Role::Father), Some("d1"));
        assert_eq!(family.member(Role::Mother), Some("m1"));
        assert_eq!(family.member(Role::Sibling), None);
    }

    #[test]
    fn test_mode_roles() {
        assert_eq!(Mode::Trio.members(), 3);
        assert_eq!(Mode::Quad.members(), 4);
        assert_eq!(Mode::Quad.roles().last(), Some(&Role::Sibling));
        assert!(!Mode::default().has_sibling());
    }
}
