//! Role-based capabilities and the global edit-mode gate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Editor,
    Author,
    Viewer,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Author => "author",
            Role::Viewer => "viewer",
            Role::Other(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "editor" => Role::Editor,
            "author" => Role::Author,
            "viewer" => Role::Viewer,
            _ => Role::Other(name.to_string()),
        }
    }

    /// Capabilities granted by this role. Unrecognised roles grant none.
    pub fn grants(&self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Role::Admin => true,
            Role::Editor => matches!(
                capability,
                EditContent | ManageSections | ManageCategories | ManageAds | ManageArticles
            ),
            Role::Author => matches!(capability, ManageArticles),
            Role::Viewer | Role::Other(_) => false,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    EditContent,
    ManageSections,
    ManageCategories,
    DeleteCategories,
    ManageAds,
    ManageArticles,
    ExportData,
}

/// What the signed-in user may do right now
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    roles: Vec<Role>,
    edit_mode: bool,
}

impl Permissions {
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            roles,
            edit_mode: false,
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn set_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
        if !self.can(Capability::EditContent) {
            self.edit_mode = false;
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.roles.iter().any(|r| r.grants(capability))
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Flip edit mode. Has no effect for users who cannot edit content.
    ///
    /// Returns the new edit-mode value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        if self.can(Capability::EditContent) {
            self.edit_mode = !self.edit_mode;
        }
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on && self.can(Capability::EditContent);
    }

    /// Role grants editing AND edit mode is switched on.
    pub fn can_edit(&self) -> bool {
        self.edit_mode && self.can(Capability::EditContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_edit_requires_role_and_mode() {
        let mut perms = Permissions::new(vec![Role::Editor]);
        assert!(!perms.can_edit());
        perms.toggle_edit_mode();
        assert!(perms.can_edit());

        let mut viewer = Permissions::new(vec![Role::Viewer]);
        viewer.set_edit_mode(true);
        assert!(!viewer.edit_mode());
        assert!(!viewer.can_edit());
    }

    #[test]
    fn test_only_admin_deletes_categories() {
        assert!(Permissions::new(vec![Role::Admin]).can(Capability::DeleteCategories));
        assert!(!Permissions::new(vec![Role::Editor]).can(Capability::DeleteCategories));
        assert!(!Permissions::new(vec![Role::Editor]).can(Capability::ExportData));
    }

    #[test]
    fn test_unknown_role_grants_nothing() {
        let perms = Permissions::new(vec![Role::parse("superhero")]);
        assert!(!perms.can(Capability::EditContent));
        assert_eq!(perms.roles()[0].as_str(), "superhero");
    }

    #[test]
    fn test_losing_role_turns_edit_mode_off() {
        let mut perms = Permissions::new(vec![Role::Admin]);
        perms.set_edit_mode(true);
        perms.set_roles(vec![Role::Viewer]);
        assert!(!perms.edit_mode());
    }

    #[test]
    fn test_role_deserializes_from_string() {
        let roles: Vec<Role> = serde_json::from_str(r#"["Admin", "author"]"#).unwrap();
        assert_eq!(roles, vec![Role::Admin, Role::Author]);
    }
}
