// ABOUTME: Navigation state: which panel renders for a given menu and role
// ABOUTME: Owners have no personal task view and land on the designation panel

use taskdeck_core::Role;

/// The active navigation menu; exactly one panel renders at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMenu {
    Tasks,
    Designation,
    Employees,
    Target,
    Assign,
    Progress,
    Chat,
    Reports,
}

impl ActiveMenu {
    /// Default landing menu per role
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Owner => ActiveMenu::Designation,
            Role::Senior | Role::Junior => ActiveMenu::Tasks,
        }
    }

    /// Resolve a navigation request. An owner visiting the task board is
    /// silently redirected to the designation panel; every other request is
    /// honored as-is and is idempotent.
    pub fn select(self, role: Role) -> Self {
        if role == Role::Owner && self == ActiveMenu::Tasks {
            ActiveMenu::Designation
        } else {
            self
        }
    }

    /// Menu entries visible to a role
    pub fn visible_for(role: Role) -> Vec<Self> {
        let mut menus = Vec::new();
        if role != Role::Owner {
            menus.push(ActiveMenu::Tasks);
        }
        menus.extend([
            ActiveMenu::Designation,
            ActiveMenu::Employees,
            ActiveMenu::Target,
            ActiveMenu::Assign,
            ActiveMenu::Progress,
            ActiveMenu::Chat,
            ActiveMenu::Reports,
        ]);
        menus
    }
}
