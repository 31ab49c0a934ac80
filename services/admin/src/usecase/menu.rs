use std::collections::HashSet;

use serde::Serialize;

use lyceum_domain::permission::permission_resource;

use crate::domain::repository::ResourceRepository;
use crate::domain::types::Resource;
use crate::error::AdminServiceError;

/// One navigation entry. Two levels deep; the registry does not nest further.
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub key: String,
    pub display_name: String,
    pub children: Vec<MenuChild>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuChild {
    pub key: String,
    pub display_name: String,
}

/// Assembles the menu a caller is allowed to see. A top-level resource shows
/// up when its own key is covered by the caller's permissions or when at
/// least one of its children is.
fn build_menu(resources: &[Resource], allowed: &HashSet<&str>) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    for parent in resources.iter().filter(|r| r.parent_id.is_none()) {
        let children: Vec<MenuChild> = resources
            .iter()
            .filter(|r| r.parent_id == Some(parent.id) && allowed.contains(r.key.as_str()))
            .map(|r| MenuChild {
                key: r.key.clone(),
                display_name: r.display_name.clone(),
            })
            .collect();
        if allowed.contains(parent.key.as_str()) || !children.is_empty() {
            entries.push(MenuEntry {
                key: parent.key.clone(),
                display_name: parent.display_name.clone(),
                children,
            });
        }
    }
    entries
}

pub struct MenuForUserUseCase<R: ResourceRepository> {
    pub resources: R,
}

impl<R: ResourceRepository> MenuForUserUseCase<R> {
    pub async fn execute(&self, permissions: &[String]) -> Result<Vec<MenuEntry>, AdminServiceError> {
        let allowed: HashSet<&str> = permissions
            .iter()
            .filter_map(|p| permission_resource(p))
            .collect();
        let resources = self.resources.list_menu_visible().await?;
        Ok(build_menu(&resources, &allowed))
    }
}
