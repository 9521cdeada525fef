//! Technical library: a tree of folders and links.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::FieldErrors;

/// Item kind. Declaration order is the listing order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LibraryItemType {
    Folder,
    Pdf,
    Video,
    Image,
    Link,
}

impl LibraryItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Image => "image",
            Self::Link => "link",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "folder" => Some(Self::Folder),
            "pdf" => Some(Self::Pdf),
            "video" => Some(Self::Video),
            "image" => Some(Self::Image),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }
}

impl std::fmt::Display for LibraryItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LibraryItem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: LibraryItemType,
    pub url: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Order a folder listing by type, then by name.
pub fn sort_listing(items: &mut [LibraryItem]) {
    items.sort_by(|a, b| {
        a.item_type
            .cmp(&b.item_type)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LibraryQuery {
    /// Folder to list; the root when absent.
    pub folder_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLibraryItemRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: Option<LibraryItemType>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// A [`CreateLibraryItemRequest`] that passed validation. `url` is always
/// `None` for folders.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLibraryItem {
    pub name: String,
    pub item_type: LibraryItemType,
    pub url: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl CreateLibraryItemRequest {
    pub fn validate(&self) -> Result<ValidLibraryItem, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();

        let Some(item_type) = self.item_type.filter(|_| !name.is_empty()) else {
            errors.add("form", "Faltan datos obligatorios");
            return Err(errors);
        };

        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);
        if !item_type.is_folder() && url.is_none() {
            errors.add("url", "Los archivos requieren un enlace URL");
        }
        errors.finish()?;

        Ok(ValidLibraryItem {
            name: name.to_string(),
            url: if item_type.is_folder() { None } else { url },
            item_type,
            parent_id: self.parent_id,
        })
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameLibraryItemRequest {
    pub name: String,
}

impl RenameLibraryItemRequest {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let name = self.name.trim();
        if name.is_empty() {
            let mut errors = FieldErrors::default();
            errors.add("name", "El nombre no puede estar vacío");
            return Err(errors);
        }
        Ok(name.to_string())
    }
}

/// Minimal node used to walk the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
}

/// `root` and every descendant of it, root first. Items outside the subtree
/// are never included; an unknown root yields an empty list.
pub fn collect_subtree(nodes: &[TreeNode], root: Uuid) -> Vec<Uuid> {
    if !nodes.iter().any(|n| n.id == root) {
        return Vec::new();
    }

    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for node in nodes {
        if let Some(parent) = node.parent_id {
            children.entry(parent).or_default().push(node.id);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        out.push(id);
        if let Some(kids) = children.get(&id) {
            stack.extend(kids.iter().rev().copied());
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BreadcrumbEntry {
    pub id: Uuid,
    pub name: String,
}

/// Path from the root down to `folder`, both ends included. Stops at a
/// missing parent or a cycle.
pub fn breadcrumb(
    items: &HashMap<Uuid, (String, Option<Uuid>)>,
    folder: Uuid,
) -> Vec<BreadcrumbEntry> {
    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(folder);

    while let Some(id) = current {
        if !seen.insert(id) {
            break;
        }
        let Some((name, parent)) = items.get(&id) else {
            break;
        };
        path.push(BreadcrumbEntry {
            id,
            name: name.clone(),
        });
        current = *parent;
    }

    path.reverse();
    path
}

/// Folder contents plus where the folder sits.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LibraryListing {
    pub folder: Option<LibraryItem>,
    pub breadcrumb: Vec<BreadcrumbEntry>,
    pub items: Vec<LibraryItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LibraryDeleteResponse {
    pub message: String,
    pub removed: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, item_type: LibraryItemType) -> LibraryItem {
        LibraryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            item_type,
            url: None,
            parent_id: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_listing_order() {
        let mut items = vec![
            item("Video Drillor", LibraryItemType::Video),
            item("Manuales", LibraryItemType::Folder),
            item("Despiece", LibraryItemType::Pdf),
            item("Catálogos", LibraryItemType::Folder),
            item("Web", LibraryItemType::Link),
        ];
        sort_listing(&mut items);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Catálogos", "Manuales", "Despiece", "Video Drillor", "Web"]
        );
    }

    #[test]
    fn test_create_validation() {
        let folder = CreateLibraryItemRequest {
            name: " Manuales ".to_string(),
            item_type: Some(LibraryItemType::Folder),
            url: Some("https://ignored".to_string()),
            parent_id: None,
        }
        .validate()
        .unwrap();
        assert_eq!(folder.name, "Manuales");
        assert_eq!(folder.url, None);

        let err = CreateLibraryItemRequest {
            name: "Despiece".to_string(),
            item_type: Some(LibraryItemType::Pdf),
            url: Some("   ".to_string()),
            parent_id: None,
        }
        .validate()
        .unwrap_err();
        assert!(err.contains("url"));

        let err = CreateLibraryItemRequest {
            name: "".to_string(),
            item_type: Some(LibraryItemType::Link),
            url: None,
            parent_id: None,
        }
        .validate()
        .unwrap_err();
        assert!(err.contains("form"));
    }

    #[test]
    fn test_rename_rejects_blank() {
        let req = RenameLibraryItemRequest {
            name: "   ".to_string(),
        };
        assert!(req.validate().unwrap_err().contains("name"));

        let req = RenameLibraryItemRequest {
            name: " Nuevo ".to_string(),
        };
        assert_eq!(req.validate().unwrap(), "Nuevo");
    }

    #[test]
    fn test_collect_subtree_stays_inside() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();
        let sibling = Uuid::new_v4();
        let sibling_child = Uuid::new_v4();

        let nodes = vec![
            TreeNode { id: root, parent_id: None },
            TreeNode { id: child, parent_id: Some(root) },
            TreeNode { id: grandchild, parent_id: Some(child) },
            TreeNode { id: sibling, parent_id: None },
            TreeNode { id: sibling_child, parent_id: Some(sibling) },
        ];

        let removed = collect_subtree(&nodes, root);
        assert_eq!(removed, vec![root, child, grandchild]);
        assert!(!removed.contains(&sibling));
        assert!(!removed.contains(&sibling_child));

        assert!(collect_subtree(&nodes, Uuid::new_v4()).is_empty());
        assert_eq!(collect_subtree(&nodes, grandchild), vec![grandchild]);
    }

    #[test]
    fn test_breadcrumb_walks_to_root() {
        let top = Uuid::new_v4();
        let mid = Uuid::new_v4();
        let leaf = Uuid::new_v4();
        let mut items = HashMap::new();
        items.insert(top, ("Manuales".to_string(), None));
        items.insert(mid, ("Drillor".to_string(), Some(top)));
        items.insert(leaf, ("2025".to_string(), Some(mid)));

        let names: Vec<String> = breadcrumb(&items, leaf).into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Manuales", "Drillor", "2025"]);
    }

    #[test]
    fn test_breadcrumb_stops_on_cycle() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut items = HashMap::new();
        items.insert(a, ("A".to_string(), Some(b)));
        items.insert(b, ("B".to_string(), Some(a)));

        assert_eq!(breadcrumb(&items, a).len(), 2);
    }
}
