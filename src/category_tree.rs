//! In-memory arena over the category hierarchy.
//!
//! The `parent_id` links come straight from storage and are not guaranteed to
//! be acyclic, so every walk tracks the nodes it has visited.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Category, CategoryId};

pub const PATH_SEPARATOR: &str = " > ";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    pub full_path: String,
    #[schema(no_recursion)]
    pub children: Vec<CategoryNode>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, Category>,
    children: HashMap<CategoryId, Vec<CategoryId>>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut ordered: Vec<Category> = categories.into_iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let nodes: HashMap<CategoryId, Category> =
            ordered.iter().map(|c| (c.id, c.clone())).collect();

        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
        let mut roots = Vec::new();
        for category in &ordered {
            match category.parent_id.filter(|parent| nodes.contains_key(parent)) {
                Some(parent) => children.entry(parent).or_default().push(category.id),
                None => roots.push(category.id),
            }
        }

        Self {
            nodes,
            children,
            roots,
        }
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Categories from the outermost known ancestor down to `id`.
    ///
    /// The walk stops at a missing parent or at the first node seen twice.
    pub fn lineage(&self, id: CategoryId) -> Vec<&Category> {
        let mut lineage = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.nodes.get(&id);
        while let Some(category) = cursor {
            if !seen.insert(category.id) {
                break;
            }
            lineage.push(category);
            cursor = category.parent_id.and_then(|parent| self.nodes.get(&parent));
        }
        lineage.reverse();
        lineage
    }

    /// `Root > Mid > Leaf` for the category `id`.
    pub fn full_path(&self, id: CategoryId) -> Option<String> {
        let lineage = self.lineage(id);
        if lineage.is_empty() {
            return None;
        }
        let names: Vec<&str> = lineage.iter().map(|c| c.name.as_str()).collect();
        Some(names.join(PATH_SEPARATOR))
    }

    /// Nested view of every category reachable from a root.
    ///
    /// Categories caught in a parent cycle with no root are not reachable and
    /// are left out.
    pub fn nodes(&self) -> Vec<CategoryNode> {
        let mut seen = HashSet::new();
        self.roots
            .iter()
            .filter_map(|&id| self.node(id, &mut seen))
            .collect()
    }

    fn node(&self, id: CategoryId, seen: &mut HashSet<CategoryId>) -> Option<CategoryNode> {
        if !seen.insert(id) {
            return None;
        }
        let category = self.nodes.get(&id)?;
        let children = self
            .children
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&child| self.node(child, seen))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Some(CategoryNode {
            id,
            name: category.name.clone(),
            full_path: self.full_path(id).unwrap_or_else(|| category.name.clone()),
            children,
        })
    }
}
