use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A node in a section's category tree.
///
/// The catalog returns categories as a flat list where each item names its
/// parent; [`reorganize_categories`] turns that list into a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(rename = "parentGameCategoryId", default)]
    pub parent_id: i32,
    #[serde(rename = "rootGameCategoryId", default)]
    pub root_id: i32,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl Category {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: String::new(),
            avatar_url: String::new(),
            parent_id: 0,
            root_id: 0,
            subcategories: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: i32) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_child(mut self, child: Category) -> Self {
        self.subcategories.push(child);
        self
    }
}

/// One row of a flattened category list: a category id and how deep it
/// sits in the tree. Id 0 is the "no filter" row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndentedCategory {
    pub indent: usize,
    pub category_id: i32,
}

impl IndentedCategory {
    pub const NONE: IndentedCategory = IndentedCategory {
        indent: 0,
        category_id: 0,
    };

    pub fn new(indent: usize, category_id: i32) -> Self {
        Self {
            indent,
            category_id,
        }
    }

    pub fn is_none(&self) -> bool {
        self.category_id == 0
    }
}

/// Flatten a category forest into selection rows.
///
/// The result starts with the "no filter" row `(0, 0)`, followed by a
/// depth-first pre-order walk of every tree. Top-level categories have
/// indent 0 and each nesting level adds one.
pub fn flatten_categories(forest: &[Category]) -> Vec<IndentedCategory> {
    let mut result = vec![IndentedCategory::NONE];
    for category in forest {
        push_category(category, 0, &mut result);
    }
    result
}

fn push_category(category: &Category, indent: usize, out: &mut Vec<IndentedCategory>) {
    out.push(IndentedCategory::new(indent, category.id));
    for sub in &category.subcategories {
        push_category(sub, indent + 1, out);
    }
}

/// Build a forest from the catalog's flat category list.
///
/// Categories whose parent is `root_id` (the section id) become top-level
/// entries. The rest are attached under their parent; categories whose
/// parent is missing from the list are dropped. Input order is kept at
/// every level.
pub fn reorganize_categories(categories: Vec<Category>, root_id: i32) -> Vec<Category> {
    let known: HashMap<i32, i32> = categories.iter().map(|c| (c.id, c.parent_id)).collect();

    let mut children: HashMap<i32, Vec<Category>> = HashMap::new();
    let mut roots = Vec::new();
    for category in categories {
        if category.parent_id == root_id {
            roots.push(category);
        } else if known.contains_key(&category.parent_id) && category.parent_id != category.id {
            children.entry(category.parent_id).or_default().push(category);
        }
    }

    for root in &mut roots {
        attach_children(root, &mut children);
    }
    roots
}

fn attach_children(node: &mut Category, children: &mut HashMap<i32, Vec<Category>>) {
    if let Some(mut kids) = children.remove(&node.id) {
        for kid in &mut kids {
            attach_children(kid, children);
        }
        node.subcategories.extend(kids);
    }
}

/// Look up a category name anywhere in a forest.
pub fn find_category<'a>(forest: &'a [Category], id: i32) -> Option<&'a Category> {
    for category in forest {
        if category.id == id {
            return Some(category);
        }
        if let Some(found) = find_category(&category.subcategories, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/category_tests.rs"]
mod tests;
