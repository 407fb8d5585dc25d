//! Category hierarchy rebuilt from the flat parent-pointer records returned by
//! `GetCategories`.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::normalize::{count_at, i64_at, sequence_at, str_at};

const NAME_COLUMN: usize = 45;
const INDENT_STEP: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub level: u32,
    /// `None` for top-level categories. A record naming itself as parent is
    /// stored without one.
    pub parent_id: Option<i64>,
    /// Child ids in source order.
    pub children: Vec<i64>,
}

impl CategoryRecord {
    /// Reads one `category` mapping. Returns `None` when it has no usable id.
    fn parse(raw: &Value) -> Option<Self> {
        let id = i64_at(raw, &["category_id"])?;
        let parent_id = i64_at(raw, &["category_parent_id"]).filter(|parent| *parent != id);
        Some(Self {
            id,
            name: str_at(raw, &["category_name"]).unwrap_or_default(),
            level: count_at(raw, &["category_level"]).max(1),
            parent_id,
            children: Vec::new(),
        })
    }
}

/// Categories keyed by id, with insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    order: Vec<i64>,
    records: HashMap<i64, CategoryRecord>,
}

impl CategoryTree {
    /// Builds the tree from `category_array.category` of a response.
    #[must_use]
    pub fn from_response(tree: &Value) -> Self {
        let records = sequence_at(tree, &["category_array", "category"])
            .into_iter()
            .filter_map(|raw| {
                let parsed = CategoryRecord::parse(raw);
                if parsed.is_none() {
                    tracing::warn!("skipping category record without a category_id");
                }
                parsed
            })
            .collect();
        Self::from_records(records)
    }

    /// Links parents to children. Any `children` already set on the input
    /// records are discarded.
    #[must_use]
    pub fn from_records(records: Vec<CategoryRecord>) -> Self {
        let mut order = Vec::with_capacity(records.len());
        let mut by_id: HashMap<i64, CategoryRecord> = HashMap::with_capacity(records.len());

        for mut record in records {
            record.children.clear();
            let id = record.id;
            if by_id.insert(id, record).is_some() {
                tracing::warn!(category_id = id, "duplicate category replaced");
            } else {
                order.push(id);
            }
        }

        for id in &order {
            let Some(parent_id) = by_id.get(id).and_then(|record| record.parent_id) else {
                continue;
            };
            match by_id.get_mut(&parent_id) {
                Some(parent) => parent.children.push(*id),
                None => {
                    tracing::warn!(category_id = id, parent_id, "category parent not in batch");
                }
            }
        }

        Self {
            order,
            records: by_id,
        }
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&CategoryRecord> {
        self.records.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in the order they first appeared.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Records without a parent, in source order.
    pub fn top_level(&self) -> impl Iterator<Item = &CategoryRecord> {
        self.iter().filter(|record| record.parent_id.is_none())
    }

    /// Text listing of the hierarchy.
    ///
    /// With a root, renders that category and its descendants depth-first,
    /// one per line, indented by depth below the root. Without one, lists
    /// every top-level category as `"{id:>8}   {name}"`. An unknown root
    /// renders as an empty string.
    #[must_use]
    pub fn render(&self, root: Option<i64>) -> String {
        let mut out = String::new();
        match root {
            Some(root) => {
                let mut visited = HashSet::new();
                self.render_branch(root, 0, &mut visited, &mut out);
            }
            None => {
                for record in self.top_level() {
                    out.push_str(&format!("{:>8}   {}\n", record.id, record.name));
                }
            }
        }
        out
    }

    fn render_branch(&self, id: i64, depth: usize, visited: &mut HashSet<i64>, out: &mut String) {
        if !visited.insert(id) {
            return;
        }
        let Some(record) = self.records.get(&id) else {
            return;
        };
        let indent = INDENT_STEP * depth;
        let width = NAME_COLUMN.saturating_sub(indent);
        out.push_str(&format!(
            "{:indent$}{:<width$.width$}{:>8}\n",
            "", record.name, record.id
        ));
        for child in &record.children {
            self.render_branch(*child, depth + 1, visited, out);
        }
    }
}
