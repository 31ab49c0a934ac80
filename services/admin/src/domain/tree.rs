//! Pure tree reconstruction over a flat unit list.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::AcademicUnit;

/// One vertex of a reconstructed unit tree. Depth is 1 at the roots.
#[derive(Debug, Clone, Serialize)]
pub struct UnitNode {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub name: String,
    pub code: String,
    pub depth: u32,
    pub children: Vec<UnitNode>,
}

/// Reconstruct the forest for one school from a flat, non-deleted unit list.
///
/// A unit whose `parent_unit_id` is null or absent from the input is a root;
/// orphans left behind by a non-cascading soft delete therefore surface as
/// roots. Roots keep input order, children keep attachment order, and depth
/// is assigned top-down so the input need not be topologically sorted.
pub fn build_tree(units: &[AcademicUnit]) -> Vec<UnitNode> {
    let ids: HashSet<Uuid> = units.iter().map(|u| u.id).collect();
    let by_id: HashMap<Uuid, &AcademicUnit> = units.iter().map(|u| (u.id, u)).collect();

    let mut roots: Vec<Uuid> = Vec::new();
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for unit in units {
        match unit.parent_unit_id {
            Some(parent_id) if parent_id != unit.id && ids.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(unit.id);
            }
            _ => roots.push(unit.id),
        }
    }

    roots
        .iter()
        .map(|id| make_node(*id, 1, &by_id, &children))
        .collect()
}

fn make_node(
    id: Uuid,
    depth: u32,
    by_id: &HashMap<Uuid, &AcademicUnit>,
    children: &HashMap<Uuid, Vec<Uuid>>,
) -> UnitNode {
    let unit = by_id[&id];
    let child_nodes = children
        .get(&id)
        .map(|ids| {
            ids.iter()
                .map(|child| make_node(*child, depth + 1, by_id, children))
                .collect()
        })
        .unwrap_or_default();
    UnitNode {
        id: unit.id,
        unit_type: unit.unit_type.clone(),
        name: unit.name.clone(),
        code: unit.code.clone(),
        depth,
        children: child_nodes,
    }
}
