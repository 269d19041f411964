//! Ancestor tree construction

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Breed, Sex};
use crate::purity::PurityGrade;
use crate::repository::{AnimalLookup, BirthLookup};

/// Great-great-grandparents
pub const DEFAULT_MAX_LEVEL: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInfo {
    pub purity: PurityGrade,
    pub breed: Breed,
    pub mother_id: Option<Uuid>,
    pub father_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenealogyNode {
    pub animal_id: Uuid,
    pub code: String,
    pub registration_number: Option<String>,
    pub name: Option<String>,
    pub sex: Sex,
    pub birth: Option<BirthInfo>,
    pub level: u32,
    pub mother: Option<Box<GenealogyNode>>,
    pub father: Option<Box<GenealogyNode>>,
}

impl GenealogyNode {
    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }

    /// Generations present in the tree, counting this node
    pub fn depth(&self) -> u32 {
        let parents = [self.mother.as_deref(), self.father.as_deref()];
        1 + parents
            .into_iter()
            .flatten()
            .map(GenealogyNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn ancestor_count(&self) -> usize {
        self.iter().count() - 1
    }

    /// Pre-order walk, mother side first, starting with this node
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Every ancestor in pre-order, excluding this node
    pub fn ancestors(&self) -> impl Iterator<Item = &GenealogyNode> {
        self.iter().skip(1)
    }

    pub fn contains(&self, animal_id: Uuid) -> bool {
        self.iter().any(|n| n.animal_id == animal_id)
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a GenealogyNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a GenealogyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(father) = node.father.as_deref() {
            self.stack.push(father);
        }
        if let Some(mother) = node.mother.as_deref() {
            self.stack.push(mother);
        }
        Some(node)
    }
}

/// Build the ancestor tree of `animal_id`, starting at depth `level`.
///
/// Returns `None` when the animal does not exist or `level > max_level`.
/// Ancestors that cannot be resolved become absent subtrees. An animal that
/// reappears on its own ancestor path is treated as unresolved, so cyclic
/// parentage terminates; the same ancestor reached through different paths
/// is kept on each of them.
pub fn build_genealogy_tree<S>(
    store: &S,
    animal_id: Uuid,
    level: u32,
    max_level: u32,
) -> Option<GenealogyNode>
where
    S: AnimalLookup + BirthLookup + ?Sized,
{
    let mut path = HashSet::new();
    build_node(store, animal_id, level, max_level, &mut path)
}

fn build_node<S>(
    store: &S,
    animal_id: Uuid,
    level: u32,
    max_level: u32,
    path: &mut HashSet<Uuid>,
) -> Option<GenealogyNode>
where
    S: AnimalLookup + BirthLookup + ?Sized,
{
    if level > max_level {
        return None;
    }

    if path.contains(&animal_id) {
        tracing::warn!(
            animal_id = %animal_id,
            level,
            "cyclic parentage detected, dropping ancestor subtree"
        );
        return None;
    }

    let animal = store.get_animal_by_id(animal_id)?;
    let birth = store.get_birth_by_animal_id(animal_id);

    // u32::MAX is its own depth bound
    let next_level = level.checked_add(1);

    path.insert(animal_id);
    let mut parent = |id: Option<Uuid>| {
        let next_level = next_level?;
        build_node(store, id?, next_level, max_level, path).map(Box::new)
    };
    let mother = parent(birth.as_ref().and_then(|b| b.mother_id));
    let father = parent(birth.as_ref().and_then(|b| b.father_id));
    path.remove(&animal_id);

    Some(GenealogyNode {
        animal_id: animal.id,
        code: animal.code,
        registration_number: animal.registration_number,
        name: animal.name,
        sex: animal.sex,
        birth: birth.map(|b| BirthInfo {
            purity: b.purity,
            breed: b.breed,
            mother_id: b.mother_id,
            father_id: b.father_id,
        }),
        level,
        mother,
        father,
    })
}
