//! Per-concept saturation state.

use mimizuku_core::{ConceptId, RoleId};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Concepts linked under one role. Most concepts have a handful of links
/// per role, so the first few live inline.
pub type LinkVec = SmallVec<[ConceptId; 4]>;

/// Holds everything derived about a single concept during saturation:
/// its super-concepts and its outgoing/incoming role links.
#[derive(Debug, Clone)]
pub struct Context {
    pub(crate) id: ConceptId,

    /// S(C): 導出された上位概念の集合。
    pub(crate) super_set: FxHashSet<ConceptId>,

    /// link_map[r] = all D with the derived link (C, D) ∈ R(r).
    pub(crate) link_map: Vec<LinkVec>,

    /// pred_map[r] = all E with the derived link (E, C) ∈ R(r).
    /// Transpose of `link_map` across all contexts.
    pub(crate) pred_map: Vec<LinkVec>,
}

impl Context {
    pub(crate) fn new(id: ConceptId, num_roles: usize) -> Self {
        Self {
            id,
            super_set: FxHashSet::default(),
            link_map: vec![LinkVec::new(); num_roles],
            pred_map: vec![LinkVec::new(); num_roles],
        }
    }

    pub fn id(&self) -> ConceptId {
        self.id
    }

    /// Whether `d` has been derived as a super-concept.
    pub fn has_super(&self, d: ConceptId) -> bool {
        self.super_set.contains(&d)
    }

    /// Idempotent insertion into S(C). Returns whether it was new.
    pub(crate) fn add_super(&mut self, d: ConceptId) -> bool {
        self.super_set.insert(d)
    }

    /// Whether the link (C, d) ∈ R(r) has been derived.
    pub fn has_link(&self, role: RoleId, d: ConceptId) -> bool {
        self.link_map
            .get(role as usize)
            .is_some_and(|v| v.contains(&d))
    }

    /// Lazy view of S(C).
    pub fn super_set(&self) -> impl Iterator<Item = ConceptId> + '_ {
        self.super_set.iter().copied()
    }

    pub fn super_count(&self) -> usize {
        self.super_set.len()
    }

    /// Link targets of C under `role`.
    pub fn links(&self, role: RoleId) -> &[ConceptId] {
        self.link_map.get(role as usize).map_or(&[], |v| v.as_slice())
    }

    /// Link sources pointing at C under `role`.
    pub fn preds(&self, role: RoleId) -> &[ConceptId] {
        self.pred_map.get(role as usize).map_or(&[], |v| v.as_slice())
    }
}

/// Installs the link (source, target) ∈ R(role), updating the forward map
/// of `source` and the reverse map of `target` together. Returns whether
/// the link was new.
pub(crate) fn install_link(
    contexts: &mut [Context],
    source: ConceptId,
    target: ConceptId,
    role: RoleId,
) -> bool {
    if contexts[source as usize].link_map[role as usize].contains(&target) {
        return false;
    }
    contexts[source as usize].link_map[role as usize].push(target);
    contexts[target as usize].pred_map[role as usize].push(source);
    true
}
