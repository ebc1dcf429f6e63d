//! Indexed axiom storage.

use crate::model::{ConceptId, RoleFiller, RoleId};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by ingest calls referencing unallocated identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("concept id {id} out of range (store holds {limit} concepts)")]
    ConceptOutOfRange { id: ConceptId, limit: usize },

    #[error("role id {id} out of range (store holds {limit} roles)")]
    RoleOutOfRange { id: RoleId, limit: usize },
}

/// Holds normalized axioms indexed for lookup by the saturation rules.
///
/// The four normal forms:
///   NF1: A ⊑ B            (atomic subsumption)
///   NF2: A₁ ⊓ A₂ ⊑ B     (conjunction on the left)
///   NF3: A ⊑ ∃R.B         (existential on the right)
///   NF4: ∃R.A ⊑ B         (existential on the left)
///
/// Each axiom is installed under the key its rule looks up, so a rule
/// firing costs one keyed access plus the matches it yields.
#[derive(Debug, Clone, Default)]
pub struct AxiomStore {
    /// NF1: sub_to_sups[A] = all B with A ⊑ B. Consulted by CR1.
    sub_to_sups: Vec<Vec<ConceptId>>,

    /// NF2: conj_index[A1][A2] = all B with A1 ⊓ A2 ⊑ B. Consulted by CR2.
    /// Installed under both conjuncts so either side can fire the lookup.
    conj_index: Vec<FxHashMap<ConceptId, Vec<ConceptId>>>,

    /// NF3: exist_right[A] = all (R, B) with A ⊑ ∃R.B. Consulted by CR3.
    exist_right: Vec<Vec<RoleFiller>>,

    /// NF4: exist_left[R][A] = all B with ∃R.A ⊑ B. Consulted by CR4.
    exist_left: Vec<FxHashMap<ConceptId, Vec<ConceptId>>>,
}

impl AxiomStore {
    /// Allocates an empty store sized for the given identifier spaces.
    pub fn new(num_concepts: usize, num_roles: usize) -> Self {
        Self {
            sub_to_sups: vec![Vec::new(); num_concepts],
            conj_index: vec![FxHashMap::default(); num_concepts],
            exist_right: vec![Vec::new(); num_concepts],
            exist_left: vec![FxHashMap::default(); num_roles],
        }
    }

    pub fn num_concepts(&self) -> usize {
        self.sub_to_sups.len()
    }

    pub fn num_roles(&self) -> usize {
        self.exist_left.len()
    }

    /// Expands the concept-indexed tables to hold `num_concepts` entries,
    /// so normalization can keep adding axioms after introducing fresh
    /// concepts. Never shrinks.
    pub fn grow(&mut self, num_concepts: usize) {
        if num_concepts > self.sub_to_sups.len() {
            self.sub_to_sups.resize_with(num_concepts, Vec::new);
            self.conj_index.resize_with(num_concepts, FxHashMap::default);
            self.exist_right.resize_with(num_concepts, Vec::new);
        }
    }

    /// Expands the role-indexed table to hold `num_roles` entries.
    pub fn grow_roles(&mut self, num_roles: usize) {
        if num_roles > self.exist_left.len() {
            self.exist_left.resize_with(num_roles, FxHashMap::default);
        }
    }

    fn check_concept(&self, id: ConceptId) -> Result<usize, StoreError> {
        let limit = self.sub_to_sups.len();
        if (id as usize) < limit {
            Ok(id as usize)
        } else {
            Err(StoreError::ConceptOutOfRange { id, limit })
        }
    }

    fn check_role(&self, id: RoleId) -> Result<usize, StoreError> {
        let limit = self.exist_left.len();
        if (id as usize) < limit {
            Ok(id as usize)
        } else {
            Err(StoreError::RoleOutOfRange { id, limit })
        }
    }

    /// Adds NF1: `sub ⊑ sup`.
    pub fn add_subsumption(&mut self, sub: ConceptId, sup: ConceptId) -> Result<(), StoreError> {
        let sub = self.check_concept(sub)?;
        self.check_concept(sup)?;
        self.sub_to_sups[sub].push(sup);
        Ok(())
    }

    /// Adds NF2: `left1 ⊓ left2 ⊑ right`, installed symmetrically.
    pub fn add_conjunction(
        &mut self,
        left1: ConceptId,
        left2: ConceptId,
        right: ConceptId,
    ) -> Result<(), StoreError> {
        let l1 = self.check_concept(left1)?;
        let l2 = self.check_concept(left2)?;
        self.check_concept(right)?;
        self.conj_index[l1].entry(left2).or_default().push(right);
        if left1 != left2 {
            self.conj_index[l2].entry(left1).or_default().push(right);
        }
        Ok(())
    }

    /// Adds NF3: `sub ⊑ ∃role.fill`.
    pub fn add_exist_right(
        &mut self,
        sub: ConceptId,
        role: RoleId,
        fill: ConceptId,
    ) -> Result<(), StoreError> {
        let sub = self.check_concept(sub)?;
        self.check_role(role)?;
        self.check_concept(fill)?;
        self.exist_right[sub].push(RoleFiller { role, fill });
        Ok(())
    }

    /// Adds NF4: `∃role.fill ⊑ sup`.
    pub fn add_exist_left(
        &mut self,
        role: RoleId,
        fill: ConceptId,
        sup: ConceptId,
    ) -> Result<(), StoreError> {
        let role = self.check_role(role)?;
        self.check_concept(fill)?;
        self.check_concept(sup)?;
        self.exist_left[role].entry(fill).or_default().push(sup);
        Ok(())
    }

    /// All B with `concept ⊑ B` asserted. Empty for unknown IDs.
    pub fn sub_sups(&self, concept: ConceptId) -> &[ConceptId] {
        self.sub_to_sups
            .get(concept as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// The conjunction partners of `concept`: for each key D₂, the B with
    /// `concept ⊓ D₂ ⊑ B`. `None` when the concept has no conjunction axioms.
    pub fn conj_partners(
        &self,
        concept: ConceptId,
    ) -> Option<&FxHashMap<ConceptId, Vec<ConceptId>>> {
        self.conj_index
            .get(concept as usize)
            .filter(|m| !m.is_empty())
    }

    /// All `(R, B)` with `concept ⊑ ∃R.B` asserted.
    pub fn exist_rights(&self, concept: ConceptId) -> &[RoleFiller] {
        self.exist_right
            .get(concept as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// All B with `∃role.fill ⊑ B` asserted.
    pub fn exist_lefts(&self, role: RoleId, fill: ConceptId) -> &[ConceptId] {
        self.exist_left
            .get(role as usize)
            .and_then(|m| m.get(&fill))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether any NF4 axiom exists for the role at all. Lets the link
    /// rules skip roles with no existential-left axioms.
    pub fn has_exist_lefts(&self, role: RoleId) -> bool {
        self.exist_left
            .get(role as usize)
            .is_some_and(|m| !m.is_empty())
    }
}
