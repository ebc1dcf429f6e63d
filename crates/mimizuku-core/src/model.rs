//! Identifier space and symbol table.

use rustc_hash::FxHashMap;

/// Integer identifier for a named concept (class).
pub type ConceptId = u32;

/// Integer identifier for an object property (role).
pub type RoleId = u32;

/// The universal concept, owl:Thing.
pub const TOP: ConceptId = 0;

/// The unsatisfiable concept, owl:Nothing.
pub const BOTTOM: ConceptId = 1;

/// A role paired with its filler concept. Represents `∃role.fill`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleFiller {
    pub role: RoleId,
    pub fill: ConceptId,
}

/// Maps concept and role names to dense integer IDs for the reasoner's
/// inner loop, and back again for output.
///
/// `TOP` and `BOTTOM` are pre-interned at IDs 0 and 1; every other concept
/// gets IDs from 2 upward in interning order. Normalization may append
/// anonymous concepts with no name; those report `is_named() == false`.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    concept_to_id: FxHashMap<String, ConceptId>,
    id_to_concept: Vec<String>,
    role_to_id: FxHashMap<String, RoleId>,
    id_to_role: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut st = Self {
            concept_to_id: FxHashMap::default(),
            id_to_concept: Vec::new(),
            role_to_id: FxHashMap::default(),
            id_to_role: Vec::new(),
        };
        st.intern_concept("owl:Thing");
        st.intern_concept("owl:Nothing");
        st
    }

    /// Returns the ID for the given concept name, creating one if needed.
    pub fn intern_concept(&mut self, name: &str) -> ConceptId {
        if let Some(&id) = self.concept_to_id.get(name) {
            return id;
        }
        let id = self.id_to_concept.len() as ConceptId;
        self.concept_to_id.insert(name.to_string(), id);
        self.id_to_concept.push(name.to_string());
        id
    }

    /// Returns the ID for the given role name, creating one if needed.
    pub fn intern_role(&mut self, name: &str) -> RoleId {
        if let Some(&id) = self.role_to_id.get(name) {
            return id;
        }
        let id = self.id_to_role.len() as RoleId;
        self.role_to_id.insert(name.to_string(), id);
        self.id_to_role.push(name.to_string());
        id
    }

    /// Creates a new anonymous concept with no name.
    pub fn fresh_concept(&mut self) -> ConceptId {
        let id = self.id_to_concept.len() as ConceptId;
        self.id_to_concept.push(String::new());
        id
    }

    pub fn concept_count(&self) -> usize {
        self.id_to_concept.len()
    }

    pub fn role_count(&self) -> usize {
        self.id_to_role.len()
    }

    /// Name for a concept ID, or `None` if the ID is out of range.
    /// Anonymous concepts return an empty name.
    pub fn concept_name(&self, id: ConceptId) -> Option<&str> {
        self.id_to_concept.get(id as usize).map(String::as_str)
    }

    pub fn role_name(&self, id: RoleId) -> Option<&str> {
        self.id_to_role.get(id as usize).map(String::as_str)
    }

    /// Whether the ID refers to a named (non-anonymous) concept.
    pub fn is_named(&self, id: ConceptId) -> bool {
        self.concept_name(id).is_some_and(|n| !n.is_empty())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
