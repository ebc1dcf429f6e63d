//! Parsed ontology document model.

use serde::{Deserialize, Serialize};

/// A parsed ontology, independent of the input syntax.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyDocument {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub format_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub terms: Vec<Term>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub typedefs: Vec<TypeDef>,
}

/// A single ontology term (class).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_obsolete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub synonyms: Vec<Synonym>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub xrefs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub alt_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub subsets: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relationships: Vec<Relationship>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub intersection_of: Vec<IntersectionPart>,
}

/// An object property declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeDef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

/// A typed relationship to another term. `is_a` marks plain subsumption;
/// any other type is an existential restriction over that role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

/// One conjunct of an `intersection_of` definition. With no relationship
/// it is a genus (plain class); otherwise a differentia `∃rel.target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionPart {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub relationship: Option<String>,
    pub target_id: String,
}

/// A term synonym with its scope (EXACT, BROAD, NARROW, RELATED).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    pub text: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub xrefs: Vec<String>,
}

pub const IS_A: &str = "is_a";

impl Relationship {
    pub fn is_a(target_id: impl Into<String>) -> Self {
        Self {
            rel_type: IS_A.to_string(),
            target_id: target_id.into(),
            name: None,
        }
    }

    /// Whether this is plain subsumption rather than an existential.
    pub fn is_subsumption(&self) -> bool {
        self.rel_type == IS_A
    }
}
