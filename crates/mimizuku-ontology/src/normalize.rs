//! Translation of a parsed document into the reasoner's normal forms.

use crate::model::{IntersectionPart, OntologyDocument};
use mimizuku_core::{AxiomStore, ConceptId, StoreError, SymbolTable};

/// Converts a parsed ontology into a symbol table and an axiom store
/// ready for saturation.
///
/// The first pass interns every concept and role so the store can be
/// allocated at its final named size; the second pass installs axioms.
/// Obsolete terms are skipped entirely.
///
/// Mapping: `is_a` becomes NF1, any other relationship NF3. An
/// `intersection_of` definition `C ≡ A₁ ⊓ A₂ ⊓ ∃r.B ⊓ …` already has its
/// forward direction covered by the term's is_a/relationship lines; this
/// adds the reverse GCI conjunction (see [`normalize_intersection`]).
pub fn normalize(doc: &OntologyDocument) -> Result<(SymbolTable, AxiomStore), StoreError> {
    let mut symbols = SymbolTable::new();

    for term in &doc.terms {
        if term.is_obsolete {
            continue;
        }
        symbols.intern_concept(&term.id);
        for rel in &term.relationships {
            if !rel.is_subsumption() {
                symbols.intern_role(&rel.rel_type);
            }
            symbols.intern_concept(&rel.target_id);
        }
        for part in &term.intersection_of {
            if let Some(rel) = &part.relationship {
                symbols.intern_role(rel);
            }
            symbols.intern_concept(&part.target_id);
        }
    }
    for td in &doc.typedefs {
        symbols.intern_role(&td.id);
    }

    let mut store = AxiomStore::new(symbols.concept_count(), symbols.role_count());

    for term in &doc.terms {
        if term.is_obsolete {
            continue;
        }
        let cid = symbols.intern_concept(&term.id);

        for rel in &term.relationships {
            let target = symbols.intern_concept(&rel.target_id);
            if rel.is_subsumption() {
                store.add_subsumption(cid, target)?;
            } else {
                let rid = symbols.intern_role(&rel.rel_type);
                store.add_exist_right(cid, rid, target)?;
            }
        }

        if !term.intersection_of.is_empty() {
            normalize_intersection(&mut symbols, &mut store, cid, &term.intersection_of)?;
        }
    }

    tracing::debug!(
        concepts = symbols.concept_count(),
        roles = symbols.role_count(),
        "normalized ontology"
    );

    Ok((symbols, store))
}

/// Installs the reverse direction of an intersection definition:
/// `conjunct₁ ⊓ conjunct₂ ⊓ … ⊑ C`.
///
/// A genus conjunct contributes its concept directly. A differentia
/// `∃r.F` gets a fresh concept X bridged by NF4 `∃r.F ⊑ X`. Conjunctions
/// are decomposed into a left-leaning binary tree with fresh concepts for
/// the intermediate nodes: `((c₀ ⊓ c₁) ⊓ c₂) ⊓ … ⊑ C`.
fn normalize_intersection(
    symbols: &mut SymbolTable,
    store: &mut AxiomStore,
    cid: ConceptId,
    parts: &[IntersectionPart],
) -> Result<(), StoreError> {
    let mut conjuncts: Vec<ConceptId> = Vec::with_capacity(parts.len());

    for part in parts {
        match &part.relationship {
            None => conjuncts.push(symbols.intern_concept(&part.target_id)),
            Some(rel) => {
                let rid = symbols.intern_role(rel);
                let fill = symbols.intern_concept(&part.target_id);
                let fresh = symbols.fresh_concept();
                store.grow(symbols.concept_count());
                store.add_exist_left(rid, fill, fresh)?;
                conjuncts.push(fresh);
            }
        }
    }

    match conjuncts.as_slice() {
        [] => Ok(()),
        [single] => store.add_subsumption(*single, cid),
        _ => {
            let mut acc = conjuncts[0];
            for i in 1..conjuncts.len() {
                let result = if i == conjuncts.len() - 1 {
                    cid
                } else {
                    let fresh = symbols.fresh_concept();
                    store.grow(symbols.concept_count());
                    fresh
                };
                store.add_conjunction(acc, conjuncts[i], result)?;
                acc = result;
            }
            Ok(())
        }
    }
}
