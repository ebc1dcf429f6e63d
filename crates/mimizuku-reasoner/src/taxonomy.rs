//! Transitive reduction and classified-hierarchy output.

use crate::context::Context;
use mimizuku_core::{ConceptId, SymbolTable, BOTTOM, TOP};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

/// The classified hierarchy after transitive reduction.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    /// direct_parents[c] = the non-redundant super-concepts of c.
    pub direct_parents: Vec<Vec<ConceptId>>,
    /// direct_children[p] = transpose of `direct_parents`.
    pub direct_children: Vec<Vec<ConceptId>>,
}

impl Taxonomy {
    /// Extracts the direct subsumption hierarchy from saturated contexts.
    ///
    /// B is a direct parent of C iff no other derived super-concept of C
    /// also has B among its supers. Concepts whose only super is ⊤ get ⊤
    /// as their direct parent.
    pub fn build(contexts: &[Context], symbols: &SymbolTable) -> Self {
        let n = symbols.concept_count();
        let mut tax = Taxonomy {
            direct_parents: vec![Vec::new(); n],
            direct_children: vec![Vec::new(); n],
        };

        let mut candidates: Vec<ConceptId> = Vec::new();
        for c in 2..n {
            let ctx = &contexts[c];

            candidates.clear();
            let mut has_top = false;
            for s in ctx.super_set() {
                match s {
                    TOP => has_top = true,
                    BOTTOM => {}
                    _ if s as usize == c => {}
                    _ => candidates.push(s),
                }
            }

            let mut direct: Vec<ConceptId> = Vec::with_capacity(4);
            'candidate: for &b in &candidates {
                for &s in &candidates {
                    if s != b && contexts[s as usize].has_super(b) {
                        continue 'candidate;
                    }
                }
                direct.push(b);
            }

            if direct.is_empty() && has_top {
                direct.push(TOP);
            }

            for &p in &direct {
                tax.direct_children[p as usize].push(c as ConceptId);
            }
            tax.direct_parents[c] = direct;
        }

        tax
    }
}

/// Total inferred subsumptions: for every named concept c outside
/// {⊤, ⊥}, the size of S(c) minus the trivial members c and ⊤.
pub fn count_inferred(contexts: &[Context], symbols: &SymbolTable) -> usize {
    (2..symbols.concept_count())
        .filter(|&c| symbols.is_named(c as ConceptId))
        .map(|c| contexts[c].super_count().saturating_sub(2))
        .sum()
}

/// 分類結果 1 概念分。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedConcept {
    pub id: String,
    pub direct_parents: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub direct_children: Vec<String>,
}

/// Timing and size metrics for one classification run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub concept_count: usize,
    pub role_count: usize,
    pub inferred_subsumptions: usize,
    pub parse_time_ms: u64,
    pub normalize_time_ms: u64,
    pub saturate_time_ms: u64,
    pub reduction_time_ms: u64,
    pub total_time_ms: u64,
}

impl ClassificationStats {
    /// Builds the stats block from phase durations. Concept count excludes
    /// ⊤ and ⊥; the inferred count is filled in by [`ClassifiedHierarchy`].
    pub fn new(
        symbols: &SymbolTable,
        parse: Duration,
        normalize: Duration,
        saturate: Duration,
        reduction: Duration,
    ) -> Self {
        let total = parse + normalize + saturate + reduction;
        Self {
            concept_count: symbols.concept_count().saturating_sub(2),
            role_count: symbols.role_count(),
            inferred_subsumptions: 0,
            parse_time_ms: parse.as_millis() as u64,
            normalize_time_ms: normalize.as_millis() as u64,
            saturate_time_ms: saturate.as_millis() as u64,
            reduction_time_ms: reduction.as_millis() as u64,
            total_time_ms: total.as_millis() as u64,
        }
    }
}

/// Top-level JSON output: the named concepts with their direct parents
/// and children, plus run statistics. Anonymous concepts introduced by
/// normalization are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedHierarchy {
    pub concepts: Vec<ClassifiedConcept>,
    pub stats: ClassificationStats,
}

impl ClassifiedHierarchy {
    pub fn new(
        taxonomy: &Taxonomy,
        contexts: &[Context],
        symbols: &SymbolTable,
        mut stats: ClassificationStats,
    ) -> Self {
        stats.inferred_subsumptions = count_inferred(contexts, symbols);

        let mut concepts = Vec::with_capacity(symbols.concept_count());
        for c in 2..symbols.concept_count() as ConceptId {
            let Some(name) = symbols.concept_name(c).filter(|n| !n.is_empty()) else {
                continue;
            };

            let named = |ids: &[ConceptId]| -> Vec<String> {
                ids.iter()
                    .filter_map(|&p| symbols.concept_name(p))
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .collect()
            };

            concepts.push(ClassifiedConcept {
                id: name.to_string(),
                direct_parents: named(&taxonomy.direct_parents[c as usize]),
                direct_children: named(&taxonomy.direct_children[c as usize]),
            });
        }

        Self { concepts, stats }
    }

    /// Writes the hierarchy as JSON.
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saturation::saturate;
    use mimizuku_core::AxiomStore;

    fn symbols_for(names: &[&str]) -> SymbolTable {
        let mut st = SymbolTable::new();
        for n in names {
            st.intern_concept(n);
        }
        st
    }

    #[test]
    fn chain_reduces_to_single_parents() {
        // A ⊑ B ⊑ C: the saturated S(A) holds both, the reduction keeps B.
        let symbols = symbols_for(&["A", "B", "C"]);
        let mut store = AxiomStore::new(5, 0);
        store.add_subsumption(2, 3).unwrap();
        store.add_subsumption(3, 4).unwrap();
        let contexts = saturate(&store, 5, 0);
        let tax = Taxonomy::build(&contexts, &symbols);

        assert_eq!(tax.direct_parents[2], vec![3]);
        assert_eq!(tax.direct_parents[3], vec![4]);
        assert_eq!(tax.direct_parents[4], vec![TOP]);
        assert_eq!(tax.direct_children[3], vec![2]);
        assert_eq!(tax.direct_children[4], vec![3]);
    }

    #[test]
    fn diamond_keeps_both_parents() {
        // A ⊑ B, A ⊑ C, B ⊑ D, C ⊑ D.
        let symbols = symbols_for(&["A", "B", "C", "D"]);
        let mut store = AxiomStore::new(6, 0);
        store.add_subsumption(2, 3).unwrap();
        store.add_subsumption(2, 4).unwrap();
        store.add_subsumption(3, 5).unwrap();
        store.add_subsumption(4, 5).unwrap();
        let contexts = saturate(&store, 6, 0);
        let tax = Taxonomy::build(&contexts, &symbols);

        let mut parents = tax.direct_parents[2].clone();
        parents.sort_unstable();
        assert_eq!(parents, vec![3, 4]);
        assert!(!tax.direct_parents[2].contains(&5));
    }

    #[test]
    fn roots_fall_back_to_top() {
        let symbols = symbols_for(&["A"]);
        let store = AxiomStore::new(3, 0);
        let contexts = saturate(&store, 3, 0);
        let tax = Taxonomy::build(&contexts, &symbols);
        assert_eq!(tax.direct_parents[2], vec![TOP]);
    }

    #[test]
    fn count_skips_anonymous_concepts() {
        let mut symbols = symbols_for(&["A", "B"]);
        let x = symbols.fresh_concept();
        let mut store = AxiomStore::new(5, 0);
        store.add_subsumption(2, 3).unwrap();
        store.add_subsumption(x, 3).unwrap();
        let contexts = saturate(&store, 5, 0);

        // A gains B; the fresh concept's supers are not counted.
        assert_eq!(count_inferred(&contexts, &symbols), 1);
    }

    #[test]
    fn hierarchy_json_omits_anonymous_and_fills_count() {
        let mut symbols = symbols_for(&["A", "B"]);
        let x = symbols.fresh_concept();
        let mut store = AxiomStore::new(5, 0);
        store.add_subsumption(2, 3).unwrap();
        store.add_subsumption(x, 2).unwrap();
        let contexts = saturate(&store, 5, 0);
        let tax = Taxonomy::build(&contexts, &symbols);
        let hierarchy = ClassifiedHierarchy::new(
            &tax,
            &contexts,
            &symbols,
            ClassificationStats::default(),
        );

        assert_eq!(hierarchy.stats.inferred_subsumptions, 1);
        let ids: Vec<&str> = hierarchy.concepts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(hierarchy.concepts[0].direct_parents, vec!["B"]);

        let mut buf = Vec::new();
        hierarchy.write_json(&mut buf, false).unwrap();
        let parsed: ClassifiedHierarchy = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.concepts.len(), 2);
    }
}
