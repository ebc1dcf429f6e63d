//! Fixed-point saturation over per-concept contexts.
//!
//! 完備化規則 CR1〜CR5 を両ワークリストが空になるまで適用します。

use crate::context::{install_link, Context, LinkVec};
use mimizuku_core::{AxiomStore, ConceptId, RoleId, BOTTOM, TOP};

/// A pending inference: `added` was just inserted into S(`concept`).
#[derive(Clone, Copy, Debug)]
struct SuperTrigger {
    concept: ConceptId,
    added: ConceptId,
}

/// A pending link: (`source`, `target`) was just inserted into R(`role`).
#[derive(Clone, Copy, Debug)]
struct LinkTrigger {
    source: ConceptId,
    role: RoleId,
    target: ConceptId,
}

/// Runs the single-threaded EL saturation algorithm to its least fixed
/// point and returns the frozen contexts.
///
/// Every context starts with S(C) = {C, ⊤}. The two worklists are drained
/// alternately: CR3 can inject link triggers while super triggers remain,
/// and CR4 can inject super triggers while link triggers remain, so the
/// outer loop runs until both are empty at once. Each enqueue is guarded
/// by an idempotent set insertion, which bounds the total work and
/// guarantees termination.
pub fn saturate(store: &AxiomStore, num_concepts: usize, num_roles: usize) -> Vec<Context> {
    let mut contexts: Vec<Context> = (0..num_concepts)
        .map(|i| Context::new(i as ConceptId, num_roles))
        .collect();

    // Super worklist feeds CR1, CR2, CR3 and the backward existential rule.
    let mut super_work: Vec<SuperTrigger> = Vec::with_capacity(num_concepts * 2);

    // Link worklist feeds the forward existential rule and CR5.
    let mut link_work: Vec<LinkTrigger> = Vec::with_capacity(num_concepts);

    for c in 0..num_concepts as ConceptId {
        let ctx = &mut contexts[c as usize];
        ctx.add_super(c);
        ctx.add_super(TOP);
        super_work.push(SuperTrigger { concept: c, added: c });
        super_work.push(SuperTrigger { concept: c, added: TOP });
    }

    // Snapshot buffer for S(D) while mutating S(C); C and D may coincide.
    let mut supers_scratch: Vec<ConceptId> = Vec::new();

    while !super_work.is_empty() || !link_work.is_empty() {
        while let Some(SuperTrigger { concept: c, added: d }) = super_work.pop() {
            let c_idx = c as usize;

            // CR1: D ∈ S(C), D ⊑ E  ⟹  E ∈ S(C).
            for &e in store.sub_sups(d) {
                if contexts[c_idx].add_super(e) {
                    super_work.push(SuperTrigger { concept: c, added: e });
                }
            }

            // CR2: D ∈ S(C), D₂ ∈ S(C), D ⊓ D₂ ⊑ E  ⟹  E ∈ S(C).
            // The index is symmetric, so firing on either conjunct suffices.
            if let Some(partners) = store.conj_partners(d) {
                for (&d2, results) in partners {
                    if contexts[c_idx].has_super(d2) {
                        for &e in results {
                            if contexts[c_idx].add_super(e) {
                                super_work.push(SuperTrigger { concept: c, added: e });
                            }
                        }
                    }
                }
            }

            // CR3: D ∈ S(C), D ⊑ ∃R.B  ⟹  (C, B) ∈ R(R).
            for &rf in store.exist_rights(d) {
                if install_link(&mut contexts, c, rf.fill, rf.role) {
                    link_work.push(LinkTrigger {
                        source: c,
                        role: rf.role,
                        target: rf.fill,
                    });
                }
            }

            // CR4 backward: D ∈ S(C), (E, C) ∈ R(R), ∃R.D ⊑ F  ⟹  F ∈ S(E).
            for r in 0..num_roles as RoleId {
                let sups = store.exist_lefts(r, d);
                if sups.is_empty() || contexts[c_idx].preds(r).is_empty() {
                    continue;
                }
                let preds: LinkVec = contexts[c_idx].pred_map[r as usize].clone();
                for &pred in &preds {
                    for &f in sups {
                        if contexts[pred as usize].add_super(f) {
                            super_work.push(SuperTrigger { concept: pred, added: f });
                        }
                    }
                }
            }

            // CR5 backward: ⊥ ∈ S(C), (E, C) ∈ R(R)  ⟹  ⊥ ∈ S(E).
            // The link-triggered direction below misses links processed
            // before ⊥ reached S(C).
            if d == BOTTOM {
                for r in 0..num_roles {
                    let preds: LinkVec = contexts[c_idx].pred_map[r].clone();
                    for &pred in &preds {
                        if contexts[pred as usize].add_super(BOTTOM) {
                            super_work.push(SuperTrigger {
                                concept: pred,
                                added: BOTTOM,
                            });
                        }
                    }
                }
            }
        }

        while let Some(LinkTrigger {
            source: c,
            role: r,
            target: d,
        }) = link_work.pop()
        {
            let c_idx = c as usize;
            let d_idx = d as usize;

            // CR4 forward: (C, D) ∈ R(R), E ∈ S(D), ∃R.E ⊑ F  ⟹  F ∈ S(C).
            if store.has_exist_lefts(r) {
                supers_scratch.clear();
                supers_scratch.extend(contexts[d_idx].super_set.iter().copied());
                for &e in &supers_scratch {
                    for &f in store.exist_lefts(r, e) {
                        if contexts[c_idx].add_super(f) {
                            super_work.push(SuperTrigger { concept: c, added: f });
                        }
                    }
                }
            }

            // CR5: (C, D) ∈ R(R), ⊥ ∈ S(D)  ⟹  ⊥ ∈ S(C).
            if contexts[d_idx].has_super(BOTTOM) && contexts[c_idx].add_super(BOTTOM) {
                super_work.push(SuperTrigger {
                    concept: c,
                    added: BOTTOM,
                });
            }
        }
    }

    tracing::debug!(
        concepts = num_concepts,
        roles = num_roles,
        "saturation reached fixed point"
    );

    contexts
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimizuku_core::AxiomStore;

    // Concept ids: 0 = TOP, 1 = BOTTOM, named concepts from 2.
    const A: ConceptId = 2;
    const B: ConceptId = 3;
    const C: ConceptId = 4;
    const D: ConceptId = 5;

    #[test]
    fn every_context_contains_self_and_top() {
        let store = AxiomStore::new(6, 0);
        let contexts = saturate(&store, 6, 0);
        for ctx in &contexts {
            assert!(ctx.has_super(ctx.id()));
            assert!(ctx.has_super(TOP));
            assert_eq!(ctx.super_count(), if ctx.id() == TOP { 1 } else { 2 });
        }
    }

    #[test]
    fn named_subsumptions_chain() {
        let mut store = AxiomStore::new(6, 0);
        store.add_subsumption(A, B).unwrap();
        store.add_subsumption(B, C).unwrap();
        store.add_subsumption(C, D).unwrap();
        let contexts = saturate(&store, 6, 0);
        for sup in [A, TOP, B, C, D] {
            assert!(contexts[A as usize].has_super(sup));
        }
        assert!(!contexts[D as usize].has_super(A));
    }

    #[test]
    fn conjunction_fires_when_both_sides_present() {
        let mut store = AxiomStore::new(6, 0);
        store.add_subsumption(A, B).unwrap();
        store.add_subsumption(A, C).unwrap();
        store.add_conjunction(B, C, D).unwrap();
        let contexts = saturate(&store, 6, 0);
        assert!(contexts[A as usize].has_super(D));
        assert!(!contexts[B as usize].has_super(D));
    }

    #[test]
    fn conjunction_with_one_side_missing_stays_silent() {
        let mut store = AxiomStore::new(6, 0);
        store.add_subsumption(A, B).unwrap();
        store.add_conjunction(B, C, D).unwrap();
        let contexts = saturate(&store, 6, 0);
        assert!(!contexts[A as usize].has_super(D));
    }

    #[test]
    fn existential_links_are_installed_with_their_transpose() {
        let mut store = AxiomStore::new(6, 1);
        store.add_exist_right(A, 0, B).unwrap();
        let contexts = saturate(&store, 6, 1);
        assert!(contexts[A as usize].has_link(0, B));
        assert_eq!(contexts[B as usize].preds(0), &[A]);
    }

    #[test]
    fn forward_existential_elimination() {
        // A ⊑ ∃r.B, B ⊑ C, ∃r.C ⊑ D  ⟹  D ∈ S(A).
        let mut store = AxiomStore::new(6, 1);
        store.add_exist_right(A, 0, B).unwrap();
        store.add_subsumption(B, C).unwrap();
        store.add_exist_left(0, C, D).unwrap();
        let contexts = saturate(&store, 6, 1);
        assert!(contexts[A as usize].has_super(D));
    }

    #[test]
    fn backward_existential_elimination() {
        // The super E ∈ S(B) arriving after the link (A, B) must still
        // fire: A ⊑ ∃r.B with ∃r.B ⊑ D gives D immediately, and the
        // late B ⊑ C with ∃r.C ⊑ D likewise.
        let mut store = AxiomStore::new(7, 1);
        store.add_exist_right(A, 0, B).unwrap();
        store.add_exist_left(0, B, D).unwrap();
        store.add_subsumption(B, C).unwrap();
        store.add_exist_left(0, C, 6).unwrap();
        let contexts = saturate(&store, 7, 1);
        assert!(contexts[A as usize].has_super(D));
        assert!(contexts[A as usize].has_super(6));
    }

    #[test]
    fn bottom_propagates_over_links() {
        let mut store = AxiomStore::new(6, 1);
        store.add_exist_right(A, 0, B).unwrap();
        store.add_subsumption(B, BOTTOM).unwrap();
        let contexts = saturate(&store, 6, 1);
        assert!(contexts[A as usize].has_super(BOTTOM));
    }

    #[test]
    fn bottom_discovered_after_link_still_reaches_predecessors() {
        // ⊥ enters S(B) only through the forward existential rule during
        // the link drain, after (A, B) may already have been processed.
        let mut store = AxiomStore::new(6, 2);
        store.add_exist_right(A, 0, B).unwrap();
        store.add_exist_right(B, 1, C).unwrap();
        store.add_exist_left(1, C, BOTTOM).unwrap();
        let contexts = saturate(&store, 6, 2);
        assert!(contexts[B as usize].has_super(BOTTOM));
        assert!(contexts[A as usize].has_super(BOTTOM));
    }

    #[test]
    fn unrelated_concepts_stay_unrelated() {
        let mut store = AxiomStore::new(6, 0);
        store.add_subsumption(A, B).unwrap();
        store.add_subsumption(C, D).unwrap();
        let contexts = saturate(&store, 6, 0);
        assert!(!contexts[C as usize].has_super(B));
        assert!(!contexts[A as usize].has_super(D));
    }

    #[test]
    fn subsumption_cycles_terminate() {
        let mut store = AxiomStore::new(6, 0);
        store.add_subsumption(A, B).unwrap();
        store.add_subsumption(B, A).unwrap();
        let contexts = saturate(&store, 6, 0);
        assert!(contexts[A as usize].has_super(B));
        assert!(contexts[B as usize].has_super(A));
    }

    #[test]
    fn existential_cycles_terminate() {
        let mut store = AxiomStore::new(6, 1);
        store.add_exist_right(A, 0, B).unwrap();
        store.add_exist_right(B, 0, A).unwrap();
        store.add_exist_left(0, A, C).unwrap();
        let contexts = saturate(&store, 6, 1);
        assert!(contexts[B as usize].has_super(C));
        assert!(contexts[A as usize].has_link(0, B));
        assert!(contexts[B as usize].has_link(0, A));
    }

    #[test]
    fn duplicate_axioms_cause_no_duplicate_state() {
        let mut store = AxiomStore::new(6, 1);
        for _ in 0..3 {
            store.add_subsumption(A, B).unwrap();
            store.add_exist_right(A, 0, C).unwrap();
        }
        let contexts = saturate(&store, 6, 1);
        assert_eq!(contexts[A as usize].links(0), &[C]);
        assert_eq!(contexts[A as usize].super_count(), 3); // A, TOP, B
    }
}
