use lectern_graph::ConceptGraph;
use proptest::prelude::*;

fn arb_edges() -> impl Strategy<Value = Vec<(u8, u8, u8)>> {
    prop::collection::vec((0u8..12, 0u8..12, 0u8..4), 0..60)
}

fn graph_from(edges: &[(u8, u8, u8)]) -> ConceptGraph {
    let mut g = ConceptGraph::new();
    for (h, t, r) in edges {
        g.add_relation(&format!("e{h}"), &format!("e{t}"), &format!("r{r}"), "prop");
    }
    g
}

proptest! {
    #[test]
    fn paths_never_exceed_max_hops(edges in arb_edges(), start in 0u8..12, max_hops in 0usize..4) {
        let g = graph_from(&edges);
        for hit in g.neighbors_within_hops(&format!("e{start}"), max_hops) {
            prop_assert!(hit.hops <= max_hops);
            prop_assert_eq!(hit.path.len(), hit.hops + 1);
            prop_assert_eq!(hit.relations.len(), hit.hops);
        }
    }
}

proptest! {
    #[test]
    fn hits_are_hop_sorted_capped_and_exclude_start(edges in arb_edges(), start in 0u8..12) {
        let g = graph_from(&edges);
        let origin = format!("e{start}");
        let hits = g.neighbors_within_hops(&origin, 3);
        prop_assert!(hits.len() <= 10);
        prop_assert!(hits.windows(2).all(|w| w[0].hops <= w[1].hops));
        for hit in &hits {
            prop_assert_ne!(&hit.entity, &origin);
            prop_assert_eq!(hit.path.first(), Some(&origin));
            prop_assert_eq!(hit.path.last(), Some(&hit.entity));
        }
    }
}

proptest! {
    #[test]
    fn every_path_step_is_a_real_edge(edges in arb_edges(), start in 0u8..12) {
        let g = graph_from(&edges);
        for hit in g.neighbors_within_hops(&format!("e{start}"), 2) {
            for (i, pair) in hit.path.windows(2).enumerate() {
                let edge = g.relation(&pair[0], &pair[1]);
                prop_assert!(edge.is_some());
                prop_assert_eq!(&edge.map(|e| e.label.clone()).unwrap_or_default(), &hit.relations[i]);
            }
        }
    }
}
