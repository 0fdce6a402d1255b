use chainreach::chain::{concatenate, fast, optimal};
use chainreach::graph::edge_list;
use chainreach::{Dag, IndexingScheme, OnlineSearch, ReachMatrix, Reachability, Strategy};

const SCENARIO: &str = "0,1\n1,2\n0,2\n3,1\n2,4\n2,5\n6\n";

#[test]
fn scenario_from_edge_list() {
    let list = edge_list::parse(SCENARIO).unwrap();
    assert_eq!(list.vertex_count(), 7);
    assert_eq!(list.edge_count(), 6);

    let mut dag = list.to_dag().unwrap();
    assert!(dag.is_acyclic());
    let g = dag.ranked().unwrap();
    assert_eq!(g.order(), &[0, 3, 6, 1, 2, 4, 5]);
    for (u, v) in g.edges() {
        assert!(u < v);
    }

    let d = optimal(&g).unwrap();
    assert_eq!(d.len(), 3);
    d.validate(&g, &ReachMatrix::new(&g)).unwrap();

    let rank = |v: usize| g.rank(v).unwrap();
    let index = IndexingScheme::build(&g, &d).unwrap();
    assert!(index.is_reachable(rank(0), rank(5)));
    assert!(!index.is_reachable(rank(6), rank(0)));
    assert!(index.is_reachable(rank(3), rank(4)));
    assert!(!index.is_reachable(rank(4), rank(5)));
}

#[test]
fn scenario_width_is_three() {
    // {0, 3, 6} is an antichain, so no two chains can cover the graph.
    let mut dag = Dag::from_edges(7, &[(0, 1), (1, 2), (0, 2), (3, 1), (2, 4), (2, 5)]).unwrap();
    let g = dag.ranked().unwrap();
    let matrix = ReachMatrix::new(&g);
    let antichain = [0, 3, 6].map(|v| g.rank(v).unwrap());
    for &a in &antichain {
        for &b in &antichain {
            assert!(a == b || !matrix.is_reachable(a, b));
        }
    }
    for strategy in Strategy::ALL {
        let d = strategy.decompose(&g).unwrap();
        d.validate(&g, &matrix).unwrap();
        assert!(d.len() >= 3, "{strategy} produced {} chains", d.len());
    }
}

#[test]
fn scenario_transitive_edge() {
    let mut dag = Dag::from_edges(7, &[(0, 1), (1, 2), (0, 2), (3, 1), (2, 4), (2, 5)]).unwrap();
    let g = dag.ranked().unwrap();
    let (_, transitive) = IndexingScheme::build_with_transitive_edges(&g, &fast(&g)).unwrap();
    let edges: Vec<(usize, usize)> = transitive
        .into_iter()
        .map(|(s, t)| (g.vertex(s), g.vertex(t)))
        .collect();
    assert_eq!(edges, vec![(0, 2)]);
}

#[test]
fn concatenated_fast_decomposition_indexes_correctly() {
    let mut dag = Dag::from_edges(
        9,
        &[(0, 2), (1, 2), (2, 3), (2, 4), (4, 5), (3, 6), (7, 8), (8, 6), (1, 7)],
    )
    .unwrap();
    let g = dag.ranked().unwrap();
    let mut d = fast(&g);
    concatenate(&g, &mut d).unwrap();
    let online = OnlineSearch::new(&g);
    d.validate(&g, &online).unwrap();

    let index = IndexingScheme::build(&g, &d).unwrap();
    for s in 0..9 {
        assert_eq!(index.successors(s), online.successors(s));
    }
}

#[test]
fn cycle_is_rejected_before_decomposition() {
    let mut dag = Dag::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
    assert_eq!(dag.ranked().unwrap_err(), chainreach::ChainError::Cyclic);
}
