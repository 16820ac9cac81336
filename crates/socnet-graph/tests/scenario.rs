//! End-to-end run over the five-actor sample network.

use socnet_graph::{
    AttributeHeuristic, AttributeSimilarity, CsvOptions, ExportOptions, GraphLoader, astar,
    astar_path, bfs, connected_components, degree_centrality, dfs, dijkstra, from_csv_str,
    read_csv_with_stats, sample_graph, shortest_path, to_csv_string, top_k_degree_centrality,
    validate_graph, welsh_powell,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_sample_edge_weights_follow_insertion_order() {
    let graph = sample_graph().unwrap();
    let weights: Vec<(u64, u64, f64)> = graph.undirected_edges();

    let expected = [
        (1, 2, 0.03840245775729647),
        (1, 3, 0.09082652134423251),
        (2, 3, 0.1996007984031936),
        (3, 4, 0.02436647173489279),
        (4, 5, 0.006832467887400929),
    ];
    assert_eq!(weights.len(), expected.len());
    for ((a, b, w), (ea, eb, ew)) in weights.into_iter().zip(expected) {
        assert_eq!((a, b), (ea, eb));
        assert_close(w, ew);
    }
}

#[test]
fn test_traversals() {
    let graph = sample_graph().unwrap();
    assert_eq!(bfs(&graph, 1).unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(dfs(&graph, 1).unwrap(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_single_component() {
    let graph = sample_graph().unwrap();
    assert_eq!(connected_components(&graph), vec![vec![1, 2, 3, 4, 5]]);
}

#[test]
fn test_dijkstra_from_first_actor() {
    let graph = sample_graph().unwrap();
    let paths = dijkstra(&graph, 1).unwrap();

    assert_eq!(paths.distance(1), Some(0.0));
    assert_close(paths.raw_distance(2), 0.03840245775729647);
    assert_close(paths.raw_distance(3), 0.09082652134423251);
    assert_close(paths.raw_distance(4), 0.1151929930791253);
    assert_close(paths.raw_distance(5), 0.12202546096652622);

    assert_eq!(paths.predecessor(2), Some(1));
    assert_eq!(paths.predecessor(3), Some(1));
    assert_eq!(paths.predecessor(4), Some(3));
    assert_eq!(paths.predecessor(5), Some(4));
    assert_eq!(paths.path_to(5), vec![1, 3, 4, 5]);
}

#[test]
fn test_astar_agrees_with_dijkstra() {
    let graph = sample_graph().unwrap();
    let full = dijkstra(&graph, 1).unwrap();
    let targeted = astar(&graph, 1, 5).unwrap();

    assert_eq!(targeted.path_to(5), full.path_to(5));
    assert_close(targeted.raw_distance(5), full.raw_distance(5));

    let result = shortest_path(&graph, 1, 5).unwrap();
    assert_eq!(result.path, vec![1, 3, 4, 5]);
    assert_eq!(result.visited_order.last(), Some(&5));
}

#[test]
fn test_attribute_heuristic_reaches_goal() {
    let graph = sample_graph().unwrap();
    let h = AttributeHeuristic::new(&graph, 5).unwrap();
    let result = astar_path(&graph, 1, 5, &h).unwrap();

    assert!(result.is_reachable());
    assert_eq!(result.path.first(), Some(&1));
    assert_eq!(result.path.last(), Some(&5));
}

#[test]
fn test_centrality_ranking() {
    let graph = sample_graph().unwrap();
    let rows = degree_centrality(&graph);
    let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();

    assert_eq!(ids, vec![3, 1, 2, 4, 5]);
    assert_eq!(rows[0].name, "Mehmet");
    assert_close(rows[0].centrality, 0.75);
    assert_close(rows[1].centrality, 0.5);
    assert_close(rows[4].centrality, 0.25);

    let top = top_k_degree_centrality(&graph, 1);
    assert_eq!(top.len(), 1);
    assert_eq!((top[0].id, top[0].degree), (3, 3));
}

#[test]
fn test_coloring() {
    let graph = sample_graph().unwrap();
    let coloring = welsh_powell(&graph, None).unwrap();

    let rows: Vec<(u64, u32, usize)> = coloring
        .rows
        .iter()
        .map(|r| (r.id, r.color, r.degree))
        .collect();
    assert_eq!(
        rows,
        vec![(3, 1, 3), (5, 1, 1), (1, 2, 2), (4, 2, 2), (2, 3, 2)]
    );

    let three = coloring.color_of(3);
    for other in [1, 2, 4] {
        assert_ne!(coloring.color_of(other), three);
    }
    assert!(coloring.is_proper(&graph));
}

#[test]
fn test_csv_round_trip_preserves_weights() {
    let graph = sample_graph().unwrap();
    let csv = to_csv_string(&graph, ExportOptions::default()).unwrap();
    assert!(csv.starts_with("DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular,Agirliklar,Isim\n"));
    assert!(csv.contains("\n3,0.7,9,3,\"1,2,4\","));

    let reloaded = from_csv_str(&csv, &AttributeSimilarity, CsvOptions::default()).unwrap();
    assert_eq!(reloaded.adjacency_list(), graph.adjacency_list());
    assert_eq!(reloaded.node(1).unwrap().name, "Ayşe");
    for ((a, b, w), (_, _, rw)) in graph
        .undirected_edges()
        .into_iter()
        .zip(reloaded.undirected_edges())
    {
        assert_close(rw, w);
        assert!(a < b);
    }
    assert!(validate_graph(&reloaded).valid);
}

#[test]
fn test_import_skips_unknown_neighbors() {
    let data = "DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n\
                1,0.8,12,0,\"2,9\"\n\
                2,0.6,7,0,1\n";
    let (graph, stats) =
        read_csv_with_stats(data.as_bytes(), &AttributeSimilarity, CsvOptions::default())
            .unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(stats.skipped_refs, vec![(1, 9)]);
}

#[test]
fn test_loader_initialises_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let loader = GraphLoader::new(dir.path().join("graph.csv"), AttributeSimilarity);

    let created = loader.load_or_init(sample_graph).unwrap();
    let reloaded = loader.load_or_init(sample_graph).unwrap();

    assert_eq!(reloaded.adjacency_list(), created.adjacency_list());
    for node in created.nodes() {
        assert_eq!(reloaded.node(node.id).unwrap().name, node.name);
    }
    assert_eq!(
        dijkstra(&reloaded, 1).unwrap().path_to(5),
        vec![1, 3, 4, 5]
    );
}
