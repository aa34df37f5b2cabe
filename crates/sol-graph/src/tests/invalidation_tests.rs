//! Cache invalidation: `source_did_change` and `update_definition`.

use std::sync::Arc;
use std::time::Duration;

use super::{Fixture, best, deps, full_definition, id, v};
use crate::{MemorySources, ProjectOptions, ResolveError};

fn chain() -> Fixture {
    Fixture::new(&[
        ("A.sol", "import \"./B.sol\";"),
        ("B.sol", "pragma solidity ^0.8.0;\nimport \"./C.sol\";"),
        ("C.sol", "pragma solidity >=0.7.0;"),
        ("X.sol", "pragma solidity <0.9.0;"),
    ])
}

#[tokio::test]
async fn changed_source_is_the_only_one_reread() {
    let fx = chain();
    fx.project.get_root(&id("A.sol")).await.unwrap();

    fx.project.source_did_change(&id("B.sol"));
    assert!(fx.project.cached_root(&id("A.sol")).is_none());

    fx.project.get_root(&id("A.sol")).await.unwrap();
    assert_eq!(fx.reads("A.sol"), 1);
    assert_eq!(fx.reads("B.sol"), 2);
    assert_eq!(fx.reads("C.sol"), 1);
}

#[tokio::test]
async fn unrelated_roots_stay_cached() {
    let fx = chain();
    fx.project.get_root(&id("A.sol")).await.unwrap();
    let x = fx.project.get_root(&id("X.sol")).await.unwrap();

    fx.project.source_did_change(&id("C.sol"));

    assert!(fx.project.cached_root(&id("A.sol")).is_none());
    let still = fx.project.cached_root(&id("X.sol")).unwrap();
    assert!(Arc::ptr_eq(&x, &still));
}

#[tokio::test]
async fn changed_content_changes_the_answer() {
    let fx = chain();
    let before = fx.project.get_root(&id("A.sol")).await.unwrap();
    assert_eq!(best(&before).as_deref(), Some("0.8.22"));

    fx.sources.set_source("C.sol", "pragma solidity <0.8.19;");
    fx.project.source_did_change(&id("C.sol"));

    let after = fx.project.get_root(&id("A.sol")).await.unwrap();
    assert_eq!(best(&after).as_deref(), Some("0.8.0"));
}

#[tokio::test]
async fn new_imports_are_discovered() {
    let fx = chain();
    fx.project.get_root(&id("A.sol")).await.unwrap();

    fx.sources.set_source("B.sol", "pragma solidity ^0.8.0;\nimport \"./X.sol\";");
    fx.project.source_did_change(&id("B.sol"));

    let root = fx.project.get_root(&id("A.sol")).await.unwrap();
    assert_eq!(deps(&root), vec!["B.sol", "X.sol"]);
    // C.sol is no longer imported by anything but stays in the graph
    assert!(fx.project.dependents(&id("C.sol")).is_empty());
}

#[tokio::test]
async fn deleted_dependency_is_reported() {
    let fx = chain();
    fx.project.get_root(&id("A.sol")).await.unwrap();

    fx.sources.remove_source("C.sol");
    fx.project.source_did_change(&id("C.sol"));

    let err = fx.project.get_root(&id("A.sol")).await.unwrap_err();
    assert_eq!(err.source_id(), Some(&id("C.sol")));
    assert!(matches!(err, ResolveError::UnreadableSource { .. }));
}

#[tokio::test]
async fn unknown_source_is_ignored() {
    let fx = chain();
    fx.project.get_root(&id("A.sol")).await.unwrap();

    fx.project.source_did_change(&id("Ghost.sol"));

    assert!(fx.project.cached_root(&id("A.sol")).is_some());
    assert_eq!(fx.project.graph_stats().source_count, 3);
}

#[tokio::test]
async fn allowable_change_reselects_without_reading() {
    let fx = chain();
    fx.project.get_root(&id("A.sol")).await.unwrap();
    let reads = fx.sources.total_reads();

    fx.project
        .update_definition(crate::ProjectDefinition::new([v("0.8.0"), v("0.8.19")]));
    assert!(fx.project.cached_root(&id("A.sol")).is_none());

    let root = fx.project.get_root(&id("A.sol")).await.unwrap();
    assert_eq!(best(&root).as_deref(), Some("0.8.19"));
    assert_eq!(fx.sources.total_reads(), reads);
}

#[tokio::test]
async fn remapping_change_rebuilds_the_graph() {
    let fx = chain();
    fx.project.get_root(&id("A.sol")).await.unwrap();

    fx.project
        .update_definition(full_definition().with_remappings(["lib/=vendor/".parse().unwrap()]));
    assert_eq!(fx.project.graph_stats().source_count, 0);

    fx.project.get_root(&id("A.sol")).await.unwrap();
    assert_eq!(fx.reads("A.sol"), 2);
    assert_eq!(fx.reads("C.sol"), 2);
}

#[tokio::test]
async fn root_set_change_keeps_the_cache() {
    let fx = chain();
    let a = fx.project.get_root(&id("A.sol")).await.unwrap();

    fx.project
        .update_definition(full_definition().with_roots(["A.sol", "X.sol"]));

    let cached = fx.project.cached_root(&id("A.sol")).unwrap();
    assert!(Arc::ptr_eq(&a, &cached));
    assert_eq!(fx.project.definition().roots.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn change_during_resolution_is_not_lost() {
    let sources = MemorySources::new().with_latency(Duration::from_secs(1));
    let fx = Fixture::from_sources(
        sources,
        &[
            ("A.sol", "import \"./B.sol\";"),
            ("B.sol", "pragma solidity ^0.8.0;"),
        ],
        full_definition(),
        ProjectOptions::default(),
    );
    let project = Arc::clone(&fx.project);

    let task = {
        let project = Arc::clone(&project);
        tokio::spawn(async move { project.get_root(&id("A.sol")).await })
    };

    // A.sol has been read, B.sol is still in flight
    tokio::time::sleep(Duration::from_millis(1500)).await;
    fx.sources
        .set_source("A.sol", "pragma solidity =0.8.0;\nimport \"./B.sol\";");
    project.source_did_change(&id("A.sol"));

    let root = task.await.unwrap().unwrap();
    assert_eq!(best(&root).as_deref(), Some("0.8.0"));
    assert_eq!(fx.reads("A.sol"), 2);
}
