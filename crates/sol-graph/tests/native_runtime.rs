//! End-to-end resolution of a project laid out on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use sol_config::{DEFAULT_PROFILE, SolConfig};
use sol_graph::{
    FsContentProvider, Project, ProjectDefinition, ResolveError, SourceId, SourceNameResolver,
    Version,
};
use tempfile::TempDir;

const CONFIG: &str = r#"
remappings = ["@oz/=lib/openzeppelin/"]
roots = ["contracts/Token.sol", "contracts/Legacy.sol"]

[solidity]
compilers = [{ version = "0.8.19" }, { version = "0.8.24" }, { version = "0.7.6" }]
overrides = { "contracts/Legacy.sol" = { version = "0.7.6" } }
dependencies_to_compile = ["lib/openzeppelin/utils/Math.sol"]
"#;

fn write(root: &Path, name: &str, text: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn fixture() -> (TempDir, Project) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "contracts/Token.sol",
        "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;\n\nimport \"@oz/utils/Math.sol\";\nimport './Base.sol';\n\ncontract Token is Base {}\n",
    );
    write(root, "contracts/Base.sol", "pragma solidity >=0.7.0;\n/* import \"./Ghost.sol\"; */\nabstract contract Base {}\n");
    write(root, "contracts/Legacy.sol", "pragma solidity >=0.7.0 <0.8.0;\ncontract Legacy {}\n");
    write(root, "lib/openzeppelin/utils/Math.sol", "pragma solidity ^0.8.1 || ^0.7.0;\nlibrary Math {}\n");

    let config = SolConfig::from_toml_str(CONFIG).unwrap();
    let definition = ProjectDefinition::from_config(&config, DEFAULT_PROFILE).unwrap();
    let project = Project::new(
        definition,
        Arc::new(FsContentProvider::new(root)),
        Arc::new(SourceNameResolver::with_root(root)),
    );
    (dir, project)
}

#[tokio::test]
async fn resolves_roots_from_disk() {
    let (_dir, project) = fixture();

    let token = project.get_root(&SourceId::new("contracts/Token.sol")).await.unwrap();
    assert_eq!(
        token.dependencies().iter().map(SourceId::as_str).collect::<Vec<_>>(),
        vec!["contracts/Base.sol", "lib/openzeppelin/utils/Math.sol"]
    );
    assert_eq!(token.best_version(), Some(&Version::new(0, 8, 24)));
}

#[tokio::test]
async fn build_plan_honours_overrides() {
    let (_dir, project) = fixture();

    let plan = project.build_plan().await.unwrap();
    assert!(plan.is_complete());
    assert_eq!(
        plan.jobs[&Version::new(0, 8, 24)],
        vec![
            SourceId::new("contracts/Token.sol"),
            SourceId::new("lib/openzeppelin/utils/Math.sol"),
        ]
    );
    assert_eq!(
        plan.jobs[&Version::new(0, 7, 6)],
        vec![SourceId::new("contracts/Legacy.sol")]
    );
}

#[tokio::test]
async fn edited_file_is_picked_up_after_change_notification() {
    let (dir, project) = fixture();
    let token = SourceId::new("contracts/Token.sol");
    project.get_root(&token).await.unwrap();

    write(dir.path(), "lib/openzeppelin/utils/Math.sol", "pragma solidity <0.8.20;\nlibrary Math {}\n");
    project.source_did_change(&SourceId::new("lib/openzeppelin/utils/Math.sol"));

    let root = project.get_root(&token).await.unwrap();
    assert_eq!(root.best_version(), Some(&Version::new(0, 8, 19)));
}

#[tokio::test]
async fn missing_import_on_disk_is_an_error() {
    let (dir, project) = fixture();
    write(dir.path(), "contracts/Broken.sol", "import \"./Nope.sol\";\n");

    let err = project
        .get_root(&SourceId::new("contracts/Broken.sol"))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::UnresolvableImport { ref import, .. } if import == "./Nope.sol"));
}

#[tokio::test]
async fn roots_are_discovered_from_source_dirs() {
    let (dir, _) = fixture();
    write(dir.path(), "contracts/.archive/Old.sol", "pragma solidity ^0.4.0;\n");
    write(dir.path(), "contracts/NOTES.md", "not a source\n");

    let config = SolConfig::from_toml_str(
        r#"
remappings = ["@oz/=lib/openzeppelin/"]

[solidity]
version = "0.8.24"
dependencies_to_compile = ["lib/openzeppelin/utils/Math.sol"]
"#,
    )
    .unwrap();
    let definition = ProjectDefinition::discover(&config, DEFAULT_PROFILE, dir.path())
        .await
        .unwrap();

    assert_eq!(
        definition.roots.iter().map(SourceId::as_str).collect::<Vec<_>>(),
        vec![
            "contracts/Base.sol",
            "contracts/Legacy.sol",
            "contracts/Token.sol",
            "lib/openzeppelin/utils/Math.sol",
        ]
    );

    let project = Project::new(
        definition,
        Arc::new(FsContentProvider::new(dir.path())),
        Arc::new(SourceNameResolver::with_root(dir.path())),
    );
    let plan = project.build_plan().await.unwrap();
    assert_eq!(plan.unsatisfiable, vec![SourceId::new("contracts/Legacy.sol")]);
    assert_eq!(plan.jobs[&Version::new(0, 8, 24)].len(), 3);
}
