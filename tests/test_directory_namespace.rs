//! Assembly from directories of manifest files.

use std::fs;
use std::path::Path;

use cmdtree::dispatch::DispatchOrigin;
use cmdtree::error::{AssemblyError, CmdTreeError};
use cmdtree::namespace::{DirectoryOptions, Namespace};
use cmdtree::tree::{Node, SpecOrigin, TreeView};
use cmdtree::{Assembler, AssemblyOptions, DirectoryNamespace, Invocation};

mod common;

use common::CmdTreeProcess;

fn assembler(prog: &str) -> Assembler {
    Assembler::new(AssemblyOptions {
        prog: Some(prog.to_string()),
        ..AssemblyOptions::default()
    })
}

fn namespace(root: &Path) -> DirectoryNamespace {
    DirectoryNamespace::with_options(
        root,
        DirectoryOptions {
            extension: "cmd".to_string(),
            max_manifest_size: 1024 * 1024,
        },
    )
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn parse(cli: &clap::Command, args: &[&str]) -> Invocation {
    let matches = cli.clone().try_get_matches_from(args).unwrap();
    Invocation::from_matches(cli, &matches)
}

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn calculator_fixture_dispatches() {
    let root = CmdTreeProcess::fixture_path("calculator");
    let cli = assembler("calc").assemble(&namespace(&root)).unwrap();

    let invocation = parse(&cli, &["calc", "math", "add", "2", "3"]);
    assert_eq!(invocation.command, ["math", "add"]);
    assert_eq!(invocation.get("x"), Some(&serde_json::json!(2.0)));
    assert_eq!(invocation.get("y"), Some(&serde_json::json!(3.0)));

    let invocation = parse(&cli, &["calc", "negate", "5"]);
    assert_eq!(invocation.command, ["negate"]);
    assert_eq!(invocation.get("x"), Some(&serde_json::json!(5.0)));
}

#[test]
fn calculator_fixture_tree_shape() {
    let root = CmdTreeProcess::fixture_path("calculator");
    let tree = assembler("calc").prepare(&namespace(&root)).unwrap();

    assert_eq!(tree.origin, SpecOrigin::Declared);
    let names: Vec<&str> = tree.children.iter().map(Node::name).collect();
    assert_eq!(names, ["math", "negate"]);

    let Some(Node::Index(math)) = tree.child("math") else {
        panic!("math should be an index node");
    };
    assert_eq!(math.origin, SpecOrigin::Declared);
    let names: Vec<&str> = math.children.iter().map(Node::name).collect();
    assert_eq!(names, ["add", "subtract"]);

    let rendered = TreeView::of(&tree).render();
    assert!(rendered.contains("  math/  Arithmetic on two operands"), "{rendered}");
    assert!(rendered.contains("    add  Add two numbers."), "{rendered}");
}

#[test]
fn preexisting_fixture_reuses_manifest_subcommands() {
    let root = CmdTreeProcess::fixture_path("preexisting");
    let tree = assembler("hand").prepare(&namespace(&root)).unwrap();
    let dispatch = tree.dispatch.as_ref().unwrap();
    assert_eq!(dispatch.origin(), DispatchOrigin::Reused);
    assert_eq!(dispatch.preexisting(), ["manual"]);

    let cli = assembler("hand").assemble(&namespace(&root)).unwrap();
    let invocation = parse(&cli, &["hand", "manual", "7"]);
    assert_eq!(invocation.command, ["manual"]);
    assert_eq!(invocation.get("value"), Some(&serde_json::json!(7)));

    let invocation = parse(&cli, &["hand", "discovered", "--loud"]);
    assert_eq!(invocation.get("loud"), Some(&serde_json::json!(true)));
}

#[test]
fn mixed_fixture_skips_what_it_cannot_use() {
    let root = CmdTreeProcess::fixture_path("mixed");
    let cli = assembler("mixed").assemble(&namespace(&root)).unwrap();

    let names: Vec<&str> = cli.get_subcommands().map(|c| c.get_name()).collect();
    assert_eq!(names, ["good", "tools"]);

    assert!(cli.find_subcommand("bad_default").is_none());

    let tools = cli.find_subcommand("tools").unwrap();
    assert!(tools.find_subcommand("lint").is_some());

    let invocation = parse(&cli, &["mixed", "tools", "lint", "-lll"]);
    assert_eq!(invocation.get("level"), Some(&serde_json::json!(3)));
}

// ============================================================================
// Temporary directories
// ============================================================================

#[test]
fn deep_directories_nest() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a/b/c/leaf.cmd", "about: Deep leaf\n");

    let cli = assembler("deep").assemble(&namespace(dir.path())).unwrap();
    let invocation = parse(&cli, &["deep", "a", "b", "c", "leaf"]);
    assert_eq!(invocation.command, ["a", "b", "c", "leaf"]);

    let err = cli
        .try_get_matches_from(["deep", "a", "b", "c", "leaf", "--help"])
        .unwrap_err();
    assert!(err.to_string().contains("Usage: deep a b c leaf"), "{err}");
}

#[test]
fn empty_subdirectory_is_a_plain_command() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();
    write(dir.path(), "real.cmd", "about: Real\n");

    let tree = assembler("x").prepare(&namespace(dir.path())).unwrap();
    let Some(Node::Index(empty)) = tree.child("empty") else {
        panic!("empty should be an index node");
    };
    assert!(empty.children.is_empty());
    assert!(empty.dispatch.is_none());
    assert_eq!(empty.origin, SpecOrigin::Synthesized);
}

#[test]
fn directory_with_only_unusable_files_has_no_dispatcher() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "group/broken.cmd", "args: [\n");
    write(dir.path(), "group/blank.cmd", "");

    let tree = assembler("x").prepare(&namespace(dir.path())).unwrap();
    let Some(Node::Index(group)) = tree.child("group") else {
        panic!("group should be an index node");
    };
    assert!(group.children.is_empty());
    assert!(group.dispatch.is_none());
}

#[test]
fn help_manifest_is_an_ordinary_command() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "help.cmd", "about: Explain a topic\nargs:\n  - name: topic\n");
    write(
        dir.path(),
        "negate.cmd",
        "about: Negate a number\nargs:\n  - name: x\n    type: float\n",
    );

    let cli = assembler("calc").assemble(&namespace(dir.path())).unwrap();

    let invocation = parse(&cli, &["calc", "negate", "5"]);
    assert_eq!(invocation.get("x"), Some(&serde_json::json!(5.0)));

    let invocation = parse(&cli, &["calc", "help", "negate"]);
    assert_eq!(invocation.command, ["help"]);
    assert_eq!(invocation.get("topic"), Some(&serde_json::json!("negate")));
}

#[test]
fn file_and_directory_with_same_name_collide() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.cmd", "about: Math file\n");
    write(dir.path(), "math/add.cmd", "about: Add\n");

    let err = assembler("x").assemble(&namespace(dir.path())).unwrap_err();
    assert!(matches!(
        err,
        CmdTreeError::Assembly(AssemblyError::DuplicateEntry { .. })
    ));
}

#[test]
fn custom_extension_and_marker() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "__init__.yaml", "about: Custom root\n");
    write(dir.path(), "hello.yaml", "about: Say hello\n");
    write(dir.path(), "ignored.cmd", "about: Wrong extension\n");

    let walker = DirectoryNamespace::with_options(
        dir.path(),
        DirectoryOptions {
            extension: "yaml".to_string(),
            max_manifest_size: 1024,
        },
    );
    assert_eq!(walker.walk().unwrap().len(), 2);

    let cli = Assembler::new(AssemblyOptions {
        prog: Some("custom".to_string()),
        index_marker: "__init__".to_string(),
        sort_siblings: true,
    })
    .assemble(&walker)
    .unwrap();

    assert_eq!(
        cli.get_about().map(ToString::to_string).as_deref(),
        Some("Custom root")
    );
    assert!(cli.find_subcommand("hello").is_some());
    assert!(cli.find_subcommand("ignored").is_none());
}

#[test]
fn missing_root_is_a_namespace_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = assembler("x")
        .assemble(&namespace(&dir.path().join("nope")))
        .unwrap_err();
    assert!(matches!(err, CmdTreeError::Namespace(_)));
}
