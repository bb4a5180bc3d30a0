use std::fs;
use std::path::Path;

use dirsketch::config::STYLE_NAMES;
use dirsketch::filesystem::{count_files, count_folders};
use dirsketch::sorting::Grouping;
use dirsketch::{
    FakeTree, ParseOptions, PopulateOptions, RenderOptions, parse_tree, random_tree, render_path,
};
use rstest::*;
use tempfile::TempDir;

const EXAMPLE: &str = "mypkg/
    __init__.py
    app.py
    view.py
    test/
        __init__.py
        test_app.py
        test_view.py";

#[fixture]
fn mypkg() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().join("mypkg");
    fs::create_dir_all(root.join("test")).expect("Failed to create folders");
    for file in [
        "__init__.py",
        "app.py",
        "view.py",
        "test/__init__.py",
        "test/test_app.py",
        "test/test_view.py",
    ] {
        fs::write(root.join(file), "").expect("Failed to write file");
    }
    dir
}

fn reread(rendered: &str) -> FakeTree {
    parse_tree(rendered, &ParseOptions::default()).expect("rendered diagram should parse")
}

#[rstest]
fn every_style_survives_a_round_trip(
    #[values("lines", "dash", "spaces", "arrow", "plus", "emoji")] style: &str,
    #[values(1, 2, 3, 5)] indent: usize,
) {
    assert!(STYLE_NAMES.contains(&style));
    let tree = FakeTree::try_from(EXAMPLE).unwrap();
    let config = RenderOptions::new().style(style).indent(indent).build().unwrap();

    let rendered = tree.render(tree.root(), &config).unwrap();
    let parsed = parse_tree(&rendered, &ParseOptions::for_config(&config)).unwrap();
    let rerendered = parsed.render(parsed.root(), &config).unwrap();

    assert_eq!(rendered, rerendered);
}

#[rstest]
fn default_parser_reads_every_style_at_base_width(
    #[values("lines", "dash", "arrow", "plus", "emoji")] style: &str,
) {
    let tree = FakeTree::try_from(EXAMPLE).unwrap();
    let config = RenderOptions::new().style(style).build().unwrap();
    let parsed = reread(&tree.render(tree.root(), &config).unwrap());

    assert_eq!(parsed.root_node().name(), "mypkg");
    assert_eq!(parsed.root_node().child_names(), tree.root_node().child_names());
    assert_eq!(
        parsed.get("test").unwrap().child_names(),
        tree.get("test").unwrap().child_names()
    );
}

#[rstest]
fn excluding_init_files_drops_one_entry_per_folder(mypkg: TempDir) {
    let config = RenderOptions::new()
        .first(Grouping::FoldersFirst)
        .sorted(true)
        .exclude_files([r"__init__\.py"])
        .build()
        .unwrap();
    let rendered = render_path(mypkg.path().join("mypkg"), &config).unwrap();
    let parsed = reread(&rendered);

    let top = parsed.root_node();
    assert_eq!(count_folders(top.children()) + count_files(top.children()), 3);
    assert_eq!(top.child_names(), vec!["test", "app.py", "view.py"]);
    assert_eq!(
        parsed.get("test").unwrap().child_names(),
        vec!["test_app.py", "test_view.py"]
    );
}

#[rstest]
fn excluding_dotted_files_leaves_only_the_folder(mypkg: TempDir) {
    let config = RenderOptions::new().exclude_files([r"\."]).build().unwrap();
    let rendered = render_path(mypkg.path().join("mypkg"), &config).unwrap();
    let parsed = reread(&rendered);

    assert_eq!(parsed.root_node().child_names(), vec!["test"]);
    assert!(parsed.get("test").unwrap().is_folder());
}

#[rstest]
fn snapshot_of_a_real_folder_renders_the_same(mypkg: TempDir) {
    let config = RenderOptions::new()
        .first(Grouping::FilesFirst)
        .style("plus")
        .build()
        .unwrap();
    let root: &Path = &mypkg.path().join("mypkg");
    let snapshot = FakeTree::from_real(root, &config).unwrap();

    assert_eq!(
        snapshot.render(snapshot.root(), &config).unwrap(),
        render_path(root, &config).unwrap()
    );
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn depth_limit_bounds_the_parsed_depth(#[case] limit: usize) {
    let options = PopulateOptions::new().seed(17).depth(4).folder_chance(0.8).stop_chance(0.1);
    let tree = random_tree("demo", &options).unwrap();
    let config = RenderOptions::new().depth_limit(limit).build().unwrap();

    let parsed = reread(&tree.render(tree.root(), &config).unwrap());
    for id in parsed.descendants(parsed.root()).unwrap() {
        assert!(parsed.try_node(id).unwrap().depth() <= limit);
    }
}

#[test]
fn seeded_trees_render_identically() {
    let options = PopulateOptions::new().seed(421);
    let config = RenderOptions::default().build().unwrap();
    let first = random_tree("seeded", &options).unwrap();
    let second = random_tree("seeded", &options).unwrap();

    assert_eq!(first.root_node().child_names(), second.root_node().child_names());
    assert_eq!(
        first.render(first.root(), &config).unwrap(),
        second.render(second.root(), &config).unwrap()
    );
}
