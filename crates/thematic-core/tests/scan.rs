//! Flattened listings and tree dumps.

mod common;

use std::fs;
use std::path::Path;

use common::Fixture;
use thematic_core::{ResourceKind, ScanError};

fn layered_fixture() -> Fixture {
    let fixture = Fixture::new();
    fixture.write("vendor/base/config.toml", "title = \"Base\"\n");
    fixture.write("vendor/base/elements/button.php", "base button");
    fixture.write("vendor/base/elements/card/view.php", "base card");
    fixture.write("vendor/base/layouts/default.blade.php", "base layout");
    fixture.write("vendor/base/css/site.css", "body {}");
    fixture.write("app/child/config.toml", "extends = \"base\"\n");
    fixture.write("app/child/elements/button.php", "child button");
    fixture.write("app/child/css/child.css", ".child {}");
    fixture
}

fn slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[test]
fn flattened_listing_prefers_child_files() {
    let fixture = layered_fixture();
    let registry = fixture.registry();
    let child = registry.get("child");

    let listing = child
        .get_resource_list(&[], Some(ResourceKind::File), true)
        .expect("list child tree")
        .iter()
        .map(|resource| {
            format!(
                "{} <- {}",
                slash(resource.relative_path()),
                resource.owning_theme().name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(listing, @r"
    config.toml <- child
    css/child.css <- child
    css/site.css <- base
    elements/button.php <- child
    elements/card/view.php <- base
    layouts/default.blade.php <- base
    ");
}

#[test]
fn flatten_maps_relative_to_absolute_paths() {
    let fixture = layered_fixture();
    let registry = fixture.registry();
    let map = registry.get("child").flatten().expect("flatten");

    assert_eq!(map.len(), 6);
    assert_eq!(
        map.get(Path::new("elements/button.php")),
        Some(&fixture.app().join("child/elements/button.php"))
    );
    assert_eq!(
        map.get(Path::new("css/site.css")),
        Some(&fixture.vendor().join("base/css/site.css"))
    );
}

#[test]
fn subsets_and_kind_filter_narrow_the_list() {
    let fixture = layered_fixture();
    let registry = fixture.registry();
    let child = registry.get("child");

    let directories: Vec<String> = child
        .get_resource_list(&["elements", "layouts"], Some(ResourceKind::Directory), true)
        .expect("list directories")
        .iter()
        .map(|resource| slash(resource.relative_path()))
        .collect();
    assert_eq!(directories, ["elements/card"]);

    let own: Vec<String> = child
        .get_resource_list(&["elements"], None, false)
        .expect("list own elements")
        .iter()
        .map(|resource| slash(resource.relative_path()))
        .collect();
    assert_eq!(own, ["elements/button.php"]);
}

#[test]
fn listed_resources_are_called_from_the_listing_theme() {
    let fixture = layered_fixture();
    let registry = fixture.registry();
    let child = registry.get("child");

    let resources = child
        .get_resource_list(&["layouts"], Some(ResourceKind::File), true)
        .expect("list layouts");
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].owning_theme().name(), "base");
    assert_eq!(resources[0].calling_theme().name(), "child");
}

#[test]
fn dump_copies_the_flattened_tree() {
    let fixture = layered_fixture();
    let registry = fixture.registry();
    let destination = fixture.path().join("public");

    let summary = registry
        .get("child")
        .dump_file_tree(&destination, true, Some(&["css"][..]))
        .expect("dump css");
    assert_eq!(summary.copied, 2);
    assert_eq!(summary.skipped, 4);
    assert_eq!(
        fs::read_to_string(destination.join("css/site.css")).expect("copied parent css"),
        "body {}"
    );
    assert!(destination.join("css/child.css").is_file());
    assert!(!destination.join("elements").exists());
}

#[test]
fn dump_without_ancestry_copies_own_files() {
    let fixture = layered_fixture();
    let registry = fixture.registry();
    let destination = fixture.path().join("out");

    let summary = registry
        .get("child")
        .dump_file_tree(&destination, false, None)
        .expect("dump child");
    assert_eq!(summary.copied, 3);
    assert_eq!(
        fs::read_to_string(destination.join("elements/button.php")).expect("copied button"),
        "child button"
    );
}

#[test]
fn dump_of_missing_theme_fails() {
    let fixture = layered_fixture();
    let registry = fixture.registry();

    let err = registry
        .get("ghost")
        .dump_file_tree(&fixture.path().join("out"), true, None)
        .unwrap_err();
    assert!(matches!(err, ScanError::MissingTheme { ref name } if name == "ghost"));
}

#[test]
fn subsets_never_leave_the_theme_root() {
    let fixture = layered_fixture();
    fixture.write("vendor/other/secret.txt", "other theme");

    let base = fixture.registry().get("base");
    let listed = base
        .get_resource_list(&["elements/../../other"], None, false)
        .expect("listing");
    assert!(listed.is_empty());

    let rooted = base
        .get_resource_list(&["/css"], Some(ResourceKind::File), false)
        .expect("listing");
    let paths: Vec<String> = rooted.iter().map(|r| slash(r.relative_path())).collect();
    assert_eq!(paths, ["css/site.css"]);
}
