//! Command tests against a temporary theme tree.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use thematic_cli::cli::{Cli, Command};
use thematic_cli::commands::{
    load_registry, run_config, run_dump, run_list, run_resolve, run_themes, run_view,
};
use thematic_core::ResourceKind;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Two roots with a `child` theme extending `base`, plus a settings file.
fn project() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    write(
        &root.join("thematic.toml"),
        r#"
[[roots]]
kind = "app"
path = "themes"

[[roots]]
kind = "vendor"
path = "vendor/themes"
"#,
    );
    write(&root.join("vendor/themes/base/config.toml"), "title = \"Base\"\n");
    write(&root.join("vendor/themes/base/elements/card/view.php"), "base card");
    write(&root.join("vendor/themes/base/elements/card/style.scss"), "");
    write(&root.join("vendor/themes/base/layouts/default.php"), "layout");
    write(
        &root.join("themes/child/config.toml"),
        "extends = \"base\"\n[assets]\ncss = \"child.css\"\n",
    );
    write(&root.join("themes/child/elements/card/view.php"), "child card");
    let settings = root.join("thematic.toml");
    (dir, settings)
}

fn parse(settings: &Path, args: &[&str]) -> Cli {
    let settings = settings.to_string_lossy().into_owned();
    let mut argv = vec!["thematic", "--settings", settings.as_str()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("valid command line")
}

#[test]
fn resolve_reports_companion_files() {
    let (_dir, settings) = project();
    let cli = parse(&settings, &["resolve", "card", "--theme", "child"]);
    let registry = load_registry(cli.settings.as_deref()).expect("registry");
    let Command::Resolve(args) = &cli.command else {
        panic!("expected resolve");
    };

    let resource = run_resolve(&registry, args)
        .expect("resolve runs")
        .expect("card resolves");
    assert_eq!(resource.kind, ResourceKind::Directory);
    assert_eq!(resource.theme, "child");
    assert!(resource.view_file.expect("view file").ends_with("themes/child/elements/card/view.php"));
    assert!(
        resource
            .style_source_file
            .expect("style source")
            .ends_with("vendor/themes/base/elements/card/style.scss")
    );
    assert!(resource.class_file.is_none());
}

#[test]
fn view_resolves_single_file_layouts() {
    let (_dir, settings) = project();
    let cli = parse(&settings, &["view", "child.default", "--type", "layouts"]);
    let registry = load_registry(cli.settings.as_deref()).expect("registry");
    let Command::View(args) = &cli.command else {
        panic!("expected view");
    };

    let view = run_view(&registry, args).expect("view runs").expect("layout found");
    assert!(view.ends_with("vendor/themes/base/layouts/default.php"));
}

#[test]
fn bare_identifier_without_theme_fails() {
    let (_dir, settings) = project();
    let cli = parse(&settings, &["resolve", "card"]);
    let registry = load_registry(cli.settings.as_deref()).expect("registry");
    let Command::Resolve(args) = &cli.command else {
        panic!("expected resolve");
    };

    let err = run_resolve(&registry, args).unwrap_err();
    assert!(format!("{err:#}").contains("no current theme"));
}

#[test]
fn list_outputs_flattened_tree() {
    let (_dir, settings) = project();
    let cli = parse(&settings, &["list", "child", "--kind", "file"]);
    let registry = load_registry(cli.settings.as_deref()).expect("registry");
    let Command::List(args) = &cli.command else {
        panic!("expected list");
    };

    let listing = run_list(&registry, args).expect("list runs");
    insta::assert_json_snapshot!(listing, @r#"
    [
      {
        "relative_path": "config.toml",
        "kind": "file",
        "theme": "child"
      },
      {
        "relative_path": "elements/card/style.scss",
        "kind": "file",
        "theme": "base"
      },
      {
        "relative_path": "elements/card/view.php",
        "kind": "file",
        "theme": "child"
      },
      {
        "relative_path": "layouts/default.php",
        "kind": "file",
        "theme": "base"
      }
    ]
    "#);
}

#[test]
fn list_of_unknown_theme_fails() {
    let (_dir, settings) = project();
    let cli = parse(&settings, &["list", "ghost"]);
    let registry = load_registry(cli.settings.as_deref()).expect("registry");
    let Command::List(args) = &cli.command else {
        panic!("expected list");
    };

    let err = run_list(&registry, args).unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn dump_honours_extension_filter() {
    let (dir, settings) = project();
    let destination = dir.path().join("public");
    let destination_arg = destination.to_string_lossy().into_owned();
    let cli = parse(&settings, &["dump", "child", destination_arg.as_str(), "--ext", "scss,php"]);
    let registry = load_registry(cli.settings.as_deref()).expect("registry");
    let Command::Dump(args) = &cli.command else {
        panic!("expected dump");
    };

    let summary = run_dump(&registry, args).expect("dump runs");
    assert_eq!(summary.copied, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        fs::read_to_string(destination.join("elements/card/view.php")).unwrap(),
        "child card"
    );
}

#[test]
fn config_shows_inherited_keys() {
    let (_dir, settings) = project();
    let cli = parse(&settings, &["config", "child"]);
    let registry = load_registry(cli.settings.as_deref()).expect("registry");
    let Command::Config(args) = &cli.command else {
        panic!("expected config");
    };

    let report = run_config(&registry, args).expect("config runs");
    assert_eq!(report.ancestry, ["child", "base"]);
    assert_eq!(report.cycle, None);
    assert_eq!(report.config.get("title").and_then(|v| v.as_str()), Some("Base"));
}

#[test]
fn themes_lists_every_root_directory() {
    let (_dir, settings) = project();
    let registry = load_registry(Some(&settings)).expect("registry");

    let themes = run_themes(&registry);
    let names: Vec<&str> = themes.iter().map(|theme| theme.name.as_str()).collect();
    assert_eq!(names, ["base", "child"]);
    assert_eq!(themes[1].parent.as_deref(), Some("base"));
    assert_eq!(themes[1].roots, ["app"]);
}
