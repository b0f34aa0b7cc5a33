//! Tests for resource identifier parsing.

use thematic_model::{Conventions, DEFAULT_NAMESPACE, NameError, ResourceName, ViewType};

#[test]
fn bare_name_has_only_a_theme_segment() {
    let name = ResourceName::parse("navbar").expect("parse bare name");
    assert_eq!(name.namespace(), None);
    assert_eq!(name.segment_count(), 1);
    assert_eq!(name.theme(), "navbar");
    assert_eq!(name.resource_type(), None);
    assert_eq!(name.name(), None);
    assert!(!name.is_namespaced_theme_view(DEFAULT_NAMESPACE));
}

#[test]
fn two_segments_are_theme_and_name() {
    let name = ResourceName::parse("base.navbar").expect("parse theme.name");
    assert_eq!(name.theme(), "base");
    assert_eq!(name.resource_type(), None);
    assert_eq!(name.name().as_deref(), Some("navbar"));
}

#[test]
fn namespaced_identifier_is_fully_qualified() {
    let name = ResourceName::parse("thematic::base.elements.navbar").expect("parse namespaced");
    assert_eq!(name.namespace(), Some("thematic"));
    assert_eq!(name.theme(), "base");
    assert_eq!(name.resource_type(), Some("elements"));
    assert_eq!(name.name().as_deref(), Some("navbar"));
    assert!(name.is_namespaced_theme_view(DEFAULT_NAMESPACE));
    assert!(name.is_namespaced_view_of_type(DEFAULT_NAMESPACE, ViewType::Elements));
    assert!(!name.is_namespaced_view_of_type(DEFAULT_NAMESPACE, ViewType::Layouts));
    assert_eq!(name.name_without_namespace("/"), "base/elements/navbar");
}

#[test]
fn nested_names_join_the_tail() {
    let name = ResourceName::parse("thematic::base.elements.menu.item").expect("parse nested");
    assert_eq!(name.resource_type(), Some("elements"));
    assert_eq!(name.name().as_deref(), Some("menu.item"));
}

#[test]
fn reserved_namespace_needs_three_segments() {
    let name = ResourceName::parse("thematic::base.navbar").expect("parse under-qualified");
    assert!(!name.is_namespaced_theme_view(DEFAULT_NAMESPACE));
}

#[test]
fn other_namespaces_are_not_theme_views() {
    let name = ResourceName::parse("mail::base.elements.navbar").expect("parse foreign");
    assert_eq!(name.namespace(), Some("mail"));
    assert!(!name.is_namespaced_theme_view(DEFAULT_NAMESPACE));
}

#[test]
fn rejects_repeated_namespace_delimiter() {
    let err = ResourceName::parse("a::b::c.d").unwrap_err();
    assert_eq!(
        err,
        NameError::TooManyNamespaces {
            raw: "a::b::c.d".to_string()
        }
    );
    assert_eq!(err.raw(), Some("a::b::c.d"));
    assert!(err.to_string().contains("a::b::c.d"));
}

#[test]
fn rejects_empty_input_and_segments() {
    assert_eq!(ResourceName::parse("   ").unwrap_err(), NameError::Empty);
    assert!(matches!(
        ResourceName::parse("base..navbar"),
        Err(NameError::EmptySegment { .. })
    ));
    assert!(matches!(
        ResourceName::parse("thematic::"),
        Err(NameError::EmptySegment { .. })
    ));
    assert!(matches!(
        ResourceName::parse("::base.navbar"),
        Err(NameError::EmptyNamespace { .. })
    ));
}

#[test]
fn from_str_matches_parse() {
    let parsed: ResourceName = "base.layouts.default".parse().expect("from_str");
    assert_eq!(parsed.to_string(), "base.layouts.default");
    assert_eq!(parsed.resource_type(), Some("layouts"));
}

#[test]
fn view_type_round_trips_through_strings() {
    for view_type in ViewType::ALL {
        let parsed: ViewType = view_type.as_str().parse().expect("parse view type");
        assert_eq!(parsed, view_type);
    }
    assert_eq!("Element".parse::<ViewType>(), Ok(ViewType::Elements));
    assert!("widgets".parse::<ViewType>().is_err());
}

#[test]
fn conventions_fill_missing_keys_with_defaults() {
    let conventions: Conventions = toml::from_str(
        r#"
template_file_name = "index"
style_extensions = ["css"]
"#,
    )
    .expect("deserialize conventions");
    assert_eq!(conventions.template_file_name, "index");
    assert_eq!(conventions.class_file_name, "class.php");
    assert_eq!(conventions.preferred_style_extensions(), ["css"]);
    assert!(conventions.is_view_file_name("index.blade.php"));
    assert!(!conventions.is_view_file_name("view.blade.php"));
    assert!(conventions.is_style_source_name("theme.LESS"));
    assert!(!conventions.is_style_source_name("theme.js"));
}
