use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info_span, warn};

use thematic_core::{
    DumpSummary, RenderContext, Resource, ResourceKind, ResourceResolver, Settings, Theme,
    ThemeRegistry,
};

use crate::cli::{ConfigArgs, DumpArgs, ListArgs, ResolveArgs};

/// A resolved identifier with its companion files.
#[derive(Debug, Serialize)]
pub struct ResolvedResource {
    pub identifier: String,
    pub kind: ResourceKind,
    pub theme: String,
    pub calling_theme: String,
    pub relative_path: PathBuf,
    pub absolute_path: PathBuf,
    pub view_file: Option<PathBuf>,
    pub class_file: Option<PathBuf>,
    pub style_source_file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ListedResource {
    pub relative_path: PathBuf,
    pub kind: ResourceKind,
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub theme: String,
    pub ancestry: Vec<String>,
    pub cycle: Option<String>,
    pub config: toml::Table,
}

#[derive(Debug, Serialize)]
pub struct ThemeSummary {
    pub name: String,
    pub parent: Option<String>,
    pub roots: Vec<String>,
    pub ancestry: Vec<String>,
    pub cycle: Option<String>,
    pub config_errors: Vec<String>,
}

impl ResolvedResource {
    fn new(identifier: &str, resource: &Resource) -> Self {
        Self {
            identifier: identifier.to_string(),
            kind: resource.kind(),
            theme: resource.owning_theme().name().to_string(),
            calling_theme: resource.calling_theme().name().to_string(),
            relative_path: resource.relative_path().to_path_buf(),
            absolute_path: resource.absolute_path().to_path_buf(),
            view_file: resource.view_file(),
            class_file: resource.class_file(),
            style_source_file: resource.style_source_file(),
        }
    }
}

/// Load settings the usual way and build a registry over them.
pub fn load_registry(settings: Option<&Path>) -> Result<ThemeRegistry> {
    let working_dir = std::env::current_dir().context("read working directory")?;
    let settings = Settings::discover(settings, &working_dir).context("load settings")?;
    Ok(ThemeRegistry::new(settings))
}

pub fn run_resolve(registry: &ThemeRegistry, args: &ResolveArgs) -> Result<Option<ResolvedResource>> {
    let _span = info_span!("resolve", identifier = %args.identifier).entered();
    let context = render_context(registry, args)?;
    let resolver = ResourceResolver::new(registry, args.view_type.into());
    let resource = resolver
        .resolve(&args.identifier, &context)
        .with_context(|| format!("resolve {}", args.identifier))?;
    Ok(resource.map(|resource| ResolvedResource::new(&args.identifier, &resource)))
}

pub fn run_view(registry: &ThemeRegistry, args: &ResolveArgs) -> Result<Option<PathBuf>> {
    let _span = info_span!("view", identifier = %args.identifier).entered();
    let context = render_context(registry, args)?;
    let resolver = ResourceResolver::new(registry, args.view_type.into());
    resolver
        .resolve_view_file(&args.identifier, &context)
        .with_context(|| format!("resolve view file for {}", args.identifier))
}

pub fn run_list(registry: &ThemeRegistry, args: &ListArgs) -> Result<Vec<ListedResource>> {
    let theme = existing_theme(registry, &args.theme)?;
    let subsets: Vec<&str> = args.subsets.iter().map(String::as_str).collect();
    let resources = theme
        .get_resource_list(&subsets, args.kind.map(Into::into), !args.no_ancestry)
        .with_context(|| format!("list theme {}", args.theme))?;
    Ok(resources
        .iter()
        .map(|resource| ListedResource {
            relative_path: resource.relative_path().to_path_buf(),
            kind: resource.kind(),
            theme: resource.owning_theme().name().to_string(),
        })
        .collect())
}

pub fn run_dump(registry: &ThemeRegistry, args: &DumpArgs) -> Result<DumpSummary> {
    let theme = existing_theme(registry, &args.theme)?;
    let extensions: Vec<&str> = args.extensions.iter().map(String::as_str).collect();
    let filter = (!extensions.is_empty()).then_some(extensions.as_slice());
    theme
        .dump_file_tree(&args.destination, !args.no_ancestry, filter)
        .with_context(|| {
            format!(
                "dump theme {} into {}",
                args.theme,
                args.destination.display()
            )
        })
}

pub fn run_config(registry: &ThemeRegistry, args: &ConfigArgs) -> Result<ConfigReport> {
    let theme = existing_theme(registry, &args.theme)?;
    let ancestry = theme.ancestry();
    let config = if args.own {
        theme.own_config().clone()
    } else {
        theme.config().clone()
    };
    Ok(ConfigReport {
        theme: theme.name().to_string(),
        ancestry: ancestry.names().into_iter().map(str::to_string).collect(),
        cycle: ancestry.cycle,
        config,
    })
}

pub fn run_themes(registry: &ThemeRegistry) -> Vec<ThemeSummary> {
    registry
        .available()
        .iter()
        .map(|name| {
            let theme = registry.get(name);
            let ancestry = theme.ancestry();
            if let Some(cycle) = &ancestry.cycle {
                warn!(theme = %name, cycle = %cycle, "theme inheritance cycle");
            }
            ThemeSummary {
                name: name.clone(),
                parent: theme.parent_name().map(str::to_string),
                roots: theme.roots().iter().map(|root| root.kind.clone()).collect(),
                ancestry: ancestry.names().into_iter().map(str::to_string).collect(),
                cycle: ancestry.cycle.clone(),
                config_errors: theme
                    .config_errors()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            }
        })
        .collect()
}

fn existing_theme(registry: &ThemeRegistry, name: &str) -> Result<std::sync::Arc<Theme>> {
    registry
        .get_existing(name)
        .with_context(|| format!("theme '{name}' not found under any root"))
}

fn render_context(registry: &ThemeRegistry, args: &ResolveArgs) -> Result<RenderContext> {
    let mut context = match &args.theme {
        Some(theme) => RenderContext::with_theme(theme.clone()),
        None => RenderContext::new(),
    };
    if let Some(view) = &args.from_view {
        let view = std::path::absolute(view)
            .with_context(|| format!("resolve view path {}", view.display()))?;
        if context.set_current_view(registry, &view).is_none() {
            warn!(view = %view.display(), "view is not inside any theme root");
        }
    }
    Ok(context)
}
