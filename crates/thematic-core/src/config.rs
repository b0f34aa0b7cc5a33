//! Theme configuration tables.
//!
//! Each theme root may carry a configuration file. Tables from several roots
//! are merged deeply with the higher-precedence root winning; the result is
//! then filled from the parent theme key by key, without descending into
//! nested tables.

use std::path::Path;

use toml::{Table, Value};

use crate::error::ThemeConfigError;

/// Key naming the parent theme.
pub const EXTENDS_KEY: &str = "extends";

/// Table mapping resource types or identifiers to handler ids.
pub const HANDLERS_KEY: &str = "handlers";

/// Read one configuration file. A missing file is not an error.
pub(crate) fn load_table(path: &Path) -> Result<Option<Table>, ThemeConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ThemeConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str::<Table>(&content)
        .map(Some)
        .map_err(|source| ThemeConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
}

/// Merge `overlay` into `base`. Nested tables merge recursively; any other
/// value in `overlay` replaces the one in `base`.
pub fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        let Value::Table(incoming) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(Value::Table(existing)) = base.get_mut(&key) {
            deep_merge(existing, incoming);
        } else {
            base.insert(key, Value::Table(incoming));
        }
    }
}

/// Copy every top-level key of `parent` that `child` does not define.
pub fn fill_missing(child: &mut Table, parent: &Table) {
    for (key, value) in parent {
        if !child.contains_key(key) {
            child.insert(key.clone(), value.clone());
        }
    }
}

/// Look up a dotted key such as `assets.css` in a table.
pub fn lookup<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a Value> {
    let mut parts = dotted_key.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> Table {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn deep_merge_descends_into_tables() {
        let mut base = table("title = \"vendor\"\n[assets]\ncss = \"a.css\"\njs = \"a.js\"");
        deep_merge(&mut base, table("[assets]\ncss = \"b.css\""));
        assert_eq!(lookup(&base, "assets.css").and_then(Value::as_str), Some("b.css"));
        assert_eq!(lookup(&base, "assets.js").and_then(Value::as_str), Some("a.js"));
        assert_eq!(lookup(&base, "title").and_then(Value::as_str), Some("vendor"));
    }

    #[test]
    fn fill_missing_keeps_child_tables_whole() {
        let mut child = table("[assets]\ncss = \"child.css\"");
        fill_missing(&mut child, &table("color = \"red\"\n[assets]\njs = \"parent.js\""));
        assert_eq!(lookup(&child, "color").and_then(Value::as_str), Some("red"));
        assert!(lookup(&child, "assets.js").is_none());
    }
}
