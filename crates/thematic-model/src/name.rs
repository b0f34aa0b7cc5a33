//! Structural parsing of resource identifiers.
//!
//! Identifiers follow `["namespace" "::"] segment ("." segment)*`. Segments may
//! also be separated by `/` or `\`, so `theme/elements/card` and
//! `theme.elements.card` parse to the same parts. Parsing never checks whether
//! a theme or resource exists; that is left to the resolver.

use std::fmt;
use std::str::FromStr;

use crate::error::{NameError, Result};
use crate::view_type::ViewType;

/// Separates the namespace from the rest of an identifier.
pub const NAMESPACE_DELIMITER: &str = "::";

/// Namespace reserved for fully-qualified theme resources.
pub const DEFAULT_NAMESPACE: &str = "thematic";

/// A parsed resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    raw: String,
    namespace: Option<String>,
    segments: Vec<String>,
}

impl ResourceName {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }

        let pieces: Vec<&str> = trimmed.split(NAMESPACE_DELIMITER).collect();
        let (namespace, body) = match pieces.as_slice() {
            [body] => (None, *body),
            [namespace, body] => {
                if namespace.trim().is_empty() {
                    return Err(NameError::EmptyNamespace {
                        raw: raw.to_string(),
                    });
                }
                (Some(namespace.trim().to_string()), *body)
            }
            _ => {
                return Err(NameError::TooManyNamespaces {
                    raw: raw.to_string(),
                });
            }
        };

        let segments: Vec<String> = body
            .split(['.', '/', '\\'])
            .map(|segment| segment.trim().to_string())
            .collect();
        if segments.iter().any(String::is_empty) {
            return Err(NameError::EmptySegment {
                raw: raw.to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            namespace,
            segments,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// First segment. For a bare name this is the only segment.
    pub fn theme(&self) -> &str {
        &self.segments[0]
    }

    /// Second segment, only when the identifier has at least three segments.
    pub fn resource_type(&self) -> Option<&str> {
        if self.segments.len() > 2 {
            Some(&self.segments[1])
        } else {
            None
        }
    }

    /// The resource name part.
    ///
    /// With two or three segments this is the last one; with more, everything
    /// after the type segment joined by dots. A bare name has no separate
    /// resource part and yields `None`.
    pub fn name(&self) -> Option<String> {
        match self.segments.len() {
            0 | 1 => None,
            2 | 3 => self.segments.last().cloned(),
            _ => Some(self.segments[2..].join(".")),
        }
    }

    /// Segments joined with `delimiter`, namespace dropped.
    pub fn name_without_namespace(&self, delimiter: &str) -> String {
        self.segments.join(delimiter)
    }

    /// True for `<reserved>::theme.type.name[...]`, i.e. a fully-qualified
    /// identifier that needs no contextual theme inference.
    pub fn is_namespaced_theme_view(&self, reserved: &str) -> bool {
        self.namespace() == Some(reserved) && self.segments.len() >= 3
    }

    pub fn is_namespaced_view_of_type(&self, reserved: &str, view_type: ViewType) -> bool {
        self.is_namespaced_theme_view(reserved) && self.resource_type() == Some(view_type.as_str())
    }
}

impl FromStr for ResourceName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_separator() {
        let name = ResourceName::parse(r"base/elements\card.header").unwrap();
        assert_eq!(name.segments(), ["base", "elements", "card", "header"]);
        assert_eq!(name.name().as_deref(), Some("card.header"));
    }

    #[test]
    fn namespace_is_trimmed() {
        let name = ResourceName::parse(" thematic ::base.elements.card").unwrap();
        assert_eq!(name.namespace(), Some("thematic"));
        assert!(name.is_namespaced_theme_view(DEFAULT_NAMESPACE));
    }
}
