use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of view a resolver looks up when the identifier omits the type segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// Reusable partials rendered inside layouts and templates.
    Elements,
    /// Page skeletons.
    Layouts,
    /// Full page templates.
    Templates,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [ViewType::Elements, ViewType::Layouts, ViewType::Templates];

    /// Directory name of this view type inside a theme root.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Elements => "elements",
            ViewType::Layouts => "layouts",
            ViewType::Templates => "templates",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elements" | "element" => Ok(ViewType::Elements),
            "layouts" | "layout" => Ok(ViewType::Layouts),
            "templates" | "template" => Ok(ViewType::Templates),
            _ => Err(format!("Unknown view type: {s}")),
        }
    }
}
