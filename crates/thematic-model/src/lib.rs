pub mod conventions;
pub mod error;
pub mod name;
pub mod view_type;

pub use conventions::{CASE_INSENSITIVE_FS, Conventions, KNOWN_STYLE_EXTENSIONS, file_names_match};
pub use error::{NameError, Result};
pub use name::{DEFAULT_NAMESPACE, NAMESPACE_DELIMITER, ResourceName};
pub use view_type::ViewType;
