//! Generation configuration for repogen
//!
//! Names the entity struct and repository interface to compile, and controls the layout of the generated file.

/// Default header placed at the top of every generated file.
pub const DEFAULT_HEADER: &str = "// Code generated by repogen. DO NOT EDIT.";

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Entity struct stored by the repository
    pub struct_name: String,
    /// Repository interface to implement
    pub interface_name: String,
    /// Output package; `None` keeps the source package
    pub package_name: Option<String>,
    /// Text for one indentation level
    pub indent: String,
    /// Number of blank lines between top-level declarations
    pub blank_lines_top_level: usize,
    /// Comment line written before the package clause
    pub header_comment: String,
}

impl GeneratorConfig {
    /// Create a config with default layout settings
    pub fn new(struct_name: impl Into<String>, interface_name: impl Into<String>) -> Self {
        Self {
            struct_name: struct_name.into(),
            interface_name: interface_name.into(),
            package_name: None,
            indent: "\t".to_string(),
            blank_lines_top_level: 1,
            header_comment: DEFAULT_HEADER.to_string(),
        }
    }

    /// Set the output package
    pub fn with_package_name(mut self, package: impl Into<String>) -> Self {
        self.package_name = Some(package.into());
        self
    }

    /// Set the indentation unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_blank_lines_top_level(mut self, count: usize) -> Self {
        self.blank_lines_top_level = count;
        self
    }

    pub fn with_header_comment(mut self, header: impl Into<String>) -> Self {
        self.header_comment = header.into();
        self
    }

    /// Package the generated file declares.
    pub fn package_or<'a>(&'a self, source_package: &'a str) -> &'a str {
        self.package_name.as_deref().unwrap_or(source_package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GeneratorConfig {
        GeneratorConfig::new("UserModel", "UserRepository")
    }

    // ========================================
    // Default config tests
    // ========================================

    #[test]
    fn test_default_indent_is_tab() {
        assert_eq!(config().indent, "\t");
    }

    #[test]
    fn test_default_blank_lines_top_level() {
        assert_eq!(config().blank_lines_top_level, 1);
    }

    #[test]
    fn test_default_header() {
        assert_eq!(config().header_comment, "// Code generated by repogen. DO NOT EDIT.");
    }

    #[test]
    fn test_default_keeps_source_package() {
        assert_eq!(config().package_or("user"), "user");
    }

    // ========================================
    // Builder tests
    // ========================================

    #[test]
    fn test_with_package_name() {
        let config = config().with_package_name("repository");
        assert_eq!(config.package_or("user"), "repository");
    }

    #[test]
    fn test_builder_chaining() {
        let config = config()
            .with_indent("    ")
            .with_blank_lines_top_level(2)
            .with_header_comment("// generated");
        assert_eq!(config.indent, "    ");
        assert_eq!(config.blank_lines_top_level, 2);
        assert_eq!(config.header_comment, "// generated");
        assert_eq!(config.struct_name, "UserModel");
        assert_eq!(config.interface_name, "UserRepository");
    }
}
