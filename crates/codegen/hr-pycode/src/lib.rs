//! Python dialect printer
//!
//! Renders AST nodes back to Python source. The same printer also knows the
//! foreign-interop dialect: printing a [`hr_ast::ForeignFunction`] produces a
//! thin wrapper with a static header pragma, and the interface nodes produce
//! the imports that rebind exported wrappers under their original names.

pub mod error;
mod foreign;
mod precedence;
pub mod printer;

pub use error::PrintError;
pub use printer::PythonCodePrinter;

use hr_ast::Node;
use serde::Deserialize;

/// Printer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrinterSettings {
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Prefix of generated wrapper names
    pub wrapper_prefix: String,
    /// Memory order recorded for multi-dimensional array arguments
    pub array_order: String,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            indent_width: 4,
            wrapper_prefix: "f2py_".to_string(),
            array_order: "F".to_string(),
        }
    }
}

/// Print `node` as Python with default settings
pub fn pycode(node: &Node) -> Result<String, PrintError> {
    PythonCodePrinter::new(PrinterSettings::default()).doprint(node)
}
