//! Encapsulation and size metrics for a single module.

use serde::{Deserialize, Serialize};

use crate::graph::FileExtractions;

/// Share of function names that start with `_`. 0.0 for no functions.
pub fn private_function_ratio(functions: &[String]) -> f64 {
    if functions.is_empty() {
        return 0.0;
    }
    let private = functions.iter().filter(|name| name.starts_with('_')).count();
    private as f64 / functions.len() as f64
}

/// Shape of one module: what it defines and how big it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleShape {
    pub functions: usize,
    pub private_functions: usize,
    pub private_ratio: f64,
    pub line_count: usize,
}

impl ModuleShape {
    pub fn from_extraction(extraction: &FileExtractions) -> Self {
        let private_functions = extraction
            .functions
            .iter()
            .filter(|name| name.starts_with('_'))
            .count();
        Self {
            functions: extraction.functions.len(),
            private_functions,
            private_ratio: private_function_ratio(&extraction.functions),
            line_count: extraction.line_count,
        }
    }
}
