//! The analysis summary document.
//!
//! Field names are a stable contract for downstream tools:
//! `module_count`, `absolute_imports`, `relative_imports`, `modules`,
//! `circular_dependencies`, plus `encapsulation` and `failed_modules`.
//! Per-module maps keep graph (discovery) order.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt::Write as _;

use crate::analysis::Analysis;
use crate::graph::ModuleFailure;
use crate::metrics::ModuleShape;

/// Coupling figures for one module as they appear in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleMetrics {
    pub afferent: usize,
    pub efferent: usize,
    #[serde(serialize_with = "serialize_rounded")]
    pub instability: f64,
}

/// Aggregate result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Modules analyzed successfully.
    pub module_count: usize,
    pub absolute_imports: usize,
    pub relative_imports: usize,
    /// Keyed by module stem; a second module with the same stem is keyed
    /// by its full path instead.
    #[serde(serialize_with = "serialize_ordered")]
    pub modules: Vec<(String, ModuleMetrics)>,
    pub circular_dependencies: Vec<(String, String)>,
    /// Same keys and order as `modules`.
    #[serde(serialize_with = "serialize_ordered")]
    pub encapsulation: Vec<(String, ModuleShape)>,
    pub failed_modules: Vec<ModuleFailure>,
}

impl AnalysisReport {
    pub fn new(analysis: &Analysis) -> Self {
        let graph = &analysis.outcome.graph;
        let counts = graph.import_counts();

        let mut taken = HashSet::new();
        let mut modules = Vec::with_capacity(analysis.coupling.len());
        let mut encapsulation = Vec::with_capacity(analysis.shapes.len());

        for ((module, result), shape) in analysis.coupling.iter().zip(&analysis.shapes) {
            let stem = module.stem();
            let key = if taken.contains(&stem) {
                module.to_string()
            } else {
                stem
            };
            taken.insert(key.clone());

            modules.push((
                key.clone(),
                ModuleMetrics {
                    afferent: result.afferent,
                    efferent: result.efferent,
                    instability: result.instability,
                },
            ));
            encapsulation.push((key, shape.clone()));
        }

        Self {
            module_count: graph.len(),
            absolute_imports: counts.absolute,
            relative_imports: counts.relative,
            modules,
            circular_dependencies: analysis
                .cycles
                .iter()
                .map(|pair| (pair.module_a.clone(), pair.module_b.clone()))
                .collect(),
            encapsulation,
            failed_modules: analysis.outcome.failures.clone(),
        }
    }

    /// Metrics for a module by its report key.
    pub fn module(&self, key: &str) -> Option<&ModuleMetrics> {
        self.modules
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, metrics)| metrics)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary, one line per module.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Analyzed {} module(s).", self.module_count);
        let _ = writeln!(
            out,
            "Absolute imports: {}, Relative imports: {}",
            self.absolute_imports, self.relative_imports
        );

        let _ = writeln!(out, "Module coupling:");
        for (name, m) in &self.modules {
            let _ = writeln!(
                out,
                " - {}: Ca={} Ce={} I={:.2}",
                name, m.afferent, m.efferent, m.instability
            );
        }

        let _ = writeln!(out, "Encapsulation:");
        for (name, shape) in &self.encapsulation {
            let _ = writeln!(
                out,
                " - {}: {} function(s), {} private ({:.0}%), {} line(s)",
                name,
                shape.functions,
                shape.private_functions,
                shape.private_ratio * 100.0,
                shape.line_count
            );
        }

        if self.circular_dependencies.is_empty() {
            let _ = writeln!(out, "No circular dependencies found.");
        } else {
            let _ = writeln!(out, "Circular dependencies detected:");
            for (a, b) in &self.circular_dependencies {
                let _ = writeln!(out, " - {} <-> {}", a, b);
            }
        }

        if !self.failed_modules.is_empty() {
            let _ = writeln!(out, "Failed to analyze {} module(s):", self.failed_modules.len());
            for failure in &self.failed_modules {
                let _ = writeln!(out, " - {}: {}", failure.module, failure.reason);
            }
        }

        out
    }
}

/// Round to two decimals for the report only.
fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// Emit `(key, value)` pairs as a JSON object without reordering them.
#[allow(clippy::ptr_arg)]
fn serialize_ordered<S, V>(entries: &Vec<(String, V)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_map(entries.iter().map(|(key, value)| (key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_from_sources;
    use serde_json::Value;

    fn report(sources: Vec<(&str, &str)>) -> AnalysisReport {
        let outcome = build_from_sources(
            sources
                .into_iter()
                .map(|(p, s)| (p, s.to_string()))
                .collect::<Vec<_>>(),
        );
        Analysis::from_outcome(outcome).report()
    }

    #[test]
    fn test_json_field_names() {
        let report = report(vec![
            ("a.py", "from b import foo\n"),
            ("b.py", "from a import bar\nfrom . import c\n"),
        ]);
        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["module_count"], 2);
        assert_eq!(json["absolute_imports"], 2);
        assert_eq!(json["relative_imports"], 1);
        assert_eq!(json["modules"]["a"]["afferent"], 1);
        assert_eq!(json["modules"]["b"]["efferent"], 2);
        assert_eq!(json["circular_dependencies"][0][0], "a");
        assert_eq!(json["circular_dependencies"][0][1], "b");
        assert_eq!(json["encapsulation"]["b"]["line_count"], 2);
        assert!(json["failed_modules"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_modules_keep_discovery_order() {
        let report = report(vec![
            ("zeta.py", "import os\n"),
            ("alpha.py", "import sys\n"),
            ("mid.py", ""),
        ]);
        let json = report.to_json().unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        let mid = json.find("\"mid\"").unwrap();
        assert!(zeta < alpha && alpha < mid);

        let keys: Vec<&str> = report.modules.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_instability_rounded_in_json_only() {
        let report = report(vec![
            ("a.py", "from b import x\n"),
            ("c.py", "from b import y\n"),
            ("b.py", "import os\n"),
        ]);
        assert_eq!(report.module("b").unwrap().instability, 1.0 / 3.0);

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["modules"]["b"]["instability"], 0.33);
    }

    #[test]
    fn test_stem_collision_uses_path() {
        let report = report(vec![
            ("pkg1/utils.py", "import os\n"),
            ("pkg2/utils.py", "import sys\n"),
        ]);
        assert_eq!(report.modules.len(), 2);
        assert_eq!(report.modules[0].0, "utils");
        assert!(report.modules[1].0.ends_with("utils.py"));
        assert_eq!(report.encapsulation[1].0, report.modules[1].0);
    }

    #[test]
    fn test_text_summary_lists_failures() {
        let report = report(vec![
            ("ok.py", "import os\n\ndef run():\n    pass\n\ndef _helper():\n    pass\n"),
            ("bad.py", "class :\n"),
        ]);
        let text = report.to_text();
        assert!(text.contains("Analyzed 1 module(s)."));
        assert!(text.contains(" - ok: Ca=0 Ce=1 I=1.00"));
        assert!(text.contains(" - ok: 2 function(s), 1 private (50%), 7 line(s)"));
        assert!(text.contains("No circular dependencies found."));
        assert!(text.contains("Failed to analyze 1 module(s):"));
        assert!(text.contains("bad.py"));
    }
}
