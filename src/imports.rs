//! Import tracking: which external namespaces the emitted schemas reference,
//! and under which local alias.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::GenError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    pub alias: String,
    pub namespace: String,
}

impl ImportRecord {
    /// `alias "namespace"`
    pub fn line(&self) -> String {
        format!("{} \"{}\"", self.alias, self.namespace)
    }
}

/// One per generation run, shared by every `generate` call of that run.
///
/// Aliases come from the last path segment and widen with preceding segments
/// on collision (`bar/foo` → `bar_foo`). The first namespace to claim an alias
/// keeps it, so identical input order gives identical aliases.
#[derive(Debug, Clone)]
pub struct ImportTracker {
    local: String,
    by_namespace: IndexMap<String, String>,
    by_alias: BTreeMap<String, String>,
}

impl ImportTracker {
    /// `local` is the namespace the generated file lives in; it is never
    /// listed as an import.
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            by_namespace: IndexMap::new(),
            by_alias: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, namespace: &str) -> Result<String, GenError> {
        if let Some(alias) = self.by_namespace.get(namespace) {
            return Ok(alias.clone());
        }

        let mut taken = None;
        for alias in alias_candidates(namespace) {
            match self.by_alias.get(&alias) {
                None => {
                    tracing::trace!(%namespace, %alias, "import registered");
                    self.by_alias.insert(alias.clone(), namespace.to_string());
                    self.by_namespace.insert(namespace.to_string(), alias.clone());
                    return Ok(alias);
                }
                Some(existing) => taken = Some((alias, existing.clone())),
            }
        }

        let (alias, existing) = taken.unwrap_or_default();
        Err(GenError::AliasCollision { alias, namespace: namespace.to_string(), existing })
    }

    /// Register every namespace or none of them.
    pub fn add_all<I, S>(&mut self, namespaces: I) -> Result<(), GenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut staged = self.clone();
        for namespace in namespaces {
            staged.add(namespace.as_ref())?;
        }
        *self = staged;
        Ok(())
    }

    /// Imports sorted by alias, local namespace excluded.
    pub fn records(&self) -> Vec<ImportRecord> {
        self.by_alias
            .iter()
            .filter(|(_, namespace)| **namespace != self.local)
            .map(|(alias, namespace)| ImportRecord {
                alias: alias.clone(),
                namespace: namespace.clone(),
            })
            .collect()
    }

    pub fn import_lines(&self) -> Vec<String> {
        self.records().iter().map(ImportRecord::line).collect()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn alias_candidates(namespace: &str) -> Vec<String> {
    let segments: Vec<&str> = namespace.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return vec![sanitize(namespace)];
    }
    (1..=segments.len())
        .map(|n| sanitize(&segments[segments.len() - n..].join("_")))
        .collect()
}

fn sanitize(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_is_the_alias() {
        let mut it = ImportTracker::new("base/foo");
        assert_eq!(it.add("github.com/go-openapi/spec").unwrap(), "spec");
        assert_eq!(it.add("k8s.io/api/core/v1").unwrap(), "v1");
        assert_eq!(it.add("example.com/go-kit").unwrap(), "go_kit");
        assert_eq!(it.add("example.com/3d").unwrap(), "_3d");
    }

    #[test]
    fn adding_twice_is_a_noop() {
        let mut it = ImportTracker::new("base/foo");
        it.add("base/bar").unwrap();
        it.add("base/bar").unwrap();
        assert_eq!(it.import_lines(), vec![r#"bar "base/bar""#]);
    }

    #[test]
    fn collisions_widen_with_parent_segments() {
        let mut it = ImportTracker::new("local");
        assert_eq!(it.add("a/v1").unwrap(), "v1");
        assert_eq!(it.add("b/v1").unwrap(), "b_v1");
        assert_eq!(it.add("x/b/v1").unwrap(), "x_b_v1");
        assert_eq!(it.add("a/v1").unwrap(), "v1");
    }

    #[test]
    fn exhausted_candidates_report_collision() {
        let mut it = ImportTracker::new("local");
        it.add("a/b-c").unwrap(); // b_c
        it.add("z/a/b_c").unwrap(); // b_c taken → a_b_c
        let err = it.add("a/b_c").unwrap_err();
        assert_eq!(
            err,
            GenError::AliasCollision {
                alias: "a_b_c".into(),
                namespace: "a/b_c".into(),
                existing: "z/a/b_c".into(),
            }
        );
    }

    #[test]
    fn add_all_is_all_or_nothing() {
        let mut it = ImportTracker::new("local");
        it.add("z/a/b_c").unwrap(); // b_c
        it.add("y/a/b_c").unwrap(); // a_b_c
        let before = it.import_lines();

        let err = it.add_all(["github.com/go-openapi/spec", "q/v1", "a/b_c"]).unwrap_err();
        assert!(matches!(err, GenError::AliasCollision { ref namespace, .. } if namespace == "a/b_c"));
        assert_eq!(it.import_lines(), before);

        it.add_all(["github.com/go-openapi/spec", "q/v1"]).unwrap();
        assert_eq!(it.import_lines().len(), before.len() + 2);
    }

    #[test]
    fn lines_are_sorted_by_alias_and_skip_local() {
        let mut it = ImportTracker::new("base/foo");
        it.add("github.com/go-openapi/spec").unwrap();
        it.add("base/foo").unwrap();
        it.add("base/bar").unwrap();
        assert_eq!(
            it.import_lines(),
            vec![r#"bar "base/bar""#, r#"spec "github.com/go-openapi/spec""#]
        );
    }

    #[test]
    fn stable_for_identical_input() {
        let run = || {
            let mut it = ImportTracker::new("local");
            for ns in ["a/v1", "b/v1", "c/d", "a/v1"] {
                it.add(ns).unwrap();
            }
            it.import_lines()
        };
        assert_eq!(run(), run());
    }
}
