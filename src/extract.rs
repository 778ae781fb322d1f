#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Best-effort lexical scan for declared class and method names.
//!
//! Nothing here parses Java. Both scans are plain pattern matches over the raw
//! text, so declarations inside comments and string literals are reported too,
//! and some non-declarations that happen to look like `Type name(` (for
//! example `new Foo(` or `return call(`) show up as methods. Malformed input
//! simply yields fewer matches.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{CLASS_PATTERN, METHOD_PATTERN},
    source::SourceUnit,
};

/// Compiled [`CLASS_PATTERN`].
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLASS_PATTERN).expect("valid class regex"));

/// Compiled [`METHOD_PATTERN`].
static METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(METHOD_PATTERN).expect("valid method regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Class and method names found in one source unit
pub struct EntityReport {
    /// name of the unit the report was extracted from
    pub file:    String,
    /// class names, in order of appearance, duplicates kept
    pub classes: Vec<String>,
    /// method names, in order of appearance, duplicates kept
    pub methods: Vec<String>,
}

impl EntityReport {
    /// Scans `unit` and returns its report.
    pub fn of(unit: &SourceUnit) -> Self {
        extract(unit.name(), unit.content())
    }
}

/// Scans `text` and files the result under `file`.
pub fn extract(file: &str, text: &str) -> EntityReport {
    let report = EntityReport {
        file:    file.to_string(),
        classes: classes(text),
        methods: methods(text),
    };
    tracing::debug!(
        "{file}: {} class(es), {} method(s)",
        report.classes.len(),
        report.methods.len()
    );
    report
}

/// Every `class <name>` occurrence in `text`.
pub fn classes(text: &str) -> Vec<String> {
    captures(&CLASS_RE, text)
}

/// Every method-shaped declaration in `text`.
pub fn methods(text: &str) -> Vec<String> {
    captures(&METHOD_RE, text)
}

/// Collects capture group 1 of each non-overlapping match.
fn captures(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: &str = r#"package demo;

import java.util.List;

public class Shapes {
    private final List<String> names = new ArrayList<>();

    public static <T> T first(List<T> xs) { return xs.get(0); }

    protected abstract int[] area ();

    public Map<String, Integer> counts() { return null; }

    static class Inner {
        synchronized void tick() {}
    }
}
"#;

    #[test]
    fn finds_classes_and_methods_in_order() {
        let report = extract("Foo.java", "class Foo { void bar() {} } class Baz {}");
        assert_eq!(report.file, "Foo.java");
        assert_eq!(report.classes, ["Foo", "Baz"]);
        assert_eq!(report.methods, ["bar"]);
    }

    #[test]
    fn modifiers_are_not_reported() {
        assert_eq!(methods("public static void run(int x) {}"), ["run"]);
        assert_eq!(methods("native long handle();"), ["handle"]);
    }

    #[test]
    fn handles_generics_arrays_and_inner_classes() {
        assert_eq!(classes(SHAPES), ["Shapes", "Inner"]);
        assert_eq!(methods(SHAPES), ["first", "area", "counts", "tick"]);
    }

    #[test]
    fn comments_and_strings_are_not_special() {
        let text = "// class Ghost lives here\nString s = \"class Phantom\";";
        assert_eq!(classes(text), ["Ghost", "Phantom"]);
    }

    #[test]
    fn text_without_the_keyword_has_no_classes() {
        assert!(classes("interface Shape { double area(); }").is_empty());
        assert!(classes("").is_empty());
    }

    #[test]
    fn field_initialisers_are_not_methods() {
        assert!(methods("int x = compute(3);").is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let text = "class A { void go() {} } class A { void go() {} }";
        assert_eq!(classes(text), ["A", "A"]);
        assert_eq!(methods(text), ["go", "go"]);
    }

    #[test]
    fn broken_source_still_scans() {
        let report = extract("Broken.java", "public class Half { public void start(");
        assert_eq!(report.classes, ["Half"]);
        assert_eq!(report.methods, ["start"]);
    }

    #[test]
    fn same_input_same_report() {
        assert_eq!(extract("S.java", SHAPES), extract("S.java", SHAPES));
    }
}
