//! Annotation parser: locate `outline:` blocks in source text and build
//! documents from them.

mod block;
mod outline;

use crate::model::Docs;
use thiserror::Error;

/// A block that cannot be turned into a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: duplicate `{section}:` section")]
    DuplicateSection { section: &'static str, line: usize },

    #[error("line {line}: `{section}:` is not allowed in {scope}")]
    MisplacedSection {
        section: &'static str,
        scope: &'static str,
        line: usize,
    },
}

/// Parse every outline block in `source`, in the order they appear.
pub fn parse(source: &str) -> Result<Docs, ParseError> {
    block::find_blocks(source)
        .iter()
        .map(|b| {
            tracing::debug!(name = %b.name, line = b.line, "found outline block");
            outline::build_document(b)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIME: &str = r#"package time

/*Package time defines time primitives for starlark

  outline: time
    time defines time primitives for starlark
    path: time
    functions:
      duration(string) duration
        parse a duration
      time(string, format=..., location=...) time
        parse a time
    types:
      duration
        the elapsed time between two instants
        fields:
          hours float
          minutes float
        operators:
          duration - time = duration
      time
        an instant in time
*/
package time
"#;

    #[test]
    fn parse_block_comment() {
        let docs = parse(TIME).unwrap();
        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.name, "time");
        assert_eq!(doc.path, "time");
        assert_eq!(doc.description, "time defines time primitives for starlark");

        let functions = doc.functions.as_ref().unwrap();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].name, "duration");
        assert_eq!(functions[0].return_type, "duration");
        assert_eq!(functions[1].description, "parse a time");

        let types = doc.types.as_ref().unwrap();
        assert_eq!(types[0].fields.len(), 2);
        assert_eq!(types[0].operators[0].symbol, "duration - time = duration");
        assert!(doc.constants.is_none());
    }

    #[test]
    fn multiple_blocks_in_source_order() {
        let src = "# outline: b\n#   path: b.star\n\n# outline: a\n#   path: a.star\n";
        let docs = parse(src).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn no_blocks() {
        assert!(parse("fn main() {}\n").unwrap().is_empty());
    }

    #[test]
    fn error_carries_line_number() {
        let src = "// outline: x\n//   functions:\n//   functions:\n";
        let err = parse(src).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateSection {
                section: "functions",
                line: 3
            }
        );
        assert_eq!(err.to_string(), "line 3: duplicate `functions:` section");
    }
}
