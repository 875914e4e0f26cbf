//! Turn a scanned block into a [`Document`].
//!
//! Block lines are nested by indentation, then each scope (document,
//! function, type, ...) reads its children. A child whose text is a section
//! keyword followed by `:` opens that section; any other child is
//! description text. `path:` is the only keyword that takes a value, and
//! only a document has one, so elsewhere `path: ...` reads as description.

use super::block::{Block, BlockLine};
use super::ParseError;
use crate::model::*;
use crate::token::Token;

/// A block line and the deeper-indented lines under it.
#[derive(Debug)]
struct Node<'a> {
    line: &'a BlockLine,
    children: Vec<Node<'a>>,
}

impl<'a> Node<'a> {
    fn text(&self) -> &'a str {
        self.line.text()
    }

    /// This line and all descendants, depth-first.
    fn flatten(&self, out: &mut Vec<&'a BlockLine>) {
        out.push(self.line);
        for child in &self.children {
            child.flatten(out);
        }
    }
}

fn build_tree(lines: &[BlockLine]) -> Vec<Node<'_>> {
    let mut nodes = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let head = &lines[i];
        let end = lines[i + 1..]
            .iter()
            .position(|l| l.indent <= head.indent)
            .map_or(lines.len(), |p| i + 1 + p);
        nodes.push(Node {
            line: head,
            children: build_tree(&lines[i + 1..end]),
        });
        i = end;
    }
    nodes
}

/// Children of one scope, split into sections and description lines.
struct Scope<'n, 'a> {
    name: &'static str,
    allowed: &'static [Token],
    seen: Vec<Token>,
    text: Vec<&'a str>,
    nodes: std::slice::Iter<'n, Node<'a>>,
}

/// One child of a scope.
enum Entry<'n, 'a> {
    /// `keyword: value` header and its nested nodes
    Section(Token, &'a str, &'n Node<'a>),
    Text,
}

impl<'n, 'a> Scope<'n, 'a> {
    fn new(name: &'static str, allowed: &'static [Token], nodes: &'n [Node<'a>]) -> Self {
        Self {
            name,
            allowed,
            seen: Vec::new(),
            text: Vec::new(),
            nodes: nodes.iter(),
        }
    }

    /// Next section header, collecting description text along the way.
    fn next_section(&mut self) -> Result<Option<(Token, &'a str, &'n Node<'a>)>, ParseError> {
        for node in self.nodes.by_ref() {
            match classify(node, self.allowed) {
                Entry::Section(token, value, node) => {
                    if !self.allowed.contains(&token) {
                        return Err(ParseError::MisplacedSection {
                            section: token.keyword(),
                            scope: self.name,
                            line: node.line.number,
                        });
                    }
                    if self.seen.contains(&token) {
                        return Err(ParseError::DuplicateSection {
                            section: token.keyword(),
                            line: node.line.number,
                        });
                    }
                    self.seen.push(token);
                    return Ok(Some((token, value, node)));
                }
                Entry::Text => {
                    let mut lines = Vec::new();
                    node.flatten(&mut lines);
                    self.text.extend(lines.iter().map(|l| l.text()));
                }
            }
        }
        Ok(None)
    }

    fn description(&self, separator: &str) -> String {
        self.text.join(separator)
    }
}

fn classify<'n, 'a>(node: &'n Node<'a>, allowed: &[Token]) -> Entry<'n, 'a> {
    let Some((key, value)) = node.text().split_once(':') else {
        return Entry::Text;
    };
    let value = value.trim();
    match Token::from_keyword(key.trim_end()) {
        // `path` carries a value, but only where a path belongs; every other
        // section header stands alone.
        Some(Token::Path) if allowed.contains(&Token::Path) => {
            Entry::Section(Token::Path, value, node)
        }
        Some(token) if value.is_empty() => Entry::Section(token, value, node),
        _ => Entry::Text,
    }
}

/// Build a document from one outline block.
pub fn build_document(block: &Block) -> Result<Document, ParseError> {
    let tree = build_tree(&block.lines);
    let mut doc = Document::new(SortConfig::default());
    doc.name = block.name.clone();

    let mut scope = Scope::new(
        "a document",
        &[Token::Path, Token::Functions, Token::Types, Token::Constants],
        &tree,
    );
    while let Some((token, value, node)) = scope.next_section()? {
        match token {
            Token::Path => doc.path = value.to_string(),
            Token::Functions => {
                let functions: Vec<Function> = node
                    .children
                    .iter()
                    .map(|n| build_function(n, ""))
                    .collect::<Result<_, _>>()?;
                doc.functions = Some(functions);
            }
            Token::Types => {
                let types: Vec<Type> = node
                    .children
                    .iter()
                    .map(build_type)
                    .collect::<Result<_, _>>()?;
                doc.types = Some(types);
            }
            Token::Constants => {
                let constants: Vec<Constant> = node
                    .children
                    .iter()
                    .map(build_constant)
                    .collect::<Result<_, _>>()?;
                doc.constants = Some(constants);
            }
            _ => unreachable!("scope only yields allowed sections"),
        }
    }
    doc.description = scope.description(" ");

    Ok(doc)
}

fn build_function(node: &Node, receiver: &str) -> Result<Function, ParseError> {
    let signature = node.text();
    let name = signature.split('(').next().unwrap_or(signature).trim();
    let return_type = signature
        .rfind(')')
        .map_or("", |pos| signature[pos + 1..].trim());

    let mut func = Function {
        name: name.to_string(),
        receiver: receiver.to_string(),
        signature: signature.to_string(),
        return_type: return_type.to_string(),
        ..Default::default()
    };

    let mut scope = Scope::new(
        "a function",
        &[Token::Params, Token::Examples],
        &node.children,
    );
    while let Some((token, _, section)) = scope.next_section()? {
        match token {
            Token::Params => {
                func.params = section
                    .children
                    .iter()
                    .map(build_param)
                    .collect::<Result<_, _>>()?;
            }
            Token::Examples => {
                func.examples = section
                    .children
                    .iter()
                    .map(build_example)
                    .collect::<Result<_, _>>()?;
            }
            _ => unreachable!("scope only yields allowed sections"),
        }
    }
    func.description = scope.description("\n");

    Ok(func)
}

/// Split `name type` on the first run of whitespace.
fn split_name_type(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((name, ty)) => (name, ty.trim()),
        None => (text, ""),
    }
}

fn build_param(node: &Node) -> Result<Param, ParseError> {
    let (name, type_name) = split_name_type(node.text());
    let (name, optional) = match name.strip_suffix('?') {
        Some(stripped) => (stripped, true),
        None => (name, false),
    };
    Ok(Param {
        name: name.to_string(),
        type_name: type_name.to_string(),
        optional,
        description: leaf_description(node, "a param")?,
    })
}

fn build_example(node: &Node) -> Result<Example, ParseError> {
    let mut example = Example {
        name: node.text().to_string(),
        ..Default::default()
    };
    let mut scope = Scope::new("an example", &[Token::Code], &node.children);
    while let Some((_, _, section)) = scope.next_section()? {
        example.code = literal_code(section);
    }
    example.description = scope.description("\n");
    Ok(example)
}

/// Descendants of a `code:` header, dedented to their shallowest line.
/// Blank lines between them are restored.
fn literal_code(section: &Node) -> String {
    let mut lines = Vec::new();
    for child in &section.children {
        child.flatten(&mut lines);
    }
    let min = lines.iter().map(|l| l.indent).min().unwrap_or(0);
    let mut code = String::new();
    for (n, line) in lines.iter().enumerate() {
        if n > 0 {
            code.push('\n');
            for _ in 0..line.blank_before {
                code.push('\n');
            }
        }
        code.extend(line.raw.chars().skip(min));
    }
    code
}

fn build_type(node: &Node) -> Result<Type, ParseError> {
    let mut t = Type {
        name: node.text().to_string(),
        ..Default::default()
    };
    let mut scope = Scope::new(
        "a type",
        &[Token::Fields, Token::Methods, Token::Operators],
        &node.children,
    );
    while let Some((token, _, section)) = scope.next_section()? {
        match token {
            Token::Fields => {
                t.fields = section
                    .children
                    .iter()
                    .map(build_field)
                    .collect::<Result<_, _>>()?;
            }
            Token::Methods => {
                t.methods = section
                    .children
                    .iter()
                    .map(|n| build_function(n, &t.name))
                    .collect::<Result<_, _>>()?;
            }
            Token::Operators => {
                t.operators = section
                    .children
                    .iter()
                    .map(build_operator)
                    .collect::<Result<_, _>>()?;
            }
            _ => unreachable!("scope only yields allowed sections"),
        }
    }
    t.description = scope.description("\n");
    Ok(t)
}

fn build_field(node: &Node) -> Result<Field, ParseError> {
    let (name, type_name) = split_name_type(node.text());
    Ok(Field {
        name: name.to_string(),
        type_name: type_name.to_string(),
        description: leaf_description(node, "a field")?,
    })
}

fn build_operator(node: &Node) -> Result<Operator, ParseError> {
    Ok(Operator {
        symbol: node.text().to_string(),
        description: leaf_description(node, "an operator")?,
    })
}

fn build_constant(node: &Node) -> Result<Constant, ParseError> {
    Ok(Constant {
        name: node.text().to_string(),
        description: leaf_description(node, "a constant")?,
    })
}

/// Description of a node that has no sections of its own.
fn leaf_description(node: &Node, scope_name: &'static str) -> Result<String, ParseError> {
    let mut scope = Scope::new(scope_name, &[], &node.children);
    scope.next_section()?;
    Ok(scope.description("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::block::find_blocks;

    fn build(src: &str) -> Result<Document, ParseError> {
        let blocks = find_blocks(src);
        assert_eq!(blocks.len(), 1, "expected one block in {:?}", src);
        build_document(&blocks[0])
    }

    #[test]
    fn document_sections() {
        let doc = build(
            "outline: re\n  regular expressions\n  for starlark\n  path: re\n  constants:\n    IGNORECASE\n      match case-insensitively\n",
        )
        .unwrap();
        assert_eq!(doc.name, "re");
        assert_eq!(doc.path, "re");
        assert_eq!(doc.description, "regular expressions for starlark");
        assert!(doc.functions.is_none());
        assert!(doc.types.is_none());
        let constants = doc.constants.unwrap();
        assert_eq!(constants[0].name, "IGNORECASE");
        assert_eq!(constants[0].description, "match case-insensitively");
    }

    #[test]
    fn empty_section_is_present() {
        let doc = build("outline: foo\n  functions:\n").unwrap();
        assert_eq!(doc.functions, Some(vec![]));
    }

    #[test]
    fn function_details() {
        let src = "\
outline: http
  functions:
    get(url, params?=None) response
      perform an HTTP GET
      and return the response
      params:
        url string
          target address
        params? dict
      examples:
        basic
          fetch a page
          code:
            res = http.get(\"https://example.com\")
            if res.status_code == 200:
                print(res.body())
";
        let doc = build(src).unwrap();
        let f = &doc.functions.unwrap()[0];
        assert_eq!(f.name, "get");
        assert_eq!(f.receiver, "");
        assert_eq!(f.signature, "get(url, params?=None) response");
        assert_eq!(f.return_type, "response");
        assert_eq!(f.description, "perform an HTTP GET\nand return the response");

        assert_eq!(f.params.len(), 2);
        assert_eq!(f.params[0].name, "url");
        assert_eq!(f.params[0].type_name, "string");
        assert!(!f.params[0].optional);
        assert_eq!(f.params[0].description, "target address");
        assert_eq!(f.params[1].name, "params");
        assert!(f.params[1].optional);

        let eg = &f.examples[0];
        assert_eq!(eg.name, "basic");
        assert_eq!(eg.description, "fetch a page");
        assert_eq!(
            eg.code,
            "res = http.get(\"https://example.com\")\nif res.status_code == 200:\n    print(res.body())"
        );
    }

    #[test]
    fn signature_without_parens() {
        let doc = build("outline: x\n  functions:\n    version\n").unwrap();
        let f = &doc.functions.unwrap()[0];
        assert_eq!(f.name, "version");
        assert_eq!(f.return_type, "");
    }

    #[test]
    fn type_members() {
        let src = "\
outline: time
  types:
    duration
      elapsed time
      fields:
        hours float
          hours as a float
        raw
      methods:
        round(m) duration
          round to a multiple of m
      operators:
        duration + duration = duration
          addition
";
        let doc = build(src).unwrap();
        let t = &doc.types.unwrap()[0];
        assert_eq!(t.name, "duration");
        assert_eq!(t.description, "elapsed time");
        assert_eq!(t.fields[0].name, "hours");
        assert_eq!(t.fields[0].type_name, "float");
        assert_eq!(t.fields[0].description, "hours as a float");
        assert_eq!(t.fields[1].name, "raw");
        assert_eq!(t.fields[1].type_name, "");
        assert_eq!(t.methods[0].receiver, "duration");
        assert_eq!(t.methods[0].name, "round");
        assert_eq!(t.operators[0].symbol, "duration + duration = duration");
        assert_eq!(t.operators[0].description, "addition");
    }

    #[test]
    fn keyword_with_value_is_description() {
        let doc = build("outline: x\n  functions:\n    f()\n      params: none\n").unwrap();
        let f = &doc.functions.unwrap()[0];
        assert_eq!(f.description, "params: none");
        assert!(f.params.is_empty());
    }

    #[test]
    fn path_line_in_function_is_description() {
        let src = "// outline: fs\n//   functions:\n//     open(p) file\n//       path: absolute location of the file\n";
        let doc = build(src).unwrap();
        let f = &doc.functions.unwrap()[0];
        assert_eq!(f.description, "path: absolute location of the file");
        assert_eq!(doc.path, "");
    }

    #[test]
    fn path_line_in_type_and_example_is_description() {
        let src = "\
outline: fs
  types:
    file
      path: where it was opened
  functions:
    open(p) file
      examples:
        tmp
          path: under /tmp
";
        let doc = build(src).unwrap();
        assert_eq!(doc.types.unwrap()[0].description, "path: where it was opened");
        let eg = &doc.functions.unwrap()[0].examples[0];
        assert_eq!(eg.description, "path: under /tmp");
    }

    #[test]
    fn code_keeps_blank_lines() {
        let src = "\
# outline: x
#   functions:
#     f()
#       examples:
#         two steps
#           code:
#             a = 1
#
#
#             def g():
#                 return a
#
#               # deeper
";
        let doc = build(src).unwrap();
        let eg = &doc.functions.unwrap()[0].examples[0];
        assert_eq!(
            eg.code,
            "a = 1\n\n\ndef g():\n    return a\n\n  # deeper"
        );
    }

    #[test]
    fn javadoc_block_keeps_sections() {
        let src = "/** outline: x\n *   path: p\n *   functions:\n *     f()\n */\n";
        let doc = build(src).unwrap();
        assert_eq!(doc.path, "p");
        assert_eq!(doc.functions.unwrap()[0].name, "f");
    }

    #[test]
    fn unknown_keys_are_description() {
        let doc = build("outline: x\n  note: experimental\n").unwrap();
        assert_eq!(doc.description, "note: experimental");
    }

    #[test]
    fn misplaced_section() {
        let err = build("outline: x\n  fields:\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MisplacedSection {
                section: "fields",
                scope: "a document",
                line: 2
            }
        );

        let err = build("outline: x\n  constants:\n    PI\n      code:\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MisplacedSection {
                section: "code",
                scope: "a constant",
                line: 4
            }
        ));
    }

    #[test]
    fn duplicate_section() {
        let err = build("outline: x\n  path: a\n  path: b\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateSection {
                section: "path",
                line: 3
            }
        );
    }

    #[test]
    fn irregular_indentation_nests_by_nearest_shallower_line() {
        let doc = build("outline: x\n  functions:\n      f()\n    g()\n        g body\n").unwrap();
        let sigs: Vec<_> = doc
            .functions
            .unwrap()
            .into_iter()
            .map(|f| (f.signature, f.description))
            .collect();
        assert_eq!(
            sigs,
            [
                ("f()".to_string(), String::new()),
                ("g()".to_string(), "g body".to_string())
            ]
        );
    }
}
