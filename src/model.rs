//! Data model for outline documentation.
//!
//! Sections that may be missing from a block (`functions`, `types`,
//! `constants`) are `Option<Vec<_>>`. `None` means the block never declared
//! the section. `Some(vec![])` means it declared the section with no entries.
//! The renderer treats these two cases differently.

/// An ordered collection of documents, possibly gathered from many inputs.
pub type Docs = Vec<Document>;

/// Which member lists a document alphabetizes when sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub functions: bool,
    pub types: bool,
    pub constants: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            functions: true,
            types: true,
            constants: true,
        }
    }
}

/// One documentation unit, usually a single `outline:` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    sort_config: SortConfig,
    /// Empty for an anonymous document
    pub name: String,
    pub path: String,
    pub description: String,
    pub functions: Option<Vec<Function>>,
    pub types: Option<Vec<Type>>,
    pub constants: Option<Vec<Constant>>,
}

impl Document {
    /// Create an empty document whose member ordering follows `sort_config`.
    pub fn new(sort_config: SortConfig) -> Self {
        Self {
            sort_config,
            ..Default::default()
        }
    }

    pub fn sort_config(&self) -> SortConfig {
        self.sort_config
    }

    /// All examples attached to functions and type methods, in document order.
    pub fn examples(&self) -> Vec<&Example> {
        let functions = self.functions.iter().flatten();
        let methods = self.types.iter().flatten().flat_map(|t| &t.methods);
        functions
            .chain(methods)
            .flat_map(|f| &f.examples)
            .collect()
    }
}

/// A documented function or type method.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct Function {
    pub name: String,
    /// Owning type name; empty for free functions
    pub receiver: String,
    /// Call form, e.g. `duration(s) duration`. Used for display and ordering.
    pub signature: String,
    pub description: String,
    pub params: Vec<Param>,
    pub return_type: String,
    pub examples: Vec<Example>,
}

/// A function argument.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct Param {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
    pub description: String,
}

/// A constructed type.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct Type {
    pub name: String,
    pub description: String,
    pub methods: Vec<Function>,
    pub fields: Vec<Field>,
    pub operators: Vec<Operator>,
}

/// A property of a [`Type`].
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct Field {
    pub name: String,
    /// May be empty
    pub type_name: String,
    pub description: String,
}

/// An operation a [`Type`] supports, e.g. `duration + duration = duration`.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct Operator {
    pub symbol: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct Example {
    pub name: String,
    pub description: String,
    /// Literal source, dedented, with relative indentation and blank lines
    /// kept as written
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[allow(dead_code)]
pub struct Constant {
    pub name: String,
    pub description: String,
}
