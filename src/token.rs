//! Section vocabulary shared by the annotation parser and the text renderer.

use std::fmt;

/// A section label.
///
/// Each token has a fixed output label (what the renderer prints) and a fixed
/// annotation keyword (what the parser recognises inside an `outline:` block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Document,
    Path,
    Functions,
    Types,
    Fields,
    Methods,
    Operators,
    Params,
    Examples,
    Code,
    Constants,
}

impl Token {
    /// Every token, in declaration order.
    pub const ALL: [Token; 11] = [
        Token::Document,
        Token::Path,
        Token::Functions,
        Token::Types,
        Token::Fields,
        Token::Methods,
        Token::Operators,
        Token::Params,
        Token::Examples,
        Token::Code,
        Token::Constants,
    ];

    /// Label written to rendered output.
    pub const fn label(self) -> &'static str {
        match self {
            Token::Document => "Document",
            Token::Path => "Path",
            Token::Functions => "Functions",
            Token::Types => "Types",
            Token::Fields => "Fields",
            Token::Methods => "Methods",
            Token::Operators => "Operators",
            Token::Params => "Params",
            Token::Examples => "Examples",
            Token::Code => "Code",
            Token::Constants => "Constants",
        }
    }

    /// Keyword used in source annotations, without the trailing colon.
    pub const fn keyword(self) -> &'static str {
        match self {
            Token::Document => "outline",
            Token::Path => "path",
            Token::Functions => "functions",
            Token::Types => "types",
            Token::Fields => "fields",
            Token::Methods => "methods",
            Token::Operators => "operators",
            Token::Params => "params",
            Token::Examples => "examples",
            Token::Code => "code",
            Token::Constants => "constants",
        }
    }

    /// Look up a token by its annotation keyword.
    pub fn from_keyword(word: &str) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.keyword() == word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
