//! Indented text renderer.
//!
//! Every line is `prefix` repeated `depth` times followed by the content and
//! a newline. Each section helper receives the depth it renders at and passes
//! an explicit deeper depth to its children, so sibling sections always line
//! up regardless of which other sections were emitted.

use crate::model::{Document, Field, Function, Type};
use crate::token::Token;
use std::fmt::{self, Write};
use thiserror::Error;

/// Failure while writing rendered output.
///
/// Rendering into memory cannot fail today. The variant exists so a fallible
/// sink can be added without changing the signature of [`render`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write rendered output: {0}")]
    Write(#[from] fmt::Error),
}

/// Render `doc` starting at `depth`, indenting with `prefix` per level.
pub fn render(doc: &Document, depth: usize, prefix: &str) -> Result<Vec<u8>, RenderError> {
    let mut out = Output {
        buf: String::new(),
        prefix,
    };
    render_document(&mut out, doc, depth)?;
    Ok(out.buf.into_bytes())
}

struct Output<'a> {
    buf: String,
    prefix: &'a str,
}

impl Output<'_> {
    fn line(&mut self, depth: usize, text: impl fmt::Display) -> fmt::Result {
        for _ in 0..depth {
            self.buf.push_str(self.prefix);
        }
        writeln!(self.buf, "{}", text)
    }

    fn header(&mut self, depth: usize, token: Token) -> fmt::Result {
        self.line(depth, format_args!("{}:", token))
    }

    /// One output line per line of `text`.
    fn lines(&mut self, depth: usize, text: &str) -> fmt::Result {
        for line in text.split('\n') {
            self.line(depth, line)?;
        }
        Ok(())
    }
}

fn render_document(out: &mut Output, doc: &Document, depth: usize) -> fmt::Result {
    if doc.name.is_empty() {
        out.line(depth, Token::Document)?;
    } else {
        out.line(depth, format_args!("{}: {}", Token::Document, doc.name))?;
    }
    if !doc.path.is_empty() {
        out.line(depth + 1, format_args!("{}: {}", Token::Path, doc.path))?;
    }
    if !doc.description.is_empty() {
        out.line(depth + 1, &doc.description)?;
    }
    if let Some(functions) = &doc.functions {
        render_functions(out, functions, depth + 1)?;
    }
    if let Some(types) = &doc.types {
        render_types(out, types, depth + 1)?;
    }
    Ok(())
}

fn render_functions(out: &mut Output, functions: &[Function], depth: usize) -> fmt::Result {
    out.header(depth, Token::Functions)?;
    for func in functions {
        out.line(depth + 1, &func.signature)?;
        if !func.description.is_empty() {
            out.lines(depth + 2, &func.description)?;
        }
    }
    Ok(())
}

fn render_types(out: &mut Output, types: &[Type], depth: usize) -> fmt::Result {
    out.header(depth, Token::Types)?;
    for t in types {
        out.line(depth + 1, &t.name)?;
        if !t.description.is_empty() {
            out.lines(depth + 2, &t.description)?;
        }
        if !t.fields.is_empty() {
            render_fields(out, &t.fields, depth + 2)?;
        }
    }
    Ok(())
}

fn render_fields(out: &mut Output, fields: &[Field], depth: usize) -> fmt::Result {
    out.header(depth, Token::Fields)?;
    for field in fields {
        if field.type_name.is_empty() {
            out.line(depth + 1, &field.name)?;
        } else {
            out.line(depth + 1, format_args!("{} {}", field.name, field.type_name))?;
        }
    }
    Ok(())
}
