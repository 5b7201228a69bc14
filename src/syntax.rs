// This file is part of gmake-syntax, a library for reading and writing GNU Makefiles.
// Copyright (C) 2026 gmake-syntax contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The positioned concrete syntax tree.
//!
//! Every node here carries enough position information to be printed back
//! out byte-for-byte (see [`crate::printer`]). Rather than the marker
//! trait plus downcast that a dynamically-typed tree would use to express
//! "this is an `Object`" or "this is an `Expression`", each abstract
//! category is a plain Rust enum: [`Object`], [`Expression`], [`Directive`],
//! [`IfCondition`]. Matching on them is exhaustive, so adding a variant
//! without updating the printer or walker is a compile error, not a
//! silently-dropped case.
//!
//! The tree owns everything beneath it: there are no parent pointers.
//! Traversal order, and hence any parent context a caller needs, is
//! reconstructed by [`crate::walk`].

use crate::keyword::Keyword;
use crate::source::Position;

/// The root of a parsed or hand-built Makefile.
#[derive(Clone, Debug, PartialEq)]
pub struct File {
    pub start: Position,
    pub end: Position,
    pub objects: Vec<Object>,
}

impl File {
    /// The position of the file's first object, or `start` if it has none.
    #[must_use]
    pub fn pos(&self) -> Position {
        self.objects.first().map_or(self.start, Object::pos)
    }
}

/// A top-level construct of a Makefile, in file order.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Rule(Rule),
    VariableAssignment(VariableAssignment),
    CommentGroup(CommentGroup),
    Directive(Directive),
}

impl Object {
    #[must_use]
    pub fn pos(&self) -> Position {
        match self {
            Object::Rule(r) => r.pos(),
            Object::VariableAssignment(v) => v.pos(),
            Object::CommentGroup(c) => c.pos(),
            Object::Directive(d) => d.pos(),
        }
    }
}

/// An expression: something that can stand as a target, a prerequisite, a
/// variable name, or a right-hand value.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    TextRun(TextRun),
    VariableReference(VariableReference),
    QuotedExpression(Box<QuotedExpression>),
}

impl Expression {
    #[must_use]
    pub fn pos(&self) -> Position {
        match self {
            Expression::TextRun(t) => t.position,
            Expression::VariableReference(v) => v.dollar,
            Expression::QuotedExpression(q) => q.open,
        }
    }
}

/// A literal run of text: an identifier, filename, number, or path
/// fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub position: Position,
    pub value: String,
}

impl TextRun {
    #[must_use]
    pub fn new(position: Position, value: impl Into<String>) -> Self {
        TextRun {
            position,
            value: value.into(),
        }
    }
}

/// The bracket a [`VariableReference`] is delimited by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefBracket {
    Paren,
    Brace,
}

impl RefBracket {
    #[must_use]
    pub const fn open_char(self) -> char {
        match self {
            RefBracket::Paren => '(',
            RefBracket::Brace => '{',
        }
    }

    #[must_use]
    pub const fn close_char(self) -> char {
        match self {
            RefBracket::Paren => ')',
            RefBracket::Brace => '}',
        }
    }
}

/// `$name`, `$(name)`, or `${name}`.
///
/// `brackets` is `None` for the one-character no-delimiter form (`$f`);
/// otherwise it names the opening bracket and carries the closing
/// position, which is always the matching bracket.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableReference {
    pub dollar: Position,
    pub brackets: Option<RefBracket>,
    pub open: Position,
    pub name: TextRun,
    pub close: Position,
}

/// A single- or double-quoted expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteChar {
    Single,
    Double,
}

impl QuoteChar {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            QuoteChar::Single => '\'',
            QuoteChar::Double => '"',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuotedExpression {
    pub quote: QuoteChar,
    pub open: Position,
    pub inner: Expression,
    pub close: Position,
}

/// `targets: prereqs | order-only-prereqs` followed by zero or more
/// recipe lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub targets: Vec<Expression>,
    pub colon: Position,
    pub prerequisites: Vec<Expression>,
    /// Position of the order-only `|`, or [`Position::NONE`] if there are
    /// no order-only prerequisites.
    pub pipe: Position,
    pub order_only_prerequisites: Vec<Expression>,
    pub recipes: Vec<Recipe>,
}

impl Rule {
    #[must_use]
    pub fn pos(&self) -> Position {
        self.targets.first().map_or(self.colon, Expression::pos)
    }
}

/// The character that introduces a recipe line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipePrefix {
    Tab,
    Semicolon,
    /// The configured `.RECIPEPREFIX` character, when not a tab.
    Custom(char),
}

impl RecipePrefix {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            RecipePrefix::Tab => '\t',
            RecipePrefix::Semicolon => ';',
            RecipePrefix::Custom(c) => c,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub prefix: RecipePrefix,
    pub prefix_position: Position,
    pub body: TextRun,
}

/// One of the six assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Recursive,
    /// `:=`
    Simple,
    /// `::=`
    Posix,
    /// `:::=`
    Immediate,
    /// `?=`
    Ifndef,
    /// `!=`
    Shell,
}

impl AssignOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AssignOp::Recursive => "=",
            AssignOp::Simple => ":=",
            AssignOp::Posix => "::=",
            AssignOp::Immediate => ":::=",
            AssignOp::Ifndef => "?=",
            AssignOp::Shell => "!=",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableAssignment {
    pub name: Expression,
    pub operator: AssignOp,
    pub operator_position: Position,
    pub values: Vec<Expression>,
}

impl VariableAssignment {
    #[must_use]
    pub fn pos(&self) -> Position {
        self.name.pos()
    }
}

/// A single `#`-introduced comment line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub hash: Position,
    pub text: String,
}

/// One or more consecutive comment lines with no blank line between them.
#[derive(Clone, Debug, PartialEq)]
pub struct CommentGroup {
    comments: Vec<Comment>,
}

impl CommentGroup {
    /// Creates a comment group. Panics if `comments` is empty: a comment
    /// group with no comments isn't a meaningful node, and every parser or
    /// builder path that creates one has at least one comment in hand
    /// before it does.
    #[must_use]
    pub fn new(comments: Vec<Comment>) -> Self {
        assert!(
            !comments.is_empty(),
            "a comment group must have at least one comment"
        );
        CommentGroup { comments }
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut [Comment] {
        &mut self.comments
    }

    #[must_use]
    pub fn pos(&self) -> Position {
        self.comments[0].hash
    }
}

/// A control construct interpreted by `make` itself.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    Define(DefineDirective),
    Undefine(UndefineDirective),
    Conditional(ConditionalBlock),
    /// One of the directives that take a plain rest-of-line argument list
    /// and are not otherwise modeled structurally: `vpath`, `include`,
    /// `-include`, `sinclude`, `override`, `export`, `unexport`, `private`.
    Keyword(KeywordDirective),
}

impl Directive {
    #[must_use]
    pub fn pos(&self) -> Position {
        match self {
            Directive::Define(d) => d.define,
            Directive::Undefine(d) => d.keyword,
            Directive::Conditional(c) => c.pos(),
            Directive::Keyword(k) => k.keyword_position,
        }
    }
}

/// `define NAME [=]` ... multi-line body ... `endef`.
///
/// The body is kept as a single opaque [`TextRun`] spanning every line
/// between the `define` line and `endef`: this crate does not parse
/// recipe or Make syntax inside a `define` body, only records it
/// verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineDirective {
    pub define: Position,
    pub name: Expression,
    /// Present when the body is declared with explicit assignment flavor,
    /// e.g. `define NAME :=`.
    pub operator: Option<(AssignOp, Position)>,
    pub body: TextRun,
    pub endef: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UndefineDirective {
    pub keyword: Position,
    pub name: Expression,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalBlock {
    pub head: IfCondition,
    pub body: Vec<Object>,
    pub else_clauses: Vec<ElseClause>,
    pub endif: Position,
}

impl ConditionalBlock {
    #[must_use]
    pub fn pos(&self) -> Position {
        self.head.pos()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElseClause {
    pub else_position: Position,
    /// Present for `else ifeq (...)` / `else ifdef NAME`; absent for a
    /// plain `else`.
    pub head: Option<IfCondition>,
    pub body: Vec<Object>,
}

/// The head of a conditional block or else-clause: `ifeq`/`ifneq` or
/// `ifdef`/`ifndef`.
#[derive(Clone, Debug, PartialEq)]
pub enum IfCondition {
    Ifeq(IfeqDirective),
    Ifdef(IfdefDirective),
}

impl IfCondition {
    #[must_use]
    pub fn pos(&self) -> Position {
        match self {
            IfCondition::Ifeq(d) => d.keyword_position,
            IfCondition::Ifdef(d) => d.keyword_position,
        }
    }
}

/// `ifeq (arg1,arg2)` or `ifeq arg1 arg2` (likewise `ifneq`).
///
/// When parentheses are present both their positions and the comma's are
/// recorded; otherwise `parens` is `None` and `comma` is
/// [`Position::NONE`], and the two arguments are understood to be
/// separated only by whitespace (conventionally each a
/// [`QuotedExpression`]).
#[derive(Clone, Debug, PartialEq)]
pub struct IfeqDirective {
    /// [`Keyword::Ifeq`] or [`Keyword::Ifneq`].
    pub keyword: Keyword,
    pub keyword_position: Position,
    pub parens: Option<(Position, Position)>,
    pub arg1: Expression,
    pub comma: Position,
    pub arg2: Expression,
}

/// `ifdef NAME` or `ifndef NAME`.
#[derive(Clone, Debug, PartialEq)]
pub struct IfdefDirective {
    /// [`Keyword::Ifdef`] or [`Keyword::Ifndef`].
    pub keyword: Keyword,
    pub keyword_position: Position,
    pub name: Expression,
}

/// A directive recognized only by its keyword, whose remaining tokens are
/// kept as a flat expression list rather than a dedicated structure.
///
/// See the crate's design notes for why `vpath`, `include`, `-include`,
/// `sinclude`, `override`, `export`, `unexport`, and `private` are
/// represented this way while `define`/`endef`/`undefine` and the
/// conditionals get first-class node kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct KeywordDirective {
    pub keyword: Keyword,
    pub keyword_position: Position,
    pub rest: Vec<Expression>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: u32) -> Position {
        Position::new(offset)
    }

    #[test]
    fn file_pos_falls_back_to_start_when_empty() {
        let file = File {
            start: pos(1),
            end: pos(1),
            objects: vec![],
        };
        assert_eq!(file.pos(), pos(1));
    }

    #[test]
    fn file_pos_uses_first_object_when_present() {
        let rule = Rule {
            targets: vec![Expression::TextRun(TextRun::new(pos(5), "target"))],
            colon: pos(11),
            prerequisites: vec![],
            pipe: Position::NONE,
            order_only_prerequisites: vec![],
            recipes: vec![],
        };
        let file = File {
            start: pos(1),
            end: pos(12),
            objects: vec![Object::Rule(rule)],
        };
        assert_eq!(file.pos(), pos(5));
    }

    #[test]
    #[should_panic(expected = "at least one comment")]
    fn comment_group_rejects_empty_vec() {
        CommentGroup::new(vec![]);
    }

    #[test]
    fn pipe_none_means_no_order_only_prerequisites() {
        let rule = Rule {
            targets: vec![],
            colon: pos(1),
            prerequisites: vec![],
            pipe: Position::NONE,
            order_only_prerequisites: vec![],
            recipes: vec![],
        };
        assert!(!rule.pipe.is_valid());
    }

    #[test]
    fn variable_reference_no_delimiter_form_has_no_brackets() {
        let reference = VariableReference {
            dollar: pos(1),
            brackets: None,
            open: Position::NONE,
            name: TextRun::new(pos(2), "f"),
            close: Position::NONE,
        };
        assert!(reference.brackets.is_none());
        assert!(!reference.close.is_valid());
    }
}
