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

//! The recursive-descent parser.
//!
//! [`parse_file`] is the entry point: it tokenizes `input` with
//! [`crate::lexer::Tokenizer`] and consumes the resulting stream with one
//! token of lookahead, the same strategy the grammar needs to resolve the
//! rule-vs-assignment ambiguity (see [`Parser::parse_object`]).
//!
//! The parser never stops at the first error. Every `expect`-style
//! failure is recorded as a [`Diagnostic`] and parsing continues from the
//! next token, so a single malformed line doesn't discard the rest of the
//! file.

use crate::keyword::Keyword;
use crate::source::{Diagnostic, Diagnostics, FileSet, Position};
use crate::syntax::{
    AssignOp, Comment, CommentGroup, ConditionalBlock, DefineDirective, Directive, ElseClause,
    Expression, File, IfCondition, IfdefDirective, IfeqDirective, KeywordDirective, Object,
    QuoteChar, QuotedExpression, RecipePrefix, RefBracket, Rule, TextRun, UndefineDirective,
    VariableAssignment, VariableReference,
};
use crate::token::{Token, TokenKind};
use crate::lexer::Tokenizer;

/// Parses `input` (registered in `files` under `name`) into a [`File`] and
/// the diagnostics collected along the way.
///
/// The returned tree may be partial where parsing could not recover a
/// well-formed node; see the crate's error-handling documentation.
#[must_use]
pub fn parse_file(files: &mut FileSet, name: &str, input: &str) -> (File, Diagnostics) {
    let (_, base) = files.register(name, input.len());
    let end = base.advance(input.len() as u32);
    let mut parser = Parser::new(input, base, files);
    let file = parser.parse_file(base, end);
    let mut diagnostics = parser.diagnostics;
    diagnostics.sort();
    (file, diagnostics)
}

/// Keeps yielding an end-of-file token forever once the underlying
/// tokenizer is exhausted, so the parser's one-token lookahead never has
/// to special-case running off the end of the stream.
struct TokenStream<'a> {
    inner: Tokenizer<'a>,
    eof: Option<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    fn new(inner: Tokenizer<'a>) -> Self {
        TokenStream { inner, eof: None }
    }

    fn next(&mut self) -> Token<'a> {
        if let Some(eof) = self.eof {
            return eof;
        }
        let token = self.inner.next().expect("tokenizer always yields Eof");
        if token.is_eof() {
            self.eof = Some(token);
        }
        token
    }
}

struct Parser<'a> {
    stream: TokenStream<'a>,
    current: Token<'a>,
    diagnostics: Diagnostics,
    recipe_prefix: RecipePrefix,
    input: &'a str,
    base: Position,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, base: Position, files: &'a mut FileSet) -> Self {
        let mut stream = TokenStream::new(Tokenizer::new(input, base, files));
        let current = stream.next();
        Parser {
            stream,
            current,
            diagnostics: Diagnostics::new(),
            recipe_prefix: RecipePrefix::Tab,
            input,
            base,
        }
    }

    /// Returns the exact source text between two positions, both of which
    /// must lie within this parser's input. Used wherever a node needs to
    /// preserve interior whitespace verbatim rather than reassembling it
    /// from individual tokens (recipe and `define` bodies).
    fn text_between(&self, start: Position, end: Position) -> &'a str {
        let lo = (start.get() - self.base.get()) as usize;
        let hi = (end.get() - self.base.get()) as usize;
        &self.input[lo..hi]
    }

    fn bump(&mut self) -> Token<'a> {
        let old = self.current;
        self.current = self.stream.next();
        old
    }

    fn error(&mut self, position: Position, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(position, message));
    }

    fn expected(&mut self, what: &str) {
        let description = describe(&self.current.kind);
        self.error(
            self.current.position,
            format!("expected {what}, found {description}"),
        );
    }

    /// Consumes the current token if it matches `kind`, reporting a
    /// diagnostic and leaving the stream positioned on the same token
    /// otherwise (the caller advances to recover).
    ///
    /// Compares by discriminant only, so this must not be used for
    /// `TokenKind::Keyword`: every keyword shares one discriminant
    /// regardless of which `Keyword` it carries. Use
    /// [`Parser::eat_keyword`] for that case.
    fn eat(&mut self, kind: TokenKind<'static>, what: &str) -> Option<Position> {
        if kind_matches(&self.current.kind, &kind) {
            Some(self.bump().position)
        } else {
            self.expected(what);
            None
        }
    }

    /// Consumes the current token if it is the specific `keyword`,
    /// reporting a diagnostic and leaving the stream positioned on the
    /// same token otherwise.
    fn eat_keyword(&mut self, keyword: Keyword, what: &str) -> Option<Position> {
        if matches!(self.current.kind, TokenKind::Keyword(k) if k == keyword) {
            Some(self.bump().position)
        } else {
            self.expected(what);
            None
        }
    }

    fn skip_blank_lines(&mut self) {
        while matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }
    }

    fn parse_file(&mut self, start: Position, end: Position) -> File {
        let mut objects = Vec::new();
        self.skip_blank_lines();
        while !matches!(self.current.kind, TokenKind::Eof) {
            if let Some(object) = self.parse_object() {
                objects.push(object);
            }
            self.skip_blank_lines();
        }
        File {
            start,
            end,
            objects,
        }
    }

    /// Parses one top-level construct.
    ///
    /// Returns `None` when the current token cannot start an object; the
    /// caller has already recorded a diagnostic and the parser has
    /// advanced at least one token, guaranteeing forward progress.
    fn parse_object(&mut self) -> Option<Object> {
        match self.current.kind {
            TokenKind::Comment(_) => Some(Object::CommentGroup(self.parse_comment_group())),
            TokenKind::Keyword(Keyword::Ifeq | Keyword::Ifneq | Keyword::Ifdef | Keyword::Ifndef) => {
                Some(Object::Directive(Directive::Conditional(
                    self.parse_conditional_block(),
                )))
            }
            TokenKind::Keyword(Keyword::Define) => {
                Some(Object::Directive(Directive::Define(self.parse_define())))
            }
            TokenKind::Keyword(Keyword::Undefine) => Some(Object::Directive(Directive::Undefine(
                self.parse_undefine(),
            ))),
            TokenKind::Keyword(
                kw @ (Keyword::Vpath
                | Keyword::Include
                | Keyword::DashInclude
                | Keyword::Sinclude
                | Keyword::Override
                | Keyword::Export
                | Keyword::Unexport
                | Keyword::Private),
            ) => Some(Object::Directive(Directive::Keyword(
                self.parse_keyword_directive(kw),
            ))),
            TokenKind::Keyword(Keyword::Else) | TokenKind::Keyword(Keyword::Endif) => {
                self.error(
                    self.current.position,
                    format!("unexpected '{}'", self.current.kind),
                );
                self.bump();
                None
            }
            TokenKind::Eof => None,
            _ => self.parse_rule_or_assignment(),
        }
    }

    fn parse_comment_group(&mut self) -> CommentGroup {
        let mut comments = Vec::new();
        loop {
            let TokenKind::Comment(text) = self.current.kind else {
                break;
            };
            let hash = self.current.position;
            self.bump();
            comments.push(Comment {
                hash,
                text: text.to_string(),
            });
            if matches!(self.current.kind, TokenKind::Newline) {
                self.bump();
            }
            if !matches!(self.current.kind, TokenKind::Comment(_)) {
                break;
            }
        }
        CommentGroup::new(comments)
    }

    /// Parses an expression-list prefix, then decides by the token that
    /// follows whether it introduces a [`Rule`] or a
    /// [`VariableAssignment`]. This pivot is what resolves Make's
    /// rule-vs-assignment ambiguity: both start with an arbitrary run of
    /// expressions, and only the next token (`:` or an assignment
    /// operator) disambiguates.
    fn parse_rule_or_assignment(&mut self) -> Option<Object> {
        let prefix = self.parse_expression_list(is_rule_assignment_stop);

        if matches!(self.current.kind, TokenKind::Colon) {
            return Some(Object::Rule(self.parse_rule(prefix)));
        }

        if self.current.kind.is_assignment() {
            return Some(Object::VariableAssignment(
                self.parse_variable_assignment(prefix),
            ));
        }

        if prefix.is_empty() {
            self.expected("a target, variable name, or directive");
            self.bump();
            return None;
        }

        self.error(
            self.current.position,
            format!(
                "expected ':' or an assignment operator, found {}",
                describe(&self.current.kind)
            ),
        );
        self.bump();
        None
    }

    fn parse_rule(&mut self, targets: Vec<Expression>) -> Rule {
        let colon = self
            .eat(TokenKind::Colon, "':'")
            .unwrap_or(self.current.position);

        let prerequisites = self.parse_expression_list(is_prerequisite_stop);

        let mut pipe = Position::NONE;
        let mut order_only_prerequisites = Vec::new();
        if matches!(self.current.kind, TokenKind::Pipe) {
            pipe = self.bump().position;
            order_only_prerequisites = self.parse_expression_list(is_prerequisite_stop);
        }

        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }

        let mut recipes = Vec::new();
        while self.starts_recipe() {
            recipes.push(self.parse_recipe());
        }

        Rule {
            targets,
            colon,
            prerequisites,
            pipe,
            order_only_prerequisites,
            recipes,
        }
    }

    fn starts_recipe(&self) -> bool {
        match self.recipe_prefix {
            RecipePrefix::Tab => matches!(self.current.kind, TokenKind::Tab),
            RecipePrefix::Semicolon => matches!(self.current.kind, TokenKind::Semicolon),
            RecipePrefix::Custom(c) => matches!(self.current.kind, TokenKind::Text(t) if t == c.to_string()),
        }
    }

    fn parse_recipe(&mut self) -> crate::syntax::Recipe {
        let prefix_position = self.bump().position;
        let body_position = self.current.position;

        while !matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
            self.bump();
        }
        let body = self
            .text_between(body_position, self.current.position)
            .to_string();

        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }

        crate::syntax::Recipe {
            prefix: self.recipe_prefix,
            prefix_position,
            body: TextRun::new(body_position, body),
        }
    }

    fn parse_variable_assignment(&mut self, mut names: Vec<Expression>) -> VariableAssignment {
        if names.len() != 1 {
            self.error(self.current.position, "variable may have only one name");
        }
        let name = if names.is_empty() {
            Expression::TextRun(TextRun::new(self.current.position, String::new()))
        } else {
            names.remove(0)
        };

        let operator_position = self.current.position;
        let operator = assign_op_of(&self.current.kind).unwrap_or(AssignOp::Recursive);
        self.bump();

        let values = self.parse_expression_list(is_rule_assignment_stop);
        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }

        VariableAssignment {
            name,
            operator,
            operator_position,
            values,
        }
    }

    /// Parses zero or more expressions, stopping when `stop` reports the
    /// current token kind ends the list.
    fn parse_expression_list(
        &mut self,
        stop: impl Fn(&TokenKind<'_>) -> bool,
    ) -> Vec<Expression> {
        let mut expressions = Vec::new();
        while !stop(&self.current.kind) {
            match self.parse_expression() {
                Some(expr) => expressions.push(expr),
                None => {
                    self.bump();
                }
            }
        }
        expressions
    }

    fn parse_expression(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Text(s) => {
                let run = TextRun::new(self.current.position, s.to_string());
                self.bump();
                Some(Expression::TextRun(run))
            }
            TokenKind::Keyword(k) => {
                let run = TextRun::new(self.current.position, k.as_str());
                self.bump();
                Some(Expression::TextRun(run))
            }
            TokenKind::Dollar => Some(self.parse_variable_reference()),
            TokenKind::Apostrophe => Some(self.parse_quoted_expression(QuoteChar::Single)),
            TokenKind::Quote => Some(self.parse_quoted_expression(QuoteChar::Double)),
            _ => {
                self.expected("an expression");
                None
            }
        }
    }

    fn parse_variable_reference(&mut self) -> Expression {
        let dollar = self.current.position;
        self.bump();

        let brackets = match self.current.kind {
            TokenKind::LParen => Some(RefBracket::Paren),
            TokenKind::LBrace => Some(RefBracket::Brace),
            _ => None,
        };

        match brackets {
            Some(bracket) => {
                let open = self.bump().position;
                let name = self.parse_reference_name();
                let close_kind = match bracket {
                    RefBracket::Paren => TokenKind::RParen,
                    RefBracket::Brace => TokenKind::RBrace,
                };
                let close = self
                    .eat(
                        close_kind,
                        if bracket == RefBracket::Paren { "')'" } else { "'}'" },
                    )
                    .unwrap_or(Position::NONE);
                Expression::VariableReference(VariableReference {
                    dollar,
                    brackets: Some(bracket),
                    open,
                    name,
                    close,
                })
            }
            None => {
                let name = self.parse_reference_name();
                Expression::VariableReference(VariableReference {
                    dollar,
                    brackets: None,
                    open: Position::NONE,
                    name,
                    close: Position::NONE,
                })
            }
        }
    }

    fn parse_reference_name(&mut self) -> TextRun {
        match self.current.kind {
            TokenKind::Text(s) => {
                let run = TextRun::new(self.current.position, s.to_string());
                self.bump();
                run
            }
            TokenKind::Keyword(k) => {
                let run = TextRun::new(self.current.position, k.as_str());
                self.bump();
                run
            }
            _ => {
                self.expected("a variable name");
                TextRun::new(self.current.position, String::new())
            }
        }
    }

    fn parse_quoted_expression(&mut self, quote: QuoteChar) -> Expression {
        let open = self.current.position;
        self.bump();
        let inner = self
            .parse_expression()
            .unwrap_or_else(|| Expression::TextRun(TextRun::new(self.current.position, String::new())));
        let close_kind = match quote {
            QuoteChar::Single => TokenKind::Apostrophe,
            QuoteChar::Double => TokenKind::Quote,
        };
        let close = self
            .eat(close_kind, if quote == QuoteChar::Single { "'\\''" } else { "'\"'" })
            .unwrap_or(Position::NONE);
        Expression::QuotedExpression(Box::new(QuotedExpression {
            quote,
            open,
            inner,
            close,
        }))
    }

    fn parse_define(&mut self) -> DefineDirective {
        let define = self.bump().position;
        let name = self.parse_expression().unwrap_or_else(|| {
            Expression::TextRun(TextRun::new(self.current.position, String::new()))
        });

        let operator = if self.current.kind.is_assignment() {
            let op_pos = self.current.position;
            let op = assign_op_of(&self.current.kind).unwrap_or(AssignOp::Recursive);
            self.bump();
            Some((op, op_pos))
        } else {
            None
        };

        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }

        let body_position = self.current.position;
        loop {
            if matches!(self.current.kind, TokenKind::Eof) {
                self.error(self.current.position, "expected 'endef', found end of file");
                break;
            }
            if matches!(self.current.kind, TokenKind::Keyword(Keyword::Endef)) {
                break;
            }
            self.bump();
        }
        let body = self
            .text_between(body_position, self.current.position)
            .to_string();
        let endef = self
            .eat_keyword(Keyword::Endef, "'endef'")
            .unwrap_or(self.current.position);
        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }

        DefineDirective {
            define,
            name,
            operator,
            body: TextRun::new(body_position, body),
            endef,
        }
    }

    fn parse_undefine(&mut self) -> UndefineDirective {
        let keyword = self.bump().position;
        let name = self.parse_expression().unwrap_or_else(|| {
            Expression::TextRun(TextRun::new(self.current.position, String::new()))
        });
        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }
        UndefineDirective { keyword, name }
    }

    fn parse_keyword_directive(&mut self, keyword: Keyword) -> KeywordDirective {
        let keyword_position = self.bump().position;
        let rest = self.parse_expression_list(is_rule_assignment_stop);
        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }
        KeywordDirective {
            keyword,
            keyword_position,
            rest,
        }
    }

    fn parse_conditional_block(&mut self) -> ConditionalBlock {
        let head = self.parse_if_condition();
        let body = self.parse_body_until_else_or_endif();

        let mut else_clauses = Vec::new();
        while matches!(self.current.kind, TokenKind::Keyword(Keyword::Else)) {
            else_clauses.push(self.parse_else_clause());
        }

        let endif = self
            .eat_keyword(Keyword::Endif, "'endif'")
            .unwrap_or(self.current.position);
        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }

        ConditionalBlock {
            head,
            body,
            else_clauses,
            endif,
        }
    }

    fn parse_else_clause(&mut self) -> ElseClause {
        let else_position = self.bump().position;

        let head = match self.current.kind {
            TokenKind::Keyword(Keyword::Ifeq | Keyword::Ifneq | Keyword::Ifdef | Keyword::Ifndef) => {
                Some(self.parse_if_condition())
            }
            _ => None,
        };

        let body = self.parse_body_until_else_or_endif();

        if head.is_none() && matches!(self.current.kind, TokenKind::Keyword(Keyword::Else)) {
            self.error(self.current.position, "expected 'endif', found 'else'");
        }

        ElseClause {
            else_position,
            head,
            body,
        }
    }

    fn parse_body_until_else_or_endif(&mut self) -> Vec<Object> {
        let mut objects = Vec::new();
        self.skip_blank_lines();
        while !matches!(
            self.current.kind,
            TokenKind::Keyword(Keyword::Else) | TokenKind::Keyword(Keyword::Endif) | TokenKind::Eof
        ) {
            if let Some(object) = self.parse_object() {
                objects.push(object);
            }
            self.skip_blank_lines();
        }
        objects
    }

    fn parse_if_condition(&mut self) -> IfCondition {
        match self.current.kind {
            TokenKind::Keyword(kw @ (Keyword::Ifeq | Keyword::Ifneq)) => {
                IfCondition::Ifeq(self.parse_ifeq(kw))
            }
            TokenKind::Keyword(kw @ (Keyword::Ifdef | Keyword::Ifndef)) => {
                IfCondition::Ifdef(self.parse_ifdef(kw))
            }
            _ => {
                self.expected("'ifeq', 'ifneq', 'ifdef', or 'ifndef'");
                IfCondition::Ifdef(IfdefDirective {
                    keyword: Keyword::Ifdef,
                    keyword_position: self.current.position,
                    name: Expression::TextRun(TextRun::new(self.current.position, String::new())),
                })
            }
        }
    }

    fn parse_ifeq(&mut self, keyword: Keyword) -> IfeqDirective {
        let keyword_position = self.bump().position;

        if matches!(self.current.kind, TokenKind::LParen) {
            let open = self.bump().position;
            let arg1 = self.parse_expression().unwrap_or_else(|| {
                Expression::TextRun(TextRun::new(self.current.position, String::new()))
            });
            let comma = self.eat(TokenKind::Comma, "','").unwrap_or(Position::NONE);
            let arg2 = self.parse_expression().unwrap_or_else(|| {
                Expression::TextRun(TextRun::new(self.current.position, String::new()))
            });
            let close = self.eat(TokenKind::RParen, "')'").unwrap_or(Position::NONE);
            if matches!(self.current.kind, TokenKind::Newline) {
                self.bump();
            }
            IfeqDirective {
                keyword,
                keyword_position,
                parens: Some((open, close)),
                arg1,
                comma,
                arg2,
            }
        } else {
            let arg1 = self.parse_expression().unwrap_or_else(|| {
                Expression::TextRun(TextRun::new(self.current.position, String::new()))
            });
            let arg2 = self.parse_expression().unwrap_or_else(|| {
                Expression::TextRun(TextRun::new(self.current.position, String::new()))
            });
            if matches!(self.current.kind, TokenKind::Newline) {
                self.bump();
            }
            IfeqDirective {
                keyword,
                keyword_position,
                parens: None,
                arg1,
                comma: Position::NONE,
                arg2,
            }
        }
    }

    fn parse_ifdef(&mut self, keyword: Keyword) -> IfdefDirective {
        let keyword_position = self.bump().position;
        let name = self.parse_expression().unwrap_or_else(|| {
            Expression::TextRun(TextRun::new(self.current.position, String::new()))
        });
        if matches!(self.current.kind, TokenKind::Newline) {
            self.bump();
        }
        IfdefDirective {
            keyword,
            keyword_position,
            name,
        }
    }
}

fn assign_op_of(kind: &TokenKind<'_>) -> Option<AssignOp> {
    match kind {
        TokenKind::RecursiveAssign => Some(AssignOp::Recursive),
        TokenKind::SimpleAssign => Some(AssignOp::Simple),
        TokenKind::PosixAssign => Some(AssignOp::Posix),
        TokenKind::ImmediateAssign => Some(AssignOp::Immediate),
        TokenKind::IfndefAssign => Some(AssignOp::Ifndef),
        TokenKind::ShellAssign => Some(AssignOp::Shell),
        _ => None,
    }
}

fn is_rule_assignment_stop(kind: &TokenKind<'_>) -> bool {
    matches!(kind, TokenKind::Newline | TokenKind::Eof)
        || matches!(kind, TokenKind::Colon)
        || kind.is_assignment()
}

fn is_prerequisite_stop(kind: &TokenKind<'_>) -> bool {
    matches!(kind, TokenKind::Newline | TokenKind::Eof | TokenKind::Pipe)
}

fn kind_matches(actual: &TokenKind<'_>, expected: &TokenKind<'static>) -> bool {
    std::mem::discriminant(actual) == std::mem::discriminant(expected)
}

fn describe(kind: &TokenKind<'_>) -> String {
    match kind {
        TokenKind::Text(s) => format!("{s:?}"),
        TokenKind::Comment(_) => "a comment".to_string(),
        TokenKind::Eof => "end of file".to_string(),
        TokenKind::Unsupported(s) => format!("unsupported input {s:?}"),
        other => format!("'{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print_to_string;
    use assert_matches::assert_matches;

    fn parse(input: &str) -> (File, Diagnostics) {
        let mut files = FileSet::new();
        parse_file(&mut files, "test.mk", input)
    }

    #[test]
    fn parses_a_bare_target() {
        let (file, diags) = parse("target:");
        assert!(diags.is_empty());
        assert_eq!(file.objects.len(), 1);
        let Object::Rule(rule) = &file.objects[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.targets.len(), 1);
        assert_eq!(rule.colon, Position::new(7));
    }

    #[test]
    fn parses_two_targets() {
        let (file, diags) = parse("target target2:");
        assert!(diags.is_empty());
        let Object::Rule(rule) = &file.objects[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.targets.len(), 2);
        assert_eq!(rule.targets[0].pos(), Position::new(1));
        assert_eq!(rule.targets[1].pos(), Position::new(8));
        assert_eq!(rule.colon, Position::new(15));
    }

    #[test]
    fn parses_a_rule_with_prerequisite_and_recipe() {
        let (file, diags) = parse("target: prereq\n\trecipe");
        assert!(diags.is_empty());
        let Object::Rule(rule) = &file.objects[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.prerequisites.len(), 1);
        assert_eq!(rule.recipes.len(), 1);
        assert_eq!(rule.recipes[0].prefix_position, Position::new(16));
        assert_eq!(rule.recipes[0].body.value, "recipe");
    }

    #[test]
    fn parses_a_simple_assignment() {
        let (file, diags) = parse("VAR := test test2\n");
        assert!(diags.is_empty());
        let Object::VariableAssignment(assignment) = &file.objects[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.operator, AssignOp::Simple);
        assert_eq!(assignment.operator_position, Position::new(5));
        assert_eq!(assignment.values.len(), 2);
    }

    #[test]
    fn parses_an_ifeq_block_round_trip() {
        let input = "ifeq (foo, bar)\ntarget:\nendif\n";
        let (file, diags) = parse(input);
        assert!(diags.is_empty());
        assert_eq!(print_to_string(&file).unwrap(), input);
    }

    #[test]
    fn parses_a_brace_variable_reference_target() {
        let input = "${foo}:";
        let (file, diags) = parse(input);
        assert!(diags.is_empty());
        let Object::Rule(rule) = &file.objects[0] else {
            panic!("expected a rule");
        };
        let Expression::VariableReference(reference) = &rule.targets[0] else {
            panic!("expected a variable reference target");
        };
        assert_eq!(reference.name.value, "foo");
    }

    #[test]
    fn reports_multiple_names_before_an_assignment_operator() {
        let (_, diags) = parse("A B := x\n");
        assert_eq!(diags.len(), 1);
        assert!(diags.iter().next().unwrap().message.contains("only one name"));
    }

    #[test]
    fn recovers_from_an_unknown_else_chain() {
        let (_, diags) = parse("ifeq (a,b)\nendif\nelse\nendif\n");
        assert!(!diags.is_empty());
    }

    #[test]
    fn parses_define_and_undefine() {
        let (file, diags) = parse("define greeting\nhello\nworld\nendef\nundefine greeting\n");
        assert!(diags.is_empty());
        assert_eq!(file.objects.len(), 2);
        assert_matches!(file.objects[0], Object::Directive(Directive::Define(_)));
        assert_matches!(file.objects[1], Object::Directive(Directive::Undefine(_)));
    }

    #[test]
    fn parses_keyword_only_directives() {
        let (file, diags) = parse("include foo.mk\nexport PATH\n");
        assert!(diags.is_empty());
        assert_eq!(file.objects.len(), 2);
        assert_matches!(file.objects[0], Object::Directive(Directive::Keyword(_)));
    }

    #[test]
    fn diagnostics_include_comment_group() {
        let (file, diags) = parse("# hello\n# world\ntarget:\n");
        assert!(diags.is_empty());
        let Object::CommentGroup(group) = &file.objects[0] else {
            panic!("expected a comment group");
        };
        assert_eq!(group.comments().len(), 2);
    }
}
