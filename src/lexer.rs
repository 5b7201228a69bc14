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

//! Turns source text into a stream of [`Token`]s.
//!
//! The tokenizer is a synchronous, single-pass, one-token-lookahead scanner
//! over an in-memory `&str`. It never backtracks past the token it is
//! currently building: the only lookahead it needs is the handful of extra
//! characters that disambiguate the assignment operators (`=`, `:=`,
//! `::=`, `:::=`, `?=`, `!=`), handled below by walking a small trie of
//! [`Edge`]s to find the longest match.
//!
//! Byte offsets into the `&str` double as [`Position`]s because every
//! delimiter byte this scanner looks for is ASCII, and ASCII bytes never
//! occur as continuation bytes of a multi-byte UTF-8 sequence. This keeps
//! `Token` text zero-copy.

use crate::keyword::Keyword;
use crate::source::{FileSet, Position};
use crate::token::{is_text_char, Token, TokenKind};

/// Trie node used to resolve the assignment operators by longest match.
#[derive(Copy, Clone)]
struct Trie(&'static [Edge]);

#[derive(Copy, Clone)]
struct Edge {
    key: char,
    value: Option<TokenKind<'static>>,
    next: Trie,
}

impl Trie {
    fn edge(&self, key: char) -> Option<&Edge> {
        self.0.iter().find(|edge| edge.key == key)
    }
}

const NONE: Trie = Trie(&[]);

const BANG: Trie = Trie(&[Edge {
    key: '=',
    value: Some(TokenKind::ShellAssign),
    next: NONE,
}]);

const QMARK: Trie = Trie(&[Edge {
    key: '=',
    value: Some(TokenKind::IfndefAssign),
    next: NONE,
}]);

const COLON_COLON_COLON: Trie = Trie(&[Edge {
    key: '=',
    value: Some(TokenKind::ImmediateAssign),
    next: NONE,
}]);

const COLON_COLON: Trie = Trie(&[
    Edge {
        key: '=',
        value: Some(TokenKind::PosixAssign),
        next: NONE,
    },
    Edge {
        key: ':',
        value: None,
        next: COLON_COLON_COLON,
    },
]);

const COLON: Trie = Trie(&[
    Edge {
        key: '=',
        value: Some(TokenKind::SimpleAssign),
        next: NONE,
    },
    Edge {
        key: ':',
        value: None,
        next: COLON_COLON,
    },
]);

const OPERATORS: Trie = Trie(&[
    Edge {
        key: '=',
        value: Some(TokenKind::RecursiveAssign),
        next: NONE,
    },
    Edge {
        key: ':',
        value: Some(TokenKind::Colon),
        next: COLON,
    },
    Edge {
        key: '?',
        value: None,
        next: QMARK,
    },
    Edge {
        key: '!',
        value: None,
        next: BANG,
    },
]);

/// A synchronous, single-pass tokenizer over an in-memory Makefile source.
pub struct Tokenizer<'a> {
    input: &'a str,
    base: Position,
    offset: usize,
    files: &'a mut FileSet,
    done: bool,
    /// Set after emitting a `$` token; consumed by the very next token,
    /// which then takes exactly one character as a no-delimiter variable
    /// name instead of running the usual maximal-munch text scan. See
    /// the module documentation and `syntax::VariableReference`.
    after_dollar: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input`, whose first byte is at `base`
    /// (normally the position returned by [`FileSet::register`] for this
    /// input). Newlines are reported to `files` as they are scanned.
    #[must_use]
    pub fn new(input: &'a str, base: Position, files: &'a mut FileSet) -> Self {
        Tokenizer {
            input,
            base,
            offset: 0,
            files,
            done: false,
            after_dollar: false,
        }
    }

    fn position(&self) -> Position {
        self.base.advance(self.offset as u32)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Walks the assignment-operator trie from `start`, consuming the
    /// longest matching run of characters and returning the corresponding
    /// [`TokenKind`], or `None` if `start` does not begin any operator.
    fn longest_operator_match(&mut self) -> Option<TokenKind<'a>> {
        let start_offset = self.offset;
        let mut trie = OPERATORS;
        let mut best: Option<(TokenKind<'static>, usize)> = None;

        loop {
            let Some(c) = self.peek_char() else { break };
            let Some(edge) = trie.edge(c) else { break };
            self.offset += c.len_utf8();
            if let Some(value) = edge.value {
                best = Some((value, self.offset));
            }
            trie = edge.next;
        }

        match best {
            Some((kind, end_offset)) => {
                self.offset = end_offset;
                Some(kind)
            }
            None => {
                self.offset = start_offset;
                None
            }
        }
    }

    /// Scans the rest of a comment, verbatim, up to but not including the
    /// terminating newline. Nothing is stripped: any leading space after
    /// the `#` is kept so the comment prints back exactly as written.
    fn scan_comment(&mut self) -> &'a str {
        let text_start = self.offset;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        &self.input[text_start..self.offset]
    }

    /// Reports whether the character at the cursor is `?` or `!` directly
    /// followed by `=`, i.e. the start of `?=` or `!=`. Outside this case
    /// both characters are ordinary text.
    fn at_question_or_bang_assign(&self) -> bool {
        matches!(self.peek_char(), Some('?' | '!')) && self.rest().chars().nth(1) == Some('=')
    }

    fn scan_text(&mut self) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.peek_char() {
            if !is_text_char(c) {
                break;
            }
            if (c == '?' || c == '!') && self.at_question_or_bang_assign() {
                break;
            }
            self.advance();
        }
        &self.input[start..self.offset]
    }

    fn scan_text_or_operator(&mut self, pos: Position) -> Token<'a> {
        if self.at_question_or_bang_assign() {
            let kind = self
                .longest_operator_match()
                .expect("at_question_or_bang_assign guarantees a match");
            return Token::new(pos, kind);
        }
        let text = self.scan_text();
        match text.parse::<Keyword>() {
            Ok(keyword) if text.chars().count() > 1 => Token::new(pos, TokenKind::Keyword(keyword)),
            _ => Token::new(pos, TokenKind::Text(text)),
        }
    }

    /// Produces the token immediately following a `$`: `(` or `{` opens a
    /// delimited reference as usual, and anything else is taken as a
    /// one-character no-delimiter variable name, bypassing both the
    /// leading-whitespace skip and the maximal-munch text scan.
    ///
    /// This consumes one `char`, not one byte. The reference this crate's
    /// behavior is modeled on works over raw byte slices and literally
    /// takes the single next byte as the name (`p.lit[:1]` in
    /// `examples/original_source/parser/parser.go`), which for a
    /// multi-byte UTF-8 character after `$` splits it into an invalid
    /// one-byte "name" and an equally invalid remainder. This tokenizer
    /// borrows `&str` slices of the input and cannot slice inside a
    /// character without panicking, so it takes the whole character
    /// instead — a deliberate, `&str`-forced deviation from that byte-exact
    /// behavior, not an oversight. See the crate's design notes.
    fn next_token_after_dollar(&mut self) -> Token<'a> {
        let pos = self.position();
        match self.peek_char() {
            None => Token::new(pos, TokenKind::Eof),
            Some('(') => {
                self.advance();
                Token::new(pos, TokenKind::LParen)
            }
            Some('{') => {
                self.advance();
                Token::new(pos, TokenKind::LBrace)
            }
            Some(c) => {
                let start = self.offset;
                self.advance();
                if c == '\n' {
                    self.files.record_newline(pos);
                }
                Token::new(pos, TokenKind::Text(&self.input[start..self.offset]))
            }
        }
    }

    fn next_token(&mut self) -> Token<'a> {
        let after_dollar = std::mem::replace(&mut self.after_dollar, false);
        if after_dollar {
            return self.next_token_after_dollar();
        }

        loop {
            match self.peek_char() {
                None => return Token::new(self.position(), TokenKind::Eof),
                Some(' ' | '\r') => {
                    self.advance();
                }
                Some(_) => break,
            }
        }

        let pos = self.position();

        match self.peek_char().expect("checked above") {
            '\n' => {
                self.advance();
                self.files.record_newline(pos);
                Token::new(pos, TokenKind::Newline)
            }
            '\t' => {
                self.advance();
                Token::new(pos, TokenKind::Tab)
            }
            '(' => {
                self.advance();
                Token::new(pos, TokenKind::LParen)
            }
            '{' => {
                self.advance();
                Token::new(pos, TokenKind::LBrace)
            }
            ')' => {
                self.advance();
                Token::new(pos, TokenKind::RParen)
            }
            '}' => {
                self.advance();
                Token::new(pos, TokenKind::RBrace)
            }
            '$' => {
                self.advance();
                self.after_dollar = true;
                Token::new(pos, TokenKind::Dollar)
            }
            ',' => {
                self.advance();
                Token::new(pos, TokenKind::Comma)
            }
            ';' => {
                self.advance();
                Token::new(pos, TokenKind::Semicolon)
            }
            '|' => {
                self.advance();
                Token::new(pos, TokenKind::Pipe)
            }
            '\'' => {
                self.advance();
                Token::new(pos, TokenKind::Apostrophe)
            }
            '"' => {
                self.advance();
                Token::new(pos, TokenKind::Quote)
            }
            '#' => {
                self.advance();
                let text = self.scan_comment();
                Token::new(pos, TokenKind::Comment(text))
            }
            '=' | ':' => match self.longest_operator_match() {
                Some(kind) => Token::new(pos, kind),
                None => {
                    let start = self.offset;
                    self.advance();
                    Token::new(pos, TokenKind::Unsupported(&self.input[start..self.offset]))
                }
            },
            _ => self.scan_text_or_operator(pos),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<TokenKind<'_>> {
        let mut files = FileSet::new();
        let (_, base) = files.register("test.mk", input.len());
        Tokenizer::new(input, base, &mut files)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn scans_a_simple_rule() {
        let kinds = tokenize("target: prereq\n\trecipe\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Text("target"),
                TokenKind::Colon,
                TokenKind::Text("prereq"),
                TokenKind::Newline,
                TokenKind::Tab,
                TokenKind::Text("recipe"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn disambiguates_assignment_operators_by_longest_match() {
        assert_eq!(tokenize("="), vec![TokenKind::RecursiveAssign, TokenKind::Eof]);
        assert_eq!(tokenize(":="), vec![TokenKind::SimpleAssign, TokenKind::Eof]);
        assert_eq!(tokenize("::="), vec![TokenKind::PosixAssign, TokenKind::Eof]);
        assert_eq!(
            tokenize(":::="),
            vec![TokenKind::ImmediateAssign, TokenKind::Eof]
        );
        assert_eq!(tokenize("?="), vec![TokenKind::IfndefAssign, TokenKind::Eof]);
        assert_eq!(tokenize("!="), vec![TokenKind::ShellAssign, TokenKind::Eof]);
    }

    #[test]
    fn bare_colon_falls_back_when_no_operator_matches() {
        assert_eq!(
            tokenize(":x"),
            vec![TokenKind::Colon, TokenKind::Text("x"), TokenKind::Eof]
        );
    }

    #[test]
    fn double_colon_with_no_trailing_equals_is_two_colons() {
        assert_eq!(
            tokenize("::"),
            vec![TokenKind::Colon, TokenKind::Colon, TokenKind::Eof]
        );
    }

    #[test]
    fn bare_bang_and_question_mark_are_ordinary_text() {
        assert_eq!(tokenize("!"), vec![TokenKind::Text("!"), TokenKind::Eof]);
        assert_eq!(tokenize("?"), vec![TokenKind::Text("?"), TokenKind::Eof]);
    }

    #[test]
    fn question_and_bang_inside_a_name_only_break_before_trailing_equals() {
        assert_eq!(
            tokenize("a?b"),
            vec![TokenKind::Text("a?b"), TokenKind::Eof]
        );
        assert_eq!(
            tokenize("CC?=gcc"),
            vec![
                TokenKind::Text("CC"),
                TokenKind::IfndefAssign,
                TokenKind::Text("gcc"),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            tokenize("foo!=bar"),
            vec![
                TokenKind::Text("foo"),
                TokenKind::ShellAssign,
                TokenKind::Text("bar"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_semicolon_pipe_and_quote_delimiters() {
        assert_eq!(
            tokenize("a: b|c;'d'\"e\""),
            vec![
                TokenKind::Text("a"),
                TokenKind::Colon,
                TokenKind::Text("b"),
                TokenKind::Pipe,
                TokenKind::Text("c"),
                TokenKind::Semicolon,
                TokenKind::Apostrophe,
                TokenKind::Text("d"),
                TokenKind::Apostrophe,
                TokenKind::Quote,
                TokenKind::Text("e"),
                TokenKind::Quote,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dollar_followed_by_bare_text_splits_off_one_character() {
        assert_eq!(
            tokenize("$foo"),
            vec![
                TokenKind::Dollar,
                TokenKind::Text("f"),
                TokenKind::Text("oo"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dollar_followed_by_multibyte_char_splits_off_the_whole_character() {
        // "é" is two bytes in UTF-8; the tokenizer takes it whole rather
        // than one byte, since it cannot slice `&str` inside a character.
        assert_eq!(
            tokenize("$éa"),
            vec![
                TokenKind::Dollar,
                TokenKind::Text("é"),
                TokenKind::Text("a"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dollar_followed_by_paren_or_brace_opens_a_delimited_reference() {
        assert_eq!(
            tokenize("$(foo)"),
            vec![
                TokenKind::Dollar,
                TokenKind::LParen,
                TokenKind::Text("foo"),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            tokenize("${foo}"),
            vec![
                TokenKind::Dollar,
                TokenKind::LBrace,
                TokenKind::Text("foo"),
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn recognizes_directives_and_functions_unconditionally() {
        assert_eq!(
            tokenize("ifeq"),
            vec![TokenKind::Keyword(Keyword::Ifeq), TokenKind::Eof]
        );
        assert_eq!(
            tokenize("$(subst a,b,c)"),
            vec![
                TokenKind::Dollar,
                TokenKind::LParen,
                TokenKind::Keyword(Keyword::Subst),
                TokenKind::Text("a"),
                TokenKind::Comma,
                TokenKind::Text("b"),
                TokenKind::Comma,
                TokenKind::Text("c"),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn single_char_text_is_never_a_keyword() {
        // No keyword is one character long, but guard the rule anyway.
        assert_eq!(tokenize("x"), vec![TokenKind::Text("x"), TokenKind::Eof]);
    }

    #[test]
    fn comment_keeps_leading_space_verbatim() {
        assert_eq!(
            tokenize("# hello world\n"),
            vec![
                TokenKind::Comment(" hello world"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_without_leading_space_keeps_all_text() {
        assert_eq!(
            tokenize("#hello\n"),
            vec![
                TokenKind::Comment("hello"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn records_newlines_in_the_file_set() {
        let mut files = FileSet::new();
        let (_, base) = files.register("Makefile", 4);
        let tokens: Vec<_> = Tokenizer::new("a\nb\n", base, &mut files).collect();
        assert_eq!(tokens.len(), 5); // a, \n, b, \n, eof
        let resolved = files.position_of(base.advance(2));
        assert_eq!(resolved.line, 2);
    }

    #[test]
    fn tokenizer_is_idempotent_after_eof() {
        let mut files = FileSet::new();
        let (_, base) = files.register("empty.mk", 0);
        let mut tokenizer = Tokenizer::new("", base, &mut files);
        assert!(tokenizer.next().unwrap().is_eof());
        assert!(tokenizer.next().is_none());
    }
}
