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

//! Lexical tokens produced by the [tokenizer](crate::lexer).

use std::fmt;

use crate::keyword::Keyword;
use crate::source::Position;

/// The kind of a [`Token`], with any text it carries borrowed from the
/// original input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// A run of ordinary text: identifier characters, punctuation that
    /// isn't otherwise meaningful, and everything else that isn't a
    /// structural character or keyword.
    Text(&'a str),
    /// `#` through the end of the line, not including the newline.
    Comment(&'a str),
    /// `\t` at the start of a line (a recipe line prefix).
    Tab,
    /// `\n`.
    Newline,
    /// `(`
    LParen,
    /// `{`
    LBrace,
    /// `)`
    RParen,
    /// `}`
    RBrace,
    /// `$`
    Dollar,
    /// `:`, once it has been determined not to begin one of the
    /// [assignment operators](TokenKind).
    Colon,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `|`
    Pipe,
    /// `'`
    Apostrophe,
    /// `"`
    Quote,
    /// `=`
    RecursiveAssign,
    /// `:=`
    SimpleAssign,
    /// `::=`
    PosixAssign,
    /// `:::=`
    ImmediateAssign,
    /// `?=`
    IfndefAssign,
    /// `!=`
    ShellAssign,
    /// A directive or built-in function name, recognized in a context
    /// where one is expected (see [`crate::lexer`]).
    Keyword(Keyword),
    /// The end of the input.
    Eof,
    /// A byte sequence the tokenizer could not classify as any of the
    /// above, for example a stray control character.
    Unsupported(&'a str),
}

impl TokenKind<'_> {
    /// Reports whether this token kind denotes one of the six assignment
    /// operators.
    #[must_use]
    pub const fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::RecursiveAssign
                | TokenKind::SimpleAssign
                | TokenKind::PosixAssign
                | TokenKind::ImmediateAssign
                | TokenKind::IfndefAssign
                | TokenKind::ShellAssign
        )
    }

    /// Returns the literal spelling of structural and operator tokens.
    /// Returns `None` for [`TokenKind::Text`], [`TokenKind::Comment`],
    /// [`TokenKind::Keyword`] and [`TokenKind::Unsupported`], whose
    /// spelling is the text they carry rather than a fixed string.
    #[must_use]
    pub const fn fixed_str(&self) -> Option<&'static str> {
        use TokenKind::*;
        match self {
            Tab => Some("\t"),
            Newline => Some("\n"),
            LParen => Some("("),
            LBrace => Some("{"),
            RParen => Some(")"),
            RBrace => Some("}"),
            Dollar => Some("$"),
            Colon => Some(":"),
            Comma => Some(","),
            Semicolon => Some(";"),
            Pipe => Some("|"),
            Apostrophe => Some("'"),
            Quote => Some("\""),
            RecursiveAssign => Some("="),
            SimpleAssign => Some(":="),
            PosixAssign => Some("::="),
            ImmediateAssign => Some(":::="),
            IfndefAssign => Some("?="),
            ShellAssign => Some("!="),
            Eof => Some(""),
            Text(_) | Comment(_) | Keyword(_) | Unsupported(_) => None,
        }
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_str() {
            Some(s) => f.write_str(s),
            None => match self {
                TokenKind::Text(s) | TokenKind::Comment(s) | TokenKind::Unsupported(s) => {
                    f.write_str(s)
                }
                TokenKind::Keyword(k) => fmt::Display::fmt(k, f),
                _ => unreachable!("fixed_str covers every other variant"),
            },
        }
    }
}

/// A single lexical token, tagged with the position of its first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub position: Position,
    pub kind: TokenKind<'a>,
}

impl<'a> Token<'a> {
    #[must_use]
    pub const fn new(position: Position, kind: TokenKind<'a>) -> Self {
        Token { position, kind }
    }

    /// Reports whether this token is the end-of-input sentinel.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Tests whether `c` unconditionally ends a run of ordinary text.
///
/// This is the delimiter byte set: parentheses, braces, `$`, `:`, `,`,
/// `;`, `|`, the two quote characters, `#`, `=`, and the line-structuring
/// characters newline and tab. Note that `?` and `!` are deliberately
/// *not* here: they only end a text run when immediately followed by `=`
/// (forming `?=`/`!=`); [`crate::lexer`] handles that case with a
/// one-character lookahead rather than treating them as unconditional
/// delimiters, since both are otherwise ordinary characters in target and
/// variable names.
#[must_use]
pub fn is_text_char(c: char) -> bool {
    !matches!(
        c,
        '(' | '{'
            | ')'
            | '}'
            | '$'
            | ':'
            | ','
            | ';'
            | '|'
            | '\''
            | '"'
            | '#'
            | '='
            | '\n'
            | '\t'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_str_round_trips_operators() {
        assert_eq!(TokenKind::SimpleAssign.fixed_str(), Some(":="));
        assert_eq!(TokenKind::ImmediateAssign.fixed_str(), Some(":::="));
        assert_eq!(TokenKind::Text("foo").fixed_str(), None);
    }

    #[test]
    fn display_uses_carried_text_for_variable_kinds() {
        assert_eq!(TokenKind::Text("hello").to_string(), "hello");
        assert_eq!(TokenKind::Comment(" a note").to_string(), " a note");
        assert_eq!(TokenKind::Keyword(Keyword::Ifeq).to_string(), "ifeq");
    }

    #[test]
    fn is_assignment_is_exact() {
        assert!(TokenKind::PosixAssign.is_assignment());
        assert!(!TokenKind::Colon.is_assignment());
    }

    #[test]
    fn is_text_char_excludes_structural_characters() {
        assert!(is_text_char('a'));
        assert!(is_text_char('-'));
        assert!(!is_text_char('$'));
        assert!(!is_text_char(':'));
        assert!(!is_text_char('\n'));
        assert!(!is_text_char(';'));
        assert!(!is_text_char('|'));
        assert!(!is_text_char('\''));
        assert!(!is_text_char('"'));
    }

    #[test]
    fn is_text_char_allows_bare_question_and_bang() {
        // Only a trailing '=' turns these into operators; the lexer
        // handles that with a lookahead, not via is_text_char.
        assert!(is_text_char('?'));
        assert!(is_text_char('!'));
    }
}
