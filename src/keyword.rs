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

//! The closed table of directive and built-in function names.
//!
//! GNU Make reserves a fixed set of identifiers: the directives that
//! introduce conditionals, variable definitions and file inclusion, and the
//! built-in functions callable as `$(name ...)`. Every other identifier,
//! however it's spelled, is an ordinary variable or target name. This
//! module matches that closed set exactly, never by prefix or pattern.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error value indicating that a string is not a directive or built-in
/// function name.
///
/// Returned by [`Keyword::from_str`].
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub struct ParseKeywordError;

impl fmt::Display for ParseKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a directive or built-in function name")
    }
}

/// A reserved directive or built-in function identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    Define,
    Endef,
    Undefine,
    Ifdef,
    Ifndef,
    Ifeq,
    Ifneq,
    Else,
    Endif,
    Include,
    DashInclude,
    Sinclude,
    Override,
    Export,
    Unexport,
    Private,
    Vpath,

    Subst,
    Patsubst,
    Strip,
    Findstring,
    Filter,
    FilterOut,
    Sort,
    Word,
    Words,
    Wordlist,
    Firstword,
    Lastword,
    Dir,
    Notdir,
    Suffix,
    Basename,
    Addsuffix,
    Addprefix,
    Join,
    Wildcard,
    Realpath,
    Abspath,
    Error,
    Warning,
    Shell,
    Origin,
    Flavor,
    Let,
    Foreach,
    If,
    Or,
    And,
    Intcmp,
    Call,
    Eval,
    File,
    Value,
}

impl Keyword {
    /// Returns the literal spelling of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Define => "define",
            Endef => "endef",
            Undefine => "undefine",
            Ifdef => "ifdef",
            Ifndef => "ifndef",
            Ifeq => "ifeq",
            Ifneq => "ifneq",
            Else => "else",
            Endif => "endif",
            Include => "include",
            DashInclude => "-include",
            Sinclude => "sinclude",
            Override => "override",
            Export => "export",
            Unexport => "unexport",
            Private => "private",
            Vpath => "vpath",

            Subst => "subst",
            Patsubst => "patsubst",
            Strip => "strip",
            Findstring => "findstring",
            Filter => "filter",
            FilterOut => "filter-out",
            Sort => "sort",
            Word => "word",
            Words => "words",
            Wordlist => "wordlist",
            Firstword => "firstword",
            Lastword => "lastword",
            Dir => "dir",
            Notdir => "notdir",
            Suffix => "suffix",
            Basename => "basename",
            Addsuffix => "addsuffix",
            Addprefix => "addprefix",
            Join => "join",
            Wildcard => "wildcard",
            Realpath => "realpath",
            Abspath => "abspath",
            Error => "error",
            Warning => "warning",
            Shell => "shell",
            Origin => "origin",
            Flavor => "flavor",
            Let => "let",
            Foreach => "foreach",
            If => "if",
            Or => "or",
            And => "and",
            Intcmp => "intcmp",
            Call => "call",
            Eval => "eval",
            File => "file",
            Value => "value",
        }
    }

    /// Reports whether this keyword introduces a directive line (as
    /// opposed to a built-in function called as `$(name ...)`).
    #[must_use]
    pub const fn is_directive(self) -> bool {
        use Keyword::*;
        matches!(
            self,
            Define
                | Endef
                | Undefine
                | Ifdef
                | Ifndef
                | Ifeq
                | Ifneq
                | Else
                | Endif
                | Include
                | DashInclude
                | Sinclude
                | Override
                | Export
                | Unexport
                | Private
                | Vpath
        )
    }

    /// Reports whether this keyword names a built-in function.
    #[must_use]
    pub const fn is_builtin_function(self) -> bool {
        !self.is_directive()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Keyword, ParseKeywordError> {
        use Keyword::*;
        match s {
            "define" => Ok(Define),
            "endef" => Ok(Endef),
            "undefine" => Ok(Undefine),
            "ifdef" => Ok(Ifdef),
            "ifndef" => Ok(Ifndef),
            "ifeq" => Ok(Ifeq),
            "ifneq" => Ok(Ifneq),
            "else" => Ok(Else),
            "endif" => Ok(Endif),
            "include" => Ok(Include),
            "-include" => Ok(DashInclude),
            "sinclude" => Ok(Sinclude),
            "override" => Ok(Override),
            "export" => Ok(Export),
            "unexport" => Ok(Unexport),
            "private" => Ok(Private),
            "vpath" => Ok(Vpath),

            "subst" => Ok(Subst),
            "patsubst" => Ok(Patsubst),
            "strip" => Ok(Strip),
            "findstring" => Ok(Findstring),
            "filter" => Ok(Filter),
            "filter-out" => Ok(FilterOut),
            "sort" => Ok(Sort),
            "word" => Ok(Word),
            "words" => Ok(Words),
            "wordlist" => Ok(Wordlist),
            "firstword" => Ok(Firstword),
            "lastword" => Ok(Lastword),
            "dir" => Ok(Dir),
            "notdir" => Ok(Notdir),
            "suffix" => Ok(Suffix),
            "basename" => Ok(Basename),
            "addsuffix" => Ok(Addsuffix),
            "addprefix" => Ok(Addprefix),
            "join" => Ok(Join),
            "wildcard" => Ok(Wildcard),
            "realpath" => Ok(Realpath),
            "abspath" => Ok(Abspath),
            "error" => Ok(Error),
            "warning" => Ok(Warning),
            "shell" => Ok(Shell),
            "origin" => Ok(Origin),
            "flavor" => Ok(Flavor),
            "let" => Ok(Let),
            "foreach" => Ok(Foreach),
            "if" => Ok(If),
            "or" => Ok(Or),
            "and" => Ok(And),
            "intcmp" => Ok(Intcmp),
            "call" => Ok(Call),
            "eval" => Ok(Eval),
            "file" => Ok(File),
            "value" => Ok(Value),
            _ => Err(ParseKeywordError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_directive() {
        for kw in [
            Keyword::Define,
            Keyword::Endef,
            Keyword::Undefine,
            Keyword::Ifdef,
            Keyword::Ifndef,
            Keyword::Ifeq,
            Keyword::Ifneq,
            Keyword::Else,
            Keyword::Endif,
            Keyword::Include,
            Keyword::DashInclude,
            Keyword::Sinclude,
            Keyword::Override,
            Keyword::Export,
            Keyword::Unexport,
            Keyword::Private,
            Keyword::Vpath,
        ] {
            assert!(kw.is_directive());
            assert_eq!(kw.as_str().parse::<Keyword>().unwrap(), kw);
        }
    }

    #[test]
    fn round_trips_a_sample_of_builtin_functions() {
        for kw in [
            Keyword::Subst,
            Keyword::FilterOut,
            Keyword::Wordlist,
            Keyword::Intcmp,
            Keyword::Value,
        ] {
            assert!(kw.is_builtin_function());
            assert_eq!(kw.as_str().parse::<Keyword>().unwrap(), kw);
        }
    }

    #[test]
    fn rejects_ordinary_identifiers() {
        assert_eq!("CFLAGS".parse::<Keyword>(), Err(ParseKeywordError));
        assert_eq!("my_target".parse::<Keyword>(), Err(ParseKeywordError));
        assert_eq!("".parse::<Keyword>(), Err(ParseKeywordError));
    }

    #[test]
    fn dash_include_is_distinct_from_include() {
        assert_eq!("-include".parse(), Ok(Keyword::DashInclude));
        assert_ne!(Keyword::DashInclude, Keyword::Include);
    }
}
