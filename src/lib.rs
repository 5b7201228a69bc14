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

//! GNU Make source file syntax
//!
//! This crate parses, inspects, transforms, and prints GNU Make source files
//! (Makefiles and included fragments) without losing any byte of the
//! original input. It is a faithful, position-preserving pipeline: a
//! [tokenizer](lexer), a positioned [concrete syntax tree](syntax), a
//! recursive-descent [parser], and a position-aware [printer].
//!
//! ## What this crate does not do
//!
//! This crate never evaluates Make semantics: it does not expand variables,
//! run recipes, resolve `include` directives, or build a dependency graph.
//! It is purely syntactic. See each module's documentation for precise
//! scope.
//!
//! ## Round-tripping
//!
//! For any input that parses without diagnostics, printing the resulting
//! tree reproduces the input byte-for-byte. See [`parser::parse_file`]
//! and [`printer::print_to_string`].
//!
//! ```
//! use gmake_syntax::source::FileSet;
//! use gmake_syntax::parser::parse_file;
//! use gmake_syntax::printer::print_to_string;
//!
//! let input = "target: prereq\n\trecipe\n";
//! let mut files = FileSet::new();
//! let (file, diagnostics) = parse_file(&mut files, "Makefile", input);
//! assert!(diagnostics.is_empty());
//! assert_eq!(print_to_string(&file).unwrap(), input);
//! ```

pub mod builder;
pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod source;
pub mod syntax;
pub mod token;
pub mod walk;

pub use parser::parse_file;
pub use source::{Diagnostic, Diagnostics, FileId, FileSet, Position};
pub use syntax::File;
