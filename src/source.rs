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

//! Source positions and the file registry.
//!
//! A [`Position`] is an absolute byte offset into the combined address space
//! of every file registered in a [`FileSet`]. This lets a single parse
//! combine several files (a Makefile plus its `include`d fragments, say)
//! while still being able to answer "what file, line and column does this
//! position belong to" for any position produced during that parse.
//!
//! The design mirrors Go's `go/token` package, which the reference
//! implementation this crate's behavior is modeled on is itself built on.

use std::fmt;

/// An absolute 1-based byte offset into a [`FileSet`]'s combined address
/// space.
///
/// `0` is reserved to mean "no position" (see [`Position::NONE`]); every
/// other value denotes an actual byte. Positions are never negative and are
/// assigned once by [`FileSet::register`] plus the byte offset within that
/// file — they are never recomputed in place.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u32);

impl Position {
    /// The reserved "no position" value.
    pub const NONE: Position = Position(0);

    /// Creates a position from a raw 1-based offset. `0` means "no
    /// position".
    #[must_use]
    pub const fn new(offset: u32) -> Self {
        Position(offset)
    }

    /// Returns the raw offset, where `0` means "no position".
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Reports whether this position denotes an actual byte, i.e. is not
    /// [`Position::NONE`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Returns the position `count` bytes after this one.
    ///
    /// Panics if called on [`Position::NONE`]: advancing "no position" is
    /// always a bug in the caller.
    #[must_use]
    pub fn advance(self, count: u32) -> Self {
        assert!(self.is_valid(), "cannot advance an invalid position");
        Position(self.0 + count)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Position({})", self.0)
        } else {
            f.write_str("Position(none)")
        }
    }
}

/// A position resolved to a human-readable `(filename, line, column)`
/// triple.
///
/// `line` and `column` are both 1-based. An invalid [`Position`] (or one
/// outside every registered file) resolves to an empty filename and zero
/// line/column; callers must check [`ResolvedPosition::is_valid`] before
/// trusting the fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedPosition {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl ResolvedPosition {
    /// Reports whether this position was actually found in a registered
    /// file.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.filename.is_empty()
    }
}

impl fmt::Display for ResolvedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}:{}:{}", self.filename, self.line, self.column)
        } else {
            f.write_str("<invalid position>")
        }
    }
}

/// Opaque handle to a file registered in a [`FileSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileId(u32);

struct FileRecord {
    name: String,
    base: u32,
    size: u32,
    /// Offsets (as raw [`Position`] values) of the first byte of every line
    /// after the first. The first line always starts at `base`, so it is
    /// not recorded here.
    line_starts: Vec<u32>,
}

impl FileRecord {
    fn end(&self) -> u32 {
        self.base + self.size
    }

    fn contains(&self, pos: u32) -> bool {
        self.base <= pos && pos <= self.end()
    }

    fn position_of(&self, pos: u32) -> ResolvedPosition {
        // line_starts is kept sorted by construction (see FileSet::record_newline).
        let line_index = self.line_starts.partition_point(|&start| start <= pos);
        let line = (line_index + 1) as u32;
        let line_start = if line_index == 0 {
            self.base
        } else {
            self.line_starts[line_index - 1]
        };
        ResolvedPosition {
            filename: self.name.clone(),
            line,
            column: pos - line_start + 1,
        }
    }
}

/// Registry mapping [`Position`]s to `(filename, line, column)`.
///
/// A `FileSet` owns a monotonically growing address space: each
/// [`register`](FileSet::register) call appends a new file immediately
/// after the previous one, so positions handed out for different files
/// never overlap. Reads ([`position_of`](FileSet::position_of)) never
/// mutate; only `register` and [`record_newline`](FileSet::record_newline)
/// do.
#[derive(Default)]
pub struct FileSet {
    files: Vec<FileRecord>,
}

impl FileSet {
    /// Creates an empty file set.
    #[must_use]
    pub fn new() -> Self {
        FileSet { files: Vec::new() }
    }

    /// Registers a new file of `size` bytes, returning its handle and the
    /// [`Position`] of its first byte.
    ///
    /// The returned base position is one past the end of every
    /// previously-registered file, so positions never collide across files
    /// in the same set.
    pub fn register(&mut self, name: impl Into<String>, size: usize) -> (FileId, Position) {
        let base = self.files.last().map_or(1, |f| f.end() + 1);
        let size = u32::try_from(size).expect("file size exceeds u32 range");
        self.files.push(FileRecord {
            name: name.into(),
            base,
            size,
            line_starts: Vec::new(),
        });
        let id = FileId((self.files.len() - 1) as u32);
        (id, Position::new(base))
    }

    /// Records that the byte at `pos` is a newline, so the byte that
    /// follows it starts a new line.
    ///
    /// No-op if `pos` does not resolve to a registered file, or if the
    /// following offset is already recorded (idempotent, matching the
    /// contract in the crate's specification).
    pub fn record_newline(&mut self, pos: Position) {
        let Some(pos) = Self::valid_offset(pos) else {
            return;
        };
        let next = pos + 1;
        if let Some(file) = self.file_for_mut(pos) {
            if file.line_starts.last() != Some(&next) {
                file.line_starts.push(next);
            }
        }
    }

    /// Resolves a position to its `(filename, line, column)` triple.
    ///
    /// Returns an invalid [`ResolvedPosition`] (see
    /// [`ResolvedPosition::is_valid`]) for [`Position::NONE`] or a position
    /// outside every registered file.
    #[must_use]
    pub fn position_of(&self, pos: Position) -> ResolvedPosition {
        let Some(offset) = Self::valid_offset(pos) else {
            return ResolvedPosition::default();
        };
        match self.file_for(offset) {
            Some(file) => file.position_of(offset),
            None => ResolvedPosition::default(),
        }
    }

    /// Returns the name passed to [`register`](FileSet::register) for
    /// `id`.
    #[must_use]
    pub fn name(&self, id: FileId) -> &str {
        &self.files[id.0 as usize].name
    }

    fn valid_offset(pos: Position) -> Option<u32> {
        pos.is_valid().then_some(pos.get())
    }

    fn file_for(&self, pos: u32) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.contains(pos))
    }

    fn file_for_mut(&mut self, pos: u32) -> Option<&mut FileRecord> {
        self.files.iter_mut().find(|f| f.contains(pos))
    }
}

/// A single parse diagnostic: a human-readable message anchored to the
/// position it describes.
///
/// Diagnostics are ordered by [`Position`] so a `Vec<Diagnostic>` can be
/// sorted directly to satisfy the "sorted by position, ties broken by
/// discovery order" contract of [`crate::parser::parse_file`]: [`Vec::sort`]
/// is a stable sort, so equal positions keep their relative (i.e. discovery)
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Diagnostic {
            position,
            message: message.into(),
        }
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.position.cmp(&other.position)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position.get(), self.message)
    }
}

/// An ordered collection of [`Diagnostic`]s collected during a parse.
///
/// Diagnostics accumulate in discovery order via [`push`](Diagnostics::push)
/// and are brought into position order once, at the end of parsing, by
/// [`sort`](Diagnostics::sort).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Diagnostics(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sorts the diagnostics by position, keeping discovery order among
    /// ties (see [`Diagnostic`]'s ordering contract).
    pub fn sort(&mut self) {
        self.0.sort();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Renders every diagnostic as a `file:line:column: message` string,
    /// resolved against `files`.
    #[must_use]
    pub fn render(&self, files: &FileSet) -> String {
        self.0
            .iter()
            .map(|d| format!("{}: {}", files.position_of(d.position), d.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Pretty-prints every diagnostic with the offending source line quoted
    /// underneath, using `annotate-snippets`.
    ///
    /// Requires the crate's `annotate-snippets` feature.
    #[cfg(feature = "annotate-snippets")]
    #[must_use]
    pub fn render_annotated(&self, files: &FileSet, source: &str) -> String {
        use annotate_snippets::{Level, Renderer, Snippet};

        let renderer = Renderer::plain();
        let mut out = String::new();
        for diagnostic in &self.0 {
            let resolved = files.position_of(diagnostic.position);
            let offset = diagnostic.position.get() as usize;
            let line_start = source[..offset.min(source.len())]
                .rfind('\n')
                .map_or(0, |i| i + 1);
            let line_end = source[offset.min(source.len())..]
                .find('\n')
                .map_or(source.len(), |i| offset + i);
            let line = &source[line_start..line_end];
            let annotation_start = offset.saturating_sub(line_start);
            let message = Level::Error.title(&diagnostic.message).snippet(
                Snippet::source(line)
                    .line_start(resolved.line as usize)
                    .origin(&resolved.filename)
                    .annotation(
                        Level::Error
                            .span(annotation_start..(annotation_start + 1).max(annotation_start)),
                    ),
            );
            out.push_str(&renderer.render(message).to_string());
            out.push('\n');
        }
        out
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Diagnostics(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_assigns_disjoint_bases() {
        let mut files = FileSet::new();
        let (_, base1) = files.register("a.mk", 10);
        let (_, base2) = files.register("b.mk", 5);
        assert_eq!(base1, Position::new(1));
        assert_eq!(base2, Position::new(12));
    }

    #[test]
    fn position_of_reports_line_and_column() {
        let mut files = FileSet::new();
        let (_, base) = files.register("Makefile", 20);
        // "target: prereq\n\trecipe\n"
        //  1234567890123456789012
        let newline_pos = base.advance(14); // the '\n' after "prereq"
        files.record_newline(newline_pos);

        let resolved = files.position_of(base);
        assert_eq!(resolved.line, 1);
        assert_eq!(resolved.column, 1);

        let resolved = files.position_of(base.advance(15));
        assert_eq!(resolved.line, 2);
        assert_eq!(resolved.column, 1);
    }

    #[test]
    fn position_of_invalid_position_is_invalid() {
        let files = FileSet::new();
        let resolved = files.position_of(Position::NONE);
        assert!(!resolved.is_valid());
        assert_eq!(resolved.line, 0);
    }

    #[test]
    fn record_newline_is_idempotent() {
        let mut files = FileSet::new();
        let (_, base) = files.register("Makefile", 10);
        let nl = base.advance(3);
        files.record_newline(nl);
        files.record_newline(nl);
        let resolved = files.position_of(nl.advance(1));
        assert_eq!(resolved.line, 2);
    }

    #[test]
    fn diagnostics_sort_is_stable_on_ties() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::new(Position::new(5), "first"));
        diags.push(Diagnostic::new(Position::new(1), "second"));
        diags.push(Diagnostic::new(Position::new(1), "third"));
        diags.sort();
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["second", "third", "first"]);
    }
}
