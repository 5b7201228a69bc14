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

//! Renders a [`File`] back to text.
//!
//! The printer is driven entirely by the positions recorded on each
//! node: it writes each piece of literal text at its node's position,
//! closing any gap between the end of one piece and the start of the
//! next before writing. Most gaps are ordinary single-space separators
//! between expressions on the same line, and are closed with
//! [`Printer::pad_to`]. A handful of places are always followed by a
//! line break regardless of what node comes next — the start of a
//! recipe line, the boundary between two top-level objects, the body of
//! a `define`, the line after a conditional's head — and those are
//! closed with [`Printer::newline_pad_to`] instead, which emits the
//! line break itself rather than guessing at whitespace. Getting this
//! distinction right is what makes a parsed tree print back out
//! byte-for-byte.

use std::fmt;

use crate::source::Position;
use crate::syntax::{Directive, Expression, File, IfCondition, Object, QuoteChar, RefBracket};

/// An error produced while printing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrintError {
    /// A node's recorded position would require moving the cursor
    /// backwards, which means the tree's positions are not monotonically
    /// increasing.
    #[error("position {0} is before the current cursor at {1}")]
    PositionWentBackwards(Position, Position),
    /// The underlying writer failed.
    #[error("write error")]
    Write,
}

/// Prints `file` to `out`.
pub fn print(file: &File, out: &mut impl fmt::Write) -> Result<(), PrintError> {
    let mut printer = Printer {
        out,
        cursor: file.start,
    };
    printer.print_objects(&file.objects)?;
    printer.newline_pad_to(file.end)?;
    Ok(())
}

/// Prints `file` to a freshly allocated `String`.
pub fn print_to_string(file: &File) -> Result<String, PrintError> {
    let mut out = String::new();
    print(file, &mut out)?;
    Ok(out)
}

struct Printer<'w, W: fmt::Write> {
    out: &'w mut W,
    cursor: Position,
}

impl<W: fmt::Write> Printer<'_, W> {
    /// Advances the cursor to `pos`, writing spaces to fill the gap, for
    /// a gap that stays on the same source line.
    fn pad_to(&mut self, pos: Position) -> Result<(), PrintError> {
        if !pos.is_valid() {
            return Ok(());
        }
        if pos.get() < self.cursor.get() {
            return Err(PrintError::PositionWentBackwards(pos, self.cursor));
        }
        for _ in self.cursor.get()..pos.get() {
            self.out.write_char(' ').map_err(|_| PrintError::Write)?;
        }
        self.cursor = pos;
        Ok(())
    }

    /// Advances the cursor to `pos`, writing a single newline to open the
    /// gap (if there is one) followed by spaces for anything beyond that
    /// one byte. Use this wherever the grammar guarantees a line break
    /// regardless of what follows.
    fn newline_pad_to(&mut self, pos: Position) -> Result<(), PrintError> {
        if !pos.is_valid() {
            return Ok(());
        }
        if pos.get() < self.cursor.get() {
            return Err(PrintError::PositionWentBackwards(pos, self.cursor));
        }
        if pos.get() > self.cursor.get() {
            self.out.write_char('\n').map_err(|_| PrintError::Write)?;
            self.cursor = self.cursor.advance(1);
        }
        self.pad_to(pos)
    }

    fn write_at(&mut self, pos: Position, text: &str) -> Result<(), PrintError> {
        self.pad_to(pos)?;
        self.write_literal(pos, text)
    }

    /// Like [`Printer::write_at`], but the gap before `pos` is closed
    /// with [`Printer::newline_pad_to`] instead of [`Printer::pad_to`].
    fn write_at_nl(&mut self, pos: Position, text: &str) -> Result<(), PrintError> {
        self.newline_pad_to(pos)?;
        self.write_literal(pos, text)
    }

    fn write_literal(&mut self, pos: Position, text: &str) -> Result<(), PrintError> {
        self.out.write_str(text).map_err(|_| PrintError::Write)?;
        self.cursor = pos.advance(text.len() as u32);
        Ok(())
    }

    fn print_objects(&mut self, objects: &[Object]) -> Result<(), PrintError> {
        for (i, object) in objects.iter().enumerate() {
            if i > 0 {
                self.newline_pad_to(object.pos())?;
            }
            self.print_object(object)?;
        }
        Ok(())
    }

    fn print_object(&mut self, object: &Object) -> Result<(), PrintError> {
        match object {
            Object::Rule(rule) => self.print_rule(rule),
            Object::VariableAssignment(assignment) => self.print_assignment(assignment),
            Object::CommentGroup(group) => self.print_comment_group(group),
            Object::Directive(directive) => self.print_directive(directive),
        }
    }

    fn print_rule(&mut self, rule: &crate::syntax::Rule) -> Result<(), PrintError> {
        for target in &rule.targets {
            self.print_expression(target)?;
        }
        self.write_at(rule.colon, ":")?;
        for prereq in &rule.prerequisites {
            self.print_expression(prereq)?;
        }
        if rule.pipe.is_valid() {
            self.write_at(rule.pipe, "|")?;
            for prereq in &rule.order_only_prerequisites {
                self.print_expression(prereq)?;
            }
        }
        for (i, recipe) in rule.recipes.iter().enumerate() {
            let prefix = recipe.prefix.as_char().to_string();
            // The first recipe only forces a line break when it isn't
            // introduced by `;`: a `;`-prefixed recipe stays on the rule's
            // own line (`target: prereq ; cmd`). Every recipe after the
            // first always starts a new line regardless of its own prefix.
            if i == 0 && matches!(recipe.prefix, crate::syntax::RecipePrefix::Semicolon) {
                self.write_at(recipe.prefix_position, &prefix)?;
            } else {
                self.write_at_nl(recipe.prefix_position, &prefix)?;
            }
            self.write_at(recipe.body.position, &recipe.body.value)?;
        }
        Ok(())
    }

    fn print_assignment(
        &mut self,
        assignment: &crate::syntax::VariableAssignment,
    ) -> Result<(), PrintError> {
        self.print_expression(&assignment.name)?;
        self.write_at(assignment.operator_position, assignment.operator.as_str())?;
        for value in &assignment.values {
            self.print_expression(value)?;
        }
        Ok(())
    }

    fn print_comment_group(
        &mut self,
        group: &crate::syntax::CommentGroup,
    ) -> Result<(), PrintError> {
        for (i, comment) in group.comments().iter().enumerate() {
            if i > 0 {
                self.write_at_nl(comment.hash, "#")?;
            } else {
                self.write_at(comment.hash, "#")?;
            }
            if !comment.text.is_empty() {
                self.write_at(comment.hash.advance(1), &comment.text)?;
            }
        }
        Ok(())
    }

    fn print_directive(&mut self, directive: &Directive) -> Result<(), PrintError> {
        match directive {
            Directive::Define(define) => self.print_define(define),
            Directive::Undefine(undefine) => self.print_undefine(undefine),
            Directive::Conditional(block) => self.print_conditional(block),
            Directive::Keyword(keyword) => self.print_keyword_directive(keyword),
        }
    }

    fn print_define(&mut self, define: &crate::syntax::DefineDirective) -> Result<(), PrintError> {
        self.write_at(define.define, "define")?;
        self.print_expression(&define.name)?;
        if let Some((op, op_pos)) = define.operator {
            self.write_at(op_pos, op.as_str())?;
        }
        self.write_at_nl(define.body.position, &define.body.value)?;
        self.write_at_nl(define.endef, "endef")
    }

    fn print_undefine(
        &mut self,
        undefine: &crate::syntax::UndefineDirective,
    ) -> Result<(), PrintError> {
        self.write_at(undefine.keyword, "undefine")?;
        self.print_expression(&undefine.name)
    }

    fn print_conditional(
        &mut self,
        block: &crate::syntax::ConditionalBlock,
    ) -> Result<(), PrintError> {
        self.print_if_condition(&block.head)?;
        if let Some(first) = block.body.first() {
            self.newline_pad_to(first.pos())?;
        }
        self.print_objects(&block.body)?;
        for clause in &block.else_clauses {
            self.write_at_nl(clause.else_position, "else")?;
            if let Some(head) = &clause.head {
                self.print_if_condition(head)?;
            }
            if let Some(first) = clause.body.first() {
                self.newline_pad_to(first.pos())?;
            }
            self.print_objects(&clause.body)?;
        }
        self.write_at_nl(block.endif, "endif")
    }

    fn print_if_condition(&mut self, head: &IfCondition) -> Result<(), PrintError> {
        match head {
            IfCondition::Ifeq(ifeq) => {
                self.write_at(ifeq.keyword_position, ifeq.keyword.as_str())?;
                if let Some((open, close)) = ifeq.parens {
                    self.write_at(open, "(")?;
                    self.print_expression(&ifeq.arg1)?;
                    self.write_at(ifeq.comma, ",")?;
                    self.print_expression(&ifeq.arg2)?;
                    self.write_at(close, ")")?;
                } else {
                    self.print_expression(&ifeq.arg1)?;
                    self.print_expression(&ifeq.arg2)?;
                }
                Ok(())
            }
            IfCondition::Ifdef(ifdef) => {
                self.write_at(ifdef.keyword_position, ifdef.keyword.as_str())?;
                self.print_expression(&ifdef.name)
            }
        }
    }

    fn print_keyword_directive(
        &mut self,
        keyword: &crate::syntax::KeywordDirective,
    ) -> Result<(), PrintError> {
        self.write_at(keyword.keyword_position, keyword.keyword.as_str())?;
        for expr in &keyword.rest {
            self.print_expression(expr)?;
        }
        Ok(())
    }

    fn print_expression(&mut self, expr: &Expression) -> Result<(), PrintError> {
        match expr {
            Expression::TextRun(run) => self.write_at(run.position, &run.value),
            Expression::VariableReference(reference) => {
                self.write_at(reference.dollar, "$")?;
                match reference.brackets {
                    Some(RefBracket::Paren) => {
                        self.write_at(reference.open, "(")?;
                        self.write_at(reference.name.position, &reference.name.value)?;
                        self.write_at(reference.close, ")")
                    }
                    Some(RefBracket::Brace) => {
                        self.write_at(reference.open, "{")?;
                        self.write_at(reference.name.position, &reference.name.value)?;
                        self.write_at(reference.close, "}")
                    }
                    None => self.write_at(reference.name.position, &reference.name.value),
                }
            }
            Expression::QuotedExpression(quoted) => {
                let quote_str = match quoted.quote {
                    QuoteChar::Single => "'",
                    QuoteChar::Double => "\"",
                };
                self.write_at(quoted.open, quote_str)?;
                self.print_expression(&quoted.inner)?;
                self.write_at(quoted.close, quote_str)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_file;
    use crate::source::FileSet;

    fn round_trip(input: &str) -> String {
        let mut files = FileSet::new();
        let (file, diagnostics) = parse_file(&mut files, "test.mk", input);
        assert!(diagnostics.is_empty(), "{}", diagnostics.render(&files));
        print_to_string(&file).unwrap()
    }

    #[test]
    fn prints_a_bare_rule_byte_for_byte() {
        let input = "target: prereq\n\trecipe\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_a_rule_with_several_recipe_lines() {
        let input = "target:\n\tstep one\n\tstep two\n\tstep three\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_a_rule_with_no_recipe_lines() {
        let input = "target: prereq\nother: prereq2\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_a_semicolon_prefixed_recipe_inline() {
        use crate::syntax::{Recipe, RecipePrefix};

        // The parser never produces a `Semicolon`-prefixed recipe (it
        // always assumes tab), so this tree is hand-built to exercise the
        // variant directly: `target: prereq ; cmd` stays on one line.
        let rule = crate::syntax::Rule {
            targets: vec![Expression::TextRun(crate::syntax::TextRun::new(
                Position::new(1),
                "target",
            ))],
            colon: Position::new(7),
            prerequisites: vec![Expression::TextRun(crate::syntax::TextRun::new(
                Position::new(9),
                "prereq",
            ))],
            pipe: Position::NONE,
            order_only_prerequisites: vec![],
            recipes: vec![Recipe {
                prefix: RecipePrefix::Semicolon,
                prefix_position: Position::new(16),
                body: crate::syntax::TextRun::new(Position::new(18), "cmd".to_string()),
            }],
        };
        let file = File {
            start: Position::new(1),
            end: Position::new(21),
            objects: vec![Object::Rule(rule)],
        };
        assert_eq!(print_to_string(&file).unwrap(), "target: prereq ; cmd");
    }

    #[test]
    fn prints_an_assignment_byte_for_byte() {
        let input = "CFLAGS := -O2 -Wall\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_a_variable_reference_byte_for_byte() {
        let input = "all: $(TARGETS) ${EXTRA}\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_comments_byte_for_byte() {
        let input = "# a comment\n# another\ntarget:\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_order_only_prerequisites_byte_for_byte() {
        let input = "target: a | b c\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_a_conditional_block_byte_for_byte() {
        let input = "ifeq (a,b)\nX = 1\nelse\nX = 2\nendif\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_an_empty_conditional_block_byte_for_byte() {
        let input = "ifeq (a,b)\nendif\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_a_define_directive_byte_for_byte() {
        let input = "define greeting\nhello\nworld\nendef\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn prints_consecutive_rules_byte_for_byte() {
        let input = "a:\n\tfirst\nb:\n\tsecond\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn rejects_positions_that_go_backwards() {
        let mut file = {
            let mut files = FileSet::new();
            parse_file(&mut files, "t.mk", "a:\n").0
        };
        if let Object::Rule(rule) = &mut file.objects[0] {
            rule.colon = Position::new(1);
        }
        assert!(print_to_string(&file).is_err());
    }
}
