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

//! Hand-building and editing a [`File`] without going through the parser.
//!
//! Every [`crate::syntax`] node is just a plain struct with public
//! fields, so it's always possible to construct one directly. What's
//! awkward to do by hand is getting every position right: each position
//! has to be strictly greater than the one before it, with enough room
//! for whatever text sits at the previous position. [`Builder`] automates
//! that bookkeeping: each method takes the content for one node, places
//! it at the cursor, advances the cursor past it (plus one byte of
//! separating space, unless the content ends a line), and returns the
//! finished node.
//!
//! [`copy_at`] and [`insert_rule`] address two remaining chores:
//! relocating an existing subtree to print correctly at a new position,
//! and splicing a new rule into a file's object list.

use crate::source::Position;
use crate::syntax::{
    AssignOp, Expression, File, Object, Recipe, RecipePrefix, Rule, TextRun, VariableAssignment,
};

/// Builds a [`File`] one object at a time, handing out strictly
/// increasing positions as it goes.
pub struct Builder {
    cursor: Position,
    objects: Vec<Object>,
}

impl Builder {
    /// Creates a builder whose first node will be placed at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Builder {
            cursor: start,
            objects: Vec::new(),
        }
    }

    fn take(&mut self, len: u32) -> Position {
        let pos = self.cursor;
        self.cursor = pos.advance(len);
        pos
    }

    /// Advances the cursor by one position without emitting anything,
    /// for the separating space between two adjacent tokens.
    fn space(&mut self) {
        self.cursor = self.cursor.advance(1);
    }

    /// Advances the cursor past a newline.
    fn newline(&mut self) {
        self.cursor = self.cursor.advance(1);
    }

    /// Builds a bare text expression and advances the cursor past it and
    /// one trailing separator.
    #[must_use]
    pub fn text(&mut self, value: impl Into<String>) -> Expression {
        let expr = self.text_run(value);
        self.space();
        expr
    }

    /// Builds a bare text expression without reserving a trailing
    /// separator, for callers that place a delimiter (`:`, a newline)
    /// immediately afterward rather than another expression.
    fn text_run(&mut self, value: impl Into<String>) -> Expression {
        let value = value.into();
        let pos = self.take(value.len() as u32);
        Expression::TextRun(TextRun::new(pos, value))
    }

    /// Builds a rule with the given target and prerequisite text, each
    /// becoming its own [`TextRun`] expression, optionally followed by
    /// tab-prefixed recipe lines.
    #[must_use]
    pub fn rule(&mut self, targets: &[&str], prerequisites: &[&str], recipes: &[&str]) -> Rule {
        let targets: Vec<_> = targets
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if i > 0 {
                    self.space();
                }
                self.text_run(t)
            })
            .collect();
        let colon = self.take(1);
        let prerequisites: Vec<_> = prerequisites
            .iter()
            .map(|p| {
                self.space();
                self.text_run(p)
            })
            .collect();
        self.newline();

        let recipes: Vec<_> = recipes
            .iter()
            .map(|body| {
                let prefix_position = self.take(1);
                let body_position = self.take(body.len() as u32);
                self.newline();
                Recipe {
                    prefix: RecipePrefix::Tab,
                    prefix_position,
                    body: TextRun::new(body_position, body.to_string()),
                }
            })
            .collect();

        Rule {
            targets,
            colon,
            prerequisites,
            pipe: Position::NONE,
            order_only_prerequisites: Vec::new(),
            recipes,
        }
    }

    /// Builds a `name OP value` assignment.
    #[must_use]
    pub fn assignment(&mut self, name: &str, operator: AssignOp, value: &str) -> VariableAssignment {
        let name_pos = self.take(name.len() as u32);
        self.space();
        let op_pos = self.take(operator.as_str().len() as u32);
        self.space();
        let value_pos = self.take(value.len() as u32);
        self.newline();

        VariableAssignment {
            name: Expression::TextRun(TextRun::new(name_pos, name)),
            operator,
            operator_position: op_pos,
            values: vec![Expression::TextRun(TextRun::new(value_pos, value))],
        }
    }

    /// Appends `object` to the file being built, without repositioning
    /// it: callers that build each object with this builder's own
    /// methods never need to call this directly, but it's available for
    /// splicing in a node built some other way (e.g. one relocated with
    /// [`copy_at`]).
    pub fn push(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Finishes the file, covering positions from the value passed to
    /// [`Builder::new`] up to the current cursor.
    #[must_use]
    pub fn finish(self) -> File {
        File {
            start: self.objects.first().map_or(self.cursor, Object::pos),
            end: self.cursor,
            objects: self.objects,
        }
    }
}

/// Shifts every position in `expr` by `delta`, so it prints correctly
/// once relocated to start at `new_pos` instead of its current position.
///
/// Only [`Expression`] is supported directly; composite nodes (`Rule`,
/// `VariableAssignment`, ...) can be relocated by applying this to each
/// of their expression fields and shifting their own scalar positions by
/// the same `delta`.
#[must_use]
pub fn copy_at(expr: &Expression, new_pos: Position) -> Expression {
    let delta = new_pos.get() as i64 - expr.pos().get() as i64;
    shift_expression(expr, delta)
}

fn shift(pos: Position, delta: i64) -> Position {
    if !pos.is_valid() {
        return pos;
    }
    Position::new((pos.get() as i64 + delta) as u32)
}

fn shift_expression(expr: &Expression, delta: i64) -> Expression {
    match expr {
        Expression::TextRun(t) => {
            Expression::TextRun(TextRun::new(shift(t.position, delta), t.value.clone()))
        }
        Expression::VariableReference(r) => {
            Expression::VariableReference(crate::syntax::VariableReference {
                dollar: shift(r.dollar, delta),
                brackets: r.brackets,
                open: shift(r.open, delta),
                name: TextRun::new(shift(r.name.position, delta), r.name.value.clone()),
                close: shift(r.close, delta),
            })
        }
        Expression::QuotedExpression(q) => {
            Expression::QuotedExpression(Box::new(crate::syntax::QuotedExpression {
                quote: q.quote,
                open: shift(q.open, delta),
                inner: shift_expression(&q.inner, delta),
                close: shift(q.close, delta),
            }))
        }
    }
}

/// Inserts `rule` into `file` immediately before the object currently at
/// `index` (or at the end, if `index >= file.objects.len()`), shifting
/// every position from there to the end of the file by the space `rule`
/// needs plus a trailing newline.
///
/// This is a whole-tail rewrite: every object after the insertion point
/// is repositioned, which is what keeps the file's positions strictly
/// increasing without requiring gaps to have been reserved in advance.
pub fn insert_rule(file: &mut File, index: usize, mut rule: Rule) {
    let index = index.min(file.objects.len());
    // The new rule takes over the position of whatever currently sits at
    // `index` (or the file's end, if appending); that object and
    // everything after it get pushed forward to make room.
    let insert_pos = file.objects.get(index).map_or(file.end, Object::pos);

    let rule_len = rule_span(&rule);
    shift_rule(&mut rule, insert_pos.get() as i64 - rule.pos().get() as i64);

    let shift_amount = rule_len as i64 + 1;
    for object in file.objects.iter_mut().skip(index) {
        shift_object(object, shift_amount);
    }
    file.end = shift(file.end, shift_amount);

    file.objects.insert(index, Object::Rule(rule));
}

fn rule_span(rule: &Rule) -> u32 {
    let end = rule
        .recipes
        .last()
        .map(|r| r.body.position.advance(r.body.value.len() as u32))
        .unwrap_or_else(|| rule.colon.advance(1));
    end.get() - rule.pos().get()
}

fn shift_rule(rule: &mut Rule, delta: i64) {
    rule.targets = rule.targets.iter().map(|t| shift_expression(t, delta)).collect();
    rule.colon = shift(rule.colon, delta);
    rule.prerequisites = rule
        .prerequisites
        .iter()
        .map(|p| shift_expression(p, delta))
        .collect();
    rule.pipe = shift(rule.pipe, delta);
    rule.order_only_prerequisites = rule
        .order_only_prerequisites
        .iter()
        .map(|p| shift_expression(p, delta))
        .collect();
    for recipe in &mut rule.recipes {
        recipe.prefix_position = shift(recipe.prefix_position, delta);
        recipe.body.position = shift(recipe.body.position, delta);
    }
}

fn shift_object(object: &mut Object, delta: i64) {
    match object {
        Object::Rule(rule) => shift_rule(rule, delta),
        Object::VariableAssignment(assignment) => {
            assignment.name = shift_expression(&assignment.name, delta);
            assignment.operator_position = shift(assignment.operator_position, delta);
            assignment.values = assignment
                .values
                .iter()
                .map(|v| shift_expression(v, delta))
                .collect();
        }
        Object::CommentGroup(group) => {
            for comment in group.comments_mut() {
                comment.hash = shift(comment.hash, delta);
            }
        }
        Object::Directive(directive) => shift_directive(directive, delta),
    }
}

fn shift_directive(directive: &mut crate::syntax::Directive, delta: i64) {
    use crate::syntax::Directive;
    match directive {
        Directive::Define(d) => {
            d.define = shift(d.define, delta);
            d.name = shift_expression(&d.name, delta);
            if let Some((_, pos)) = &mut d.operator {
                *pos = shift(*pos, delta);
            }
            d.body.position = shift(d.body.position, delta);
            d.endef = shift(d.endef, delta);
        }
        Directive::Undefine(d) => {
            d.keyword = shift(d.keyword, delta);
            d.name = shift_expression(&d.name, delta);
        }
        Directive::Conditional(block) => {
            shift_if_condition(&mut block.head, delta);
            for object in &mut block.body {
                shift_object(object, delta);
            }
            for clause in &mut block.else_clauses {
                clause.else_position = shift(clause.else_position, delta);
                if let Some(head) = &mut clause.head {
                    shift_if_condition(head, delta);
                }
                for object in &mut clause.body {
                    shift_object(object, delta);
                }
            }
            block.endif = shift(block.endif, delta);
        }
        Directive::Keyword(k) => {
            k.keyword_position = shift(k.keyword_position, delta);
            k.rest = k.rest.iter().map(|e| shift_expression(e, delta)).collect();
        }
    }
}

fn shift_if_condition(condition: &mut crate::syntax::IfCondition, delta: i64) {
    use crate::syntax::IfCondition;
    match condition {
        IfCondition::Ifeq(ifeq) => {
            ifeq.keyword_position = shift(ifeq.keyword_position, delta);
            if let Some((open, close)) = &mut ifeq.parens {
                *open = shift(*open, delta);
                *close = shift(*close, delta);
            }
            ifeq.arg1 = shift_expression(&ifeq.arg1, delta);
            ifeq.comma = shift(ifeq.comma, delta);
            ifeq.arg2 = shift_expression(&ifeq.arg2, delta);
        }
        IfCondition::Ifdef(ifdef) => {
            ifdef.keyword_position = shift(ifdef.keyword_position, delta);
            ifdef.name = shift_expression(&ifdef.name, delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print_to_string;

    #[test]
    fn builds_a_simple_rule() {
        let mut builder = Builder::new(Position::new(1));
        let rule = builder.rule(&["target"], &["prereq"], &["recipe"]);
        builder.push(Object::Rule(rule));
        let file = builder.finish();
        assert_eq!(
            print_to_string(&file).unwrap(),
            "target: prereq\n\trecipe\n"
        );
    }

    #[test]
    fn a_hand_built_semicolon_recipe_stays_on_one_line() {
        // `Builder::rule` always produces a tab-prefixed recipe; a
        // `;`-prefixed one is built directly from `syntax` structs, which
        // `Builder`'s "plain struct, public fields" design always allows.
        let rule = Rule {
            targets: vec![Expression::TextRun(TextRun::new(Position::new(1), "target"))],
            colon: Position::new(7),
            prerequisites: vec![Expression::TextRun(TextRun::new(Position::new(9), "prereq"))],
            pipe: Position::NONE,
            order_only_prerequisites: vec![],
            recipes: vec![Recipe {
                prefix: RecipePrefix::Semicolon,
                prefix_position: Position::new(16),
                body: TextRun::new(Position::new(18), "cmd".to_string()),
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
    fn builds_an_assignment() {
        let mut builder = Builder::new(Position::new(1));
        let assignment = builder.assignment("CFLAGS", AssignOp::Simple, "-O2");
        builder.push(Object::VariableAssignment(assignment));
        let file = builder.finish();
        assert_eq!(print_to_string(&file).unwrap(), "CFLAGS := -O2\n");
    }

    #[test]
    fn copy_at_relocates_a_text_run() {
        let expr = Expression::TextRun(TextRun::new(Position::new(5), "hello"));
        let moved = copy_at(&expr, Position::new(20));
        assert_eq!(moved.pos(), Position::new(20));
    }

    #[test]
    fn insert_rule_keeps_positions_increasing() {
        let mut files = crate::source::FileSet::new();
        let (mut file, diags) =
            crate::parser::parse_file(&mut files, "t.mk", "a:\n\trecipe_a\nb:\n\trecipe_b\n");
        assert!(diags.is_empty());

        let mut builder = Builder::new(Position::new(1));
        let new_rule = builder.rule(&["mid"], &[], &["recipe_mid"]);
        insert_rule(&mut file, 1, new_rule);

        assert_eq!(file.objects.len(), 3);
        let mut last = Position::NONE;
        for object in &file.objects {
            assert!(object.pos() > last);
            last = object.pos();
        }
    }
}
