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

//! Tree traversal.
//!
//! [`Visitor`] mirrors the node categories in [`crate::syntax`]: one
//! method per abstract category (`Object`, `Expression`, `Directive`,
//! `IfCondition`), each with a default implementation that recurses into
//! children in source order and otherwise does nothing. Overriding a
//! single method intercepts that category everywhere it occurs without
//! having to touch the unrelated ones.

use crate::syntax::{
    Comment, ConditionalBlock, Directive, ElseClause, Expression, File, IfCondition, Object,
    Recipe, Rule, VariableAssignment,
};

/// Visits nodes of a [`File`] in source order.
///
/// Every method has a default body that walks into the node's children;
/// override only the categories you care about. Returning early from an
/// override (simply not calling [`walk_*`](self) helpers) prunes that
/// subtree.
pub trait Visitor {
    fn visit_object(&mut self, object: &Object) {
        walk_object(self, object);
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    fn visit_directive(&mut self, directive: &Directive) {
        walk_directive(self, directive);
    }

    fn visit_if_condition(&mut self, condition: &IfCondition) {
        walk_if_condition(self, condition);
    }

    fn visit_comment(&mut self, _comment: &Comment) {}

    fn visit_recipe(&mut self, _recipe: &Recipe) {}
}

/// Visits every object in `file`, in file order.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, file: &File) {
    for object in &file.objects {
        visitor.visit_object(object);
    }
}

/// Visits `object`'s children in the order they would print.
pub fn walk_object<V: Visitor + ?Sized>(visitor: &mut V, object: &Object) {
    match object {
        Object::Rule(rule) => walk_rule(visitor, rule),
        Object::VariableAssignment(assignment) => walk_assignment(visitor, assignment),
        Object::CommentGroup(group) => {
            for comment in group.comments() {
                visitor.visit_comment(comment);
            }
        }
        Object::Directive(directive) => visitor.visit_directive(directive),
    }
}

fn walk_rule<V: Visitor + ?Sized>(visitor: &mut V, rule: &Rule) {
    for target in &rule.targets {
        visitor.visit_expression(target);
    }
    for prereq in &rule.prerequisites {
        visitor.visit_expression(prereq);
    }
    for prereq in &rule.order_only_prerequisites {
        visitor.visit_expression(prereq);
    }
    for recipe in &rule.recipes {
        visitor.visit_recipe(recipe);
    }
}

fn walk_assignment<V: Visitor + ?Sized>(visitor: &mut V, assignment: &VariableAssignment) {
    visitor.visit_expression(&assignment.name);
    for value in &assignment.values {
        visitor.visit_expression(value);
    }
}

/// Visits `directive`'s children.
pub fn walk_directive<V: Visitor + ?Sized>(visitor: &mut V, directive: &Directive) {
    match directive {
        Directive::Define(define) => {
            visitor.visit_expression(&define.name);
        }
        Directive::Undefine(undefine) => {
            visitor.visit_expression(&undefine.name);
        }
        Directive::Conditional(block) => walk_conditional(visitor, block),
        Directive::Keyword(keyword) => {
            for expr in &keyword.rest {
                visitor.visit_expression(expr);
            }
        }
    }
}

fn walk_conditional<V: Visitor + ?Sized>(visitor: &mut V, block: &ConditionalBlock) {
    visitor.visit_if_condition(&block.head);
    for object in &block.body {
        visitor.visit_object(object);
    }
    for clause in &block.else_clauses {
        walk_else_clause(visitor, clause);
    }
}

fn walk_else_clause<V: Visitor + ?Sized>(visitor: &mut V, clause: &ElseClause) {
    if let Some(head) = &clause.head {
        visitor.visit_if_condition(head);
    }
    for object in &clause.body {
        visitor.visit_object(object);
    }
}

/// Visits `condition`'s arguments.
pub fn walk_if_condition<V: Visitor + ?Sized>(visitor: &mut V, condition: &IfCondition) {
    match condition {
        IfCondition::Ifeq(ifeq) => {
            visitor.visit_expression(&ifeq.arg1);
            visitor.visit_expression(&ifeq.arg2);
        }
        IfCondition::Ifdef(ifdef) => {
            visitor.visit_expression(&ifdef.name);
        }
    }
}

/// Visits the children of `expression`.
///
/// Most expressions are leaves; only [`Expression::QuotedExpression`]
/// has a child expression to recurse into.
pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    if let Expression::QuotedExpression(quoted) = expression {
        visitor.visit_expression(&quoted.inner);
    }
}

/// Runs `f` on every object in `file`, without requiring a [`Visitor`]
/// impl.
pub fn inspect(file: &File, mut f: impl FnMut(&Object)) {
    struct Inspector<F>(F);
    impl<F: FnMut(&Object)> Visitor for Inspector<F> {
        fn visit_object(&mut self, object: &Object) {
            (self.0)(object);
            walk_object(self, object);
        }
    }
    let mut visitor = Inspector(&mut f);
    walk(&mut visitor, file);
}

/// Collects every expression in `file`, in the order [`walk`] visits
/// them.
#[must_use]
pub fn preorder(file: &File) -> Vec<Expression> {
    struct Collector(Vec<Expression>);
    impl Visitor for Collector {
        fn visit_expression(&mut self, expression: &Expression) {
            self.0.push(expression.clone());
            walk_expression(self, expression);
        }
    }
    let mut collector = Collector(Vec::new());
    walk(&mut collector, file);
    collector.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_file;
    use crate::source::FileSet;

    fn parse(input: &str) -> File {
        let mut files = FileSet::new();
        parse_file(&mut files, "test.mk", input).0
    }

    #[test]
    fn inspect_visits_every_top_level_object() {
        let file = parse("a:\nB = 1\n# c\n");
        let mut count = 0;
        inspect(&file, |_| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn preorder_collects_expressions_in_source_order() {
        let file = parse("a b: c\n");
        let exprs = preorder(&file);
        let names: Vec<_> = exprs
            .iter()
            .map(|e| match e {
                Expression::TextRun(t) => t.value.clone(),
                _ => panic!("expected text runs"),
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn walk_descends_into_conditional_bodies() {
        let file = parse("ifeq (a,b)\nx:\nelse\ny:\nendif\n");
        struct Counter(usize);
        impl Visitor for Counter {
            fn visit_object(&mut self, object: &Object) {
                if matches!(object, Object::Rule(_)) {
                    self.0 += 1;
                }
                walk_object(self, object);
            }
        }
        let mut counter = Counter(0);
        walk(&mut counter, &file);
        assert_eq!(counter.0, 2);
    }

    #[test]
    fn visit_recipe_is_reachable_through_a_rule() {
        let file = parse("t:\n\trecipe\n");
        let mut seen = false;
        struct RecipeSpy<'a>(&'a mut bool);
        impl Visitor for RecipeSpy<'_> {
            fn visit_recipe(&mut self, _recipe: &Recipe) {
                *self.0 = true;
            }
        }
        let mut visitor = RecipeSpy(&mut seen);
        walk(&mut visitor, &file);
        assert!(seen);
    }
}
