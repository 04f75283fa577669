//! Source-like rendering of expression trees.
//!
//! Used for closure values (`{⍵>0:⍵⋄-⍵}`) and diagnostics. The output
//! follows APL conventions: high minus for negative literals, single
//! quoted strings, `⋄` between guards.

use crate::{ExprArena, ExprId, ExprKind, GuardRange, StringInterner};

pub struct ExprPrinter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
}

impl<'a> ExprPrinter<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        ExprPrinter { arena, interner }
    }

    pub fn expr(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, id);
        out
    }

    /// Render a closure body with its braces.
    pub fn lambda(&self, body: GuardRange) -> String {
        let mut out = String::new();
        self.write_lambda(&mut out, body);
        out
    }

    fn write_lambda(&self, out: &mut String, body: GuardRange) {
        out.push('{');
        for (i, guard) in self.arena.get_guards(body).iter().enumerate() {
            if i > 0 {
                out.push('⋄');
            }
            if let Some(cond) = guard.cond {
                self.write_expr(out, cond);
                out.push(':');
            }
            self.write_expr(out, guard.body);
        }
        out.push('}');
    }

    fn write_expr(&self, out: &mut String, id: ExprId) {
        match self.arena.kind(id) {
            ExprKind::Int(n) => write_int(out, n),
            ExprKind::Float(bits) => write_float(out, f64::from_bits(bits)),
            ExprKind::Bool(b) => out.push(if b { '1' } else { '0' }),
            ExprKind::Str(name) => {
                out.push('\'');
                out.push_str(&self.interner.lookup(name).replace('\'', "''"));
                out.push('\'');
            }
            ExprKind::Vector(range) => {
                for (i, &elem) in self.arena.get_expr_list(range).iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    self.write_operand(out, elem);
                }
            }
            ExprKind::Ident(name) | ExprKind::Primitive(name) => {
                out.push_str(self.interner.lookup(name));
            }
            ExprKind::Lambda(body) => self.write_lambda(out, body),
            ExprKind::Derived {
                operator,
                left_operand,
                right_operand,
            } => {
                self.write_operand(out, left_operand);
                out.push_str(self.interner.lookup(operator));
                if let Some(right) = right_operand {
                    self.write_operand(out, right);
                }
            }
            ExprKind::Call { func, left, right } => {
                if let Some(left) = left {
                    self.write_operand(out, left);
                    out.push(' ');
                }
                self.write_expr(out, func);
                out.push(' ');
                self.write_expr(out, right);
            }
            ExprKind::Assign { target, value } => {
                out.push_str(self.interner.lookup(target));
                out.push('←');
                self.write_expr(out, value);
            }
            ExprKind::SelectiveAssign {
                target,
                func,
                left,
                value,
            } => {
                out.push('(');
                if let Some(left) = left {
                    self.write_operand(out, left);
                    out.push(' ');
                }
                self.write_expr(out, func);
                out.push(' ');
                out.push_str(self.interner.lookup(target));
                out.push_str(")←");
                self.write_expr(out, value);
            }
        }
    }

    /// Strand elements and left arguments bind tighter than calls.
    fn write_operand(&self, out: &mut String, id: ExprId) {
        let needs_parens = matches!(
            self.arena.kind(id),
            ExprKind::Call { .. }
                | ExprKind::Assign { .. }
                | ExprKind::SelectiveAssign { .. }
                | ExprKind::Vector(_)
        );
        if needs_parens {
            out.push('(');
            self.write_expr(out, id);
            out.push(')');
        } else {
            self.write_expr(out, id);
        }
    }
}

fn write_int(out: &mut String, n: i64) {
    if n < 0 {
        out.push('¯');
        out.push_str(&n.unsigned_abs().to_string());
    } else {
        out.push_str(&n.to_string());
    }
}

fn write_float(out: &mut String, f: f64) {
    if f < 0.0 {
        out.push('¯');
        out.push_str(&(-f).to_string());
    } else {
        out.push_str(&f.to_string());
    }
}
