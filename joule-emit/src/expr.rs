//! Emission of expression nodes.
//!
//! One exhaustive match per node kind. Parenthesization was already decided
//! at construction time, so every arm is a straight-line token sequence; the
//! only context consulted is the writer session itself.

use joule_ast::expr::{Expr, LambdaBody};

use crate::prefs::RuleSite;
use crate::stmt::emit_braced_body;
use crate::token::TokenClass;
use crate::types::emit_type;
use crate::writer::{EmitError, Sink, Writer};

pub(crate) fn emit_expr<S: Sink>(e: &Expr, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    match e {
        Expr::Null => w.word("null"),
        Expr::Bool(v) => w.word(if *v { "true" } else { "false" }),
        Expr::Int(v) => {
            if *v < 0 {
                // A leading sign is an operator token so it can never merge
                // with a preceding minus into a decrement.
                w.op("-");
                w.word(&v.unsigned_abs().to_string());
            } else {
                w.word(&v.to_string());
            }
        }
        Expr::Long(v) => {
            if *v < 0 {
                w.op("-");
                w.word(&format!("{}L", v.unsigned_abs()));
            } else {
                w.word(&format!("{}L", v));
            }
        }
        Expr::Double(v) => {
            if v.is_finite() && *v < 0.0 {
                w.op("-");
                w.word(&double_literal(v.abs()));
            } else {
                w.word(&double_literal(*v));
            }
        }
        Expr::Char(c) => w.word(&format!("'{}'", escape_char(*c))),
        Expr::Str(s) => w.word(&format!("\"{}\"", escape_str(s))),
        Expr::Name(n) => w.word(n),
        Expr::This => w.word("this"),
        Expr::Super => w.word("super"),
        Expr::ClassLiteral(ty) => {
            emit_type(ty, w)?;
            w.dot();
            w.word("class");
        }
        Expr::Paren(inner) => {
            w.open_paren();
            emit_expr(inner, w)?;
            w.close_paren();
        }
        Expr::Field { target, name } => {
            emit_expr(target, w)?;
            w.dot();
            w.word(name);
        }
        Expr::StaticField { ty, name } => {
            emit_type(ty, w)?;
            w.dot();
            w.word(name);
        }
        Expr::Index { array, index } => {
            emit_expr(array, w)?;
            w.open_bracket();
            emit_expr(index, w)?;
            w.close_bracket();
        }
        Expr::Call { target, name, args } => {
            if let Some(target) = target {
                emit_expr(target, w)?;
                w.dot();
            }
            w.word(name);
            emit_args(args, w)?;
        }
        Expr::StaticCall { ty, name, args } => {
            emit_type(ty, w)?;
            w.dot();
            w.word(name);
            emit_args(args, w)?;
        }
        Expr::New { ty, args } => {
            w.word("new");
            emit_type(ty, w)?;
            emit_args(args, w)?;
        }
        Expr::NewArray { elem, dims, init } => {
            w.word("new");
            emit_type(elem, w)?;
            if let Some(values) = init {
                w.open_bracket();
                w.close_bracket();
                w.space();
                w.open_brace();
                if !values.is_empty() {
                    w.space();
                    for (i, v) in values.iter().enumerate() {
                        if i > 0 {
                            w.rule(RuleSite::BeforeComma);
                            w.comma();
                            w.rule(RuleSite::AfterComma);
                        }
                        emit_expr(v, w)?;
                    }
                    w.space();
                }
                w.close_brace();
            } else {
                for dim in dims {
                    w.open_bracket();
                    emit_expr(dim, w)?;
                    w.close_bracket();
                }
            }
        }
        Expr::Unary { op, operand } => {
            if op.is_postfix() {
                emit_expr(operand, w)?;
                w.op(op.symbol());
            } else {
                w.op(op.symbol());
                emit_expr(operand, w)?;
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            emit_expr(lhs, w)?;
            w.rule(RuleSite::AroundBinaryOp);
            w.op(op.symbol());
            w.rule(RuleSite::AroundBinaryOp);
            emit_expr(rhs, w)?;
        }
        Expr::Cast { ty, operand } => {
            w.open_paren();
            emit_type(ty, w)?;
            w.close_paren();
            w.rule(RuleSite::AfterCastParen);
            emit_expr(operand, w)?;
        }
        Expr::InstanceOf { operand, ty } => {
            emit_expr(operand, w)?;
            w.space();
            w.word("instanceof");
            emit_type(ty, w)?;
        }
        Expr::Ternary {
            cond,
            then,
            otherwise,
        } => {
            emit_expr(cond, w)?;
            w.rule(RuleSite::BeforeTernaryQuestion);
            w.question();
            w.rule(RuleSite::AfterTernaryQuestion);
            emit_expr(then, w)?;
            w.rule(RuleSite::BeforeTernaryColon);
            w.colon();
            w.rule(RuleSite::AfterTernaryColon);
            emit_expr(otherwise, w)?;
        }
        Expr::Assign { op, target, value } => {
            emit_expr(target, w)?;
            w.rule(RuleSite::AroundAssign);
            w.op(op.symbol());
            w.rule(RuleSite::AroundAssign);
            emit_expr(value, w)?;
        }
        Expr::Lambda { params, body } => {
            if params.len() == 1 {
                w.word(&params[0]);
            } else {
                w.open_paren();
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        w.rule(RuleSite::BeforeComma);
                        w.comma();
                        w.rule(RuleSite::AfterComma);
                    }
                    w.word(p);
                }
                w.close_paren();
            }
            w.space();
            w.op("->");
            w.space();
            match body {
                LambdaBody::Expr(e) => emit_expr(e, w)?,
                LambdaBody::Block(stmts) => emit_braced_body(stmts, w)?,
            }
        }
    }
    Ok(())
}

/// A parenthesized argument list, shared by calls and constructions.
pub(crate) fn emit_args<S: Sink>(args: &[Expr], w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    w.rule(RuleSite::BeforeCallParen);
    w.open_paren();
    if args.is_empty() {
        w.rule(RuleSite::WithinEmptyParens);
    } else {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                w.rule(RuleSite::BeforeComma);
                w.comma();
                w.rule(RuleSite::AfterComma);
            }
            emit_expr(arg, w)?;
        }
    }
    w.close_paren();
    Ok(())
}

/// The varargs ellipsis; classed as a closer so it hugs the type to its left.
pub(crate) fn emit_ellipsis<S: Sink>(w: &mut Writer<'_, S>) {
    w.token(TokenClass::Close, "...");
}

fn double_literal(v: f64) -> String {
    if v.is_nan() {
        // No literal form exists; fall back to the canonical constant.
        return "Double.NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 {
            "Double.POSITIVE_INFINITY".to_string()
        } else {
            "Double.NEGATIVE_INFINITY".to_string()
        };
    }
    let s = v.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        c if (c as u32) < 0x20 => format!("\\u{:04x}", c as u32),
        c => c.to_string(),
    }
}

fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use joule_ast::expr::Expr;
    use joule_ast::types::TypeRef;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::prefs::{FormatPrefs, RuleSite, Spacing};

    fn render(e: &Expr) -> String {
        render_with(e, &FormatPrefs::new())
    }

    fn render_with(e: &Expr, prefs: &FormatPrefs) -> String {
        let mut w = Writer::new(prefs, String::new());
        emit_expr(e, &mut w).unwrap();
        w.finish().unwrap()
    }

    fn n(s: &str) -> Expr {
        Expr::name(s)
    }

    #[test]
    fn test_safe_left_nesting_has_no_parens() {
        let e = n("a").minus(n("b")).minus(n("c"));
        assert_eq!(render(&e), "a - b - c");
    }

    #[test]
    fn test_unsafe_nesting_is_parenthesized() {
        let e = Expr::ternary(n("cond"), n("x"), n("y")).mul(n("z"));
        assert_eq!(render(&e), "(cond ? x : y) * z");
    }

    #[test]
    fn test_right_nested_subtraction() {
        let e = Expr::binary(
            joule_ast::precedence::BinaryOp::Sub,
            n("a"),
            n("b").minus(n("c")),
        );
        assert_eq!(render(&e), "a - (b - c)");
    }

    #[test]
    fn test_mixed_tiers() {
        let e = n("a").plus(n("b")).mul(n("c"));
        assert_eq!(render(&e), "(a + b) * c");
        let f = n("a").mul(n("b")).plus(n("c"));
        assert_eq!(render(&f), "a * b + c");
    }

    #[test]
    fn test_nested_unary_minus_does_not_merge() {
        let e = n("a").minus(n("b").neg());
        assert_eq!(render(&e), "a - -b");
    }

    #[test]
    fn test_nested_unary_with_spacing_off() {
        let prefs = FormatPrefs::builder()
            .space(RuleSite::AroundBinaryOp, Spacing::None)
            .build();
        let e = n("a").minus(n("b").neg());
        // The token rule still forces the operator-operator space.
        assert_eq!(render_with(&e, &prefs), "a- -b");
    }

    #[test]
    fn test_postfix_and_prefix_order() {
        assert_eq!(render(&n("i").post_inc()), "i++");
        assert_eq!(render(&n("i").pre_dec()), "--i");
    }

    #[test]
    fn test_cast_and_call() {
        let e = n("o")
            .cast_to(TypeRef::string())
            .invoke("length", vec![]);
        assert_eq!(render(&e), "((java.lang.String) o).length()");
    }

    #[test]
    fn test_call_chain() {
        let e = n("sb")
            .invoke("append", vec![Expr::from("x")])
            .invoke("toString", vec![]);
        assert_eq!(render(&e), "sb.append(\"x\").toString()");
    }

    #[test]
    fn test_new_and_static_call() {
        let e = Expr::static_call(
            TypeRef::named("java.util.Arrays"),
            "asList",
            vec![Expr::new_instance(TypeRef::named("Point"), vec![Expr::int(1), Expr::int(2)])],
        );
        assert_eq!(render(&e), "java.util.Arrays.asList(new Point(1, 2))");
    }

    #[test]
    fn test_array_literals() {
        let e = Expr::array_init(TypeRef::int_(), vec![Expr::int(1), Expr::int(2)]);
        assert_eq!(render(&e), "new int[] { 1, 2 }");
        let d = Expr::new_array(TypeRef::int_(), vec![Expr::int(8)]);
        assert_eq!(render(&d), "new int[8]");
    }

    #[test]
    fn test_string_and_char_escapes() {
        assert_eq!(render(&Expr::str("a\"b\n")), "\"a\\\"b\\n\"");
        assert_eq!(render(&Expr::char_('\'')), "'\\''");
    }

    #[test]
    fn test_negative_literals() {
        assert_eq!(render(&Expr::int(-5)), "-5");
        assert_eq!(render(&Expr::int(i32::MIN)), "-2147483648");
        assert_eq!(render(&Expr::long(-2)), "-2L");
        assert_eq!(render(&Expr::double(1.0)), "1.0");
        assert_eq!(render(&Expr::double(-0.5)), "-0.5");
    }

    #[test]
    fn test_ternary_and_assign() {
        let e = Expr::assign(n("max"), Expr::ternary(n("a").gt(n("b")), n("a"), n("b")));
        assert_eq!(render(&e), "max = a > b ? a : b");
    }

    #[test]
    fn test_instance_of() {
        let e = Expr::instance_of(n("o"), TypeRef::string());
        assert_eq!(render(&e), "o instanceof java.lang.String");
    }

    #[test]
    fn test_lambda_forms() {
        let e = Expr::lambda(vec!["x".into()], n("x").plus(Expr::int(1)));
        assert_eq!(render(&e), "x -> x + 1");
        let two = Expr::lambda(vec!["a".into(), "b".into()], n("a").plus(n("b")));
        assert_eq!(render(&two), "(a, b) -> a + b");
    }

    #[test]
    fn test_class_literal() {
        let e = Expr::class_literal(TypeRef::string());
        assert_eq!(render(&e), "java.lang.String.class");
    }

    #[test]
    fn test_configured_call_spacing() {
        let prefs = FormatPrefs::builder()
            .space(RuleSite::BeforeCallParen, Spacing::Space)
            .space(RuleSite::WithinEmptyParens, Spacing::Space)
            .build();
        let e = n("obj").invoke("run", vec![]);
        assert_eq!(render_with(&e, &prefs), "obj.run ( )");
    }
}
