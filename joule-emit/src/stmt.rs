//! Emission of statement nodes.
//!
//! Every statement emitter leaves a pending newline behind it, so statement
//! sequences never glue together and closing braces always land at the
//! column of their opening construct once the block context pops.

use joule_ast::stmt::{CaseLabel, ForInit, LocalVar, Stmt};

use crate::expr::emit_expr;
use crate::prefs::{IndentKind, RuleSite};
use crate::types::emit_type;
use crate::writer::{EmitError, Sink, Writer};

/// `{` body `}` with the body one block context deeper. The caller decides
/// what precedes the opening brace.
pub(crate) fn emit_braced_body<S: Sink>(
    stmts: &[Stmt],
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    w.open_brace();
    w.newline();
    w.push_indent(IndentKind::Block);
    for s in stmts {
        emit_stmt(s, w)?;
    }
    w.pop_indent(IndentKind::Block)?;
    w.close_brace();
    Ok(())
}

/// A local declaration without its terminating semicolon, shared with the
/// `for` header.
pub(crate) fn emit_local_var<S: Sink>(
    lv: &LocalVar,
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    if lv.is_final {
        w.word("final");
    }
    emit_type(&lv.ty, w)?;
    for (i, d) in lv.declarators.iter().enumerate() {
        if i > 0 {
            w.rule(RuleSite::BeforeComma);
            w.comma();
            w.rule(RuleSite::AfterComma);
        }
        w.space();
        w.word(&d.name);
        if let Some(init) = &d.init {
            w.rule(RuleSite::AroundAssign);
            w.op("=");
            w.rule(RuleSite::AroundAssign);
            emit_expr(init, w)?;
        }
    }
    Ok(())
}

pub(crate) fn emit_stmt<S: Sink>(s: &Stmt, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    match s {
        Stmt::Expr(e) => {
            emit_expr(e, w)?;
            w.semi();
            w.newline();
        }
        Stmt::Local(lv) => {
            emit_local_var(lv, w)?;
            w.semi();
            w.newline();
        }
        Stmt::If {
            cond,
            then,
            otherwise,
        } => {
            w.word("if");
            w.rule(RuleSite::BeforeStatementParen);
            w.open_paren();
            emit_expr(cond, w)?;
            w.close_paren();
            w.rule(RuleSite::BeforeControlBrace);
            emit_braced_body(then, w)?;
            if let Some(else_branch) = otherwise {
                w.rule(RuleSite::BeforeElse);
                w.word("else");
                // A lone nested if continues the chain on the same line.
                if else_branch.len() == 1 && matches!(else_branch[0], Stmt::If { .. }) {
                    w.space();
                    return emit_stmt(&else_branch[0], w);
                }
                w.rule(RuleSite::BeforeControlBrace);
                emit_braced_body(else_branch, w)?;
            }
            w.newline();
        }
        Stmt::While { cond, body } => {
            w.word("while");
            w.rule(RuleSite::BeforeStatementParen);
            w.open_paren();
            emit_expr(cond, w)?;
            w.close_paren();
            w.rule(RuleSite::BeforeControlBrace);
            emit_braced_body(body, w)?;
            w.newline();
        }
        Stmt::DoWhile { body, cond } => {
            w.word("do");
            w.rule(RuleSite::BeforeControlBrace);
            emit_braced_body(body, w)?;
            w.rule(RuleSite::BeforeWhile);
            w.word("while");
            w.rule(RuleSite::BeforeStatementParen);
            w.open_paren();
            emit_expr(cond, w)?;
            w.close_paren();
            w.semi();
            w.newline();
        }
        Stmt::For {
            init,
            cond,
            update,
            body,
        } => {
            w.word("for");
            w.rule(RuleSite::BeforeStatementParen);
            w.open_paren();
            match init {
                ForInit::Empty => {}
                ForInit::Local(lv) => emit_local_var(lv, w)?,
                ForInit::Exprs(exprs) => {
                    for (i, e) in exprs.iter().enumerate() {
                        if i > 0 {
                            w.rule(RuleSite::BeforeComma);
                            w.comma();
                            w.rule(RuleSite::AfterComma);
                        }
                        emit_expr(e, w)?;
                    }
                }
            }
            w.semi();
            if let Some(cond) = cond {
                w.rule(RuleSite::AfterSemicolonInFor);
                emit_expr(cond, w)?;
            }
            w.semi();
            if !update.is_empty() {
                w.rule(RuleSite::AfterSemicolonInFor);
                for (i, e) in update.iter().enumerate() {
                    if i > 0 {
                        w.rule(RuleSite::BeforeComma);
                        w.comma();
                        w.rule(RuleSite::AfterComma);
                    }
                    emit_expr(e, w)?;
                }
            }
            w.close_paren();
            w.rule(RuleSite::BeforeControlBrace);
            emit_braced_body(body, w)?;
            w.newline();
        }
        Stmt::ForEach {
            var_ty,
            var,
            iterable,
            body,
        } => {
            w.word("for");
            w.rule(RuleSite::BeforeStatementParen);
            w.open_paren();
            emit_type(var_ty, w)?;
            w.space();
            w.word(var);
            w.space();
            w.colon();
            w.space();
            emit_expr(iterable, w)?;
            w.close_paren();
            w.rule(RuleSite::BeforeControlBrace);
            emit_braced_body(body, w)?;
            w.newline();
        }
        Stmt::Switch { selector, cases } => {
            w.word("switch");
            w.rule(RuleSite::BeforeStatementParen);
            w.open_paren();
            emit_expr(selector, w)?;
            w.close_paren();
            w.rule(RuleSite::BeforeControlBrace);
            w.open_brace();
            w.newline();
            w.push_indent(IndentKind::CaseLabel);
            for case in cases {
                for label in &case.labels {
                    match label {
                        CaseLabel::Expr(e) => {
                            w.word("case");
                            w.space();
                            emit_expr(e, w)?;
                        }
                        CaseLabel::Default => w.word("default"),
                    }
                    w.colon();
                    w.newline();
                }
                // An empty body is deliberate fall-through.
                if !case.body.is_empty() {
                    w.push_indent(IndentKind::CaseBody);
                    for s in &case.body {
                        emit_stmt(s, w)?;
                    }
                    w.pop_indent(IndentKind::CaseBody)?;
                }
            }
            w.pop_indent(IndentKind::CaseLabel)?;
            w.close_brace();
            w.newline();
        }
        Stmt::Break { label } => {
            w.word("break");
            if let Some(label) = label {
                w.word(label);
            }
            w.semi();
            w.newline();
        }
        Stmt::Continue { label } => {
            w.word("continue");
            if let Some(label) = label {
                w.word(label);
            }
            w.semi();
            w.newline();
        }
        Stmt::Labeled { label, body } => {
            w.push_indent(IndentKind::Label);
            w.word(label);
            w.colon();
            w.pop_indent(IndentKind::Label)?;
            w.newline();
            emit_stmt(body, w)?;
        }
        Stmt::Return(value) => {
            w.word("return");
            if let Some(value) = value {
                w.space();
                emit_expr(value, w)?;
            }
            w.semi();
            w.newline();
        }
        Stmt::Throw(value) => {
            w.word("throw");
            w.space();
            emit_expr(value, w)?;
            w.semi();
            w.newline();
        }
        Stmt::Try {
            resources,
            body,
            catches,
            finally,
        } => {
            w.word("try");
            if !resources.is_empty() {
                w.rule(RuleSite::BeforeStatementParen);
                w.open_paren();
                for (i, r) in resources.iter().enumerate() {
                    if i > 0 {
                        w.semi();
                        w.rule(RuleSite::AfterSemicolonInFor);
                    }
                    emit_type(&r.ty, w)?;
                    w.space();
                    w.word(&r.name);
                    w.rule(RuleSite::AroundAssign);
                    w.op("=");
                    w.rule(RuleSite::AroundAssign);
                    emit_expr(&r.init, w)?;
                }
                w.close_paren();
            }
            w.rule(RuleSite::BeforeControlBrace);
            emit_braced_body(body, w)?;
            for catch in catches {
                w.rule(RuleSite::BeforeCatch);
                w.word("catch");
                w.rule(RuleSite::BeforeStatementParen);
                w.open_paren();
                for (i, ty) in catch.types.iter().enumerate() {
                    if i > 0 {
                        w.space();
                        w.op("|");
                        w.space();
                    }
                    emit_type(ty, w)?;
                }
                w.space();
                w.word(&catch.name);
                w.close_paren();
                w.rule(RuleSite::BeforeControlBrace);
                emit_braced_body(&catch.body, w)?;
            }
            if let Some(finally) = finally {
                w.rule(RuleSite::BeforeFinally);
                w.word("finally");
                w.rule(RuleSite::BeforeControlBrace);
                emit_braced_body(finally, w)?;
            }
            w.newline();
        }
        Stmt::Synchronized { lock, body } => {
            w.word("synchronized");
            w.rule(RuleSite::BeforeStatementParen);
            w.open_paren();
            emit_expr(lock, w)?;
            w.close_paren();
            w.rule(RuleSite::BeforeControlBrace);
            emit_braced_body(body, w)?;
            w.newline();
        }
        Stmt::Block(body) => {
            emit_braced_body(body, w)?;
            w.newline();
        }
        Stmt::LineComment(text) => {
            for line in text.split('\n') {
                let line = line.trim_end();
                if line.is_empty() {
                    w.text("//");
                } else {
                    w.text(&format!("// {}", line));
                }
                w.newline();
            }
        }
        Stmt::BlockComment(text) => {
            w.text("/*");
            w.newline();
            w.push_indent(IndentKind::Comment);
            for line in text.split('\n') {
                let line = line.trim_end();
                if line.is_empty() {
                    w.text("*");
                } else {
                    w.text(&format!("* {}", line));
                }
                w.newline();
            }
            w.text("*/");
            w.pop_indent(IndentKind::Comment)?;
            w.newline();
        }
    }
    Ok(())
}
