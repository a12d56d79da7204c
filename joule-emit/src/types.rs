//! Emission of type references.

use joule_ast::types::{TypeArg, TypeRef};

use crate::prefs::RuleSite;
use crate::writer::{EmitError, Sink, Writer};

pub(crate) fn emit_type<S: Sink>(ty: &TypeRef, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    match ty {
        TypeRef::Primitive(p) => w.word(p.as_str()),
        TypeRef::Named { qualified, args } => {
            w.word(qualified);
            if !args.is_empty() {
                w.generic_open();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        w.rule(RuleSite::BeforeComma);
                        w.comma();
                        w.rule(RuleSite::AfterComma);
                    }
                    emit_type_arg(arg, w)?;
                }
                w.generic_close();
            }
        }
        TypeRef::Array(inner) => {
            emit_type(inner, w)?;
            w.open_bracket();
            w.close_bracket();
        }
        TypeRef::Var(name) => w.word(name),
        TypeRef::SelfType => {
            // The one context-sensitive node: its text comes from the
            // session, not from the node.
            let name = w.self_type_name()?.to_string();
            w.word(&name);
        }
    }
    Ok(())
}

fn emit_type_arg<S: Sink>(arg: &TypeArg, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    match arg {
        TypeArg::Type(ty) => emit_type(ty, w)?,
        TypeArg::Wildcard => w.word("?"),
        TypeArg::Extends(bound) => {
            w.word("?");
            w.word("extends");
            emit_type(bound, w)?;
        }
        TypeArg::Super(bound) => {
            w.word("?");
            w.word("super");
            emit_type(bound, w)?;
        }
    }
    Ok(())
}
