//! Emission of type declarations and members.
//!
//! Entering a type body pushes both the member indent context and the
//! enclosing-type context; constructors and self-type references resolve
//! their names against the latter.

use joule_ast::decl::{
    AnnotationUse, AnnotationValue, ConstructorDecl, EnumConstant, FieldDecl, Member, MethodDecl,
    Param, TypeDecl, TypeKind, TypeParam,
};

use crate::doc::emit_doc;
use crate::expr::{emit_args, emit_ellipsis, emit_expr};
use crate::prefs::{IndentKind, RuleSite};
use crate::stmt::emit_braced_body;
use crate::types::emit_type;
use crate::writer::{EmitError, Sink, Writer};

pub(crate) fn emit_type_decl<S: Sink>(
    decl: &TypeDecl,
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    if let Some(doc) = &decl.doc {
        emit_doc(doc, w)?;
    }
    for annotation in &decl.annotations {
        emit_annotation(annotation, w)?;
        w.newline();
    }
    for kw in decl.modifiers.keywords() {
        w.word(kw);
    }
    match decl.kind {
        TypeKind::Class => w.word("class"),
        TypeKind::Interface => w.word("interface"),
        TypeKind::Enum => w.word("enum"),
        TypeKind::Annotation => {
            w.space();
            w.at();
            w.word("interface");
        }
    }
    w.word(&decl.name);
    if !decl.type_params.is_empty() {
        emit_type_params(&decl.type_params, w)?;
    }
    if let Some(superclass) = &decl.extends {
        w.word("extends");
        emit_type(superclass, w)?;
    }
    if !decl.implements.is_empty() {
        // Interfaces list their supertypes after `extends`.
        let keyword = if decl.kind == TypeKind::Interface {
            "extends"
        } else {
            "implements"
        };
        w.word(keyword);
        for (i, ty) in decl.implements.iter().enumerate() {
            if i > 0 {
                w.rule(RuleSite::BeforeComma);
                w.comma();
                w.rule(RuleSite::AfterComma);
            }
            emit_type(ty, w)?;
        }
    }
    w.rule(RuleSite::BeforeClassBrace);
    w.open_brace();
    w.newline();
    w.push_indent(IndentKind::Member);
    w.push_type(decl.name.clone());

    let constants: Vec<&EnumConstant> = decl
        .members
        .iter()
        .filter_map(|m| match m {
            Member::EnumConstant(c) => Some(c),
            _ => None,
        })
        .collect();
    let others: Vec<&Member> = decl
        .members
        .iter()
        .filter(|m| !matches!(m, Member::EnumConstant(_)))
        .collect();

    if !constants.is_empty() {
        for (i, constant) in constants.iter().enumerate() {
            if i > 0 {
                w.comma();
                w.newline();
            }
            emit_enum_constant(constant, w)?;
        }
        if others.is_empty() {
            w.newline();
        } else {
            w.semi();
            w.newline();
        }
    }
    for (i, member) in others.iter().enumerate() {
        if i > 0 || !constants.is_empty() {
            w.blank_line();
        }
        emit_member(member, w)?;
    }

    w.pop_type(&decl.name)?;
    w.pop_indent(IndentKind::Member)?;
    w.close_brace();
    w.newline();
    Ok(())
}

fn emit_member<S: Sink>(member: &Member, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    match member {
        Member::Field(field) => emit_field(field, w),
        Member::Method(method) => emit_method(method, w),
        Member::Constructor(ctor) => emit_constructor(ctor, w),
        Member::AnnotationElem(elem) => {
            if let Some(doc) = &elem.doc {
                emit_doc(doc, w)?;
            }
            emit_type(&elem.ty, w)?;
            w.space();
            w.word(&elem.name);
            w.rule(RuleSite::BeforeCallParen);
            w.open_paren();
            w.rule(RuleSite::WithinEmptyParens);
            w.close_paren();
            if let Some(default) = &elem.default {
                w.space();
                w.word("default");
                w.space();
                emit_expr(default, w)?;
            }
            w.semi();
            w.newline();
            Ok(())
        }
        Member::Initializer { is_static, body } => {
            if *is_static {
                w.word("static");
                w.rule(RuleSite::BeforeMethodBrace);
            }
            emit_braced_body(body, w)?;
            w.newline();
            Ok(())
        }
        Member::Nested(decl) => emit_type_decl(decl, w),
        // Constants are emitted by the declaration pass, ahead of all other
        // members.
        Member::EnumConstant(_) => Ok(()),
    }
}

fn emit_field<S: Sink>(field: &FieldDecl, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    if let Some(doc) = &field.doc {
        emit_doc(doc, w)?;
    }
    for annotation in &field.annotations {
        emit_annotation(annotation, w)?;
        w.newline();
    }
    for kw in field.modifiers.keywords() {
        w.word(kw);
    }
    emit_type(&field.ty, w)?;
    w.space();
    w.word(&field.name);
    if let Some(init) = &field.init {
        w.rule(RuleSite::AroundAssign);
        w.op("=");
        w.rule(RuleSite::AroundAssign);
        emit_expr(init, w)?;
    }
    w.semi();
    w.newline();
    Ok(())
}

fn emit_method<S: Sink>(method: &MethodDecl, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    if let Some(doc) = &method.doc {
        emit_doc(doc, w)?;
    }
    for annotation in &method.annotations {
        emit_annotation(annotation, w)?;
        w.newline();
    }
    for kw in method.modifiers.keywords() {
        w.word(kw);
    }
    if !method.type_params.is_empty() {
        w.space();
        emit_type_params(&method.type_params, w)?;
    }
    emit_type(&method.return_ty, w)?;
    w.word(&method.name);
    emit_params(&method.params, w)?;
    emit_throws(&method.throws, w)?;
    match &method.body {
        None => {
            w.semi();
            w.newline();
        }
        Some(body) => {
            w.rule(RuleSite::BeforeMethodBrace);
            emit_braced_body(body, w)?;
            w.newline();
        }
    }
    Ok(())
}

fn emit_constructor<S: Sink>(
    ctor: &ConstructorDecl,
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    if let Some(doc) = &ctor.doc {
        emit_doc(doc, w)?;
    }
    for annotation in &ctor.annotations {
        emit_annotation(annotation, w)?;
        w.newline();
    }
    for kw in ctor.modifiers.keywords() {
        w.word(kw);
    }
    // A constructor's name is whatever type body we are inside.
    let name = w.self_type_name()?.to_string();
    w.word(&name);
    emit_params(&ctor.params, w)?;
    emit_throws(&ctor.throws, w)?;
    w.rule(RuleSite::BeforeMethodBrace);
    emit_braced_body(&ctor.body, w)?;
    w.newline();
    Ok(())
}

fn emit_enum_constant<S: Sink>(
    constant: &EnumConstant,
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    if let Some(doc) = &constant.doc {
        emit_doc(doc, w)?;
    }
    for annotation in &constant.annotations {
        emit_annotation(annotation, w)?;
        w.newline();
    }
    w.word(&constant.name);
    if !constant.args.is_empty() {
        emit_args(&constant.args, w)?;
    }
    Ok(())
}

fn emit_params<S: Sink>(params: &[Param], w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    w.rule(RuleSite::BeforeCallParen);
    w.open_paren();
    if params.is_empty() {
        w.rule(RuleSite::WithinEmptyParens);
    } else {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                w.rule(RuleSite::BeforeComma);
                w.comma();
                w.rule(RuleSite::AfterComma);
            }
            if param.is_final {
                w.word("final");
            }
            emit_type(&param.ty, w)?;
            if param.varargs {
                emit_ellipsis(w);
            }
            w.space();
            w.word(&param.name);
        }
    }
    w.close_paren();
    Ok(())
}

fn emit_throws<S: Sink>(
    throws: &[joule_ast::types::TypeRef],
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    if throws.is_empty() {
        return Ok(());
    }
    w.space();
    w.word("throws");
    for (i, ty) in throws.iter().enumerate() {
        if i > 0 {
            w.rule(RuleSite::BeforeComma);
            w.comma();
            w.rule(RuleSite::AfterComma);
        }
        emit_type(ty, w)?;
    }
    Ok(())
}

fn emit_type_params<S: Sink>(
    params: &[TypeParam],
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    w.generic_open();
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            w.rule(RuleSite::BeforeComma);
            w.comma();
            w.rule(RuleSite::AfterComma);
        }
        w.word(&param.name);
        for (j, bound) in param.bounds.iter().enumerate() {
            if j == 0 {
                w.word("extends");
            } else {
                w.space();
                w.op("&");
                w.space();
            }
            emit_type(bound, w)?;
        }
    }
    w.generic_close();
    Ok(())
}

pub(crate) fn emit_annotation<S: Sink>(
    annotation: &AnnotationUse,
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    w.at();
    emit_type(&annotation.ty, w)?;
    if annotation.args.is_empty() {
        return Ok(());
    }
    w.rule(RuleSite::BeforeCallParen);
    w.open_paren();
    let shorthand = annotation.args.len() == 1 && annotation.args.contains_key("value");
    if shorthand {
        emit_annotation_value(&annotation.args["value"], w)?;
    } else {
        for (i, (name, value)) in annotation.args.iter().enumerate() {
            if i > 0 {
                w.rule(RuleSite::BeforeComma);
                w.comma();
                w.rule(RuleSite::AfterComma);
            }
            w.word(name);
            w.rule(RuleSite::AroundAssign);
            w.op("=");
            w.rule(RuleSite::AroundAssign);
            emit_annotation_value(value, w)?;
        }
    }
    w.close_paren();
    Ok(())
}

fn emit_annotation_value<S: Sink>(
    value: &AnnotationValue,
    w: &mut Writer<'_, S>,
) -> Result<(), EmitError> {
    match value {
        AnnotationValue::Expr(e) => emit_expr(e, w),
        AnnotationValue::Annotation(a) => emit_annotation(a, w),
        AnnotationValue::Array(values) => {
            w.open_brace();
            if values.is_empty() {
                w.close_brace();
                return Ok(());
            }
            w.newline();
            w.push_indent(IndentKind::AnnotationArray);
            for (i, v) in values.iter().enumerate() {
                emit_annotation_value(v, w)?;
                if i + 1 < values.len() {
                    w.comma();
                }
                w.newline();
            }
            w.pop_indent(IndentKind::AnnotationArray)?;
            w.close_brace();
            Ok(())
        }
    }
}
