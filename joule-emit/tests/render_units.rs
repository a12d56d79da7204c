//! Whole-unit rendering tests.
//!
//! These build complete type declarations through the fluent surface and
//! check the emitted source exactly, plus the engine-level invariants: no
//! doubled spaces, no trailing whitespace, and closing braces landing at the
//! column of their opening construct.

use joule_ast::precedence::AssignOp;
use joule_ast::{
    AnnotationElem, AnnotationUse, Catch, ConstructorDecl, DocComment, EnumConstant, Expr,
    FieldDecl, ForInit, LocalVar, MethodDecl, Modifiers, Param, Resource, Stmt, TypeDecl,
    TypeParam, TypeRef,
};
use joule_emit::{
    render, EmitError, FormatPrefs, IndentKind, IoSink, RuleSite, Spacing,
};
use pretty_assertions::assert_eq;

fn n(s: &str) -> Expr {
    Expr::name(s)
}

/// A method returning the string type, with one type parameter bounded by
/// that same type, one parameter of the type parameter's type, and a body
/// calling a static field's method with the parameter as argument.
fn scenario_class() -> TypeDecl {
    let method = MethodDecl::new(TypeRef::string(), "first")
        .modifiers(Modifiers::PUBLIC)
        .unwrap()
        .type_param(TypeParam::new("T").bound(TypeRef::string()))
        .param(Param::new(TypeRef::var("T"), "value"))
        .unwrap()
        .body(vec![Stmt::ret(
            Expr::static_field(TypeRef::self_type(), "JOINER").invoke("join", vec![n("value")]),
        )])
        .unwrap();
    TypeDecl::class("Util").public().method(method)
}

#[test]
fn test_concrete_generic_method_scenario() {
    let out = render(&scenario_class(), &FormatPrefs::new()).unwrap();
    assert_eq!(
        out,
        "public class Util {\n    public <T extends java.lang.String> java.lang.String first(T value) {\n        return Util.JOINER.join(value);\n    }\n}\n"
    );

    let signature = out
        .lines()
        .find(|l| l.contains("first("))
        .expect("signature line");
    assert!(signature.contains("<T extends java.lang.String>"));
    // Exactly one parameter: no comma inside the parameter list.
    assert!(signature.contains("(T value)"));
    assert!(!signature.contains(','));
    // Exactly one statement in the body.
    let body_semis = out
        .lines()
        .filter(|l| l.trim_start().starts_with("return"))
        .count();
    assert_eq!(body_semis, 1);
    assert_eq!(out.matches(';').count(), 1);
}

#[test]
fn test_enum_with_constructor_and_accessor() {
    let color = TypeDecl::enum_("Color")
        .public()
        .constant(EnumConstant::new("RED").arg(Expr::from("#f00")))
        .unwrap()
        .constant(EnumConstant::new("GREEN").arg(Expr::from("#0f0")))
        .unwrap()
        .field(
            FieldDecl::new(TypeRef::string(), "hex")
                .modifiers(Modifiers::PRIVATE | Modifiers::FINAL),
        )
        .constructor(
            ConstructorDecl::new()
                .modifiers(Modifiers::PRIVATE)
                .param(Param::new(TypeRef::string(), "hex"))
                .unwrap()
                .body(vec![Stmt::expr(Expr::assign(
                    Expr::this().field("hex"),
                    n("hex"),
                ))]),
        )
        .unwrap()
        .method(
            MethodDecl::new(TypeRef::string(), "hex")
                .modifiers(Modifiers::PUBLIC)
                .unwrap()
                .body(vec![Stmt::ret(Expr::this().field("hex"))])
                .unwrap(),
        );

    let out = render(&color, &FormatPrefs::new()).unwrap();
    insta::assert_snapshot!(out.trim_end(), @r###"
public enum Color {
    RED("#f00"),
    GREEN("#0f0");

    private final java.lang.String hex;

    private Color(java.lang.String hex) {
        this.hex = hex;
    }

    public java.lang.String hex() {
        return this.hex;
    }
}
"###);
}

#[test]
fn test_interface_members_stay_bodiless() {
    let iface = TypeDecl::interface("Task")
        .public()
        .extends(TypeRef::named("Runnable"))
        .unwrap()
        .method(MethodDecl::new(TypeRef::void_(), "cancel"))
        .method(
            MethodDecl::new(TypeRef::boolean_(), "done")
                .modifiers(Modifiers::DEFAULT)
                .unwrap()
                .body(vec![Stmt::ret(Expr::from(false))])
                .unwrap(),
        );
    let out = render(&iface, &FormatPrefs::new()).unwrap();
    assert_eq!(
        out,
        "public interface Task extends Runnable {\n    void cancel();\n\n    default boolean done() {\n        return false;\n    }\n}\n"
    );
}

#[test]
fn test_annotation_type_with_default() {
    let ann = TypeDecl::annotation("Retry")
        .public()
        .element(AnnotationElem::new(TypeRef::int_(), "attempts").default_value(Expr::int(3)))
        .unwrap();
    let out = render(&ann, &FormatPrefs::new()).unwrap();
    assert_eq!(
        out,
        "public @interface Retry {\n    int attempts() default 3;\n}\n"
    );
}

#[test]
fn test_nested_type_rebinds_self_references() {
    let inner = TypeDecl::class("Builder")
        .modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
        .method(
            MethodDecl::new(TypeRef::self_type(), "copy")
                .modifiers(Modifiers::PUBLIC)
                .unwrap()
                .body(vec![Stmt::ret(Expr::new_instance(
                    TypeRef::self_type(),
                    vec![],
                ))])
                .unwrap(),
        );
    let outer = TypeDecl::class("Widget").public().nested(inner);
    let out = render(&outer, &FormatPrefs::new()).unwrap();
    assert_eq!(
        out,
        "public class Widget {\n    public static class Builder {\n        public Builder copy() {\n            return new Builder();\n        }\n    }\n}\n"
    );
}

fn sample_service() -> TypeDecl {
    let doc = DocComment::new("Processes batches.\n\nUses <sinks> & flushes */ safely.")
        .param("size", "the batch size")
        .returns("the processed count")
        .throws("java.io.IOException", "when the sink fails");
    let process = MethodDecl::new(TypeRef::int_(), "process")
        .modifiers(Modifiers::PUBLIC)
        .unwrap()
        .param(Param::new(TypeRef::int_(), "size"))
        .unwrap()
        .throws(TypeRef::named("java.io.IOException"))
        .doc(doc)
        .body(vec![
            Stmt::local(TypeRef::int_(), "count", Expr::int(0)),
            Stmt::labeled(
                "outer",
                Stmt::for_(
                    ForInit::Local(
                        LocalVar::new(TypeRef::int_()).declare("i", Some(Expr::int(0))),
                    ),
                    Some(n("i").lt(n("size"))),
                    vec![n("i").post_inc()],
                    vec![
                        Stmt::if_(
                            n("i").rem(Expr::int(2)).eq_(Expr::int(0)),
                            vec![Stmt::continue_to("outer")],
                        ),
                        Stmt::expr(Expr::assign_with(AssignOp::Add, n("count"), n("i"))),
                    ],
                ),
            ),
            Stmt::try_with(
                vec![Resource {
                    ty: TypeRef::named("java.io.Writer"),
                    name: "out".into(),
                    init: Expr::call("open", vec![]),
                }],
                vec![Stmt::expr(n("out").invoke(
                    "write",
                    vec![Expr::static_call(
                        TypeRef::named("java.lang.String"),
                        "valueOf",
                        vec![n("count")],
                    )],
                ))],
                vec![Catch {
                    types: vec![TypeRef::named("java.io.IOException")],
                    name: "e".into(),
                    body: vec![Stmt::throw(n("e"))],
                }],
                None,
            ),
            Stmt::ret(n("count")),
        ])
        .unwrap();
    TypeDecl::class("BatchService")
        .public()
        .annotate(AnnotationUse::new(TypeRef::named("Deprecated")))
        .field(
            FieldDecl::new(TypeRef::int_().array_of(), "sizes")
                .modifiers(Modifiers::PRIVATE | Modifiers::FINAL)
                .init(Expr::array_init(
                    TypeRef::int_(),
                    vec![Expr::int(1), Expr::int(2)],
                )),
        )
        .method(process)
}

#[test]
fn test_service_unit_snapshot() {
    let out = render(&sample_service(), &FormatPrefs::new()).unwrap();
    insta::assert_snapshot!(out.trim_end(), @r###"
@Deprecated
public class BatchService {
    private final int[] sizes = new int[] { 1, 2 };

    /**
     * Processes batches.
     *
     * Uses &lt;sinks&gt; &amp; flushes *&#47; safely.
     *
     * @param size the batch size
     * @return the processed count
     * @throws java.io.IOException when the sink fails
     */
    public int process(int size) throws java.io.IOException {
        int count = 0;
        outer:
        for (int i = 0; i < size; i++) {
            if (i % 2 == 0) {
                continue outer;
            }
            count += i;
        }
        try (java.io.Writer out = open()) {
            out.write(java.lang.String.valueOf(count));
        } catch (java.io.IOException e) {
            throw e;
        }
        return count;
    }
}
"###);
}

#[test]
fn test_no_double_spaces_or_trailing_whitespace() {
    let out = render(&sample_service(), &FormatPrefs::new()).unwrap();
    for line in out.lines() {
        assert!(!line.ends_with(' '), "trailing space in {:?}", line);
        assert!(!line.ends_with('\t'), "trailing tab in {:?}", line);
        let content = line.trim_start();
        assert!(
            !content.contains("  "),
            "doubled space in {:?}",
            line
        );
    }
}

#[test]
fn test_closing_brace_column_matches_opener() {
    let out = render(&sample_service(), &FormatPrefs::new()).unwrap();
    let mut opens: Vec<usize> = Vec::new();
    for line in out.lines() {
        let indent = line.len() - line.trim_start().len();
        let content = line.trim_start();
        if content.starts_with('}') {
            let opened_at = opens.pop().expect("brace underflow");
            assert_eq!(indent, opened_at, "mismatched brace column in {:?}", line);
        }
        if content.ends_with('{') {
            opens.push(indent);
        }
    }
    assert!(opens.is_empty(), "unclosed braces: {:?}", opens);
}

#[test]
fn test_allman_configuration() {
    let prefs = FormatPrefs::builder()
        .space(RuleSite::BeforeClassBrace, Spacing::Newline)
        .space(RuleSite::BeforeMethodBrace, Spacing::Newline)
        .space(RuleSite::BeforeControlBrace, Spacing::Newline)
        .space(RuleSite::BeforeElse, Spacing::Newline)
        .indent(IndentKind::Member, 2, false)
        .indent(IndentKind::Block, 2, false)
        .build();
    let flow = TypeDecl::class("Flow").public().method(
        MethodDecl::new(TypeRef::void_(), "run")
            .modifiers(Modifiers::PUBLIC)
            .unwrap()
            .param(Param::new(TypeRef::boolean_(), "flag"))
            .unwrap()
            .body(vec![Stmt::if_else(
                n("flag"),
                vec![Stmt::expr(Expr::call("go", vec![]))],
                vec![Stmt::expr(Expr::call("stop", vec![]))],
            )])
            .unwrap(),
    );
    let out = render(&flow, &prefs).unwrap();
    assert_eq!(
        out,
        "public class Flow\n{\n  public void run(boolean flag)\n  {\n    if (flag)\n    {\n      go();\n    }\n    else\n    {\n      stop();\n    }\n  }\n}\n"
    );
}

#[test]
fn test_parallel_units_share_preferences() {
    let prefs = FormatPrefs::new();
    let expected = render(&scenario_class(), &prefs).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let prefs = &prefs;
                scope.spawn(move || {
                    let decl = scenario_class();
                    render(&decl, prefs).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_io_sink_writes_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Util.java");
    let file = std::fs::File::create(&path).unwrap();

    let decl = scenario_class();
    joule_emit::emit_into(&decl, &FormatPrefs::new(), IoSink::new(file)).unwrap();

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, render(&decl, &FormatPrefs::new()).unwrap());
}

#[test]
fn test_self_type_outside_body_is_rejected() {
    // A constructor cannot resolve its name without an enclosing type, and
    // the failure is a descriptive error, not partial output.
    let err = joule_emit::render_stmt(
        &Stmt::ret(Expr::new_instance(TypeRef::self_type(), vec![])),
        &FormatPrefs::new(),
    )
    .unwrap_err();
    assert!(matches!(err, EmitError::NoEnclosingType));
}
