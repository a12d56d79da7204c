//! Round-trip grouping property.
//!
//! Random operator trees are emitted to text and re-parsed with a local
//! precedence-climbing parser for the target grammar. The parsed grouping
//! must be isomorphic to the original tree: no operator may silently change
//! associativity or precedence on the way through the emitter.

use joule_ast::expr::Expr;
use joule_ast::precedence::{BinaryOp, UnaryOp};
use joule_emit::{render_expr, FormatPrefs};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(i32),
    Ident(String),
    Op(String),
    Open,
    Close,
    Question,
    Colon,
}

fn lex(text: &str) -> Vec<Tok> {
    let bytes = text.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                i += 1;
            }
            toks.push(Tok::Num(text[start..i].parse().unwrap()));
            continue;
        }
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && (bytes[i] as char).is_ascii_alphanumeric() {
                i += 1;
            }
            toks.push(Tok::Ident(text[start..i].to_string()));
            continue;
        }
        match c {
            '(' => {
                toks.push(Tok::Open);
                i += 1;
            }
            ')' => {
                toks.push(Tok::Close);
                i += 1;
            }
            '?' => {
                toks.push(Tok::Question);
                i += 1;
            }
            ':' => {
                toks.push(Tok::Colon);
                i += 1;
            }
            _ => {
                // Maximal-munch operator scan.
                let rest = &text[i..];
                let op = if rest.starts_with(">>>") {
                    ">>>"
                } else if let Some(two) = ["<<", ">>", "<=", ">=", "==", "!=", "&&", "||"]
                    .iter()
                    .copied()
                    .find(|op| rest.starts_with(op))
                {
                    two
                } else {
                    &rest[..1]
                };
                toks.push(Tok::Op(op.to_string()));
                i += op.len();
            }
        }
    }
    toks
}

fn binop_of(symbol: &str) -> Option<BinaryOp> {
    let op = match symbol {
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "%" => BinaryOp::Rem,
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "<<" => BinaryOp::Shl,
        ">>" => BinaryOp::Shr,
        ">>>" => BinaryOp::UShr,
        "<" => BinaryOp::Lt,
        ">" => BinaryOp::Gt,
        "<=" => BinaryOp::Le,
        ">=" => BinaryOp::Ge,
        "==" => BinaryOp::Eq,
        "!=" => BinaryOp::Ne,
        "&" => BinaryOp::BitAnd,
        "^" => BinaryOp::BitXor,
        "|" => BinaryOp::BitOr,
        "&&" => BinaryOp::And,
        "||" => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}

fn prefix_of(symbol: &str) -> Option<UnaryOp> {
    let op = match symbol {
        "-" => UnaryOp::Minus,
        "+" => UnaryOp::Plus,
        "!" => UnaryOp::Not,
        "~" => UnaryOp::BitNot,
        _ => return None,
    };
    Some(op)
}

struct Parser {
    toks: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn bump(&mut self) -> Tok {
        let tok = self.toks[self.pos].clone();
        self.pos += 1;
        tok
    }

    fn parse_expr(&mut self) -> Expr {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Expr {
        let cond = self.parse_binary(12);
        if self.peek() == Some(&Tok::Question) {
            self.bump();
            let then = self.parse_ternary();
            assert_eq!(self.bump(), Tok::Colon, "ternary without colon");
            let otherwise = self.parse_ternary();
            return Expr::Ternary {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            };
        }
        cond
    }

    /// Precedence climbing over the left-associative binary tiers: an
    /// operator binds only while its rank stays at or under `max_prec`, and
    /// its right operand must bind strictly tighter.
    fn parse_binary(&mut self, max_prec: u8) -> Expr {
        let mut lhs = self.parse_unary();
        while let Some(Tok::Op(symbol)) = self.peek() {
            let Some(op) = binop_of(symbol) else { break };
            let prec = op.precedence();
            if prec > max_prec {
                break;
            }
            self.bump();
            let rhs = self.parse_binary(prec - 1);
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        lhs
    }

    fn parse_unary(&mut self) -> Expr {
        if let Some(Tok::Op(symbol)) = self.peek() {
            if let Some(op) = prefix_of(symbol) {
                self.bump();
                let operand = self.parse_unary();
                return Expr::Unary {
                    op,
                    operand: Box::new(operand),
                };
            }
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Expr {
        match self.bump() {
            Tok::Num(n) => Expr::Int(n),
            Tok::Ident(name) => Expr::name(name),
            Tok::Open => {
                let inner = self.parse_expr();
                assert_eq!(self.bump(), Tok::Close, "unbalanced parenthesis");
                inner
            }
            other => panic!("unexpected token {:?}", other),
        }
    }
}

fn parse(text: &str) -> Expr {
    let mut parser = Parser {
        toks: lex(text),
        pos: 0,
    };
    let expr = parser.parse_expr();
    assert_eq!(parser.pos, parser.toks.len(), "trailing tokens in {:?}", text);
    expr
}

/// Strip the synthesized paren wrappers: what remains is pure grouping.
fn normalize(e: &Expr) -> Expr {
    match e {
        Expr::Paren(inner) => normalize(inner),
        Expr::Binary { op, lhs, rhs } => Expr::Binary {
            op: *op,
            lhs: Box::new(normalize(lhs)),
            rhs: Box::new(normalize(rhs)),
        },
        Expr::Unary { op, operand } => Expr::Unary {
            op: *op,
            operand: Box::new(normalize(operand)),
        },
        Expr::Ternary {
            cond,
            then,
            otherwise,
        } => Expr::Ternary {
            cond: Box::new(normalize(cond)),
            then: Box::new(normalize(then)),
            otherwise: Box::new(normalize(otherwise)),
        },
        other => other.clone(),
    }
}

fn arb_binop() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::UShr,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::Le,
        BinaryOp::Ge,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::BitAnd,
        BinaryOp::BitXor,
        BinaryOp::BitOr,
        BinaryOp::And,
        BinaryOp::Or,
    ])
}

fn arb_unop() -> impl Strategy<Value = UnaryOp> {
    prop::sample::select(vec![UnaryOp::Minus, UnaryOp::Plus, UnaryOp::Not, UnaryOp::BitNot])
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0i32..100).prop_map(Expr::int),
        prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(|s| Expr::name(s)),
    ];
    leaf.prop_recursive(5, 48, 3, |inner| {
        prop_oneof![
            (arb_binop(), inner.clone(), inner.clone())
                .prop_map(|(op, lhs, rhs)| Expr::binary(op, lhs, rhs)),
            (arb_unop(), inner.clone()).prop_map(|(op, operand)| Expr::unary(op, operand)),
            (inner.clone(), inner.clone(), inner)
                .prop_map(|(c, t, e)| Expr::ternary(c, t, e)),
        ]
    })
}

proptest! {
    #[test]
    fn roundtrip_preserves_grouping(e in arb_expr()) {
        let text = render_expr(&e, &FormatPrefs::new()).unwrap();
        let reparsed = parse(&text);
        prop_assert_eq!(normalize(&e), reparsed, "text was {:?}", text);
    }

    #[test]
    fn emitted_expressions_have_clean_spacing(e in arb_expr()) {
        let text = render_expr(&e, &FormatPrefs::new()).unwrap();
        prop_assert!(!text.contains("  "), "doubled space in {:?}", text);
        prop_assert!(!text.starts_with(' '));
        prop_assert!(!text.ends_with(' '));
    }
}

#[test]
fn test_known_groupings() {
    let cases: Vec<(Expr, &str)> = vec![
        (
            Expr::name("a").minus(Expr::name("b")).minus(Expr::name("c")),
            "a - b - c",
        ),
        (
            Expr::binary(
                BinaryOp::Sub,
                Expr::name("a"),
                Expr::name("b").minus(Expr::name("c")),
            ),
            "a - (b - c)",
        ),
        (
            Expr::ternary(Expr::name("p"), Expr::name("x"), Expr::name("y"))
                .mul(Expr::name("z")),
            "(p ? x : y) * z",
        ),
        (
            Expr::name("a").plus(Expr::name("b").shl(Expr::name("c"))),
            "a + (b << c)",
        ),
    ];
    for (expr, expected) in cases {
        let text = render_expr(&expr, &FormatPrefs::new()).unwrap();
        assert_eq!(text, expected);
        assert_eq!(parse(&text), normalize(&expr));
    }
}
