//! Unit tests for the parser module.
//!
//! Covers the three engines on their own, the simplifier policies, and the
//! complete language grammar through the driver.

use rstest::rstest;

use crate::{
    ast::ast::AstNode,
    errors::errors::{ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
    Position,
};

use super::{
    engine::{Engine, Parser},
    grammar::{param_list_parser, var_const_parser, EXPRESSION_GRAMMAR, PROGRAM_GRAMMAR},
    parse_tree::{ParseChild, ParseTree},
    parser::{parse, parse_expression, parse_tree},
    rd_parser::{RdParser, MAX_DEPTH},
    simplifier::{simplify, PolicyTable, SimplifiedChild},
    symbol::{nt, Terminal},
};

fn tokens(source: &str) -> Vec<crate::lexer::tokens::Token> {
    tokenize(source).unwrap()
}

fn texts(tree: &ParseTree) -> Vec<String> {
    tree.tokens().iter().map(|token| token.text.clone()).collect()
}

#[rstest]
#[case("", 0)]
#[case("int a", 2)]
#[case("int a, float b", 5)]
#[case("int a[], str s", 7)]
#[case("int a,", 3)]
fn test_param_list_accepts(#[case] source: &str, #[case] next: usize) {
    let tokens = tokens(source);
    let accept = param_list_parser().parse(&tokens, 0).unwrap();

    assert_eq!(accept.next, next);
    assert_eq!(accept.tree.symbol, nt("ParamList"));
}

#[test]
fn test_param_list_stops_before_close_paren() {
    let tokens = tokens("int a, float b[]) {");
    let accept = param_list_parser().parse(&tokens, 0).unwrap();

    assert_eq!(accept.next, 7);
    assert_eq!(texts(&accept.tree), vec!["int", "a", ",", "float", "b", "[", "]"]);
}

#[test]
fn test_param_list_rejects_missing_name() {
    let tokens = tokens("int , float b");
    let reject = param_list_parser().parse(&tokens, 0).unwrap_err();

    assert_eq!(reject.position, 1);
}

#[test]
fn test_param_list_rejects_unclosed_array() {
    let tokens = tokens("int a[ )");
    let reject = param_list_parser().parse(&tokens, 0).unwrap_err();

    assert_eq!(reject.position, 3);
}

#[rstest]
#[case("42", 1)]
#[case("4.5", 1)]
#[case("\"hi\"", 1)]
#[case("a", 1)]
#[case("a[1]", 4)]
#[case("a[b[2]]", 7)]
#[case("a + 1", 1)]
fn test_var_const_accepts(#[case] source: &str, #[case] next: usize) {
    let tokens = tokens(source);
    let accept = var_const_parser().parse(&tokens, 0).unwrap();

    assert_eq!(accept.next, next);
}

#[test]
fn test_var_const_rejects_operator() {
    let tokens = tokens("+ 1");
    assert!(var_const_parser().parse(&tokens, 0).is_err());
}

#[test]
fn test_var_const_rejects_non_constant_index() {
    let tokens = tokens("a[1 + 2]");
    let reject = var_const_parser().parse(&tokens, 0).unwrap_err();

    assert_eq!(reject.position, 3);
}

#[test]
fn test_var_const_at_offset() {
    let tokens = tokens("x = y[0];");
    let accept = var_const_parser().parse(&tokens, 2).unwrap();

    assert_eq!(accept.next, 6);
    assert_eq!(texts(&accept.tree), vec!["y", "[", "0", "]"]);
}

#[test]
fn test_rd_ordered_choice_and_furthest_failure() {
    let mut rd = RdParser::new(nt("S"));
    rd.add_rule(
        "S",
        vec![
            crate::MK_RULE![
                Terminal::identifier(),
                Terminal::operator("="),
                Terminal::integer_literal(),
                Terminal::punctuator(";")
            ],
            crate::MK_RULE![Terminal::identifier()],
        ],
    );

    let accepted = rd.parse(&tokens("a = 1;"), 0).unwrap();
    assert_eq!(accepted.next, 4);

    let fallback = rd.parse(&tokens("a = 1 2"), 0).unwrap();
    assert_eq!(fallback.next, 1);
    assert_eq!(fallback.furthest, 3);
}

#[test]
fn test_rd_list_rule_collects_repetitions() {
    let mut rd = RdParser::new(nt("L"));
    rd.add_list_rule(
        "L",
        vec![
            crate::MK_RULE![Terminal::identifier(), Terminal::punctuator(","), nt("L")],
            crate::MK_RULE![Terminal::identifier()],
        ],
    );

    let accept = rd.parse(&tokens("a, b, c"), 0).unwrap();
    assert_eq!(accept.next, 5);
    assert_eq!(accept.tree.symbol, nt("L"));
    assert_eq!(accept.tree.children.len(), 5);
    assert!(accept
        .tree
        .children
        .iter()
        .all(|child| matches!(child, ParseChild::Token(_))));

    let trailing = rd.parse(&tokens("a, b,"), 0).unwrap();
    assert_eq!(trailing.next, 3);
    assert_eq!(trailing.furthest, 4);
    assert_eq!(texts(&trailing.tree), vec!["a", ",", "b"]);
}

#[test]
fn test_rd_embeds_sub_parser() {
    let mut rd = RdParser::new(nt("Call"));
    rd.add_rule(
        "Call",
        vec![crate::MK_RULE![
            Terminal::identifier(),
            Terminal::punctuator("("),
            Engine::from(param_list_parser()),
            Terminal::punctuator(")")
        ]],
    );

    let accept = rd.parse(&tokens("f(int a, str b)"), 0).unwrap();
    assert_eq!(accept.next, 8);

    let sub_tree = accept
        .tree
        .children
        .iter()
        .find_map(|child| match child {
            ParseChild::Tree(tree) => Some(tree),
            ParseChild::Token(_) => None,
        })
        .unwrap();
    assert_eq!(sub_tree.symbol, nt("ParamList"));
}

#[test]
fn test_simplifier_policies() {
    let mut policies: PolicyTable<u8> = PolicyTable::new();
    policies.retain("Var", 1);
    policies.retain_if_multiple("SumExpr", 2);

    let tokens = tokens("a + b");
    let var = |index: usize| {
        ParseChild::Tree(ParseTree::new(
            nt("Var"),
            vec![ParseChild::Token(tokens[index].clone())],
        ))
    };
    let single = ParseTree::new(nt("SumExpr"), vec![var(0)]);
    let chain = ParseTree::new(
        nt("SumExpr"),
        vec![
            var(0),
            ParseChild::Tree(ParseTree::new(
                nt("SumExpr'"),
                vec![ParseChild::Token(tokens[1].clone()), var(2)],
            )),
        ],
    );

    let simplified = simplify(single, &policies);
    assert!(matches!(
        simplified.as_slice(),
        [SimplifiedChild::Tree(tree)] if tree.symbol == nt("Var") && tree.handler == 1
    ));

    let simplified = simplify(chain, &policies);
    let [SimplifiedChild::Tree(tree)] = simplified.as_slice() else {
        panic!("expected a single retained node");
    };
    assert_eq!(tree.symbol, nt("SumExpr"));
    assert_eq!(tree.handler, 2);
    assert_eq!(tree.children.len(), 3);
    assert!(matches!(&tree.children[1], SimplifiedChild::Token(token) if token.text == "+"));
}

#[rstest]
#[case("int x;")]
#[case("int a = 1, b[10], c;")]
#[case("float f(int a, float b[]) { return a; }")]
#[case("int f() { }")]
#[case("int f(int a,) { return a; }")]
#[case("int main() { int i; for (i = 0; i < 10; i = i + 1) { } }")]
#[case("int main() { for (int i = 0, j = 1; i < j; i = i + 1, j = j - 1) { } }")]
#[case("int main() { for (int i = 0; i < 3; ) { } }")]
#[case("int main() { while (1) { ; } return; }")]
#[case("int main() { if (1) { } else { if (0) { } } }")]
#[case("int main() { { int nested; } }")]
#[case("int main() { foo(); bar(1, 2,); x = -y + !z; }")]
#[case("int main() { a[i + 1] = b[2] % 3; }")]
fn test_program_parses(#[case] source: &str) {
    let tokens = tokens(source);
    assert!(parse(&tokens).is_ok(), "failed to parse: {}", source);
}

#[rstest]
#[case("int main() { if (1) { } else { } else { } }")]
#[case("int main() { foo(,); }")]
#[case("int main() { a = b[1 + 2]; }")]
#[case("int x")]
#[case("x = 1;")]
#[case("int main() { return 1 }")]
fn test_program_rejected(#[case] source: &str) {
    let tokens = tokens(source);
    assert!(parse(&tokens).is_err(), "unexpectedly parsed: {}", source);
}

#[test]
fn test_trailing_input_reports_deepest_token() {
    let tokens = tokens("int x;\nint y = 1 2;");
    let error = parse(&tokens).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            token: String::from("<2, integer>"),
            index: 7,
        }
    );
    assert_eq!(*error.get_position(), Position(2, 11));
    assert_eq!(error.message(), "Unexpected token <2, integer>");
}

#[test]
fn test_end_of_input_position() {
    let tokens = tokens("int main() {\n  return 1;");
    let error = parse(&tokens).unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedEndOfInput { index: 8 }
    ));
    assert_eq!(*error.get_position(), Position(2, 12));
}

#[test]
fn test_empty_program_is_rejected() {
    let error = parse(&[]).unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedEndOfInput { index: 0 }
    ));
    assert_eq!(*error.get_position(), Position(1, 1));
}

#[test]
fn test_parse_tree_keeps_every_token() {
    let tokens = tokens("int f(int a) { return a * 2; }");
    let tree = parse_tree(&tokens).unwrap();

    assert_eq!(tree.symbol, nt("Start"));
    assert_eq!(tree.tokens().len(), tokens.len());
    assert!(tree.node_count() > tokens.len());
}

#[test]
fn test_if_else_builds_single_node() {
    let tokens = tokens("int main() { if (a) { b; } else { c; } }");
    let AstNode::Program(program) = parse(&tokens).unwrap() else {
        panic!("expected a program");
    };
    let AstNode::FuncDef(main) = &program.decls[0] else {
        panic!("expected a function");
    };

    assert_eq!(main.body.stmts.len(), 1);
    let AstNode::IfStmt(if_stmt) = &main.body.stmts[0] else {
        panic!("expected an if statement");
    };
    assert_eq!(if_stmt.then_block.stmts.len(), 1);
    assert_eq!(if_stmt.else_block.as_ref().map(|block| block.stmts.len()), Some(1));
}

#[test]
fn test_expression_grammar_start() {
    assert_eq!(PROGRAM_GRAMMAR.start(), &nt("Start"));
    assert_eq!(EXPRESSION_GRAMMAR.start(), &nt("Expr"));

    let node = parse_expression(&tokens("1 + 2 * 3")).unwrap();
    let AstNode::AddExpr(add) = node else {
        panic!("expected an addition at the root");
    };
    assert!(matches!(*add.right, AstNode::MulExpr(_)));
}

#[test]
fn test_parenthesised_expression_unwraps() {
    let node = parse_expression(&tokens("(a)")).unwrap();
    assert!(matches!(node, AstNode::Var(_)));

    let node = parse_expression(&tokens("(1 + 2) * 3")).unwrap();
    let AstNode::MulExpr(mul) = node else {
        panic!("expected a multiplication at the root");
    };
    assert!(matches!(*mul.left, AstNode::AddExpr(_)));
}

#[test]
fn test_long_statement_list() {
    let body = "x = x + 1; ".repeat(1000);
    let tokens = tokens(&format!("int main() {{ {} }}", body));
    let AstNode::Program(program) = parse(&tokens).unwrap() else {
        panic!("expected a program");
    };
    let AstNode::FuncDef(main) = &program.decls[0] else {
        panic!("expected a function");
    };

    assert_eq!(main.body.stmts.len(), 1000);
}

#[test]
fn test_many_top_level_declarations() {
    let source = "int g; ".repeat(1000);
    let AstNode::Program(program) = parse(&tokens(&source)).unwrap() else {
        panic!("expected a program");
    };

    assert_eq!(program.decls.len(), 1000);
}

#[test]
fn test_deeply_parenthesised_expression() {
    let source = format!("{}1 + 2{}", "(".repeat(200), ")".repeat(200));
    let node = parse_expression(&tokens(&source)).unwrap();

    assert!(matches!(node, AstNode::AddExpr(_)));
}

#[test]
fn test_nesting_limit_is_a_parse_error() {
    let source = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    let error = parse_expression(&tokens(&source)).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NestingTooDeep { limit: MAX_DEPTH }
    );
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.get_position().line(), 1);
}
