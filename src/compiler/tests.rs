//! Unit tests for quadruple generation.

use crate::{
    ast::ast::AstNode,
    lexer::lexer::tokenize,
    parser::parser::{parse, parse_expression},
};

use super::{
    compiler::{generate_entries, generate_ir},
    quadruple::{CodegenContext, GeneratedCode, IrEntry, Label, Quadruple},
};

fn program(source: &str) -> AstNode {
    parse(&tokenize(source).unwrap()).unwrap()
}

fn lines(source: &str) -> Vec<String> {
    generate_ir(&program(source))
        .lines()
        .map(String::from)
        .collect()
}

fn main_body(body: &str) -> Vec<String> {
    let lines = lines(&format!("int main() {{ {} }}", body));
    lines[1..lines.len() - 1].to_vec()
}

#[test]
fn test_context_counters() {
    let mut context = CodegenContext::new();
    assert_eq!(context.temp(), "t0");
    assert_eq!(context.temp(), "t1");
    assert_eq!(context.label(), Label(0));
    assert_eq!(context.label().name(), "L1");
    assert_eq!(context.temps_used(), 2);
    assert_eq!(context.labels_used(), 2);
}

#[test]
fn test_entry_rendering() {
    assert_eq!(Quadruple::new("+", "a", "b", "t0").to_string(), "+ a b t0");
    assert_eq!(Quadruple::new("goto", "", "", "L2").to_string(), "goto   L2");
    assert_eq!(IrEntry::Label(Label(4)).to_string(), "L4:");

    let mut code = GeneratedCode::operand("x");
    code.quad("RETURN", "x", "", "");
    code.label(Label(0));
    assert_eq!(code.listing(), "RETURN x  \nL0:");
    assert_eq!(code.result, "x");
}

#[test]
fn test_expression_temporaries() {
    let ast = parse_expression(&tokenize("a + b * c").unwrap()).unwrap();
    let mut context = CodegenContext::new();
    let code = ast.emit_code(&mut context);

    assert_eq!(code.listing(), "* b c t0\n+ a t0 t1");
    assert_eq!(code.result, "t1");
}

#[test]
fn test_unary_and_indexing() {
    let ast = parse_expression(&tokenize("-a[2]").unwrap()).unwrap();
    let mut context = CodegenContext::new();
    let code = ast.emit_code(&mut context);

    assert_eq!(code.listing(), "- a[2]  t0");
}

#[test]
fn test_function_definition() {
    assert_eq!(
        lines("int add(int a, int b) { return a + b; }"),
        vec![
            "FUNCTION add 2 ",
            "PARAM a 1 ",
            "PARAM b 2 ",
            "+ a b t0",
            "RETURN t0  ",
            "ENDFUNC add  ",
        ]
    );
}

#[test]
fn test_declarations_and_assignment() {
    assert_eq!(
        main_body("int x = 1, y; float a[3]; y = x * 2; a[y] = 1.5;"),
        vec!["= 1  x", "* x 2 t0", "= t0  y", "= 1.5  a[y]"]
    );
}

#[test]
fn test_assignment_with_computed_index() {
    assert_eq!(
        main_body("a[i + 1] = b[2];"),
        vec!["+ i 1 t0", "= b[2]  a[t0]"]
    );
}

#[test]
fn test_if_without_else_uses_two_labels() {
    let code = main_body("if (x < 1) { x = 2; }");
    assert_eq!(
        code,
        vec!["< x 1 t0", "if t0  L0", "goto   L1", "L0:", "= 2  x", "L1:"]
    );
}

#[test]
fn test_if_else_uses_three_labels() {
    let code = main_body("if (x) { y = 1; } else { y = 2; }");
    assert_eq!(
        code,
        vec![
            "if x  L0",
            "goto   L1",
            "L0:",
            "= 1  y",
            "goto   L2",
            "L1:",
            "= 2  y",
            "L2:",
        ]
    );
}

#[test]
fn test_while_jumps_back_before_condition() {
    let code = main_body("while (i < 3) { i = i + 1; }");
    assert_eq!(
        code,
        vec![
            "L0:",
            "< i 3 t0",
            "if t0  L1",
            "goto   L2",
            "L1:",
            "+ i 1 t1",
            "= t1  i",
            "goto   L0",
            "L2:",
        ]
    );
}

#[test]
fn test_for_runs_updates_after_body() {
    let code = main_body("for (int i = 0; i < 2; i = i + 1) { s = s + i; }");
    assert_eq!(
        code,
        vec![
            "= 0  i",
            "L0:",
            "< i 2 t0",
            "if t0  L1",
            "goto   L2",
            "L1:",
            "+ s i t1",
            "= t1  s",
            "+ i 1 t2",
            "= t2  i",
            "goto   L0",
            "L2:",
        ]
    );
}

#[test]
fn test_call_pushes_arguments_in_reverse() {
    let code = main_body("r = f(1, x + 2);");
    assert_eq!(
        code,
        vec!["+ x 2 t0", "PUSH t0  ", "PUSH 1  ", "CALL f 2 t1", "= t1  r"]
    );
}

#[test]
fn test_return_without_value() {
    assert_eq!(main_body("return;"), vec!["RETURN   "]);
}

#[test]
fn test_labels_are_unique_across_program() {
    let ast = program(
        "int f() { if (1) { } }\nint g() { while (1) { if (0) { } else { } } }",
    );
    let mut context = CodegenContext::new();
    let mut labels = ast.emit_code(&mut context).labels();
    labels.sort_by_key(|label| label.0);

    assert_eq!(labels, (0..8).map(Label).collect::<Vec<Label>>());
    assert_eq!(generate_entries(&ast).len(), generate_ir(&ast).lines().count());
}

#[test]
fn test_separate_compiles_restart_counters() {
    let source = "int main() { x = 1 + 2; }";
    assert_eq!(generate_ir(&program(source)), generate_ir(&program(source)));
    assert!(generate_ir(&program(source)).contains("+ 1 2 t0"));
}
