use crate::{
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::{parse, parse_expression},
    Position,
};

use super::{
    ast::AstNode,
    builder::{binary_chain_handler, param_handler, var_handler, AstChild},
};

fn expression(source: &str) -> AstNode {
    parse_expression(&tokenize(source).unwrap()).unwrap()
}

fn token(source: &str) -> Token {
    tokenize(source).unwrap().remove(0)
}

#[test]
fn test_binary_chain_is_left_associative() {
    let AstNode::SubExpr(outer) = expression("a - b - c") else {
        panic!("expected a subtraction at the root");
    };

    assert!(matches!(*outer.left, AstNode::SubExpr(_)));
    assert!(matches!(&*outer.right, AstNode::Var(var) if var.name.text == "c"));
}

#[test]
fn test_precedence_nesting() {
    let AstNode::OrExpr(or) = expression("a && b || c == d + e * f") else {
        panic!("expected || at the root");
    };
    assert!(matches!(*or.left, AstNode::AndExpr(_)));

    let AstNode::EqualExpr(equal) = *or.right else {
        panic!("expected == on the right");
    };
    let AstNode::AddExpr(add) = *equal.right else {
        panic!("expected + under ==");
    };
    assert!(matches!(*add.right, AstNode::MulExpr(_)));
}

#[test]
fn test_unary_operators_nest() {
    let AstNode::NotExpr(not) = expression("!-x") else {
        panic!("expected ! at the root");
    };
    assert!(matches!(*not.operand, AstNode::UnaryMinusExpr(_)));
    assert!(matches!(expression("+1"), AstNode::UnaryPlusExpr(_)));
}

#[test]
fn test_assignment_is_right_associative() {
    let AstNode::AssignExpr(assign) = expression("a = b[1] = 2") else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.target.name.text, "a");

    let AstNode::AssignExpr(inner) = *assign.value else {
        panic!("expected a nested assignment");
    };
    assert!(inner.target.index.is_some());
}

#[test]
fn test_function_call_arguments() {
    let AstNode::FuncCall(call) = expression("f(1, g(), x[0],)") else {
        panic!("expected a call");
    };

    assert_eq!(call.name.text, "f");
    assert_eq!(call.args.len(), 3);
    assert!(matches!(call.args[1], AstNode::FuncCall(_)));
    assert!(matches!(&call.args[2], AstNode::Var(var) if var.index.is_some()));
}

#[test]
fn test_function_definition_shape() {
    let tokens = tokenize("float f(int a, str s[]) { int x = 1; return x; }").unwrap();
    let AstNode::Program(program) = parse(&tokens).unwrap() else {
        panic!("expected a program");
    };
    let AstNode::FuncDef(func) = &program.decls[0] else {
        panic!("expected a function definition");
    };

    assert_eq!(func.return_type.keyword.text, "float");
    assert_eq!(func.name.text, "f");
    assert_eq!(func.params.len(), 2);
    assert!(!func.params[0].is_array);
    assert!(func.params[1].is_array);
    assert_eq!(func.params[1].param_type.keyword.text, "str");
    assert_eq!(func.body.stmts.len(), 2);
    assert!(matches!(func.body.stmts[0], AstNode::VarDecl(_)));
    assert!(matches!(func.body.stmts[1], AstNode::ReturnStmt(_)));
}

#[test]
fn test_for_header_shape() {
    let tokens = tokenize("int main() { for (int i = 0; i < 3; i = i + 1, j = i) { } }").unwrap();
    let AstNode::Program(program) = parse(&tokens).unwrap() else {
        panic!("expected a program");
    };
    let AstNode::FuncDef(main) = &program.decls[0] else {
        panic!("expected a function definition");
    };
    let AstNode::ForStmt(for_stmt) = &main.body.stmts[0] else {
        panic!("expected a for statement");
    };

    assert!(for_stmt.init.var_type.is_some());
    assert_eq!(for_stmt.init.vars.len(), 1);
    assert!(matches!(*for_stmt.condition, AstNode::LessExpr(_)));
    assert_eq!(for_stmt.update.len(), 2);
}

#[test]
fn test_handlers_from_children() {
    let name = token("arr");
    let open = token("[");
    let size = AstNode::Constant(super::ast::Constant {
        value: token("10"),
    });

    let node = var_handler(vec![
        AstChild::Token(name),
        AstChild::Token(open),
        AstChild::Node(size),
        AstChild::Token(token("]")),
    ])
    .unwrap();
    assert!(matches!(node, AstNode::Var(var) if var.index.is_some()));

    let type_node = AstNode::Type(super::ast::TypeNode {
        keyword: token("int"),
    });
    let node = param_handler(vec![AstChild::Node(type_node), AstChild::Token(token("p"))]).unwrap();
    assert!(matches!(node, AstNode::Param(param) if !param.is_array));
}

#[test]
fn test_handler_rejects_malformed_children() {
    let error = binary_chain_handler(vec![AstChild::Token(token("+"))]).unwrap_err();
    assert_eq!(error.message(), "Malformed parse tree at BinaryExpr");
}

#[test]
fn test_node_positions() {
    let tokens = tokenize("int x;\nint main() {\n  x = 1 + 2;\n}").unwrap();
    let AstNode::Program(program) = parse(&tokens).unwrap() else {
        panic!("expected a program");
    };

    assert_eq!(program.decls[0].position(), Position(1, 1));
    assert_eq!(program.decls[1].position(), Position(2, 1));

    let AstNode::FuncDef(main) = &program.decls[1] else {
        panic!("expected a function definition");
    };
    let AstNode::ExprStmt(stmt) = &main.body.stmts[0] else {
        panic!("expected an expression statement");
    };
    assert_eq!(stmt.expr.position(), Position(3, 3));

    let AstNode::AssignExpr(assign) = &*stmt.expr else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.value.position(), Position(3, 9));
}
