//! The language grammar.
//!
//! The program grammar is recursive descent at the top level. Parameter lists
//! are parsed by an embedded SLR(1) table and variable-or-constant operands by
//! an embedded LL(1) table. The node policies decide which non-terminals
//! survive simplification and which handler builds their AST node.

use lazy_static::lazy_static;

use crate::{
    ast::builder::{
        arg_list_handler, assign_handler, binary_chain_handler, block_handler, constant_handler,
        empty_stmt_handler, expr_stmt_handler, factor_handler, for_handler, for_update_handler,
        for_var_decl_handler, func_call_handler, func_def_handler, if_handler, param_handler,
        params_handler, return_handler, start_handler, type_handler, unary_handler,
        var_assignable_handler, var_decl_handler, var_handler, while_handler, AstHandler,
    },
    MK_RULE,
};

use super::{
    engine::Engine,
    ll1_parser::Ll1Parser,
    rd_parser::RdParser,
    simplifier::PolicyTable,
    slr1_parser::{Action, Slr1Parser, State},
    symbol::{nt, Lookahead, Production, Symbol, Terminal},
};

lazy_static! {
    pub static ref PROGRAM_GRAMMAR: RdParser = build_grammar("Start");
    pub static ref EXPRESSION_GRAMMAR: RdParser = build_grammar("Expr");
    pub static ref NODE_POLICIES: PolicyTable<AstHandler> = node_policies();
}

fn id() -> Terminal {
    Terminal::identifier()
}

fn kw(text: &str) -> Terminal {
    Terminal::keyword(text)
}

fn op(text: &str) -> Terminal {
    Terminal::operator(text)
}

fn p(text: &str) -> Terminal {
    Terminal::punctuator(text)
}

/// Operator precedence levels, loosest first: (level, next level, operators).
const PRECEDENCE_LEVELS: [(&str, &str, &[&str]); 6] = [
    ("OrExpr", "AndExpr", &["||"]),
    ("AndExpr", "EqualityExpr", &["&&"]),
    ("EqualityExpr", "RelationalExpr", &["==", "!="]),
    ("RelationalExpr", "SumExpr", &["<=", ">=", "<", ">"]),
    ("SumExpr", "MulExpr", &["+", "-"]),
    ("MulExpr", "UnaryExpr", &["*", "/", "%"]),
];

/// Builds the recursive-descent grammar with `start` as its start symbol.
pub fn build_grammar(start: &str) -> RdParser {
    let mut rd = RdParser::new(nt(start));

    rd.add_rule("Start", vec![MK_RULE![nt("DeclList")]]);
    rd.add_list_rule(
        "DeclList",
        vec![MK_RULE![nt("Decl"), nt("DeclList")], MK_RULE![nt("Decl")]],
    );
    rd.add_rule("Decl", vec![MK_RULE![nt("FuncDef")], MK_RULE![nt("VarDecl")]]);
    rd.add_rule(
        "FuncDef",
        vec![MK_RULE![
            nt("Type"),
            id(),
            p("("),
            nt("Params"),
            p(")"),
            nt("BlockStmt")
        ]],
    );
    rd.add_rule("Params", vec![MK_RULE![Engine::from(param_list_parser())]]);

    rd.add_rule("VarDecl", vec![MK_RULE![nt("Type"), nt("VarList"), p(";")]]);
    rd.add_list_rule(
        "VarList",
        vec![
            MK_RULE![nt("VarAssignable"), p(","), nt("VarList")],
            MK_RULE![nt("VarAssignable")],
        ],
    );
    rd.add_rule(
        "VarAssignable",
        vec![MK_RULE![nt("Var"), op("="), nt("Expr")], MK_RULE![nt("Var")]],
    );
    rd.add_rule(
        "Var",
        vec![MK_RULE![id(), p("["), nt("Expr"), p("]")], MK_RULE![id()]],
    );
    rd.add_rule(
        "Type",
        vec![MK_RULE![kw("int")], MK_RULE![kw("float")], MK_RULE![kw("str")]],
    );

    rd.add_rule("BlockStmt", vec![MK_RULE![p("{"), nt("StmtList"), p("}")]]);
    rd.add_list_rule(
        "StmtList",
        vec![MK_RULE![nt("Stmt"), nt("StmtList")], MK_RULE![]],
    );
    rd.add_rule(
        "Stmt",
        vec![
            MK_RULE![nt("VarDecl")],
            MK_RULE![nt("IfStmt")],
            MK_RULE![nt("WhileStmt")],
            MK_RULE![nt("ForStmt")],
            MK_RULE![nt("ReturnStmt")],
            MK_RULE![nt("ExprStmt")],
            MK_RULE![nt("EmptyStmt")],
            MK_RULE![nt("BlockStmt")],
        ],
    );
    rd.add_rule(
        "IfStmt",
        vec![MK_RULE![
            kw("if"),
            p("("),
            nt("Expr"),
            p(")"),
            nt("BlockStmt"),
            nt("ElseClause")
        ]],
    );
    rd.add_rule(
        "ElseClause",
        vec![MK_RULE![kw("else"), nt("BlockStmt")], MK_RULE![]],
    );
    rd.add_rule(
        "WhileStmt",
        vec![MK_RULE![
            kw("while"),
            p("("),
            nt("Expr"),
            p(")"),
            nt("BlockStmt")
        ]],
    );
    rd.add_rule(
        "ForStmt",
        vec![MK_RULE![
            kw("for"),
            p("("),
            nt("ForVarDecl"),
            p(";"),
            nt("Expr"),
            p(";"),
            nt("ForUpdate"),
            p(")"),
            nt("BlockStmt")
        ]],
    );
    rd.add_rule(
        "ForVarDecl",
        vec![MK_RULE![nt("Type"), nt("VarList")], MK_RULE![nt("VarList")]],
    );
    rd.add_rule("ForUpdate", vec![MK_RULE![nt("ExprList")]]);
    rd.add_list_rule(
        "ExprList",
        vec![
            MK_RULE![nt("Expr"), p(","), nt("ExprList")],
            MK_RULE![nt("Expr")],
            MK_RULE![],
        ],
    );
    rd.add_rule(
        "ReturnStmt",
        vec![
            MK_RULE![kw("return"), nt("Expr"), p(";")],
            MK_RULE![kw("return"), p(";")],
        ],
    );
    rd.add_rule("ExprStmt", vec![MK_RULE![nt("Expr"), p(";")]]);
    rd.add_rule("EmptyStmt", vec![MK_RULE![p(";")]]);

    rd.add_rule("Expr", vec![MK_RULE![nt("AssignExpr")]]);
    rd.add_rule(
        "AssignExpr",
        vec![MK_RULE![nt("Var"), op("="), nt("Expr")], MK_RULE![nt("OrExpr")]],
    );

    for (level, next, operators) in PRECEDENCE_LEVELS {
        let tail = format!("{}'", level);
        let operator = format!("{}Op", level);

        rd.add_rule(level, vec![MK_RULE![nt(next), nt(&tail)]]);
        rd.add_list_rule(
            &tail,
            vec![MK_RULE![nt(&operator), nt(next), nt(&tail)], MK_RULE![]],
        );
        rd.add_rule(
            &operator,
            operators.iter().map(|text| MK_RULE![op(text)]).collect(),
        );
    }

    rd.add_rule(
        "UnaryExpr",
        vec![MK_RULE![nt("UnaryOp"), nt("UnaryExpr")], MK_RULE![nt("FuncCall")]],
    );
    rd.add_rule(
        "UnaryOp",
        vec![MK_RULE![op("+")], MK_RULE![op("-")], MK_RULE![op("!")]],
    );
    rd.add_rule(
        "FuncCall",
        vec![
            MK_RULE![id(), p("("), nt("ArgList"), p(")")],
            MK_RULE![nt("Factor")],
        ],
    );
    rd.add_rule(
        "ArgList",
        vec![MK_RULE![nt("Expr"), nt("ArgList'")], MK_RULE![]],
    );
    rd.add_list_rule(
        "ArgList'",
        vec![
            MK_RULE![p(","), nt("Expr"), nt("ArgList'")],
            MK_RULE![p(",")],
            MK_RULE![],
        ],
    );
    rd.add_rule(
        "Factor",
        vec![
            MK_RULE![p("("), nt("Expr"), p(")")],
            MK_RULE![Engine::from(var_const_parser())],
        ],
    );

    rd
}

/// SLR(1) automaton for `ParamList`, including a trailing comma.
///
/// 1. ParamList → Param , ParamList
/// 2. ParamList → Param
/// 3. ParamList → ε
/// 4. Param → Type ParamVar
/// 5. ParamVar → id [ ]
/// 6. ParamVar → id
/// 7. Type → int
/// 8. Type → float
/// 9. Type → str
pub fn param_list_parser() -> Slr1Parser {
    let mut slr = Slr1Parser::new(State(0));
    let t = |terminal: Terminal| Lookahead::Terminal(terminal);
    let end = || Lookahead::EndOfInput;

    slr.add_production(
        1,
        Production::new(
            "ParamList",
            vec![nt("Param").into(), p(",").into(), nt("ParamList").into()],
        ),
    );
    slr.add_production(2, Production::new("ParamList", vec![nt("Param").into()]));
    slr.add_production(3, Production::new("ParamList", vec![]));
    slr.add_production(
        4,
        Production::new("Param", vec![nt("Type").into(), nt("ParamVar").into()]),
    );
    slr.add_production(
        5,
        Production::new("ParamVar", vec![id().into(), p("[").into(), p("]").into()]),
    );
    slr.add_production(6, Production::new("ParamVar", vec![id().into()]));
    slr.add_production(7, Production::new("Type", vec![kw("int").into()]));
    slr.add_production(8, Production::new("Type", vec![kw("float").into()]));
    slr.add_production(9, Production::new("Type", vec![kw("str").into()]));

    // States 0 and 7 both expect the start of a parameter list.
    for (state, list_goto) in [(0, 1), (7, 10)] {
        slr.add_action(state, t(kw("int")), Action::Shift(State(4)));
        slr.add_action(state, t(kw("float")), Action::Shift(State(5)));
        slr.add_action(state, t(kw("str")), Action::Shift(State(6)));
        slr.add_action(state, end(), Action::Reduce(3));
        slr.add_goto(state, "ParamList", list_goto);
        slr.add_goto(state, "Param", 2);
        slr.add_goto(state, "Type", 3);
    }

    slr.add_action(1, end(), Action::Accept);

    slr.add_action(2, t(p(",")), Action::Shift(State(7)));
    slr.add_action(2, end(), Action::Reduce(2));

    slr.add_action(3, t(id()), Action::Shift(State(9)));
    slr.add_goto(3, "ParamVar", 8);

    slr.add_action(4, t(id()), Action::Reduce(7));
    slr.add_action(5, t(id()), Action::Reduce(8));
    slr.add_action(6, t(id()), Action::Reduce(9));

    slr.add_action(8, t(p(",")), Action::Reduce(4));
    slr.add_action(8, end(), Action::Reduce(4));

    slr.add_action(9, t(p(",")), Action::Reduce(6));
    slr.add_action(9, t(p("[")), Action::Shift(State(11)));
    slr.add_action(9, end(), Action::Reduce(6));

    slr.add_action(10, end(), Action::Reduce(1));

    slr.add_action(11, t(p("]")), Action::Shift(State(12)));

    slr.add_action(12, t(p(",")), Action::Reduce(5));
    slr.add_action(12, end(), Action::Reduce(5));

    slr
}

/// LL(1) table deciding between a constant and a (possibly indexed) variable.
pub fn var_const_parser() -> Ll1Parser {
    let mut ll1 = Ll1Parser::new(nt("VarConst"));
    let literals = [
        Terminal::integer_literal(),
        Terminal::float_literal(),
        Terminal::string_literal(),
    ];

    for literal in literals {
        ll1.add_entry(
            "VarConst",
            Lookahead::Terminal(literal.clone()),
            vec![nt("Constant").into()],
        );
        ll1.add_entry(
            "Constant",
            Lookahead::Terminal(literal.clone()),
            vec![Symbol::Terminal(literal)],
        );
    }

    ll1.add_entry(
        "VarConst",
        Lookahead::Terminal(id()),
        vec![nt("Var").into()],
    );
    ll1.add_entry(
        "Var",
        Lookahead::Terminal(id()),
        vec![id().into(), nt("Var'").into()],
    );
    ll1.add_entry(
        "Var'",
        Lookahead::Terminal(p("[")),
        vec![p("[").into(), nt("VarConst").into(), p("]").into()],
    );
    ll1.add_entry("Var'", Lookahead::EndOfInput, vec![]);

    ll1
}

fn node_policies() -> PolicyTable<AstHandler> {
    let mut policies: PolicyTable<AstHandler> = PolicyTable::new();

    policies.retain("Start", start_handler);
    policies.retain("FuncDef", func_def_handler);
    policies.retain("Params", params_handler);
    policies.retain("Param", param_handler);
    policies.retain("Type", type_handler);
    policies.retain("VarDecl", var_decl_handler);
    policies.retain("VarAssignable", var_assignable_handler);
    policies.retain("Var", var_handler);
    policies.retain("Constant", constant_handler);
    policies.retain("BlockStmt", block_handler);
    policies.retain("IfStmt", if_handler);
    policies.retain("WhileStmt", while_handler);
    policies.retain("ForStmt", for_handler);
    policies.retain("ForVarDecl", for_var_decl_handler);
    policies.retain("ForUpdate", for_update_handler);
    policies.retain("ReturnStmt", return_handler);
    policies.retain("ExprStmt", expr_stmt_handler);
    policies.retain("EmptyStmt", empty_stmt_handler);
    policies.retain("ArgList", arg_list_handler);

    policies.retain_if_multiple("AssignExpr", assign_handler);
    for (level, _, _) in PRECEDENCE_LEVELS {
        policies.retain_if_multiple(level, binary_chain_handler);
    }
    policies.retain_if_multiple("UnaryExpr", unary_handler);
    policies.retain_if_multiple("FuncCall", func_call_handler);
    policies.retain_if_multiple("Factor", factor_handler);

    for helper in ["DeclList", "Decl", "VarList", "StmtList", "Stmt", "ElseClause", "ExprList"] {
        policies.merge_up(helper);
    }

    policies
}
