use crate::{lexer::tokens::Token, Position};

/// A node of the abstract syntax tree.
///
/// Every grammar construct is one variant. Binary and unary operators get a
/// variant each so that type checking and code generation can match on the
/// operation directly. `ParamList`, `ArgList` and `ForUpdate` only appear as
/// children of the construct that owns them.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Program(Program),
    FuncDef(FuncDef),
    ParamList(Vec<Param>),
    Param(Param),
    Type(TypeNode),
    VarDecl(VarDecl),
    VarAssignable(VarAssignable),
    Var(Var),
    Constant(Constant),

    BlockStmt(BlockStmt),
    IfStmt(IfStmt),
    WhileStmt(WhileStmt),
    ForStmt(ForStmt),
    ForVarDecl(ForVarDecl),
    ForUpdate(Vec<AstNode>),
    ReturnStmt(ReturnStmt),
    ExprStmt(ExprStmt),
    EmptyStmt(Token),

    AssignExpr(AssignExpr),
    OrExpr(BinaryExpr),
    AndExpr(BinaryExpr),
    EqualExpr(BinaryExpr),
    NotEqualExpr(BinaryExpr),
    LessExpr(BinaryExpr),
    LessEqualExpr(BinaryExpr),
    MoreExpr(BinaryExpr),
    MoreEqualExpr(BinaryExpr),
    AddExpr(BinaryExpr),
    SubExpr(BinaryExpr),
    MulExpr(BinaryExpr),
    DivExpr(BinaryExpr),
    ModExpr(BinaryExpr),
    UnaryPlusExpr(UnaryExpr),
    UnaryMinusExpr(UnaryExpr),
    NotExpr(UnaryExpr),
    FuncCall(FuncCall),
    ArgList(Vec<AstNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub decls: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub return_type: TypeNode,
    pub name: Token,
    pub params: Vec<Param>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub param_type: TypeNode,
    pub name: Token,
    pub is_array: bool,
}

/// One of the type keywords `int`, `float` or `str`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub keyword: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var_type: TypeNode,
    pub vars: Vec<VarAssignable>,
}

/// A declared or assigned variable with an optional initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct VarAssignable {
    pub var: Var,
    pub value: Option<Box<AstNode>>,
}

/// A variable reference. In declarations the index is the array size.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub name: Token,
    pub index: Option<Box<AstNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub value: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub open: Token,
    pub stmts: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub keyword: Token,
    pub condition: Box<AstNode>,
    pub then_block: BlockStmt,
    pub else_block: Option<BlockStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub keyword: Token,
    pub condition: Box<AstNode>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub keyword: Token,
    pub init: ForVarDecl,
    pub condition: Box<AstNode>,
    pub update: Vec<AstNode>,
    pub body: BlockStmt,
}

/// The initializer of a `for` header: a declaration when `var_type` is set,
/// otherwise assignments to existing variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ForVarDecl {
    pub var_type: Option<TypeNode>,
    pub vars: Vec<VarAssignable>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Box<AstNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub target: Var,
    pub operator: Token,
    pub value: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<AstNode>,
    pub operator: Token,
    pub right: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub name: Token,
    pub args: Vec<AstNode>,
}

impl AstNode {
    /// Builds the binary node for an operator token, or `None` if the token
    /// is not a binary operator.
    pub fn binary(left: AstNode, operator: Token, right: AstNode) -> Option<AstNode> {
        let constructor: fn(BinaryExpr) -> AstNode = match operator.text.as_str() {
            "||" => AstNode::OrExpr,
            "&&" => AstNode::AndExpr,
            "==" => AstNode::EqualExpr,
            "!=" => AstNode::NotEqualExpr,
            "<" => AstNode::LessExpr,
            "<=" => AstNode::LessEqualExpr,
            ">" => AstNode::MoreExpr,
            ">=" => AstNode::MoreEqualExpr,
            "+" => AstNode::AddExpr,
            "-" => AstNode::SubExpr,
            "*" => AstNode::MulExpr,
            "/" => AstNode::DivExpr,
            "%" => AstNode::ModExpr,
            _ => return None,
        };

        Some(constructor(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    pub fn unary(operator: Token, operand: AstNode) -> Option<AstNode> {
        let constructor: fn(UnaryExpr) -> AstNode = match operator.text.as_str() {
            "+" => AstNode::UnaryPlusExpr,
            "-" => AstNode::UnaryMinusExpr,
            "!" => AstNode::NotExpr,
            _ => return None,
        };

        Some(constructor(UnaryExpr {
            operator,
            operand: Box::new(operand),
        }))
    }

    /// Source position used when reporting errors about this node.
    pub fn position(&self) -> Position {
        match self {
            AstNode::Program(program) => program
                .decls
                .first()
                .map_or(Position::default(), AstNode::position),
            AstNode::FuncDef(func_def) => func_def.return_type.keyword.position,
            AstNode::ParamList(params) => params
                .first()
                .map_or(Position::default(), |param| param.param_type.keyword.position),
            AstNode::Param(param) => param.param_type.keyword.position,
            AstNode::Type(type_node) => type_node.keyword.position,
            AstNode::VarDecl(var_decl) => var_decl.var_type.keyword.position,
            AstNode::VarAssignable(assignable) => assignable.var.name.position,
            AstNode::Var(var) => var.name.position,
            AstNode::Constant(constant) => constant.value.position,
            AstNode::BlockStmt(block) => block.open.position,
            AstNode::IfStmt(if_stmt) => if_stmt.keyword.position,
            AstNode::WhileStmt(while_stmt) => while_stmt.keyword.position,
            AstNode::ForStmt(for_stmt) => for_stmt.keyword.position,
            AstNode::ForVarDecl(for_var_decl) => match &for_var_decl.var_type {
                Some(var_type) => var_type.keyword.position,
                None => for_var_decl
                    .vars
                    .first()
                    .map_or(Position::default(), |assignable| assignable.var.name.position),
            },
            AstNode::ReturnStmt(return_stmt) => return_stmt.keyword.position,
            AstNode::ExprStmt(expr_stmt) => expr_stmt.expr.position(),
            AstNode::EmptyStmt(token) => token.position,
            AstNode::AssignExpr(assign) => assign.target.name.position,
            AstNode::OrExpr(binary)
            | AstNode::AndExpr(binary)
            | AstNode::EqualExpr(binary)
            | AstNode::NotEqualExpr(binary)
            | AstNode::LessExpr(binary)
            | AstNode::LessEqualExpr(binary)
            | AstNode::MoreExpr(binary)
            | AstNode::MoreEqualExpr(binary)
            | AstNode::AddExpr(binary)
            | AstNode::SubExpr(binary)
            | AstNode::MulExpr(binary)
            | AstNode::DivExpr(binary)
            | AstNode::ModExpr(binary) => binary.operator.position,
            AstNode::UnaryPlusExpr(unary)
            | AstNode::UnaryMinusExpr(unary)
            | AstNode::NotExpr(unary) => unary.operator.position,
            AstNode::FuncCall(call) => call.name.position,
            AstNode::ForUpdate(nodes) | AstNode::ArgList(nodes) => nodes
                .first()
                .map_or(Position::default(), AstNode::position),
        }
    }
}
