//! AST construction from the simplified parse tree.
//!
//! Each retained non-terminal carries one of the handlers below. Children are
//! converted first, so a handler receives its children as tokens and finished
//! AST nodes, in source order.

use std::vec::IntoIter;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
    parser::simplifier::{SimplifiedChild, SimplifiedTree},
    Position,
};

use super::ast::{
    AssignExpr, AstNode, BlockStmt, Constant, ExprStmt, ForStmt, ForVarDecl, FuncCall, FuncDef,
    IfStmt, Param, Program, ReturnStmt, TypeNode, Var, VarAssignable, VarDecl, WhileStmt,
};

#[derive(Debug, Clone)]
pub enum AstChild {
    Token(Token),
    Node(AstNode),
}

pub type AstHandler = fn(Vec<AstChild>) -> Result<AstNode, Error>;

/// Converts a simplified tree into its AST node, children first.
pub fn build_ast(tree: SimplifiedTree<AstHandler>) -> Result<AstNode, Error> {
    let children = tree
        .children
        .into_iter()
        .map(|child| match child {
            SimplifiedChild::Token(token) => Ok(AstChild::Token(token)),
            SimplifiedChild::Tree(subtree) => build_ast(subtree).map(AstChild::Node),
        })
        .collect::<Result<Vec<AstChild>, Error>>()?;

    (tree.handler)(children)
}

/// Sequential access to a handler's children.
struct Children {
    node: &'static str,
    children: IntoIter<AstChild>,
}

impl Children {
    fn new(node: &'static str, children: Vec<AstChild>) -> Self {
        Children {
            node,
            children: children.into_iter(),
        }
    }

    fn malformed(&self) -> Error {
        Error::new(
            ErrorImpl::MalformedTree {
                node: String::from(self.node),
            },
            Position::default(),
        )
    }

    fn token(&mut self) -> Result<Token, Error> {
        match self.children.next() {
            Some(AstChild::Token(token)) => Ok(token),
            _ => Err(self.malformed()),
        }
    }

    fn node(&mut self) -> Result<AstNode, Error> {
        match self.children.next() {
            Some(AstChild::Node(node)) => Ok(node),
            _ => Err(self.malformed()),
        }
    }

    /// Consumes a token if the next child is one with the given text.
    fn accept_token(&mut self, text: &str) -> bool {
        let found = matches!(
            self.children.as_slice().first(),
            Some(AstChild::Token(token)) if token.text == text
        );
        if found {
            self.children.next();
        }
        found
    }

    fn peek_is_node(&self) -> bool {
        matches!(self.children.as_slice().first(), Some(AstChild::Node(_)))
    }

    /// The remaining node children, skipping separator tokens.
    fn remaining_nodes(self) -> Vec<AstNode> {
        self.children
            .filter_map(|child| match child {
                AstChild::Node(node) => Some(node),
                AstChild::Token(_) => None,
            })
            .collect()
    }

    fn type_node(&mut self) -> Result<TypeNode, Error> {
        match self.node()? {
            AstNode::Type(type_node) => Ok(type_node),
            _ => Err(self.malformed()),
        }
    }

    fn var(&mut self) -> Result<Var, Error> {
        match self.node()? {
            AstNode::Var(var) => Ok(var),
            _ => Err(self.malformed()),
        }
    }

    fn block(&mut self) -> Result<BlockStmt, Error> {
        match self.node()? {
            AstNode::BlockStmt(block) => Ok(block),
            _ => Err(self.malformed()),
        }
    }

    fn assignables(self) -> Result<Vec<VarAssignable>, Error> {
        let malformed = self.malformed();
        self.remaining_nodes()
            .into_iter()
            .map(|node| match node {
                AstNode::VarAssignable(assignable) => Ok(assignable),
                _ => Err(malformed.clone()),
            })
            .collect()
    }
}

pub fn start_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let decls = Children::new("Start", children).remaining_nodes();
    Ok(AstNode::Program(Program { decls }))
}

// Type id ( Params ) BlockStmt
pub fn func_def_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("FuncDef", children);
    let return_type = children.type_node()?;
    let name = children.token()?;
    children.token()?;
    let params = match children.node()? {
        AstNode::ParamList(params) => params,
        _ => return Err(children.malformed()),
    };
    children.token()?;
    let body = children.block()?;

    Ok(AstNode::FuncDef(FuncDef {
        return_type,
        name,
        params,
        body,
    }))
}

pub fn params_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let children = Children::new("Params", children);
    let malformed = children.malformed();
    let params = children
        .remaining_nodes()
        .into_iter()
        .map(|node| match node {
            AstNode::Param(param) => Ok(param),
            _ => Err(malformed.clone()),
        })
        .collect::<Result<Vec<Param>, Error>>()?;

    Ok(AstNode::ParamList(params))
}

// Type id [ ]?
pub fn param_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("Param", children);
    let param_type = children.type_node()?;
    let name = children.token()?;
    let is_array = children.accept_token("[");

    Ok(AstNode::Param(Param {
        param_type,
        name,
        is_array,
    }))
}

pub fn type_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let keyword = Children::new("Type", children).token()?;
    Ok(AstNode::Type(TypeNode { keyword }))
}

// Type VarAssignable (, VarAssignable)* ;
pub fn var_decl_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("VarDecl", children);
    let var_type = children.type_node()?;
    let vars = children.assignables()?;

    Ok(AstNode::VarDecl(VarDecl { var_type, vars }))
}

// Var (= Expr)?
pub fn var_assignable_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("VarAssignable", children);
    let var = children.var()?;
    let value = if children.accept_token("=") {
        Some(Box::new(children.node()?))
    } else {
        None
    };

    Ok(AstNode::VarAssignable(VarAssignable { var, value }))
}

// id ([ index ])?
pub fn var_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("Var", children);
    let name = children.token()?;
    let index = if children.accept_token("[") {
        Some(Box::new(children.node()?))
    } else {
        None
    };

    Ok(AstNode::Var(Var { name, index }))
}

pub fn constant_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let value = Children::new("Constant", children).token()?;
    Ok(AstNode::Constant(Constant { value }))
}

pub fn block_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("BlockStmt", children);
    let open = children.token()?;
    let stmts = children.remaining_nodes();

    Ok(AstNode::BlockStmt(BlockStmt { open, stmts }))
}

// if ( Expr ) BlockStmt (else BlockStmt)?
pub fn if_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("IfStmt", children);
    let keyword = children.token()?;
    children.token()?;
    let condition = Box::new(children.node()?);
    children.token()?;
    let then_block = children.block()?;
    let else_block = if children.accept_token("else") {
        Some(children.block()?)
    } else {
        None
    };

    Ok(AstNode::IfStmt(IfStmt {
        keyword,
        condition,
        then_block,
        else_block,
    }))
}

// while ( Expr ) BlockStmt
pub fn while_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("WhileStmt", children);
    let keyword = children.token()?;
    children.token()?;
    let condition = Box::new(children.node()?);
    children.token()?;
    let body = children.block()?;

    Ok(AstNode::WhileStmt(WhileStmt {
        keyword,
        condition,
        body,
    }))
}

// for ( ForVarDecl ; Expr ; ForUpdate ) BlockStmt
pub fn for_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("ForStmt", children);
    let keyword = children.token()?;
    children.token()?;
    let init = match children.node()? {
        AstNode::ForVarDecl(init) => init,
        _ => return Err(children.malformed()),
    };
    children.token()?;
    let condition = Box::new(children.node()?);
    children.token()?;
    let update = match children.node()? {
        AstNode::ForUpdate(update) => update,
        _ => return Err(children.malformed()),
    };
    children.token()?;
    let body = children.block()?;

    Ok(AstNode::ForStmt(ForStmt {
        keyword,
        init,
        condition,
        update,
        body,
    }))
}

pub fn for_var_decl_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("ForVarDecl", children);
    let typed = matches!(
        children.children.as_slice().first(),
        Some(AstChild::Node(AstNode::Type(_)))
    );
    let var_type = if typed { Some(children.type_node()?) } else { None };
    let vars = children.assignables()?;

    Ok(AstNode::ForVarDecl(ForVarDecl { var_type, vars }))
}

pub fn for_update_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    Ok(AstNode::ForUpdate(
        Children::new("ForUpdate", children).remaining_nodes(),
    ))
}

// return Expr? ;
pub fn return_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("ReturnStmt", children);
    let keyword = children.token()?;
    let value = if children.peek_is_node() {
        Some(Box::new(children.node()?))
    } else {
        None
    };

    Ok(AstNode::ReturnStmt(ReturnStmt { keyword, value }))
}

pub fn expr_stmt_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let expr = Children::new("ExprStmt", children).node()?;
    Ok(AstNode::ExprStmt(ExprStmt {
        expr: Box::new(expr),
    }))
}

pub fn empty_stmt_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let semicolon = Children::new("EmptyStmt", children).token()?;
    Ok(AstNode::EmptyStmt(semicolon))
}

// Var = Expr
pub fn assign_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("AssignExpr", children);
    let target = children.var()?;
    let operator = children.token()?;
    let value = Box::new(children.node()?);

    Ok(AstNode::AssignExpr(AssignExpr {
        target,
        operator,
        value,
    }))
}

/// Folds `operand (operator operand)*` into left-associative binary nodes.
pub fn binary_chain_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("BinaryExpr", children);
    let mut left = children.node()?;

    while !children.children.as_slice().is_empty() {
        let operator = children.token()?;
        let right = children.node()?;
        left = AstNode::binary(left, operator, right).ok_or_else(|| children.malformed())?;
    }

    Ok(left)
}

// UnaryOp UnaryExpr
pub fn unary_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("UnaryExpr", children);
    let operator = children.token()?;
    let operand = children.node()?;

    AstNode::unary(operator, operand).ok_or_else(|| children.malformed())
}

// id ( ArgList )
pub fn func_call_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("FuncCall", children);
    let name = children.token()?;
    children.token()?;
    let args = match children.node()? {
        AstNode::ArgList(args) => args,
        _ => return Err(children.malformed()),
    };

    Ok(AstNode::FuncCall(FuncCall { name, args }))
}

pub fn arg_list_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    Ok(AstNode::ArgList(
        Children::new("ArgList", children).remaining_nodes(),
    ))
}

// ( Expr )
pub fn factor_handler(children: Vec<AstChild>) -> Result<AstNode, Error> {
    let mut children = Children::new("Factor", children);
    children.token()?;
    children.node()
}
