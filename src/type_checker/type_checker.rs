use tracing::debug;

use crate::{
    ast::ast::{
        AstNode, BinaryExpr, BlockStmt, ForVarDecl, Param, TypeNode, UnaryExpr, Var,
        VarAssignable,
    },
    errors::errors::{CompileError, Error, ErrorImpl},
    lexer::tokens::{Token, TokenCategory},
    with_deep_stack,
};

use super::{
    symbol_table::{SymbolEntry, SymbolTable},
    types::DataType,
};

/// Type checks a whole tree in a fresh global scope.
pub fn type_check(ast: &AstNode) -> Result<DataType, CompileError> {
    let data_type = with_deep_stack(|| {
        let mut table = SymbolTable::new();
        ast.type_check(&mut table, None)
    })?;
    debug!(result = %data_type, "type check passed");
    Ok(data_type)
}

fn with_scope<T>(
    table: &mut SymbolTable,
    check: impl FnOnce(&mut SymbolTable) -> Result<T, Error>,
) -> Result<T, Error> {
    table.enter_scope();
    let result = check(table);
    table.exit_scope();
    result
}

fn declared_type(type_node: &TypeNode) -> Result<DataType, Error> {
    DataType::from_keyword(&type_node.keyword.text).ok_or_else(|| {
        Error::new(
            ErrorImpl::MalformedTree {
                node: String::from("Type"),
            },
            type_node.keyword.position,
        )
    })
}

fn mismatch(expected: DataType, received: DataType, token: &Token) -> Error {
    Error::new(
        ErrorImpl::TypeMismatch {
            expected: expected.to_string(),
            received: received.to_string(),
        },
        token.position,
    )
}

/// `value` can be stored in something of type `target`.
fn can_assign(target: DataType, value: DataType) -> bool {
    target == value || value.is_any()
}

impl AstNode {
    /// Checks this node against the scoped symbol table and returns its type.
    ///
    /// `expected` carries the declared type down to a variable that is being
    /// declared; it is `None` everywhere else, in which case variables are
    /// looked up instead.
    pub fn type_check(
        &self,
        table: &mut SymbolTable,
        expected: Option<DataType>,
    ) -> Result<DataType, Error> {
        match self {
            AstNode::Program(program) => {
                for decl in program.decls.iter() {
                    decl.type_check(table, None)?;
                }
                Ok(DataType::None)
            }
            AstNode::FuncDef(func_def) => {
                declared_type(&func_def.return_type)?;
                table.insert(SymbolEntry::new(
                    &func_def.name.text,
                    DataType::Function,
                    false,
                ));

                with_scope(table, |table| {
                    for param in func_def.params.iter() {
                        check_param(param, table)?;
                    }
                    check_block(&func_def.body, table)
                })?;
                Ok(DataType::None)
            }
            AstNode::ParamList(params) => {
                for param in params.iter() {
                    check_param(param, table)?;
                }
                Ok(DataType::None)
            }
            AstNode::Param(param) => check_param(param, table),
            AstNode::Type(type_node) => declared_type(type_node),
            AstNode::VarDecl(var_decl) => {
                let var_type = declared_type(&var_decl.var_type)?;
                for assignable in var_decl.vars.iter() {
                    check_assignable(assignable, table, Some(var_type))?;
                }
                Ok(DataType::None)
            }
            AstNode::VarAssignable(assignable) => check_assignable(assignable, table, expected),
            AstNode::Var(var) => check_var(var, table, expected),
            AstNode::Constant(constant) => match constant.value.category {
                TokenCategory::Integer => Ok(DataType::Int),
                TokenCategory::Float => Ok(DataType::Float),
                TokenCategory::String => Ok(DataType::Str),
                _ => Err(Error::new(
                    ErrorImpl::MalformedTree {
                        node: String::from("Constant"),
                    },
                    constant.value.position,
                )),
            },

            AstNode::BlockStmt(block) => check_block(block, table),
            AstNode::IfStmt(if_stmt) => {
                check_condition(&if_stmt.condition, table)?;
                check_block(&if_stmt.then_block, table)?;
                if let Some(else_block) = &if_stmt.else_block {
                    check_block(else_block, table)?;
                }
                Ok(DataType::None)
            }
            AstNode::WhileStmt(while_stmt) => {
                check_condition(&while_stmt.condition, table)?;
                check_block(&while_stmt.body, table)
            }
            AstNode::ForStmt(for_stmt) => with_scope(table, |table| {
                check_for_var_decl(&for_stmt.init, table)?;
                check_condition(&for_stmt.condition, table)?;
                for update in for_stmt.update.iter() {
                    update.type_check(table, None)?;
                }
                check_block(&for_stmt.body, table)
            }),
            AstNode::ForVarDecl(for_var_decl) => check_for_var_decl(for_var_decl, table),
            AstNode::ForUpdate(updates) | AstNode::ArgList(updates) => {
                for update in updates.iter() {
                    update.type_check(table, None)?;
                }
                Ok(DataType::None)
            }
            AstNode::ReturnStmt(return_stmt) => {
                if let Some(value) = &return_stmt.value {
                    value.type_check(table, None)?;
                }
                Ok(DataType::None)
            }
            AstNode::ExprStmt(expr_stmt) => {
                expr_stmt.expr.type_check(table, None)?;
                Ok(DataType::None)
            }
            AstNode::EmptyStmt(_) => Ok(DataType::None),

            AstNode::AssignExpr(assign) => {
                let value_type = assign.value.type_check(table, None)?;
                let target_type = check_var(&assign.target, table, None)?;
                if !can_assign(target_type, value_type) {
                    return Err(mismatch(target_type, value_type, &assign.operator));
                }
                Ok(target_type)
            }
            AstNode::AddExpr(binary) => check_arithmetic(binary, table, "add", true),
            AstNode::SubExpr(binary) => check_arithmetic(binary, table, "subtract", false),
            AstNode::MulExpr(binary) => check_arithmetic(binary, table, "multiply", false),
            AstNode::DivExpr(binary) => check_arithmetic(binary, table, "divide", false),
            AstNode::ModExpr(binary) => {
                check_arithmetic(binary, table, "take the modulo of", false)
            }
            AstNode::EqualExpr(binary)
            | AstNode::NotEqualExpr(binary)
            | AstNode::LessExpr(binary)
            | AstNode::LessEqualExpr(binary)
            | AstNode::MoreExpr(binary)
            | AstNode::MoreEqualExpr(binary) => check_comparison(binary, table),
            AstNode::OrExpr(binary) | AstNode::AndExpr(binary) => check_logical(binary, table),
            AstNode::UnaryPlusExpr(unary) | AstNode::UnaryMinusExpr(unary) => {
                check_numeric_unary(unary, table)
            }
            AstNode::NotExpr(unary) => {
                let operand = unary.operand.type_check(table, None)?;
                if !operand.is_boolean() {
                    return Err(Error::new(
                        ErrorImpl::NonBooleanOperand {
                            received: operand.to_string(),
                        },
                        unary.operator.position,
                    ));
                }
                Ok(DataType::Int)
            }
            AstNode::FuncCall(call) => {
                match table.lookup(&call.name.text) {
                    None => {
                        return Err(Error::new(
                            ErrorImpl::FunctionNotFound {
                                name: call.name.text.clone(),
                            },
                            call.name.position,
                        ))
                    }
                    Some(entry) if entry.data_type != DataType::Function => {
                        return Err(Error::new(
                            ErrorImpl::CallOnNonFunction {
                                name: call.name.text.clone(),
                            },
                            call.name.position,
                        ))
                    }
                    Some(_) => {}
                }

                for arg in call.args.iter() {
                    arg.type_check(table, None)?;
                }
                Ok(DataType::Any)
            }
        }
    }
}

fn check_param(param: &Param, table: &mut SymbolTable) -> Result<DataType, Error> {
    let param_type = declared_type(&param.param_type)?;
    table.insert(SymbolEntry::new(&param.name.text, param_type, param.is_array));
    Ok(param_type)
}

fn check_block(block: &BlockStmt, table: &mut SymbolTable) -> Result<DataType, Error> {
    with_scope(table, |table| {
        for stmt in block.stmts.iter() {
            stmt.type_check(table, None)?;
        }
        Ok(DataType::None)
    })
}

fn check_condition(condition: &AstNode, table: &mut SymbolTable) -> Result<(), Error> {
    let condition_type = condition.type_check(table, None)?;
    if !condition_type.is_boolean() {
        return Err(Error::new(
            ErrorImpl::NonBooleanCondition {
                received: condition_type.to_string(),
            },
            condition.position(),
        ));
    }
    Ok(())
}

fn check_for_var_decl(init: &ForVarDecl, table: &mut SymbolTable) -> Result<DataType, Error> {
    let expected = match &init.var_type {
        Some(var_type) => Some(declared_type(var_type)?),
        None => None,
    };
    for assignable in init.vars.iter() {
        check_assignable(assignable, table, expected)?;
    }
    Ok(DataType::None)
}

// The initializer is checked before the name is bound, so `int a = a;` fails.
fn check_assignable(
    assignable: &VarAssignable,
    table: &mut SymbolTable,
    expected: Option<DataType>,
) -> Result<DataType, Error> {
    let value_type = match &assignable.value {
        Some(value) => Some(value.type_check(table, None)?),
        None => None,
    };
    let var_type = check_var(&assignable.var, table, expected)?;

    let Some(value_type) = value_type else {
        return Ok(var_type);
    };
    if expected.is_some() && assignable.var.index.is_some() {
        return Err(Error::new(
            ErrorImpl::ArrayInitializer {
                name: assignable.var.name.text.clone(),
            },
            assignable.var.name.position,
        ));
    }
    if !can_assign(var_type, value_type) {
        return Err(mismatch(var_type, value_type, &assignable.var.name));
    }
    Ok(var_type)
}

fn check_index(index: &AstNode, table: &mut SymbolTable) -> Result<(), Error> {
    let index_type = index.type_check(table, None)?;
    if !matches!(index_type, DataType::Int | DataType::Any) {
        return Err(Error::new(
            ErrorImpl::NonIntegerIndex {
                received: index_type.to_string(),
            },
            index.position(),
        ));
    }
    Ok(())
}

/// Declares `var` when `expected` is set, otherwise resolves it.
fn check_var(
    var: &Var,
    table: &mut SymbolTable,
    expected: Option<DataType>,
) -> Result<DataType, Error> {
    let name = &var.name.text;

    if let Some(var_type) = expected {
        if let Some(size) = &var.index {
            check_index(size, table)?;
        }
        table.insert(SymbolEntry::new(name, var_type, var.index.is_some()));
        return Ok(var_type);
    }

    let Some(entry) = table.lookup(name).cloned() else {
        return Err(Error::new(
            ErrorImpl::VariableNotFound { name: name.clone() },
            var.name.position,
        ));
    };

    let error = match (&entry, &var.index) {
        (SymbolEntry { data_type: DataType::Function, .. }, _) => {
            Some(ErrorImpl::FunctionAsVariable { name: name.clone() })
        }
        (SymbolEntry { is_array: true, .. }, None) => {
            Some(ErrorImpl::ArrayWithoutIndex { name: name.clone() })
        }
        (SymbolEntry { is_array: false, .. }, Some(_)) => {
            Some(ErrorImpl::IndexOnNonArray { name: name.clone() })
        }
        _ => None,
    };
    if let Some(error) = error {
        return Err(Error::new(error, var.name.position));
    }

    if let Some(index) = &var.index {
        check_index(index, table)?;
    }
    Ok(entry.data_type)
}

fn operand_types(
    binary: &BinaryExpr,
    table: &mut SymbolTable,
) -> Result<(DataType, DataType), Error> {
    let left = binary.left.type_check(table, None)?;
    let right = binary.right.type_check(table, None)?;
    Ok((left, right))
}

fn invalid_operands(binary: &BinaryExpr, operation: &str, left: DataType, right: DataType) -> Error {
    Error::new(
        ErrorImpl::InvalidOperands {
            operation: String::from(operation),
            left: left.to_string(),
            right: right.to_string(),
        },
        binary.operator.position,
    )
}

fn check_arithmetic(
    binary: &BinaryExpr,
    table: &mut SymbolTable,
    operation: &str,
    concatenates: bool,
) -> Result<DataType, Error> {
    let (left, right) = operand_types(binary, table)?;

    match (left, right) {
        (l, r) if l.is_any() || r.is_any() => Ok(DataType::Any),
        (DataType::Float, r) if r.is_numeric() => Ok(DataType::Float),
        (l, DataType::Float) if l.is_numeric() => Ok(DataType::Float),
        (DataType::Int, DataType::Int) => Ok(DataType::Int),
        (DataType::Str, DataType::Str) if concatenates => Ok(DataType::Str),
        _ => Err(invalid_operands(binary, operation, left, right)),
    }
}

fn check_comparison(binary: &BinaryExpr, table: &mut SymbolTable) -> Result<DataType, Error> {
    let (left, right) = operand_types(binary, table)?;

    let comparable = left.is_any()
        || right.is_any()
        || (left.is_numeric() && right.is_numeric())
        || (left == DataType::Str && right == DataType::Str);
    if !comparable {
        return Err(Error::new(
            ErrorImpl::ComparisonMismatch {
                left: left.to_string(),
                right: right.to_string(),
            },
            binary.operator.position,
        ));
    }
    Ok(DataType::Int)
}

fn check_logical(binary: &BinaryExpr, table: &mut SymbolTable) -> Result<DataType, Error> {
    let (left, right) = operand_types(binary, table)?;

    if !(left.is_boolean() && right.is_boolean()) {
        return Err(invalid_operands(
            binary,
            "apply a logical operator to",
            left,
            right,
        ));
    }
    Ok(DataType::Int)
}

fn check_numeric_unary(unary: &UnaryExpr, table: &mut SymbolTable) -> Result<DataType, Error> {
    let operand = unary.operand.type_check(table, None)?;
    if operand.is_any() || operand.is_numeric() {
        return Ok(operand);
    }
    Err(Error::new(
        ErrorImpl::NonNumericOperand {
            received: operand.to_string(),
        },
        unary.operator.position,
    ))
}
