//! Quadruple generation.
//!
//! Every node emits its children's code first, left to right, then its own
//! instructions. Expressions report the operand holding their value in
//! [`GeneratedCode::result`]; statements leave it empty.

use tracing::debug;

use crate::{
    ast::ast::{AstNode, BinaryExpr, BlockStmt, ForVarDecl, UnaryExpr, Var, VarAssignable},
    with_deep_stack,
};

use super::quadruple::{CodegenContext, GeneratedCode, IrEntry};

/// Generates the IR for a whole tree with fresh counters.
pub fn generate_entries(ast: &AstNode) -> Vec<IrEntry> {
    let (code, context) = with_deep_stack(|| {
        let mut context = CodegenContext::new();
        let code = ast.emit_code(&mut context);
        (code, context)
    });
    debug!(
        entries = code.entries.len(),
        temps = context.temps_used(),
        labels = context.labels_used(),
        "generated IR"
    );
    code.entries
}

/// The newline-separated quadruple listing of a whole tree.
pub fn generate_ir(ast: &AstNode) -> String {
    generate_entries(ast)
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}

impl AstNode {
    pub fn emit_code(&self, context: &mut CodegenContext) -> GeneratedCode {
        let mut code = GeneratedCode::new();

        match self {
            AstNode::Program(program) => {
                for decl in program.decls.iter() {
                    code.append(decl.emit_code(context));
                }
            }
            AstNode::FuncDef(func_def) => {
                let name = &func_def.name.text;
                code.quad("FUNCTION", name, &func_def.params.len().to_string(), "");
                for (index, param) in func_def.params.iter().enumerate() {
                    code.quad("PARAM", &param.name.text, &(index + 1).to_string(), "");
                }
                code.append(emit_block(&func_def.body, context));
                code.quad("ENDFUNC", name, "", "");
            }
            AstNode::ParamList(params) => {
                for (index, param) in params.iter().enumerate() {
                    code.quad("PARAM", &param.name.text, &(index + 1).to_string(), "");
                }
            }
            AstNode::Param(param) => return GeneratedCode::operand(&param.name.text),
            AstNode::Type(type_node) => return GeneratedCode::operand(&type_node.keyword.text),
            AstNode::VarDecl(var_decl) => {
                for assignable in var_decl.vars.iter() {
                    code.append(emit_assignable(assignable, context));
                }
            }
            AstNode::VarAssignable(assignable) => return emit_assignable(assignable, context),
            AstNode::Var(var) => return emit_var(var, context),
            AstNode::Constant(constant) => return GeneratedCode::operand(&constant.value.text),

            AstNode::BlockStmt(block) => return emit_block(block, context),
            AstNode::IfStmt(if_stmt) => {
                let then_label = context.label();
                let else_label = context.label();
                let end_label = if_stmt.else_block.as_ref().map(|_| context.label());

                let condition = code.append(if_stmt.condition.emit_code(context));
                code.quad("if", &condition, "", &then_label.name());
                code.quad("goto", "", "", &else_label.name());

                code.label(then_label);
                code.append(emit_block(&if_stmt.then_block, context));

                match (&if_stmt.else_block, end_label) {
                    (Some(else_block), Some(end_label)) => {
                        code.quad("goto", "", "", &end_label.name());
                        code.label(else_label);
                        code.append(emit_block(else_block, context));
                        code.label(end_label);
                    }
                    _ => code.label(else_label),
                }
            }
            AstNode::WhileStmt(while_stmt) => {
                let body = &while_stmt.body;
                emit_loop(&mut code, context, &while_stmt.condition, |code, context| {
                    code.append(emit_block(body, context));
                });
            }
            AstNode::ForStmt(for_stmt) => {
                code.append(emit_for_var_decl(&for_stmt.init, context));
                emit_loop(&mut code, context, &for_stmt.condition, |code, context| {
                    code.append(emit_block(&for_stmt.body, context));
                    for update in for_stmt.update.iter() {
                        code.append(update.emit_code(context));
                    }
                });
            }
            AstNode::ForVarDecl(for_var_decl) => return emit_for_var_decl(for_var_decl, context),
            AstNode::ForUpdate(nodes) | AstNode::ArgList(nodes) => {
                for node in nodes.iter() {
                    code.append(node.emit_code(context));
                }
            }
            AstNode::ReturnStmt(return_stmt) => match &return_stmt.value {
                Some(value) => {
                    let value = code.append(value.emit_code(context));
                    code.quad("RETURN", &value, "", "");
                }
                None => code.quad("RETURN", "", "", ""),
            },
            AstNode::ExprStmt(expr_stmt) => {
                code.append(expr_stmt.expr.emit_code(context));
            }
            AstNode::EmptyStmt(_) => {}

            AstNode::AssignExpr(assign) => {
                let target = code.append(emit_var(&assign.target, context));
                let value = code.append(assign.value.emit_code(context));
                code.quad("=", &value, "", &target);
                code.result = target;
            }
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
            | AstNode::ModExpr(binary) => return emit_binary(binary, context),
            AstNode::UnaryPlusExpr(unary)
            | AstNode::UnaryMinusExpr(unary)
            | AstNode::NotExpr(unary) => return emit_unary(unary, context),
            AstNode::FuncCall(call) => {
                for arg in call.args.iter().rev() {
                    let value = code.append(arg.emit_code(context));
                    code.quad("PUSH", &value, "", "");
                }
                let result = context.temp();
                code.quad("CALL", &call.name.text, &call.args.len().to_string(), &result);
                code.result = result;
            }
        }

        code
    }
}

fn emit_block(block: &BlockStmt, context: &mut CodegenContext) -> GeneratedCode {
    let mut code = GeneratedCode::new();
    for stmt in block.stmts.iter() {
        code.append(stmt.emit_code(context));
    }
    code
}

// L_start: cond; if c L_body; goto L_end; L_body: body; goto L_start; L_end:
fn emit_loop(
    code: &mut GeneratedCode,
    context: &mut CodegenContext,
    condition: &AstNode,
    body: impl FnOnce(&mut GeneratedCode, &mut CodegenContext),
) {
    let start_label = context.label();
    let body_label = context.label();
    let end_label = context.label();

    code.label(start_label);
    let condition = code.append(condition.emit_code(context));
    code.quad("if", &condition, "", &body_label.name());
    code.quad("goto", "", "", &end_label.name());

    code.label(body_label);
    body(code, context);
    code.quad("goto", "", "", &start_label.name());
    code.label(end_label);
}

fn emit_for_var_decl(init: &ForVarDecl, context: &mut CodegenContext) -> GeneratedCode {
    let mut code = GeneratedCode::new();
    for assignable in init.vars.iter() {
        code.append(emit_assignable(assignable, context));
    }
    code
}

/// Only initialized variables produce code.
fn emit_assignable(assignable: &VarAssignable, context: &mut CodegenContext) -> GeneratedCode {
    let mut code = GeneratedCode::new();
    let Some(value) = &assignable.value else {
        return code;
    };

    let target = code.append(emit_var(&assignable.var, context));
    let value = code.append(value.emit_code(context));
    code.quad("=", &value, "", &target);
    code
}

fn emit_var(var: &Var, context: &mut CodegenContext) -> GeneratedCode {
    let mut code = GeneratedCode::new();
    code.result = match &var.index {
        Some(index) => {
            let index = code.append(index.emit_code(context));
            format!("{}[{}]", var.name.text, index)
        }
        None => var.name.text.clone(),
    };
    code
}

fn emit_binary(binary: &BinaryExpr, context: &mut CodegenContext) -> GeneratedCode {
    let mut code = GeneratedCode::new();
    let left = code.append(binary.left.emit_code(context));
    let right = code.append(binary.right.emit_code(context));
    let result = context.temp();
    code.quad(&binary.operator.text, &left, &right, &result);
    code.result = result;
    code
}

fn emit_unary(unary: &UnaryExpr, context: &mut CodegenContext) -> GeneratedCode {
    let mut code = GeneratedCode::new();
    let operand = code.append(unary.operand.emit_code(context));
    let result = context.temp();
    code.quad(&unary.operator.text, &operand, "", &result);
    code.result = result;
    code
}
