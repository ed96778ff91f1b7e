//! Inject phase: bake the cached verdict into the lowered output.
//!
//! The lowered code is re-parsed and the first call of the configured JSX
//! factory whose first argument reconstructs to the marker root
//! (`Field.Root`) and whose second argument is an object literal is edited:
//! an existing flag property gets its value replaced, otherwise the property
//! is appended. The edit itself is a span splice on the source text, so the
//! rest of the file keeps its exact bytes.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, Declaration, Expression, ObjectExpression, ObjectPropertyKind, PropertyKey,
    Statement,
};
use oxc_span::{GetSpan, Span};

use quire_syntax::{parse_tsx, span_text};

use crate::options::DescriptorOptions;

/// Apply the flag to lowered page code.
///
/// `None` means "unchanged": no factory call for the marker root exists, the
/// code did not parse, or the flag already carries this value. The host
/// falls through to its other transforms.
pub fn inject_flag(
    code: &str,
    path: &Path,
    found: bool,
    options: &DescriptorOptions,
) -> Option<String> {
    let allocator = Allocator::default();
    let parsed = match parse_tsx(&allocator, code, path) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot parse lowered code; leaving unchanged");
            return None;
        }
    };

    let finder = CallFinder {
        options,
        root_path: options.root_path(),
    };
    let mut edit = None;
    for stmt in parsed.program.body.iter() {
        edit = finder.statement(stmt, found);
        if edit.is_some() {
            break;
        }
    }

    let new_code = apply_edit(code, edit?);
    (new_code != code).then_some(new_code)
}

/// A single text edit located via the AST.
enum Edit {
    Replace { span: Span, text: String },
    Insert { at: u32, text: String },
}

fn apply_edit(code: &str, edit: Edit) -> String {
    match edit {
        Edit::Replace { span, text } => {
            let mut out = String::with_capacity(code.len() + text.len());
            out.push_str(&code[..span.start as usize]);
            out.push_str(&text);
            out.push_str(&code[span.end as usize..]);
            out
        }
        Edit::Insert { at, text } => {
            let mut out = String::with_capacity(code.len() + text.len());
            out.push_str(&code[..at as usize]);
            out.push_str(&text);
            out.push_str(&code[at as usize..]);
            out
        }
    }
}

struct CallFinder<'t> {
    options: &'t DescriptorOptions,
    root_path: String,
}

impl CallFinder<'_> {
    fn statement(&self, stmt: &Statement<'_>, found: bool) -> Option<Edit> {
        match stmt {
            Statement::VariableDeclaration(decl) => decl
                .declarations
                .iter()
                .find_map(|d| d.init.as_ref().and_then(|init| self.expression(init, found))),
            Statement::ExpressionStatement(expr_stmt) => {
                self.expression(&expr_stmt.expression, found)
            }
            Statement::ReturnStatement(ret) => ret
                .argument
                .as_ref()
                .and_then(|arg| self.expression(arg, found)),
            Statement::IfStatement(if_stmt) => self
                .statement(&if_stmt.consequent, found)
                .or_else(|| {
                    if_stmt
                        .alternate
                        .as_ref()
                        .and_then(|alt| self.statement(alt, found))
                }),
            Statement::BlockStatement(block) => block
                .body
                .iter()
                .find_map(|stmt| self.statement(stmt, found)),
            Statement::FunctionDeclaration(func) => func.body.as_ref().and_then(|body| {
                body.statements
                    .iter()
                    .find_map(|stmt| self.statement(stmt, found))
            }),
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::VariableDeclaration(decl)) => {
                    decl.declarations.iter().find_map(|d| {
                        d.init.as_ref().and_then(|init| self.expression(init, found))
                    })
                }
                Some(Declaration::FunctionDeclaration(func)) => {
                    func.body.as_ref().and_then(|body| {
                        body.statements
                            .iter()
                            .find_map(|stmt| self.statement(stmt, found))
                    })
                }
                _ => None,
            },
            Statement::ExportDefaultDeclaration(export) => {
                use oxc_ast::ast::ExportDefaultDeclarationKind;
                match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        func.body.as_ref().and_then(|body| {
                            body.statements
                                .iter()
                                .find_map(|stmt| self.statement(stmt, found))
                        })
                    }
                    other => other
                        .as_expression()
                        .and_then(|expr| self.expression(expr, found)),
                }
            }
            _ => None,
        }
    }

    fn expression(&self, expr: &Expression<'_>, found: bool) -> Option<Edit> {
        match expr {
            Expression::CallExpression(call) => {
                if let Some(edit) = self.match_factory_call(call, found) {
                    return Some(edit);
                }
                if let Some(edit) = self.expression(&call.callee, found) {
                    return Some(edit);
                }
                call.arguments.iter().find_map(|arg| match arg {
                    Argument::SpreadElement(spread) => self.expression(&spread.argument, found),
                    _ => arg
                        .as_expression()
                        .and_then(|expr| self.expression(expr, found)),
                })
            }

            Expression::ArrowFunctionExpression(arrow) => arrow
                .body
                .statements
                .iter()
                .find_map(|stmt| self.statement(stmt, found)),
            Expression::FunctionExpression(func) => func.body.as_ref().and_then(|body| {
                body.statements
                    .iter()
                    .find_map(|stmt| self.statement(stmt, found))
            }),

            Expression::ObjectExpression(obj) => obj.properties.iter().find_map(|prop| match prop {
                ObjectPropertyKind::ObjectProperty(p) => self.expression(&p.value, found),
                ObjectPropertyKind::SpreadProperty(spread) => {
                    self.expression(&spread.argument, found)
                }
            }),
            Expression::ArrayExpression(arr) => arr.elements.iter().find_map(|elem| {
                elem.as_expression()
                    .and_then(|expr| self.expression(expr, found))
            }),

            Expression::ConditionalExpression(cond) => self
                .expression(&cond.test, found)
                .or_else(|| self.expression(&cond.consequent, found))
                .or_else(|| self.expression(&cond.alternate, found)),
            Expression::LogicalExpression(logical) => self
                .expression(&logical.left, found)
                .or_else(|| self.expression(&logical.right, found)),
            Expression::ParenthesizedExpression(paren) => self.expression(&paren.expression, found),
            Expression::SequenceExpression(seq) => seq
                .expressions
                .iter()
                .find_map(|expr| self.expression(expr, found)),

            _ => None,
        }
    }

    /// `_jsxC(Field.Root, { ... }, ...)`: the call the inject phase targets.
    fn match_factory_call(
        &self,
        call: &oxc_ast::ast::CallExpression<'_>,
        found: bool,
    ) -> Option<Edit> {
        let Expression::Identifier(callee) = &call.callee else {
            return None;
        };
        if callee.name.as_str() != self.options.jsx_factory.as_str() {
            return None;
        }
        let first = call.arguments.first()?.as_expression()?;
        if dotted_name(first)? != self.root_path {
            return None;
        }
        let Some(Argument::ObjectExpression(props)) = call.arguments.get(1) else {
            return None;
        };
        Some(self.edit_props(props, found))
    }

    fn edit_props(&self, props: &ObjectExpression<'_>, found: bool) -> Edit {
        let value = if found { "true" } else { "false" };

        for prop in props.properties.iter() {
            let ObjectPropertyKind::ObjectProperty(p) = prop else {
                continue;
            };
            let name = match &p.key {
                PropertyKey::StaticIdentifier(id) => id.name.as_str(),
                PropertyKey::StringLiteral(s) => s.value.as_str(),
                _ => continue,
            };
            if name == self.options.flag_prop.as_str() {
                return Edit::Replace {
                    span: p.value.span(),
                    text: value.to_string(),
                };
            }
        }

        match props.properties.last() {
            Some(last) => Edit::Insert {
                at: last.span().end,
                text: format!(", {}: {}", self.options.flag_prop, value),
            },
            None => Edit::Replace {
                span: props.span,
                text: format!("{{ {}: {} }}", self.options.flag_prop, value),
            },
        }
    }
}

/// Rebuild a dotted member name (`Field.Root`) from an argument expression.
fn dotted_name(expr: &Expression<'_>) -> Option<String> {
    match expr {
        Expression::Identifier(ident) => Some(ident.name.to_string()),
        Expression::StaticMemberExpression(member) => {
            let object = dotted_name(&member.object)?;
            Some(format!("{object}.{}", member.property.name))
        }
        _ => None,
    }
}
