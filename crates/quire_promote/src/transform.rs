//! The promotion rewrite pass.
//!
//! One mutable walk over the tree. Declarations are matched by substring
//! containment of their rendered source text (for an exported declaration,
//! the whole export statement's text, so targets that quote the `export`
//! keyword still match); references are matched by their name occurring
//! inside a target. Renames happen in place on the identifier atoms and the
//! whole file is reprinted. When nothing was renamed the original text is
//! returned untouched, so repeated application is byte-stable.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Declaration, Expression, Function, ObjectPropertyKind,
    Statement, TSInterfaceDeclaration, TSSignature, TSType, TSTypeAliasDeclaration, TSTypeName,
};
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_span::{Atom, Span};

use quire_syntax::{parse_tsx, span_text};

use crate::error::PromoteError;
use crate::{PromotionTarget, PUBLIC_TYPE_PREFIX};

/// Promote matching declarations and references, returning the new source
/// text.
///
/// The input text is returned unchanged when no rename applies; this is
/// what makes `promote(promote(s))` equal to `promote(s)` byte for byte.
pub fn promote_source(
    source: &str,
    path: &Path,
    targets: &[PromotionTarget],
) -> Result<String, PromoteError> {
    if targets.is_empty() {
        return Ok(source.to_string());
    }

    let allocator = Allocator::default();
    let mut parsed = parse_tsx(&allocator, source, path)?;

    let mut renamer = Renamer {
        allocator: &allocator,
        source,
        targets,
        modified: false,
    };
    for stmt in parsed.program.body.iter_mut() {
        renamer.visit_statement(stmt);
    }

    if !renamer.modified {
        return Ok(source.to_string());
    }

    let options = CodegenOptions {
        comments: true,
        annotation_comments: true,
        ..Default::default()
    };
    Ok(Codegen::new()
        .with_options(options)
        .build(&parsed.program)
        .code)
}

struct Renamer<'a, 't> {
    allocator: &'a Allocator,
    source: &'t str,
    targets: &'t [PromotionTarget],
    modified: bool,
}

impl<'a> Renamer<'a, '_> {
    fn prefixed(&self, name: &str) -> Atom<'a> {
        let prefixed: &'a str = self
            .allocator
            .alloc_str(&format!("{PUBLIC_TYPE_PREFIX}{name}"));
        Atom::from(prefixed)
    }

    /// Does any target occur in the node's rendered source text?
    fn span_matches(&self, span: Span) -> bool {
        let text = span_text(self.source, span);
        self.targets.iter().any(|t| text.contains(&t.target_line))
    }

    /// Does the referenced name occur inside any target?
    fn name_matches(&self, name: &str) -> bool {
        self.targets.iter().any(|t| t.target_line.contains(name))
    }

    fn visit_statement(&mut self, stmt: &mut Statement<'a>) {
        match stmt {
            Statement::TSTypeAliasDeclaration(alias) => {
                let span = alias.span;
                self.rename_alias(alias, span);
            }

            Statement::TSInterfaceDeclaration(interface) => {
                let span = interface.span;
                self.rename_interface(interface, span);
            }

            Statement::ExportNamedDeclaration(export) => {
                let span = export.span;
                match &mut export.declaration {
                    Some(Declaration::TSTypeAliasDeclaration(alias)) => {
                        self.rename_alias(alias, span);
                    }
                    Some(Declaration::TSInterfaceDeclaration(interface)) => {
                        self.rename_interface(interface, span);
                    }
                    Some(Declaration::VariableDeclaration(var_decl)) => {
                        for declarator in var_decl.declarations.iter_mut() {
                            self.visit_binding_pattern(&mut declarator.id);
                            if let Some(init) = &mut declarator.init {
                                self.visit_expression(init);
                            }
                        }
                    }
                    Some(Declaration::FunctionDeclaration(func)) => self.visit_function(func),
                    _ => {}
                }
            }

            Statement::ExportDefaultDeclaration(export) => {
                use oxc_ast::ast::ExportDefaultDeclarationKind;
                match &mut export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        self.visit_function(func);
                    }
                    other => {
                        if let Some(expr) = other.as_expression_mut() {
                            self.visit_expression(expr);
                        }
                    }
                }
            }

            Statement::VariableDeclaration(decl) => {
                for declarator in decl.declarations.iter_mut() {
                    self.visit_binding_pattern(&mut declarator.id);
                    if let Some(init) = &mut declarator.init {
                        self.visit_expression(init);
                    }
                }
            }

            Statement::FunctionDeclaration(func) => self.visit_function(func),

            Statement::ExpressionStatement(expr_stmt) => {
                self.visit_expression(&mut expr_stmt.expression);
            }

            Statement::ReturnStatement(ret) => {
                if let Some(arg) = &mut ret.argument {
                    self.visit_expression(arg);
                }
            }

            Statement::IfStatement(if_stmt) => {
                self.visit_expression(&mut if_stmt.test);
                self.visit_statement(&mut if_stmt.consequent);
                if let Some(alt) = &mut if_stmt.alternate {
                    self.visit_statement(alt);
                }
            }

            Statement::BlockStatement(block) => {
                for stmt in block.body.iter_mut() {
                    self.visit_statement(stmt);
                }
            }

            _ => {}
        }
    }

    /// Rename a matching alias declaration; type parameters and members pass
    /// through untouched apart from reference renames inside them.
    fn rename_alias(&mut self, alias: &mut TSTypeAliasDeclaration<'a>, match_span: Span) {
        let name = alias.id.name.as_str();
        if !name.starts_with(PUBLIC_TYPE_PREFIX) && self.span_matches(match_span) {
            tracing::debug!(name, "promoting type alias");
            alias.id.name = self.prefixed(name);
            self.modified = true;
        }
        self.visit_ts_type(&mut alias.type_annotation);
    }

    fn rename_interface(&mut self, interface: &mut TSInterfaceDeclaration<'a>, match_span: Span) {
        let name = interface.id.name.as_str();
        if !name.starts_with(PUBLIC_TYPE_PREFIX) && self.span_matches(match_span) {
            tracing::debug!(name, "promoting interface");
            interface.id.name = self.prefixed(name);
            self.modified = true;
        }
        for member in interface.body.body.iter_mut() {
            if let TSSignature::TSPropertySignature(sig) = member {
                if let Some(ann) = &mut sig.type_annotation {
                    self.visit_ts_type(&mut ann.type_annotation);
                }
            }
        }
    }

    fn visit_ts_type(&mut self, ts_type: &mut TSType<'a>) {
        match ts_type {
            TSType::TSTypeReference(reference) => {
                if let TSTypeName::IdentifierReference(ident) = &mut reference.type_name {
                    let name = ident.name.as_str();
                    if !name.starts_with(PUBLIC_TYPE_PREFIX) && self.name_matches(name) {
                        let new_name = self.prefixed(name);
                        ident.name = new_name;
                        self.modified = true;
                    }
                }
                if let Some(type_params) = &mut reference.type_parameters {
                    for param in type_params.params.iter_mut() {
                        self.visit_ts_type(param);
                    }
                }
            }
            TSType::TSTypeLiteral(lit) => {
                for member in lit.members.iter_mut() {
                    if let TSSignature::TSPropertySignature(sig) = member {
                        if let Some(ann) = &mut sig.type_annotation {
                            self.visit_ts_type(&mut ann.type_annotation);
                        }
                    }
                }
            }
            TSType::TSIntersectionType(intersection) => {
                for part in intersection.types.iter_mut() {
                    self.visit_ts_type(part);
                }
            }
            TSType::TSUnionType(union) => {
                for part in union.types.iter_mut() {
                    self.visit_ts_type(part);
                }
            }
            TSType::TSArrayType(array) => self.visit_ts_type(&mut array.element_type),
            TSType::TSParenthesizedType(paren) => self.visit_ts_type(&mut paren.type_annotation),
            _ => {}
        }
    }

    fn visit_function(&mut self, func: &mut Function<'a>) {
        for param in func.params.items.iter_mut() {
            self.visit_binding_pattern(&mut param.pattern);
        }
        if let Some(return_type) = &mut func.return_type {
            self.visit_ts_type(&mut return_type.type_annotation);
        }
        if let Some(body) = &mut func.body {
            for stmt in body.statements.iter_mut() {
                self.visit_statement(stmt);
            }
        }
    }

    fn visit_binding_pattern(&mut self, pattern: &mut BindingPattern<'a>) {
        if let Some(ann) = &mut pattern.type_annotation {
            self.visit_ts_type(&mut ann.type_annotation);
        }
        match &mut pattern.kind {
            BindingPatternKind::ObjectPattern(obj) => {
                for prop in obj.properties.iter_mut() {
                    self.visit_binding_pattern(&mut prop.value);
                }
                if let Some(rest) = &mut obj.rest {
                    self.visit_binding_pattern(&mut rest.argument);
                }
            }
            BindingPatternKind::ArrayPattern(arr) => {
                for elem in arr.elements.iter_mut().flatten() {
                    self.visit_binding_pattern(elem);
                }
                if let Some(rest) = &mut arr.rest {
                    self.visit_binding_pattern(&mut rest.argument);
                }
            }
            BindingPatternKind::AssignmentPattern(assign) => {
                self.visit_binding_pattern(&mut assign.left);
                self.visit_expression(&mut assign.right);
            }
            BindingPatternKind::BindingIdentifier(_) => {}
        }
    }

    fn visit_expression(&mut self, expr: &mut Expression<'a>) {
        match expr {
            Expression::ArrowFunctionExpression(arrow) => {
                for param in arrow.params.items.iter_mut() {
                    self.visit_binding_pattern(&mut param.pattern);
                }
                if let Some(return_type) = &mut arrow.return_type {
                    self.visit_ts_type(&mut return_type.type_annotation);
                }
                for stmt in arrow.body.statements.iter_mut() {
                    self.visit_statement(stmt);
                }
            }

            Expression::FunctionExpression(func) => self.visit_function(func),

            Expression::CallExpression(call) => {
                self.visit_expression(&mut call.callee);
                if let Some(type_params) = &mut call.type_parameters {
                    for param in type_params.params.iter_mut() {
                        self.visit_ts_type(param);
                    }
                }
                for arg in call.arguments.iter_mut() {
                    if let Some(expr) = arg.as_expression_mut() {
                        self.visit_expression(expr);
                    }
                }
            }

            Expression::ObjectExpression(obj) => {
                for prop in obj.properties.iter_mut() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(p) => {
                            self.visit_expression(&mut p.value);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.visit_expression(&mut spread.argument);
                        }
                    }
                }
            }

            Expression::ArrayExpression(arr) => {
                for elem in arr.elements.iter_mut() {
                    if let Some(expr) = elem.as_expression_mut() {
                        self.visit_expression(expr);
                    }
                }
            }

            Expression::ConditionalExpression(cond) => {
                self.visit_expression(&mut cond.test);
                self.visit_expression(&mut cond.consequent);
                self.visit_expression(&mut cond.alternate);
            }

            Expression::ParenthesizedExpression(paren) => {
                self.visit_expression(&mut paren.expression);
            }

            Expression::TSAsExpression(ts_as) => {
                self.visit_expression(&mut ts_as.expression);
                self.visit_ts_type(&mut ts_as.type_annotation);
            }
            Expression::TSSatisfiesExpression(ts_satisfies) => {
                self.visit_expression(&mut ts_satisfies.expression);
                self.visit_ts_type(&mut ts_satisfies.type_annotation);
            }
            Expression::TSNonNullExpression(ts_non_null) => {
                self.visit_expression(&mut ts_non_null.expression);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(lines: &[&str]) -> Vec<PromotionTarget> {
        lines
            .iter()
            .map(|line| PromotionTarget {
                target_line: (*line).to_string(),
            })
            .collect()
    }

    fn promote(source: &str, lines: &[&str]) -> String {
        promote_source(source, Path::new("part.tsx"), &targets(lines)).unwrap()
    }

    #[test]
    fn promotes_matching_alias_and_references() {
        let source = "type RootProps = { checked?: boolean };\nconst use = (props: RootProps) => props;\n";
        let out = promote(source, &["type RootProps = { checked?: boolean }"]);
        assert!(out.contains("type PublicRootProps"));
        assert!(out.contains("props: PublicRootProps"));
        assert!(!out.contains("PublicPublicRootProps"));
    }

    #[test]
    fn promotes_exported_declarations() {
        let source = "export type RootProps = { open?: boolean };\n";
        let out = promote(source, &["export type RootProps"]);
        assert!(out.contains("export type PublicRootProps"));
    }

    #[test]
    fn promotes_interfaces() {
        let source = "interface ItemProps { value: string }\n";
        let out = promote(source, &["interface ItemProps"]);
        assert!(out.contains("interface PublicItemProps"));
    }

    #[test]
    fn non_matching_declarations_pass_through() {
        let source = "type LabelProps = { text: string };\n";
        let out = promote(source, &["type RootProps"]);
        assert_eq!(out, source);
    }

    #[test]
    fn already_public_names_are_never_touched() {
        let source = "export type PublicRootProps = { open?: boolean };\n";
        let out = promote(source, &["export type PublicRootProps = { open?: boolean }"]);
        assert_eq!(out, source);
        assert!(!out.contains("PublicPublicRootProps"));
    }

    #[test]
    fn promotion_is_idempotent() {
        let source = "type RootProps = { size?: number };\nconst f = ({ size = 1 }: RootProps) => size;\n";
        let lines = ["type RootProps = { size?: number }"];
        let once = promote(source, &lines);
        let twice = promote(&once, &lines);
        assert_eq!(once, twice);
    }

    #[test]
    fn references_in_generics_are_promoted() {
        let source = "type RootProps = { v?: string };\nconst sig = useSignal<RootProps>();\n";
        let out = promote(source, &["type RootProps = { v?: string }"]);
        assert!(out.contains("useSignal<PublicRootProps>"));
    }

    #[test]
    fn empty_target_list_is_a_no_op() {
        let source = "type RootProps = {};\n";
        assert_eq!(promote(source, &[]), source);
    }
}
