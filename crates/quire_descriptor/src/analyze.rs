//! Analyze phase: does the marker leaf render under the marker root?
//!
//! The walk tracks an "inside marker root" flag down the JSX tree, through
//! expression containers and callback bodies, so `{items.map(() => …)}`
//! inside the root is still inside the root. Sibling roots are independent
//! subtrees: the flag is scoped by the call stack, not mutated globally.
//!
//! Custom elements inside a root that are not part of the marker family are
//! collected as candidates; when the leaf is not found directly, every
//! candidate's module is resolved and its exported components are searched
//! for the leaf. All candidates are analyzed and annotated (no
//! short-circuit); the final verdict is a plain OR.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, Declaration, Expression, Function, ImportDeclarationSpecifier, JSXAttributeItem,
    JSXAttributeValue, JSXChild, JSXElement, JSXElementName, JSXMemberExpressionObject,
    ModuleExportName, ObjectPropertyKind, Statement,
};
use oxc_span::Span;
use rustc_hash::FxHashMap;

use quire_syntax::{parse_tsx, FileSystem, ModuleResolver};

use crate::error::DescriptorError;
use crate::options::DescriptorOptions;

/// A custom element found inside a marker root during analysis.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub component_name: CompactString,
    pub span: Span,
    pub import_source: Option<CompactString>,
    pub resolved_path: Option<PathBuf>,
    pub provides_description: bool,
}

/// Decide the flag for one page file.
///
/// Never fails: read, parse and resolution errors are logged and read as
/// `false`. Analysis must not abort the host bundler.
pub fn analyze_page(
    fs: &dyn FileSystem,
    resolver: &dyn ModuleResolver,
    options: &DescriptorOptions,
    path: &Path,
) -> bool {
    match analyze_inner(fs, resolver, options, path) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "descriptor analysis failed; treating flag as absent");
            false
        }
    }
}

fn analyze_inner(
    fs: &dyn FileSystem,
    resolver: &dyn ModuleResolver,
    options: &DescriptorOptions,
    path: &Path,
) -> Result<bool, DescriptorError> {
    let source = fs.read_file(path)?;
    let allocator = Allocator::default();
    let parsed = parse_tsx(&allocator, &source, path)?;

    // Import map (local name -> source) and the family-import gate.
    let mut imports: FxHashMap<&str, &str> = FxHashMap::default();
    let mut family_imported = false;
    for stmt in parsed.program.body.iter() {
        let Statement::ImportDeclaration(import) = stmt else {
            continue;
        };
        let Some(specifiers) = &import.specifiers else {
            continue;
        };
        for specifier in specifiers.iter() {
            let (local, imported) = match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    (s.local.name.as_str(), Some(import_name(&s.imported)))
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    (s.local.name.as_str(), None)
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    (s.local.name.as_str(), None)
                }
            };
            imports.insert(local, import.source.value.as_str());
            if local == options.component || imported == Some(options.component.as_str()) {
                family_imported = true;
            }
        }
    }
    if !family_imported {
        return Ok(false);
    }

    let mut walk = PageWalk {
        options,
        imports: &imports,
        found_direct: false,
        candidates: Vec::new(),
    };
    for stmt in parsed.program.body.iter() {
        walk.visit_statement(stmt, false);
    }

    if walk.found_direct {
        return Ok(true);
    }

    // Indirect resolution: one sequential pass over every candidate.
    let mut candidates = walk.candidates;
    for candidate in candidates.iter_mut() {
        let Some(specifier) = candidate.import_source.clone() else {
            continue;
        };
        let Some(resolved) = resolver.resolve(&specifier, path) else {
            tracing::debug!(specifier = %specifier, "candidate import did not resolve");
            continue;
        };
        candidate.resolved_path = Some(resolved.clone());
        match module_provides_leaf(fs, options, &resolved) {
            Ok(provides) => candidate.provides_description = provides,
            Err(err) => {
                tracing::warn!(path = %resolved.display(), error = %err, "candidate analysis failed");
            }
        }
    }

    Ok(candidates.iter().any(|c| c.provides_description))
}

fn import_name<'a>(name: &'a ModuleExportName<'_>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.as_str(),
        ModuleExportName::IdentifierReference(ident) => ident.name.as_str(),
        ModuleExportName::StringLiteral(s) => s.value.as_str(),
    }
}

enum ElementKind<'a> {
    FamilyPart(&'a str),
    Custom(&'a str),
    Other,
}

fn classify<'a>(name: &'a JSXElementName<'_>, component: &str) -> ElementKind<'a> {
    match name {
        JSXElementName::MemberExpression(member) => {
            if let JSXMemberExpressionObject::IdentifierReference(obj) = &member.object {
                if obj.name.as_str() == component {
                    return ElementKind::FamilyPart(member.property.name.as_str());
                }
            }
            ElementKind::Other
        }
        JSXElementName::Identifier(ident) => classify_plain(ident.name.as_str()),
        JSXElementName::IdentifierReference(ident) => classify_plain(ident.name.as_str()),
        _ => ElementKind::Other,
    }
}

fn classify_plain(name: &str) -> ElementKind<'_> {
    if name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        ElementKind::Custom(name)
    } else {
        ElementKind::Other
    }
}

struct PageWalk<'a, 't> {
    options: &'t DescriptorOptions,
    imports: &'t FxHashMap<&'a str, &'a str>,
    found_direct: bool,
    candidates: Vec<Candidate>,
}

impl<'a> PageWalk<'a, '_> {
    fn visit_statement(&mut self, stmt: &Statement<'a>, inside: bool) {
        match stmt {
            Statement::VariableDeclaration(decl) => {
                for declarator in decl.declarations.iter() {
                    if let Some(init) = &declarator.init {
                        self.visit_expression(init, inside);
                    }
                }
            }
            Statement::FunctionDeclaration(func) => self.visit_function(func, inside),
            Statement::ExpressionStatement(expr_stmt) => {
                self.visit_expression(&expr_stmt.expression, inside);
            }
            Statement::ReturnStatement(ret) => {
                if let Some(arg) = &ret.argument {
                    self.visit_expression(arg, inside);
                }
            }
            Statement::IfStatement(if_stmt) => {
                self.visit_expression(&if_stmt.test, inside);
                self.visit_statement(&if_stmt.consequent, inside);
                if let Some(alt) = &if_stmt.alternate {
                    self.visit_statement(alt, inside);
                }
            }
            Statement::BlockStatement(block) => {
                for stmt in block.body.iter() {
                    self.visit_statement(stmt, inside);
                }
            }
            Statement::ExportNamedDeclaration(export) => {
                if let Some(Declaration::VariableDeclaration(var_decl)) = &export.declaration {
                    for declarator in var_decl.declarations.iter() {
                        if let Some(init) = &declarator.init {
                            self.visit_expression(init, inside);
                        }
                    }
                } else if let Some(Declaration::FunctionDeclaration(func)) = &export.declaration {
                    self.visit_function(func, inside);
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                use oxc_ast::ast::ExportDefaultDeclarationKind;
                match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        self.visit_function(func, inside);
                    }
                    other => {
                        if let Some(expr) = other.as_expression() {
                            self.visit_expression(expr, inside);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn visit_function(&mut self, func: &Function<'a>, inside: bool) {
        if let Some(body) = &func.body {
            for stmt in body.statements.iter() {
                self.visit_statement(stmt, inside);
            }
        }
    }

    fn visit_expression(&mut self, expr: &Expression<'a>, inside: bool) {
        match expr {
            Expression::JSXElement(el) => self.visit_jsx_element(el, inside),
            Expression::JSXFragment(fragment) => self.visit_jsx_children(&fragment.children, inside),

            Expression::ArrowFunctionExpression(arrow) => {
                for stmt in arrow.body.statements.iter() {
                    self.visit_statement(stmt, inside);
                }
            }
            Expression::FunctionExpression(func) => self.visit_function(func, inside),

            Expression::CallExpression(call) => {
                self.visit_expression(&call.callee, inside);
                for arg in call.arguments.iter() {
                    match arg {
                        Argument::SpreadElement(spread) => {
                            self.visit_expression(&spread.argument, inside);
                        }
                        _ => {
                            if let Some(expr) = arg.as_expression() {
                                self.visit_expression(expr, inside);
                            }
                        }
                    }
                }
            }

            Expression::ConditionalExpression(cond) => {
                self.visit_expression(&cond.test, inside);
                self.visit_expression(&cond.consequent, inside);
                self.visit_expression(&cond.alternate, inside);
            }
            Expression::LogicalExpression(logical) => {
                self.visit_expression(&logical.left, inside);
                self.visit_expression(&logical.right, inside);
            }
            Expression::ParenthesizedExpression(paren) => {
                self.visit_expression(&paren.expression, inside);
            }
            Expression::ObjectExpression(obj) => {
                for prop in obj.properties.iter() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(p) => {
                            self.visit_expression(&p.value, inside);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.visit_expression(&spread.argument, inside);
                        }
                    }
                }
            }
            Expression::ArrayExpression(arr) => {
                for elem in arr.elements.iter() {
                    if let Some(expr) = elem.as_expression() {
                        self.visit_expression(expr, inside);
                    }
                }
            }
            Expression::StaticMemberExpression(member) => {
                self.visit_expression(&member.object, inside);
            }

            _ => {}
        }
    }

    fn visit_jsx_element(&mut self, el: &JSXElement<'a>, inside: bool) {
        match classify(&el.opening_element.name, self.options.component.as_str()) {
            ElementKind::FamilyPart(part) if part == self.options.root.as_str() => {
                // A root opens its own subtree; the previous flag is restored
                // by returning from this frame.
                self.visit_jsx_attributes(el, true);
                self.visit_jsx_children(&el.children, true);
            }
            ElementKind::FamilyPart(part) if part == self.options.leaf.as_str() => {
                if inside {
                    self.found_direct = true;
                    // Found: nothing below the leaf can change the verdict.
                    return;
                }
                self.visit_jsx_attributes(el, inside);
                self.visit_jsx_children(&el.children, inside);
            }
            ElementKind::FamilyPart(_) => {
                self.visit_jsx_attributes(el, inside);
                self.visit_jsx_children(&el.children, inside);
            }
            ElementKind::Custom(name) => {
                if inside {
                    self.candidates.push(Candidate {
                        component_name: CompactString::new(name),
                        span: el.span,
                        import_source: self
                            .imports
                            .get(name)
                            .map(|source| CompactString::new(source)),
                        resolved_path: None,
                        provides_description: false,
                    });
                }
                self.visit_jsx_attributes(el, inside);
                self.visit_jsx_children(&el.children, inside);
            }
            ElementKind::Other => {
                self.visit_jsx_attributes(el, inside);
                self.visit_jsx_children(&el.children, inside);
            }
        }
    }

    fn visit_jsx_attributes(&mut self, el: &JSXElement<'a>, inside: bool) {
        for item in el.opening_element.attributes.iter() {
            match item {
                JSXAttributeItem::Attribute(attr) => match &attr.value {
                    Some(JSXAttributeValue::ExpressionContainer(container)) => {
                        if let Some(expr) = container.expression.as_expression() {
                            self.visit_expression(expr, inside);
                        }
                    }
                    Some(JSXAttributeValue::Element(child)) => {
                        self.visit_jsx_element(child, inside);
                    }
                    Some(JSXAttributeValue::Fragment(fragment)) => {
                        self.visit_jsx_children(&fragment.children, inside);
                    }
                    _ => {}
                },
                JSXAttributeItem::SpreadAttribute(spread) => {
                    self.visit_expression(&spread.argument, inside);
                }
            }
        }
    }

    fn visit_jsx_children(&mut self, children: &[JSXChild<'a>], inside: bool) {
        for child in children {
            match child {
                JSXChild::Element(el) => self.visit_jsx_element(el, inside),
                JSXChild::Fragment(fragment) => self.visit_jsx_children(&fragment.children, inside),
                JSXChild::ExpressionContainer(container) => {
                    if let Some(expr) = container.expression.as_expression() {
                        self.visit_expression(expr, inside);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Does any exported component of this module render the marker leaf?
fn module_provides_leaf(
    fs: &dyn FileSystem,
    options: &DescriptorOptions,
    path: &Path,
) -> Result<bool, DescriptorError> {
    let source = fs.read_file(path)?;
    let allocator = Allocator::default();
    let parsed = parse_tsx(&allocator, &source, path)?;

    let finder = LeafFinder { options };

    for stmt in parsed.program.body.iter() {
        match stmt {
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::VariableDeclaration(var_decl)) => {
                    for declarator in var_decl.declarations.iter() {
                        if let Some(init) = &declarator.init {
                            if finder.expression_has_leaf(unwrap_component_call(init, options)) {
                                return Ok(true);
                            }
                        }
                    }
                }
                Some(Declaration::FunctionDeclaration(func)) => {
                    if finder.function_has_leaf(func) {
                        return Ok(true);
                    }
                }
                _ => {}
            },
            Statement::ExportDefaultDeclaration(export) => {
                use oxc_ast::ast::ExportDefaultDeclarationKind;
                match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        if finder.function_has_leaf(func) {
                            return Ok(true);
                        }
                    }
                    other => {
                        if let Some(expr) = other.as_expression() {
                            if finder.expression_has_leaf(unwrap_component_call(expr, options)) {
                                return Ok(true);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Ok(false)
}

/// Constant-fold through `component$(…)`-style wrappers to the actual
/// component body.
fn unwrap_component_call<'a, 'b>(
    expr: &'b Expression<'a>,
    options: &DescriptorOptions,
) -> &'b Expression<'a> {
    if let Expression::CallExpression(call) = expr {
        if let Expression::Identifier(ident) = &call.callee {
            if options.is_wrapper(ident.name.as_str()) {
                if let Some(inner) = call.arguments.first().and_then(|arg| arg.as_expression()) {
                    return unwrap_component_call(inner, options);
                }
            }
        }
    }
    expr
}

struct LeafFinder<'t> {
    options: &'t DescriptorOptions,
}

impl LeafFinder<'_> {
    fn function_has_leaf(&self, func: &Function<'_>) -> bool {
        func.body
            .as_ref()
            .is_some_and(|body| body.statements.iter().any(|stmt| self.statement_has_leaf(stmt)))
    }

    fn statement_has_leaf(&self, stmt: &Statement<'_>) -> bool {
        match stmt {
            Statement::ReturnStatement(ret) => ret
                .argument
                .as_ref()
                .is_some_and(|arg| self.expression_has_leaf(arg)),
            Statement::ExpressionStatement(expr_stmt) => {
                self.expression_has_leaf(&expr_stmt.expression)
            }
            Statement::VariableDeclaration(decl) => decl.declarations.iter().any(|d| {
                d.init
                    .as_ref()
                    .is_some_and(|init| self.expression_has_leaf(init))
            }),
            Statement::IfStatement(if_stmt) => {
                self.statement_has_leaf(&if_stmt.consequent)
                    || if_stmt
                        .alternate
                        .as_ref()
                        .is_some_and(|alt| self.statement_has_leaf(alt))
            }
            Statement::BlockStatement(block) => {
                block.body.iter().any(|stmt| self.statement_has_leaf(stmt))
            }
            _ => false,
        }
    }

    fn expression_has_leaf(&self, expr: &Expression<'_>) -> bool {
        match expr {
            Expression::JSXElement(el) => self.jsx_has_leaf(el),
            Expression::JSXFragment(fragment) => fragment
                .children
                .iter()
                .any(|child| self.jsx_child_has_leaf(child)),
            Expression::ArrowFunctionExpression(arrow) => arrow
                .body
                .statements
                .iter()
                .any(|stmt| self.statement_has_leaf(stmt)),
            Expression::FunctionExpression(func) => self.function_has_leaf(func),
            Expression::CallExpression(call) => call.arguments.iter().any(|arg| {
                arg.as_expression()
                    .is_some_and(|expr| self.expression_has_leaf(expr))
            }),
            Expression::ConditionalExpression(cond) => {
                self.expression_has_leaf(&cond.consequent)
                    || self.expression_has_leaf(&cond.alternate)
            }
            Expression::LogicalExpression(logical) => {
                self.expression_has_leaf(&logical.left) || self.expression_has_leaf(&logical.right)
            }
            Expression::ParenthesizedExpression(paren) => {
                self.expression_has_leaf(&paren.expression)
            }
            _ => false,
        }
    }

    fn jsx_has_leaf(&self, el: &JSXElement<'_>) -> bool {
        if let ElementKind::FamilyPart(part) =
            classify(&el.opening_element.name, self.options.component.as_str())
        {
            if part == self.options.leaf.as_str() {
                return true;
            }
        }
        el.children.iter().any(|child| self.jsx_child_has_leaf(child))
    }

    fn jsx_child_has_leaf(&self, child: &JSXChild<'_>) -> bool {
        match child {
            JSXChild::Element(el) => self.jsx_has_leaf(el),
            JSXChild::Fragment(fragment) => fragment
                .children
                .iter()
                .any(|child| self.jsx_child_has_leaf(child)),
            JSXChild::ExpressionContainer(container) => container
                .expression
                .as_expression()
                .is_some_and(|expr| self.expression_has_leaf(expr)),
            _ => false,
        }
    }
}
