//! Component API extraction.
//!
//! One pass over a component implementation file collects everything the
//! documentation model needs:
//!
//! - property signatures of every `Public…` type alias (with leading
//!   comments and type-annotation source text),
//! - destructuring initializers anywhere in the file, used as default
//!   values (first match in traversal order wins),
//! - rendered `data-*` attributes outside the internal namespace, with a
//!   syntactic `"string"` / `"string | undefined"` inference,
//! - the single string-literal argument of `PropsOf` references (last
//!   reference wins).
//!
//! Files whose stem contains `context` are internal wiring modules, never
//! public surface, and are skipped before parsing.

use std::path::Path;

use compact_str::CompactString;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, BindingPattern, BindingPatternKind, Declaration, Expression, Function,
    JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXChild, JSXElement, JSXFragment,
    ObjectPropertyKind, PropertyKey, Statement, TSLiteral, TSSignature, TSType,
    TSTypeAliasDeclaration, TSTypeName,
};
use oxc_span::GetSpan;
use rustc_hash::FxHashMap;

use quire_syntax::{leading_comment, parse_tsx, span_text, FileSystem, ParsedSource};

use crate::error::ApiError;
use crate::model::{DataAttribute, ParsedProp, PublicTypeGroup, SubComponent, SubComponentEntry};

/// Reserved naming marker of documented type aliases.
pub const PUBLIC_TYPE_PREFIX: &str = "Public";
/// Type reference carrying the inherited intrinsic element.
pub const PROPS_OF: &str = "PropsOf";

const CONTEXT_MARKER: &str = "context";
const DATA_ATTR_PREFIX: &str = "data-";

/// Extraction options.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// `data-*` attributes under this prefix belong to the design system
    /// itself and are not documented.
    pub internal_attr_prefix: CompactString,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            internal_attr_prefix: CompactString::const_new("data-qds-"),
        }
    }
}

/// Extract the documented API of one component part.
///
/// Returns `Ok(None)` for internal context modules and for files the parser
/// gives up on (logged, never fatal: a multi-file run keeps going).
pub fn extract(
    fs: &dyn FileSystem,
    path: &Path,
    options: &ExtractOptions,
) -> Result<Option<SubComponentEntry>, ApiError> {
    let stem = file_stem(path);
    if stem.contains(CONTEXT_MARKER) {
        return Ok(None);
    }

    let source = fs.read_file(path)?;
    Ok(extract_source(&source, path, options))
}

/// [`extract`] over already-read source text.
pub fn extract_source(
    source: &str,
    path: &Path,
    options: &ExtractOptions,
) -> Option<SubComponentEntry> {
    let stem = file_stem(path);
    if stem.contains(CONTEXT_MARKER) {
        return None;
    }

    let allocator = Allocator::default();
    let parsed = match parse_tsx(&allocator, source, path) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "skipping unparsable component file");
            return None;
        }
    };

    Some(SubComponentEntry {
        name: part_name_from_stem(&stem),
        api: extract_from_parsed(&parsed, options),
    })
}

/// Derive the human-readable part name: stem split on `-`, each segment
/// capitalized, joined with spaces (`"checkbox-trigger"` → `"Checkbox Trigger"`).
pub fn part_name_from_stem(stem: &str) -> String {
    stem.split('-')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn extract_from_parsed(parsed: &ParsedSource<'_>, options: &ExtractOptions) -> SubComponent {
    let mut walker = Extraction {
        source: parsed.source,
        comments: &parsed.program.comments,
        internal_prefix: options.internal_attr_prefix.as_str(),
        groups: Vec::new(),
        defaults: FxHashMap::default(),
        data_attributes: Vec::new(),
        inherits_from: None,
    };

    for stmt in parsed.program.body.iter() {
        walker.visit_statement(stmt);
    }

    let Extraction {
        mut groups,
        defaults,
        data_attributes,
        inherits_from,
        ..
    } = walker;

    // The default lookup is whole-file, so it can only be applied once the
    // walk is complete.
    for group in &mut groups {
        for prop in &mut group.props {
            prop.default_value = defaults.get(&prop.prop).cloned();
        }
    }

    SubComponent {
        types: groups,
        inherits_from,
        data_attributes,
    }
}

struct Extraction<'a> {
    source: &'a str,
    comments: &'a [oxc_ast::Comment],
    internal_prefix: &'a str,
    groups: Vec<PublicTypeGroup>,
    /// Prop name → initializer source text; first match in traversal order.
    defaults: FxHashMap<String, String>,
    data_attributes: Vec<DataAttribute>,
    inherits_from: Option<String>,
}

impl<'a> Extraction<'a> {
    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::VariableDeclaration(decl) => {
                for declarator in decl.declarations.iter() {
                    self.visit_binding_pattern(&declarator.id);
                    if let Some(init) = &declarator.init {
                        self.visit_expression(init);
                    }
                }
            }

            Statement::FunctionDeclaration(func) => self.visit_function(func),

            Statement::ExpressionStatement(expr_stmt) => {
                self.visit_expression(&expr_stmt.expression);
            }

            Statement::ReturnStatement(ret) => {
                if let Some(arg) = &ret.argument {
                    self.visit_expression(arg);
                }
            }

            Statement::IfStatement(if_stmt) => {
                self.visit_expression(&if_stmt.test);
                self.visit_statement(&if_stmt.consequent);
                if let Some(alt) = &if_stmt.alternate {
                    self.visit_statement(alt);
                }
            }

            Statement::BlockStatement(block) => {
                for stmt in block.body.iter() {
                    self.visit_statement(stmt);
                }
            }

            Statement::SwitchStatement(switch) => {
                self.visit_expression(&switch.discriminant);
                for case in switch.cases.iter() {
                    if let Some(test) = &case.test {
                        self.visit_expression(test);
                    }
                    for stmt in case.consequent.iter() {
                        self.visit_statement(stmt);
                    }
                }
            }

            Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    self.visit_declaration(decl);
                }
            }

            Statement::ExportDefaultDeclaration(export) => {
                use oxc_ast::ast::ExportDefaultDeclarationKind;
                match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        self.visit_function(func);
                    }
                    other => {
                        if let Some(expr) = other.as_expression() {
                            self.visit_expression(expr);
                        }
                    }
                }
            }

            Statement::TSTypeAliasDeclaration(alias) => self.visit_type_alias(alias),

            Statement::TSInterfaceDeclaration(interface) => {
                for member in interface.body.body.iter() {
                    if let TSSignature::TSPropertySignature(sig) = member {
                        if let Some(ann) = &sig.type_annotation {
                            self.visit_ts_type(&ann.type_annotation);
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fn visit_declaration(&mut self, decl: &Declaration<'a>) {
        match decl {
            Declaration::VariableDeclaration(var_decl) => {
                for declarator in var_decl.declarations.iter() {
                    self.visit_binding_pattern(&declarator.id);
                    if let Some(init) = &declarator.init {
                        self.visit_expression(init);
                    }
                }
            }
            Declaration::FunctionDeclaration(func) => self.visit_function(func),
            Declaration::TSTypeAliasDeclaration(alias) => self.visit_type_alias(alias),
            Declaration::TSInterfaceDeclaration(interface) => {
                for member in interface.body.body.iter() {
                    if let TSSignature::TSPropertySignature(sig) = member {
                        if let Some(ann) = &sig.type_annotation {
                            self.visit_ts_type(&ann.type_annotation);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// A `Public…` type alias opens a documented group; every alias is also
    /// scanned for `PropsOf` references.
    fn visit_type_alias(&mut self, alias: &TSTypeAliasDeclaration<'a>) {
        if alias.id.name.as_str().starts_with(PUBLIC_TYPE_PREFIX) {
            let mut props = Vec::new();
            self.collect_prop_signatures(&alias.type_annotation, &mut props);
            self.groups.push(PublicTypeGroup {
                name: alias.id.name.to_string(),
                props,
            });
        }
        self.visit_ts_type(&alias.type_annotation);
    }

    /// Property signatures of the alias's object shape. Intersections and
    /// parentheses are looked through; nested object types inside a property
    /// are not flattened into the group.
    fn collect_prop_signatures(&self, ts_type: &TSType<'a>, out: &mut Vec<ParsedProp>) {
        match ts_type {
            TSType::TSTypeLiteral(lit) => {
                for member in lit.members.iter() {
                    let TSSignature::TSPropertySignature(sig) = member else {
                        continue;
                    };
                    let Some(name) = property_key_name(&sig.key) else {
                        continue;
                    };
                    let prop_type = sig
                        .type_annotation
                        .as_ref()
                        .map(|ann| span_text(self.source, ann.type_annotation.span()).to_string())
                        .unwrap_or_default();
                    let comment = leading_comment(self.comments, self.source, sig.span.start)
                        .unwrap_or_default();
                    out.push(ParsedProp {
                        comment,
                        prop: name.to_string(),
                        prop_type,
                        default_value: None,
                    });
                }
            }
            TSType::TSIntersectionType(intersection) => {
                for part in intersection.types.iter() {
                    self.collect_prop_signatures(part, out);
                }
            }
            TSType::TSUnionType(union) => {
                for part in union.types.iter() {
                    self.collect_prop_signatures(part, out);
                }
            }
            TSType::TSParenthesizedType(paren) => {
                self.collect_prop_signatures(&paren.type_annotation, out);
            }
            _ => {}
        }
    }

    /// Recursive scan of a type for `PropsOf<'…'>` references.
    fn visit_ts_type(&mut self, ts_type: &TSType<'a>) {
        match ts_type {
            TSType::TSTypeReference(reference) => {
                if let TSTypeName::IdentifierReference(ident) = &reference.type_name {
                    if ident.name.as_str() == PROPS_OF {
                        if let Some(type_params) = &reference.type_parameters {
                            if type_params.params.len() == 1 {
                                if let TSType::TSLiteralType(lit) = &type_params.params[0] {
                                    if let TSLiteral::StringLiteral(s) = &lit.literal {
                                        if self.inherits_from.is_some() {
                                            tracing::debug!(
                                                element = s.value.as_str(),
                                                "multiple PropsOf references; last one wins"
                                            );
                                        }
                                        self.inherits_from = Some(s.value.to_string());
                                    }
                                }
                            }
                        }
                    }
                }
                if let Some(type_params) = &reference.type_parameters {
                    for param in type_params.params.iter() {
                        self.visit_ts_type(param);
                    }
                }
            }
            TSType::TSTypeLiteral(lit) => {
                for member in lit.members.iter() {
                    if let TSSignature::TSPropertySignature(sig) = member {
                        if let Some(ann) = &sig.type_annotation {
                            self.visit_ts_type(&ann.type_annotation);
                        }
                    }
                }
            }
            TSType::TSIntersectionType(intersection) => {
                for part in intersection.types.iter() {
                    self.visit_ts_type(part);
                }
            }
            TSType::TSUnionType(union) => {
                for part in union.types.iter() {
                    self.visit_ts_type(part);
                }
            }
            TSType::TSArrayType(array) => self.visit_ts_type(&array.element_type),
            TSType::TSParenthesizedType(paren) => self.visit_ts_type(&paren.type_annotation),
            _ => {}
        }
    }

    fn visit_function(&mut self, func: &Function<'a>) {
        for param in func.params.items.iter() {
            self.visit_binding_pattern(&param.pattern);
        }
        if let Some(return_type) = &func.return_type {
            self.visit_ts_type(&return_type.type_annotation);
        }
        if let Some(body) = &func.body {
            for stmt in body.statements.iter() {
                self.visit_statement(stmt);
            }
        }
    }

    /// Object-destructuring bindings with an initializer are default-value
    /// candidates, wherever in the file they occur.
    fn visit_binding_pattern(&mut self, pattern: &BindingPattern<'a>) {
        if let Some(ann) = &pattern.type_annotation {
            self.visit_ts_type(&ann.type_annotation);
        }
        match &pattern.kind {
            BindingPatternKind::ObjectPattern(obj) => {
                for prop in obj.properties.iter() {
                    if let BindingPatternKind::AssignmentPattern(assign) = &prop.value.kind {
                        let init = span_text(self.source, assign.right.span());
                        if let Some(key_name) = property_key_name(&prop.key) {
                            self.record_default(key_name, init);
                        }
                        if let Some(local_name) = binding_name(&assign.left.kind) {
                            self.record_default(local_name, init);
                        }
                        self.visit_binding_pattern(&assign.left);
                        self.visit_expression(&assign.right);
                    } else {
                        self.visit_binding_pattern(&prop.value);
                    }
                }
                if let Some(rest) = &obj.rest {
                    self.visit_binding_pattern(&rest.argument);
                }
            }
            BindingPatternKind::ArrayPattern(arr) => {
                for elem in arr.elements.iter().flatten() {
                    self.visit_binding_pattern(elem);
                }
                if let Some(rest) = &arr.rest {
                    self.visit_binding_pattern(&rest.argument);
                }
            }
            BindingPatternKind::AssignmentPattern(assign) => {
                self.visit_binding_pattern(&assign.left);
                self.visit_expression(&assign.right);
            }
            BindingPatternKind::BindingIdentifier(_) => {}
        }
    }

    fn record_default(&mut self, name: &str, init: &str) {
        if self.defaults.contains_key(name) {
            tracing::debug!(prop = name, "duplicate default-value binding; first one wins");
            return;
        }
        self.defaults.insert(name.to_string(), init.to_string());
    }

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        match expr {
            Expression::ArrowFunctionExpression(arrow) => {
                for param in arrow.params.items.iter() {
                    self.visit_binding_pattern(&param.pattern);
                }
                if let Some(return_type) = &arrow.return_type {
                    self.visit_ts_type(&return_type.type_annotation);
                }
                for stmt in arrow.body.statements.iter() {
                    self.visit_statement(stmt);
                }
            }

            Expression::FunctionExpression(func) => self.visit_function(func),

            Expression::CallExpression(call) => {
                self.visit_expression(&call.callee);
                if let Some(type_params) = &call.type_parameters {
                    for param in type_params.params.iter() {
                        self.visit_ts_type(param);
                    }
                }
                for arg in call.arguments.iter() {
                    match arg {
                        Argument::SpreadElement(spread) => {
                            self.visit_expression(&spread.argument);
                        }
                        _ => {
                            if let Some(expr) = arg.as_expression() {
                                self.visit_expression(expr);
                            }
                        }
                    }
                }
            }

            Expression::ObjectExpression(obj) => {
                for prop in obj.properties.iter() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(p) => self.visit_expression(&p.value),
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.visit_expression(&spread.argument);
                        }
                    }
                }
            }

            Expression::ArrayExpression(arr) => {
                for elem in arr.elements.iter() {
                    if let Some(expr) = elem.as_expression() {
                        self.visit_expression(expr);
                    }
                }
            }

            Expression::ConditionalExpression(cond) => {
                self.visit_expression(&cond.test);
                self.visit_expression(&cond.consequent);
                self.visit_expression(&cond.alternate);
            }

            Expression::LogicalExpression(logical) => {
                self.visit_expression(&logical.left);
                self.visit_expression(&logical.right);
            }

            Expression::BinaryExpression(binary) => {
                self.visit_expression(&binary.left);
                self.visit_expression(&binary.right);
            }

            Expression::UnaryExpression(unary) => self.visit_expression(&unary.argument),
            Expression::AwaitExpression(await_expr) => self.visit_expression(&await_expr.argument),
            Expression::ParenthesizedExpression(paren) => self.visit_expression(&paren.expression),

            Expression::SequenceExpression(seq) => {
                for expr in seq.expressions.iter() {
                    self.visit_expression(expr);
                }
            }

            Expression::AssignmentExpression(assign) => self.visit_expression(&assign.right),

            Expression::StaticMemberExpression(member) => self.visit_expression(&member.object),
            Expression::ComputedMemberExpression(member) => {
                self.visit_expression(&member.object);
                self.visit_expression(&member.expression);
            }

            Expression::TSAsExpression(ts_as) => {
                self.visit_expression(&ts_as.expression);
                self.visit_ts_type(&ts_as.type_annotation);
            }
            Expression::TSSatisfiesExpression(ts_satisfies) => {
                self.visit_expression(&ts_satisfies.expression);
                self.visit_ts_type(&ts_satisfies.type_annotation);
            }
            Expression::TSNonNullExpression(ts_non_null) => {
                self.visit_expression(&ts_non_null.expression);
            }

            Expression::JSXElement(el) => self.visit_jsx_element(el),
            Expression::JSXFragment(fragment) => self.visit_jsx_fragment(fragment),

            _ => {}
        }
    }

    fn visit_jsx_element(&mut self, el: &JSXElement<'a>) {
        for item in el.opening_element.attributes.iter() {
            match item {
                JSXAttributeItem::Attribute(attr) => {
                    self.collect_data_attribute(attr);
                    match &attr.value {
                        Some(JSXAttributeValue::ExpressionContainer(container)) => {
                            if let Some(expr) = container.expression.as_expression() {
                                self.visit_expression(expr);
                            }
                        }
                        Some(JSXAttributeValue::Element(child)) => self.visit_jsx_element(child),
                        Some(JSXAttributeValue::Fragment(fragment)) => {
                            self.visit_jsx_fragment(fragment);
                        }
                        _ => {}
                    }
                }
                JSXAttributeItem::SpreadAttribute(spread) => {
                    self.visit_expression(&spread.argument);
                }
            }
        }
        self.visit_jsx_children(&el.children);
    }

    fn visit_jsx_fragment(&mut self, fragment: &JSXFragment<'a>) {
        self.visit_jsx_children(&fragment.children);
    }

    fn visit_jsx_children(&mut self, children: &[JSXChild<'a>]) {
        for child in children {
            match child {
                JSXChild::Element(el) => self.visit_jsx_element(el),
                JSXChild::Fragment(fragment) => self.visit_jsx_fragment(fragment),
                JSXChild::ExpressionContainer(container) => {
                    if let Some(expr) = container.expression.as_expression() {
                        self.visit_expression(expr);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_data_attribute(&mut self, attr: &oxc_ast::ast::JSXAttribute<'a>) {
        let JSXAttributeName::Identifier(name) = &attr.name else {
            return;
        };
        let name = name.name.as_str();
        if !name.starts_with(DATA_ATTR_PREFIX) || name.starts_with(self.internal_prefix) {
            return;
        }
        if self.data_attributes.iter().any(|d| d.name == name) {
            return;
        }

        let attr_type = if self.attribute_may_be_undefined(&attr.value) {
            "string | undefined"
        } else {
            "string"
        };
        let comment = leading_comment(self.comments, self.source, attr.span.start);

        self.data_attributes.push(DataAttribute {
            name: name.to_string(),
            attr_type: attr_type.to_string(),
            comment,
        });
    }

    /// Syntactic inference only: a conditional value, or any value whose
    /// source text mentions `undefined`, documents as `string | undefined`.
    fn attribute_may_be_undefined(&self, value: &Option<JSXAttributeValue<'a>>) -> bool {
        let Some(value) = value else {
            return false;
        };
        if let JSXAttributeValue::ExpressionContainer(container) = value {
            if let Some(Expression::ConditionalExpression(_)) = container.expression.as_expression()
            {
                return true;
            }
        }
        span_text(self.source, value.span()).contains("undefined")
    }
}

fn property_key_name<'a>(key: &'a PropertyKey<'_>) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        PropertyKey::StringLiteral(s) => Some(s.value.as_str()),
        _ => None,
    }
}

fn binding_name<'a>(kind: &'a BindingPatternKind<'_>) -> Option<&'a str> {
    match kind {
        BindingPatternKind::BindingIdentifier(id) => Some(id.name.as_str()),
        BindingPatternKind::AssignmentPattern(assign) => binding_name(&assign.left.kind),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_str(source: &str, file: &str) -> Option<SubComponentEntry> {
        extract_source(source, Path::new(file), &ExtractOptions::default())
    }

    #[test]
    fn skips_context_modules() {
        let source = "export type PublicContextProps = { open?: boolean };";
        assert!(extract_str(source, "checkbox-context.ts").is_none());
        assert!(extract_str(source, "context.tsx").is_none());
    }

    #[test]
    fn derives_part_name_from_stem() {
        let entry = extract_str("export const a = 1;", "checkbox-hidden-input.tsx").unwrap();
        assert_eq!(entry.name, "Checkbox Hidden Input");
    }

    #[test]
    fn collects_public_type_group_with_comments() {
        let source = r#"
export type PublicRootProps = {
  /** Whether the checkbox is checked. */
  checked?: boolean;
  disabled?: boolean;
};
type InternalProps = { secret: string };
"#;
        let entry = extract_str(source, "checkbox-root.tsx").unwrap();
        assert_eq!(entry.api.types.len(), 1);
        let group = &entry.api.types[0];
        assert_eq!(group.name, "PublicRootProps");
        assert_eq!(group.props.len(), 2);
        assert_eq!(group.props[0].prop, "checked");
        assert_eq!(group.props[0].comment, "Whether the checkbox is checked.");
        assert_eq!(group.props[0].prop_type, "boolean");
        assert_eq!(group.props[1].comment, "");
    }

    #[test]
    fn collects_signatures_through_intersections() {
        let source = r#"
export type PublicTriggerProps = PropsOf<'button'> & {
  value?: string;
};
"#;
        let entry = extract_str(source, "select-trigger.tsx").unwrap();
        let group = &entry.api.types[0];
        assert_eq!(group.props.len(), 1);
        assert_eq!(group.props[0].prop, "value");
        assert_eq!(entry.api.inherits_from.as_deref(), Some("button"));
    }

    #[test]
    fn default_value_from_destructured_params() {
        let source = r#"
export type PublicRootProps = { size?: number };

export const Root = component$(({ size = 10 }: PublicRootProps) => {
  return <div />;
});
"#;
        let entry = extract_str(source, "slider-root.tsx").unwrap();
        let prop = &entry.api.types[0].props[0];
        assert_eq!(prop.prop, "size");
        assert_eq!(prop.default_value.as_deref(), Some("10"));
    }

    #[test]
    fn first_default_binding_wins() {
        let source = r#"
export type PublicRootProps = { size?: number };

const first = ({ size = 10 }: PublicRootProps) => size;
const second = ({ size = 99 }: PublicRootProps) => size;
"#;
        let entry = extract_str(source, "slider-root.tsx").unwrap();
        assert_eq!(
            entry.api.types[0].props[0].default_value.as_deref(),
            Some("10")
        );
    }

    #[test]
    fn renamed_binding_still_supplies_default() {
        let source = r#"
export type PublicRootProps = { size?: number };
const fn = ({ size: localSize = 4 }: PublicRootProps) => localSize;
"#;
        let entry = extract_str(source, "slider-root.tsx").unwrap();
        assert_eq!(
            entry.api.types[0].props[0].default_value.as_deref(),
            Some("4")
        );
    }

    #[test]
    fn data_attribute_inference() {
        let source = r#"
export const Root = () => (
  <div
    data-checked={isChecked ? '' : undefined}
    data-orientation="horizontal"
    data-qds-internal-marker
    data-plain
  />
);
"#;
        let entry = extract_str(source, "checkbox-root.tsx").unwrap();
        let attrs = &entry.api.data_attributes;
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].name, "data-checked");
        assert_eq!(attrs[0].attr_type, "string | undefined");
        assert_eq!(attrs[1].name, "data-orientation");
        assert_eq!(attrs[1].attr_type, "string");
        assert_eq!(attrs[2].name, "data-plain");
        assert_eq!(attrs[2].attr_type, "string");
    }

    #[test]
    fn duplicate_data_attributes_keep_first() {
        let source = r#"
export const Root = () => (
  <div data-open="true">
    <span data-open={maybe ? '' : undefined} />
  </div>
);
"#;
        let entry = extract_str(source, "popover-root.tsx").unwrap();
        assert_eq!(entry.api.data_attributes.len(), 1);
        assert_eq!(entry.api.data_attributes[0].attr_type, "string");
    }

    #[test]
    fn last_props_of_reference_wins() {
        let source = r#"
type A = PropsOf<'span'>;
type B = PropsOf<'button'>;
"#;
        let entry = extract_str(source, "toggle-root.tsx").unwrap();
        assert_eq!(entry.api.inherits_from.as_deref(), Some("button"));
    }

    #[test]
    fn malformed_file_never_panics() {
        // The parser either recovers (empty API) or the file is skipped;
        // both are acceptable, aborting is not.
        if let Some(entry) = extract_str("const = = =", "broken-root.tsx") {
            assert!(entry.api.types.is_empty());
        }
    }
}
