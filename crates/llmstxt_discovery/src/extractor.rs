//! Static reconstruction of configuration values from a module AST.
//!
//! Supported expression shapes:
//! - object literals with identifier keys (`{ title: "x" }`)
//! - array literals whose elements are objects, arrays or literals
//! - string, number (including `-1`), boolean and `null` literals
//! - template literals without interpolation
//! - identifiers, resolved through module-scope declarations and imports
//! - `(expr)`, `expr as T`, `expr satisfies T` and `expr!`, which are looked through
//!
//! Anything else yields no value. Inside an object the property is dropped,
//! inside an array the element is dropped; neither is an error.

use log::{debug, trace, warn};
use oxc_ast::ast::{
    ArrayExpression, ArrayExpressionElement, Declaration, Expression, ImportDeclarationSpecifier,
    ObjectExpression, ObjectPropertyKind, Program, PropertyKey, PropertyKind, Statement,
    TemplateLiteral,
};
use oxc_syntax::operator::UnaryOperator;
use serde_json::{Map, Number};
use std::path::{Path, PathBuf};

use llmstxt_core::{PathAliasTable, parse_file, resolve};

use crate::{constants::MAX_REFERENCE_DEPTH, types::ConfigValue};

/// What a lookup on the reference trail is looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reference {
    /// A module-scope binding (declaration or import) by local name
    Binding(String),
    /// An export of a module by exported name
    Export(String),
}

/// Reconstructs values, following identifiers across files.
///
/// The trail holds the lookups currently in progress. Re-entering one of
/// them is a cycle and resolves to nothing instead of recursing forever.
pub struct ValueExtractor<'t> {
    aliases: &'t PathAliasTable,
    trail: Vec<(PathBuf, Reference)>,
}

impl<'t> ValueExtractor<'t> {
    pub fn new(aliases: &'t PathAliasTable) -> Self {
        Self { aliases, trail: Vec::new() }
    }

    /// Value of `expr`, which appears in `program` parsed from `file`.
    pub fn extract(
        &mut self,
        expr: &Expression<'_>,
        program: &Program<'_>,
        file: &Path,
    ) -> Option<ConfigValue> {
        match expr {
            Expression::ObjectExpression(obj) => Some(self.extract_object(obj, program, file)),
            Expression::ArrayExpression(arr) => Some(self.extract_array(arr, program, file)),
            Expression::StringLiteral(s) => Some(ConfigValue::String(s.value.to_string())),
            Expression::TemplateLiteral(tpl) => static_template(tpl).map(ConfigValue::String),
            Expression::NumericLiteral(n) => number_value(n.value),
            Expression::UnaryExpression(unary)
                if unary.operator == UnaryOperator::UnaryNegation =>
            {
                match &unary.argument {
                    Expression::NumericLiteral(n) => number_value(-n.value),
                    _ => None,
                }
            }
            Expression::BooleanLiteral(b) => Some(ConfigValue::Bool(b.value)),
            Expression::NullLiteral(_) => Some(ConfigValue::Null),
            Expression::Identifier(ident) => self.resolve_binding(ident.name.as_str(), program, file),
            Expression::ParenthesizedExpression(e) => self.extract(&e.expression, program, file),
            Expression::TSAsExpression(e) => self.extract(&e.expression, program, file),
            Expression::TSSatisfiesExpression(e) => self.extract(&e.expression, program, file),
            Expression::TSNonNullExpression(e) => self.extract(&e.expression, program, file),
            _ => {
                trace!("Unsupported expression shape in {}", file.display());
                None
            }
        }
    }

    fn extract_object(
        &mut self,
        obj: &ObjectExpression<'_>,
        program: &Program<'_>,
        file: &Path,
    ) -> ConfigValue {
        let mut map = Map::new();
        for prop in &obj.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                trace!("Skipping spread property in {}", file.display());
                continue;
            };
            if prop.computed || prop.method || !matches!(prop.kind, PropertyKind::Init) {
                continue;
            }
            let PropertyKey::StaticIdentifier(key) = &prop.key else {
                continue;
            };
            if let Some(value) = self.extract(&prop.value, program, file) {
                // Later duplicates overwrite earlier ones in place
                map.insert(key.name.to_string(), value);
            }
        }
        ConfigValue::Object(map)
    }

    fn extract_array(
        &mut self,
        arr: &ArrayExpression<'_>,
        program: &Program<'_>,
        file: &Path,
    ) -> ConfigValue {
        let mut items = Vec::with_capacity(arr.elements.len());
        for element in &arr.elements {
            let value = match element {
                ArrayExpressionElement::Elision(_) => Some(ConfigValue::Null),
                ArrayExpressionElement::SpreadElement(_) => None,
                // Only literal shapes are kept; references are not followed in arrays
                _ => match element.as_expression() {
                    Some(Expression::Identifier(_)) | None => None,
                    Some(expr) => self.extract(expr, program, file),
                },
            };
            if let Some(value) = value {
                items.push(value);
            }
        }
        ConfigValue::Array(items)
    }

    /// Value bound to `name` at module scope in `program`.
    ///
    /// Local declarations win over imports. Named and default imports are
    /// followed into the imported file.
    pub fn resolve_binding(
        &mut self,
        name: &str,
        program: &Program<'_>,
        file: &Path,
    ) -> Option<ConfigValue> {
        let reference = Reference::Binding(name.to_string());
        if !self.enter(file, &reference) {
            return None;
        }
        let value = self.lookup_binding(name, program, file);
        self.leave();
        value
    }

    fn lookup_binding(
        &mut self,
        name: &str,
        program: &Program<'_>,
        file: &Path,
    ) -> Option<ConfigValue> {
        if let Some(init) = find_local_initializer(program, name) {
            trace!("Found local declaration of '{}' in {}", name, file.display());
            return self.extract(init, program, file);
        }

        for stmt in &program.body {
            let Statement::ImportDeclaration(decl) = stmt else {
                continue;
            };
            let Some(specifiers) = &decl.specifiers else {
                continue;
            };
            for specifier in specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(s) if s.local.name.as_str() == name => {
                        let imported = s.imported.name();
                        return self.follow_import(file, decl.source.value.as_str(), imported.as_str());
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s)
                        if s.local.name.as_str() == name =>
                    {
                        return self.follow_import(file, decl.source.value.as_str(), "default");
                    }
                    _ => {}
                }
            }
        }

        debug!("No declaration or import for '{}' in {}", name, file.display());
        None
    }

    /// Resolves `request` from `from_file`, parses the target and looks up
    /// `exported` there.
    fn follow_import(&mut self, from_file: &Path, request: &str, exported: &str) -> Option<ConfigValue> {
        let Some(target) = resolve(self.aliases, from_file, request) else {
            debug!("Could not resolve import '{}' from {}", request, from_file.display());
            return None;
        };

        let reference = Reference::Export(exported.to_string());
        if !self.enter(&target, &reference) {
            return None;
        }
        trace!("Following '{}' into {}", exported, target.display());
        let value = match parse_file(&target, |program| self.find_export(program, &target, exported)) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read imported file {}: {:#}", target.display(), e);
                None
            }
        };
        self.leave();
        value
    }

    /// Value exported from `program` under `exported` (`"default"` for the
    /// default export).
    pub fn find_export(
        &mut self,
        program: &Program<'_>,
        file: &Path,
        exported: &str,
    ) -> Option<ConfigValue> {
        if exported == "default"
            && let Some(Statement::ExportDefaultDeclaration(decl)) = program
                .body
                .iter()
                .find(|stmt| matches!(stmt, Statement::ExportDefaultDeclaration(_)))
        {
            return decl.declaration.as_expression().and_then(|e| self.extract(e, program, file));
        }

        for stmt in &program.body {
            let Statement::ExportNamedDeclaration(decl) = stmt else {
                continue;
            };

            if let Some(Declaration::VariableDeclaration(var)) = &decl.declaration {
                for declarator in &var.declarations {
                    if declarator.id.get_identifier_name().is_some_and(|n| n.as_str() == exported) {
                        return declarator.init.as_ref().and_then(|init| self.extract(init, program, file));
                    }
                }
            }

            for specifier in &decl.specifiers {
                if specifier.exported.name().as_str() != exported {
                    continue;
                }
                let local = specifier.local.name();
                return match &decl.source {
                    Some(source) => self.follow_import(file, source.value.as_str(), local.as_str()),
                    None => self.resolve_binding(local.as_str(), program, file),
                };
            }
        }

        // `export * from` never re-exports a default
        if exported == "default" {
            return None;
        }
        for stmt in &program.body {
            if let Statement::ExportAllDeclaration(all) = stmt
                && all.exported.is_none()
                && let Some(value) = self.follow_import(file, all.source.value.as_str(), exported)
            {
                return Some(value);
            }
        }

        None
    }

    fn enter(&mut self, file: &Path, reference: &Reference) -> bool {
        if matches!(reference, Reference::Export(_)) && self.import_hops() >= MAX_REFERENCE_DEPTH {
            warn!("More than {} import hops at {}", MAX_REFERENCE_DEPTH, file.display());
            return false;
        }
        if self.trail.iter().any(|(f, r)| f == file && r == reference) {
            debug!("Reference cycle on {:?} in {}", reference, file.display());
            return false;
        }
        self.trail.push((file.to_path_buf(), reference.clone()));
        true
    }

    fn leave(&mut self) {
        self.trail.pop();
    }

    /// Files entered through imports and re-exports on the current trail.
    fn import_hops(&self) -> usize {
        self.trail.iter().filter(|(_, r)| matches!(r, Reference::Export(_))).count()
    }
}

/// Whether `program` declares an export named `exported`, without resolving it.
pub fn declares_export(program: &Program<'_>, exported: &str) -> bool {
    program.body.iter().any(|stmt| match stmt {
        Statement::ExportNamedDeclaration(decl) => {
            let declared = matches!(
                &decl.declaration,
                Some(Declaration::VariableDeclaration(var)) if var.declarations.iter().any(|d| {
                    d.id.get_identifier_name().is_some_and(|n| n.as_str() == exported)
                })
            );
            declared || decl.specifiers.iter().any(|s| s.exported.name().as_str() == exported)
        }
        _ => false,
    })
}

/// Initializer of a module-scope `const`/`let`/`var` named `name`.
fn find_local_initializer<'p, 'a>(program: &'p Program<'a>, name: &str) -> Option<&'p Expression<'a>> {
    program.body.iter().find_map(|stmt| {
        let var = match stmt {
            Statement::VariableDeclaration(var) => var,
            Statement::ExportNamedDeclaration(decl) => match &decl.declaration {
                Some(Declaration::VariableDeclaration(var)) => var,
                _ => return None,
            },
            _ => return None,
        };
        var.declarations
            .iter()
            .find(|d| d.id.get_identifier_name().is_some_and(|n| n.as_str() == name))
            .and_then(|d| d.init.as_ref())
    })
}

fn static_template(tpl: &TemplateLiteral<'_>) -> Option<String> {
    if !tpl.expressions.is_empty() {
        return None;
    }
    Some(
        tpl.quasis
            .iter()
            .map(|q| q.value.cooked.as_ref().unwrap_or(&q.value.raw).as_str())
            .collect(),
    )
}

fn number_value(n: f64) -> Option<ConfigValue> {
    // Integral values stay integers so `1` does not come back as `1.0`
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Some(ConfigValue::Number(Number::from(n as i64)));
    }
    Number::from_f64(n).map(ConfigValue::Number)
}
