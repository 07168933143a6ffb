use std::collections::HashMap;

use crate::error::PluginError;
use crate::metadata::PluginMetadata;

/// Resolves registration order for a set of plugins so every plugin
/// appears after the plugins it depends on (by name). Mirrors the
/// three-coloring DFS cycle detection used elsewhere in the workspace,
/// applied here to plugin names instead of capability operations or
/// component ids.
pub fn resolve_order(plugins: &[PluginMetadata]) -> Result<Vec<String>, PluginError> {
    let by_name: HashMap<&str, &PluginMetadata> =
        plugins.iter().map(|p| (p.name.as_str(), p)).collect();

    for plugin in plugins {
        for dep in &plugin.dependencies {
            if !by_name.contains_key(dep.as_str()) {
                return Err(PluginError::MissingDependency(plugin.name.clone(), dep.clone()));
            }
        }
    }

    #[derive(PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let mut colors: HashMap<&str, Color> = HashMap::new();
    let mut order = Vec::with_capacity(plugins.len());

    fn visit<'a>(
        name: &'a str,
        by_name: &HashMap<&'a str, &'a PluginMetadata>,
        colors: &mut HashMap<&'a str, Color>,
        order: &mut Vec<String>,
    ) -> Result<(), PluginError> {
        match colors.get(name) {
            Some(Color::Black) => return Ok(()),
            Some(Color::Gray) => return Err(PluginError::DependencyCycle(name.to_string())),
            _ => {}
        }

        colors.insert(name, Color::Gray);
        let plugin = by_name[name];
        for dep in &plugin.dependencies {
            visit(dep.as_str(), by_name, colors, order)?;
        }
        colors.insert(name, Color::Black);
        order.push(name.to_string());
        Ok(())
    }

    for plugin in plugins {
        visit(plugin.name.as_str(), &by_name, &mut colors, &mut order)?;
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PluginKind;

    fn plugin(name: &str, deps: &[&str]) -> PluginMetadata {
        PluginMetadata::new(name, "1.0.0", PluginKind::Intent)
            .with_dependencies(deps.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn dependencies_resolve_before_dependents() {
        let plugins = vec![plugin("b", &["a"]), plugin("a", &[])];
        let order = resolve_order(&plugins).unwrap();
        assert!(order.iter().position(|n| n == "a").unwrap() < order.iter().position(|n| n == "b").unwrap());
    }

    #[test]
    fn missing_dependency_is_reported() {
        let plugins = vec![plugin("b", &["ghost"])];
        let err = resolve_order(&plugins).unwrap_err();
        assert!(matches!(err, PluginError::MissingDependency(_, _)));
    }

    #[test]
    fn cyclic_dependency_is_reported() {
        let plugins = vec![plugin("a", &["b"]), plugin("b", &["a"])];
        let err = resolve_order(&plugins).unwrap_err();
        assert!(matches!(err, PluginError::DependencyCycle(_)));
    }
}
