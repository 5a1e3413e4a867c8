//! URL route table.
//!
//! # Responsibilities
//! - Hold the ordered tree of patterns and includes
//! - Attach view metadata (dotted path, decorator names) at registration
//! - Build the tree from `[[routes]]` configuration
//!
//! # Design Decisions
//! - Immutable once built; the report only reads it
//! - Registration order is preserved everywhere
//! - Decorators are explicit tags, recorded in the order they were applied

use crate::config::RouteConfig;

/// The view handling a route, with the decorators wrapping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub path: String,
    pub decorators: Vec<String>,
}

impl View {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            decorators: Vec::new(),
        }
    }

    /// Record one more decorator, applied after the existing ones.
    pub fn decorated(mut self, decorator: impl Into<String>) -> Self {
        self.decorators.push(decorator.into());
        self
    }
}

/// A leaf route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    pub regex: String,
    pub view: View,
    pub name: Option<String>,
}

/// A group of routes mounted below a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInclude {
    pub prefix: String,
    pub namespace: Option<String>,
    pub children: RouteTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlNode {
    Pattern(UrlPattern),
    Include(UrlInclude),
}

/// Ordered tree of URL routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    nodes: Vec<UrlNode>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, regex: impl Into<String>, view: View) -> Self {
        self.nodes.push(UrlNode::Pattern(UrlPattern {
            regex: regex.into(),
            view,
            name: None,
        }));
        self
    }

    pub fn named_route(mut self, regex: impl Into<String>, view: View, name: impl Into<String>) -> Self {
        self.nodes.push(UrlNode::Pattern(UrlPattern {
            regex: regex.into(),
            view,
            name: Some(name.into()),
        }));
        self
    }

    pub fn include(mut self, prefix: impl Into<String>, children: RouteTable) -> Self {
        self.nodes.push(UrlNode::Include(UrlInclude {
            prefix: prefix.into(),
            namespace: None,
            children,
        }));
        self
    }

    pub fn include_namespaced(
        mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        children: RouteTable,
    ) -> Self {
        self.nodes.push(UrlNode::Include(UrlInclude {
            prefix: prefix.into(),
            namespace: Some(namespace.into()),
            children,
        }));
        self
    }

    pub fn nodes(&self) -> &[UrlNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a table from validated route configuration.
    ///
    /// Entries with an include become [`UrlInclude`]s; the rest become
    /// leaves. Validation guarantees leaves carry a view.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        let nodes = routes
            .iter()
            .filter_map(|route| {
                if !route.include.is_empty() {
                    return Some(UrlNode::Include(UrlInclude {
                        prefix: route.pattern.clone(),
                        namespace: route.namespace.clone(),
                        children: Self::from_config(&route.include),
                    }));
                }
                let Some(view) = &route.view else {
                    tracing::warn!(pattern = %route.pattern, "Skipping route without a view");
                    return None;
                };
                Some(UrlNode::Pattern(UrlPattern {
                    regex: route.pattern.clone(),
                    view: View {
                        path: view.clone(),
                        decorators: route.decorators.clone(),
                    },
                    name: route.name.clone(),
                }))
            })
            .collect();
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let table = RouteTable::new()
            .route("^b/$", View::new("app.views.b"))
            .route("^a/$", View::new("app.views.a"));

        let regexes: Vec<_> = table
            .nodes()
            .iter()
            .map(|node| match node {
                UrlNode::Pattern(p) => p.regex.as_str(),
                UrlNode::Include(i) => i.prefix.as_str(),
            })
            .collect();
        assert_eq!(regexes, vec!["^b/$", "^a/$"]);
    }

    #[test]
    fn test_decorators_keep_application_order() {
        let view = View::new("app.views.a")
            .decorated("login_required")
            .decorated("csrf_exempt");
        assert_eq!(view.decorators, vec!["login_required", "csrf_exempt"]);
    }

    #[test]
    fn test_from_config_builds_nested_includes() {
        let routes = vec![
            RouteConfig {
                pattern: "^a/$".into(),
                view: Some("app.views.a".into()),
                decorators: vec!["login_required".into()],
                ..Default::default()
            },
            RouteConfig {
                pattern: "^admin/".into(),
                namespace: Some("admin".into()),
                include: vec![RouteConfig {
                    pattern: "^login/$".into(),
                    view: Some("admin.views.login".into()),
                    name: Some("login".into()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        ];

        let expected = RouteTable::new()
            .route("^a/$", View::new("app.views.a").decorated("login_required"))
            .include_namespaced(
                "^admin/",
                "admin",
                RouteTable::new().named_route("^login/$", View::new("admin.views.login"), "login"),
            );
        assert_eq!(RouteTable::from_config(&routes), expected);
    }
}
