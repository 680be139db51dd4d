//! Nesting flat routes by slug.

use std::collections::HashMap;

use crate::flatten::{slug_segments, RouteNode};

/// Errors that can occur when nesting routes.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Route {slug} has no parent route at {parent}")]
    Orphan { slug: String, parent: String },

    #[error("Duplicate route slug: {0}")]
    DuplicateSlug(String),
}

fn route_key(slug: &str) -> String {
    slug_segments(slug).collect::<Vec<_>>().join("/")
}

/// Nest routes under the route whose slug is their parent path.
///
/// The home route (level 0) is the only root; level 1 routes nest under it,
/// so every node's level equals the number of its ancestors. Siblings are
/// sorted by `order`, keeping input order for ties.
pub fn build_route_tree(routes: &[RouteNode]) -> Result<Vec<RouteNode>, RouteError> {
    let keys: Vec<String> = routes.iter().map(|r| route_key(&r.slug)).collect();

    let mut index = HashMap::new();
    for (i, key) in keys.iter().enumerate() {
        if index.insert(key.as_str(), i).is_some() {
            return Err(RouteError::DuplicateSlug(routes[i].slug.clone()));
        }
    }

    let mut children = vec![Vec::new(); routes.len()];
    let mut roots = Vec::new();

    for (i, key) in keys.iter().enumerate() {
        if key.is_empty() {
            roots.push(i);
            continue;
        }

        let parent = key.rsplit_once('/').map_or("", |(parent, _)| parent);
        match index.get(parent) {
            Some(&p) => children[p].push(i),
            None => {
                return Err(RouteError::Orphan {
                    slug: routes[i].slug.clone(),
                    parent: if parent.is_empty() {
                        "/".to_string()
                    } else {
                        format!("/{parent}/")
                    },
                })
            }
        }
    }

    Ok(assemble_all(&roots, routes, &children))
}

fn assemble_all(indices: &[usize], routes: &[RouteNode], children: &[Vec<usize>]) -> Vec<RouteNode> {
    let mut nodes: Vec<RouteNode> = indices
        .iter()
        .map(|&i| RouteNode {
            children: assemble_all(&children[i], routes, children),
            ..routes[i].clone()
        })
        .collect();
    nodes.sort_by_key(|n| n.order);
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn route(slug: &str, order: i32) -> RouteNode {
        RouteNode {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_string(),
            order,
            description: None,
            level: slug_segments(slug).count(),
            children: Vec::new(),
        }
    }

    fn slugs(nodes: &[RouteNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.slug.as_str()).collect()
    }

    fn assert_level_is_depth(nodes: &[RouteNode], depth: usize) {
        for node in nodes {
            assert_eq!(node.level, depth, "{}", node.slug);
            assert_level_is_depth(&node.children, depth + 1);
        }
    }

    #[test]
    fn nests_by_slug_prefix() {
        let flat = vec![
            route("/", 0),
            route("/api/", 2),
            route("/get-started/", 1),
            route("/api/methods/", 2),
            route("/api/options/", 1),
            route("/api/options/loop/", 0),
        ];

        let tree = build_route_tree(&flat).unwrap();

        assert_eq!(slugs(&tree), vec!["/"]);
        let top = &tree[0].children;
        assert_eq!(slugs(top), vec!["/get-started/", "/api/"]);
        assert_eq!(slugs(&top[1].children), vec!["/api/options/", "/api/methods/"]);
        assert_eq!(slugs(&top[1].children[0].children), vec!["/api/options/loop/"]);
    }

    #[test]
    fn sorting_is_stable() {
        let flat = vec![route("/", 0), route("/b/", 0), route("/a/", 0), route("/c/", 0)];

        let tree = build_route_tree(&flat).unwrap();

        assert_eq!(slugs(&tree[0].children), vec!["/b/", "/a/", "/c/"]);
    }

    #[test]
    fn level_matches_depth() {
        let flat = vec![
            route("/guides/a/", 0),
            route("/", 0),
            route("/guides/", 0),
            route("/api/", 1),
            route("/api/events/", 0),
        ];

        let tree = build_route_tree(&flat).unwrap();

        assert_level_is_depth(&tree, 0);
    }

    #[test]
    fn top_level_routes_need_the_home_route() {
        let result = build_route_tree(&[route("/guides/", 0)]);

        assert!(matches!(
            result,
            Err(RouteError::Orphan { parent, .. }) if parent == "/"
        ));
    }

    #[test]
    fn orphans_are_rejected() {
        let result = build_route_tree(&[route("/", 0), route("/api/options/", 0)]);

        assert!(matches!(
            result,
            Err(RouteError::Orphan { parent, .. }) if parent == "/api/"
        ));
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let result = build_route_tree(&[route("/api/", 0), route("api", 1)]);

        assert!(matches!(result, Err(RouteError::DuplicateSlug(_))));
    }
}
