//! Flattening the page query into navigation nodes.

use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;

/// Page query result in the shape `{allMdx: {edges: [{node}]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MdxAllRoutes {
    pub all_mdx: MdxConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdxConnection {
    pub edges: Vec<MdxEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdxEdge {
    pub node: MdxNode,
}

/// One documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdxNode {
    pub id: String,
    pub fields: MdxFields,
    pub frontmatter: Frontmatter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdxFields {
    pub slug: String,
}

impl MdxNode {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, frontmatter: Frontmatter) -> Self {
        Self {
            id: id.into(),
            fields: MdxFields { slug: slug.into() },
            frontmatter,
        }
    }
}

impl MdxAllRoutes {
    pub fn from_nodes(nodes: impl IntoIterator<Item = MdxNode>) -> Self {
        Self {
            all_mdx: MdxConnection {
                edges: nodes.into_iter().map(|node| MdxEdge { node }).collect(),
            },
        }
    }
}

/// A navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of non-empty slug segments
    pub level: usize,
    #[serde(default)]
    pub children: Vec<RouteNode>,
}

/// Non-empty `/` separated segments of a slug.
pub fn slug_segments(slug: &str) -> impl Iterator<Item = &str> {
    slug.split('/').filter(|s| !s.is_empty())
}

/// One childless node per page, in query order.
pub fn flatten(data: &MdxAllRoutes) -> Vec<RouteNode> {
    data.all_mdx
        .edges
        .iter()
        .map(|MdxEdge { node }| RouteNode {
            id: node.id.clone(),
            slug: node.fields.slug.clone(),
            title: node.frontmatter.title.clone(),
            order: node.frontmatter.order.unwrap_or(0),
            description: node.frontmatter.description.clone(),
            level: slug_segments(&node.fields.slug).count(),
            children: Vec::new(),
        })
        .collect()
}
