//! Documentation navigation routes.
//!
//! Pages are described by the `allMdx` query shape, either deserialized from
//! a content query or produced by [`scan_docs`]. [`flatten`] turns them into
//! [`RouteNode`]s and [`build_route_tree`] nests those by slug.

pub mod flatten;
pub mod frontmatter;
pub mod scan;
pub mod tree;

pub use flatten::{flatten, MdxAllRoutes, MdxNode, RouteNode};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use scan::{page_slug, scan_docs, ScanError};
pub use tree::{build_route_tree, RouteError};
