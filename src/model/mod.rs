//! # Link Graph Model
//!
//! Plain data shared by the fetchers, the search engine and the renderers.
//!
//! Design rule: this module is pure data with no I/O and no async.

pub mod title;
pub mod link;
pub mod path;
pub mod graph;
pub mod frontier;

pub use title::Title;
pub use link::LinkDirection;
pub use path::Path;
pub use graph::{Edge, LinkGraph, NodeRole};
pub use frontier::{Frontier, PathMap};
