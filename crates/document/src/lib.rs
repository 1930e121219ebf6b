pub mod error;
pub mod events;
pub mod host;
pub mod node;
pub mod parse;
pub mod style;
pub mod tree;
pub mod write;

pub use error::*;
pub use events::{Handler, ListenerId, PointerEvent};
pub use host::MapDocument;
pub use node::*;
pub use tree::SvgDocument;
