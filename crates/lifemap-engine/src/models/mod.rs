pub mod mindmap;
pub mod node;

pub use mindmap::Mindmap;
pub use node::Node;
