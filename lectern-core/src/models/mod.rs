mod chunk;
mod search_result;
mod triplet;

pub use chunk::Chunk;
pub use search_result::{GraphHit, HybridResult, VectorHit};
pub use triplet::{RelationEdge, Triplet};
