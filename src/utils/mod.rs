// Utility modules: distances, map loading, permutation search support and rendering

pub mod cancel;
pub mod distance;
pub mod init_map;
pub mod permutations;
pub mod visualize;
