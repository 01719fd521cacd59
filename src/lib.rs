//! `pathgear`: a lazy graph-traversal engine.
//!
//! Graphs are never materialized. Callers supply successor functions
//! (`next_vertices` / `next_edges` / `next_labeled_edges` / weighted
//! variants) that are called on demand as each strategy explores outward
//! from its start vertices; a strategy is an [`Iterator`] over the vertices
//! it reports, so any amount of `std::iter` composition (`take`, `take_while`,
//! `filter`, the adapters in [`search::filters`]) works against it directly.
//!
//! Grounded on `nographs` (the pure-Python graph library this engine
//! generalizes the strategy set of) and, for the ambient Rust idiom — error
//! enums, gear/collection abstraction, module layout — on
//! `routee-compass-core::algorithm::search`.
//!
//! # Modules
//!
//! - [`search`]: the traversal strategies (BFS, DFS, Neighbors-Then-Depth,
//!   Topological Sort, Dijkstra, A*, MST, bidirectional BFS, bidirectional
//!   Dijkstra) and the filter combinators layered on top of them.
//! - [`gear`]: pluggable storage factories (`HashGear`, `DenseGear`) that
//!   determine which concrete collections a strategy's per-run state uses.
//! - [`paths`]: predecessor-chain path stores, shared by every strategy that
//!   supports `build_paths`.
//! - [`weight`]: the `Weight` trait every weighted strategy's edge-weight
//!   type must implement.
//! - [`error`]: the `thiserror` error enums returned by `start_from` and by
//!   iteration.
//!
//! # Example
//!
//! ```
//! use pathgear::gear::hash::HashGear;
//! use pathgear::search::bfs::{Bfs, BfsOptions};
//!
//! let gear = HashGear::new();
//! let next = |v: &i32| -> Vec<i32> { if *v < 3 { vec![*v + 1] } else { vec![] } };
//! let bfs: Bfs<i32, (), HashGear> = Bfs::start_from(
//!     &gear, Some(0), None, Some(Box::new(next)), None, None, BfsOptions::default(),
//! )
//! .unwrap();
//! let reported: Vec<i32> = bfs.map(|r| r.unwrap()).collect();
//! assert_eq!(reported, vec![1, 2, 3]);
//! ```

pub mod error;
pub mod gear;
pub mod paths;
pub mod search;
pub mod util;
pub mod weight;

pub use gear::hash::hash_gear;
