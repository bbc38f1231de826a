//! # TUI Components
//!
//! All UI components for the playground. Every component is stateless: the
//! parent builds it from navigator snapshots each frame and renders it.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Counts, selection, status)
//! ├── stack_view.rs    (One column per active container)
//! ├── route_list.rs    (Logical route list)
//! └── mutation_log.rs  (Mutation history + describe_mutation)
//! ```

pub mod mutation_log;
pub mod route_list;
pub mod stack_view;
mod title_bar;

pub use mutation_log::MutationLog;
pub use route_list::RouteList;
pub use stack_view::{ContainerColumn, StackView};
pub use title_bar::TitleBar;
