pub mod memory;
pub mod registry;

pub use memory::{ChartEvent, MemoryPage};
pub use registry::WidgetRegistry;
