pub mod lines;
pub mod region;

pub use lines::cluster_lines;
pub use region::{prepare_image, split_columns, ColumnRegion, ColumnSplit};
