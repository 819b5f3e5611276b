pub mod util;

pub use util::parse_categories;
