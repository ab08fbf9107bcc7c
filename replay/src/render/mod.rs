pub mod svg;

pub use svg::SvgBackend;
