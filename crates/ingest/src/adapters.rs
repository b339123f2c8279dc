mod gbooks_source;

pub use gbooks_source::GbooksSource;
