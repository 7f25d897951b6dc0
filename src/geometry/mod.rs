pub mod containment;

pub use containment::contains;
