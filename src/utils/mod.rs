pub mod geo;
pub mod jwt;
pub mod pagination;
pub mod sort;
