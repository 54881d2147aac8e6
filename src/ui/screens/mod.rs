pub mod explorer;

pub use explorer::run_explorer;
