mod exa;

pub use exa::ExaSearchProvider;
