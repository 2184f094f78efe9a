//! Service layer: the fetch-or-serve orchestration over cache and upstream.

pub mod rates_service;
pub use rates_service::RatesService;
