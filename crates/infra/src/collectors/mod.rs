//! Concrete [`pulsearc_core::Collector`] implementations (§4.1).

pub mod google;
pub mod web;
pub mod yelp;

pub use google::GoogleCollector;
pub use web::WebScraperCollector;
pub use yelp::YelpCollector;
