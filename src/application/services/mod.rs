mod bundle_service;
mod track_service;

pub use bundle_service::{BundleError, BundleService, StemSelection};
pub use track_service::{TrackError, TrackService};
