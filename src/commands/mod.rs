pub mod buckets;
pub mod build;
pub mod search;
pub mod sectors;
pub mod status;
