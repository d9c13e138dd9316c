//! Typed configuration for the audiophyte blog: site metadata, locale,
//! logo and social links, plus the few read-only rules the renderer derives
//! from them (post scheduling and pagination).
pub mod config;
pub mod pagination;
pub mod schedule;
pub mod types;
