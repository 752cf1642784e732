// ─── Babric Meta Core ───
// Version metadata aggregation and launcher profile synthesis.
//
// Architecture:
//   core/
//     maven/    — Maven coordinates + maven-metadata.xml version listings
//     manifest/ — Game-version manifest + per-version upstream documents
//     database/ — Version aggregation, snapshot model, atomic snapshot store
//     profile/  — Launch profile synthesis + zip packaging
//
// The HTTP endpoint layer and the periodic regeneration driver live outside
// this crate; they consume the snapshot store and the profile builder.

pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod manifest;
pub mod maven;
pub mod profile;
