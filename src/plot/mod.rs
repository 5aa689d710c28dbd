// Chart construction — geometry first, pixels second.
//
// `layout` turns the cluster tree and coverage rows into backend-agnostic
// geometry (segments, bands, bar positions); `render` draws that geometry
// with plotters. Keeping the two apart means every coordinate decision is
// testable without a bitmap.

pub mod layout;
pub mod render;
