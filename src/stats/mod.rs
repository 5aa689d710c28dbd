// Topic statistics — correlation, hierarchical clustering, coverage means.

pub mod cluster;
pub mod correlation;
pub mod summary;
