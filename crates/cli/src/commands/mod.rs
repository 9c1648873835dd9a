pub(crate) mod backup;
pub(crate) mod counter;
pub(crate) mod image;
pub(crate) mod serve;
