pub(crate) mod blocks;
pub(crate) mod registry;
pub(crate) mod timeline;
pub(crate) mod tree;
