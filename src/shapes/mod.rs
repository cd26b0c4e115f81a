pub(crate) mod gear;
pub(crate) mod logo;
