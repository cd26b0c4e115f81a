pub(crate) mod alphabet;
pub(crate) mod intro;
pub(crate) mod logo;
pub(crate) mod promo;
