//! Key helpers
//!
//! Colon-delimited key builders shared by route handlers and the preloader,
//! so both sides address the same entries.

#[inline]
pub fn user_key(facet: &str, user_id: u64) -> String {
    format!("user:{}:{}", facet, user_id)
}

#[inline]
pub fn product_key(facet: &str, product_id: u64) -> String {
    format!("product:{}:{}", facet, product_id)
}

#[inline]
pub fn global_key(name: &str) -> String {
    format!("global:{}", name)
}

#[inline]
pub fn massive_key(index: usize) -> String {
    format!("massive:item:{}", index)
}
