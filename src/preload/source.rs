//! Preload sources
//!
//! What the preloader asks for, and the trait the backing data services
//! implement to answer it.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::cache::keys;
use crate::preload::catalog::{self, MassiveItem};

// == Preload Request ==
/// One value the preloader wants in the cache.
#[derive(Debug, Clone)]
pub enum PreloadRequest {
    /// One facet of a user (profile, cart, ...)
    UserFacet { user_id: u64, facet: &'static str },
    /// One facet of a product (data, reviews, variants)
    ProductFacet { product_id: u64, facet: &'static str },
    /// A site-wide aggregate (trending, featured, ...)
    Global { name: &'static str },
    /// A generically numbered key of the massive batch
    Generic(MassiveItem),
}

impl PreloadRequest {
    pub fn key(&self) -> String {
        match self {
            Self::UserFacet { user_id, facet } => keys::user_key(facet, *user_id),
            Self::ProductFacet { product_id, facet } => keys::product_key(facet, *product_id),
            Self::Global { name } => keys::global_key(name),
            Self::Generic(item) => keys::massive_key(item.index),
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::UserFacet { .. } => "users",
            Self::ProductFacet { .. } => "products",
            Self::Global { .. } => "global_aggregates",
            Self::Generic(item) => item.category,
        }
    }

    pub fn ttl(&self) -> Duration {
        match self {
            Self::UserFacet { .. } => catalog::USER_TTL,
            Self::ProductFacet { .. } => catalog::PRODUCT_TTL,
            Self::Global { .. } => catalog::GLOBAL_TTL,
            Self::Generic(item) => item.ttl(),
        }
    }
}

// == Preload Source ==
/// Produces the value for a preload request.
///
/// Implemented by whatever fronts the real data services; errors are logged
/// by the preloader and never stop a phase.
#[async_trait]
pub trait PreloadSource: Send + Sync {
    async fn load(&self, request: &PreloadRequest) -> anyhow::Result<Value>;
}

/// Source that answers every request with a placeholder document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSource;

#[async_trait]
impl PreloadSource for PlaceholderSource {
    async fn load(&self, request: &PreloadRequest) -> anyhow::Result<Value> {
        let value = match request {
            PreloadRequest::UserFacet { user_id, facet } => {
                json!({ "user_id": user_id, "facet": facet, "preloaded": true })
            }
            PreloadRequest::ProductFacet { product_id, facet } => {
                json!({ "product_id": product_id, "facet": facet, "preloaded": true })
            }
            PreloadRequest::Global { name } => json!({ "aggregate": name, "preloaded": true }),
            PreloadRequest::Generic(item) => json!({
                "id": item.index,
                "category": item.category,
                "priority": item.priority,
                "preloaded": true,
            }),
        };

        Ok(value)
    }
}
