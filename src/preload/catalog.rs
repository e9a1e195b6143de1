//! Preload catalog
//!
//! The fixed key lists warmed at startup and the TTL each group gets.

use std::time::Duration;

use serde_json::{json, Value};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;

pub const USER_FACETS: &[&str] = &[
    "complete",
    "profile",
    "notifications",
    "messages",
    "cart",
    "orders",
];
pub const PRODUCT_FACETS: &[&str] = &["data", "reviews", "variants"];
pub const GLOBAL_AGGREGATES: &[&str] = &[
    "statistics",
    "categories",
    "vendors",
    "trending",
    "popular",
    "featured",
];

pub const USER_TTL: Duration = Duration::from_secs(10 * MINUTE);
pub const PRODUCT_TTL: Duration = Duration::from_secs(30 * MINUTE);
pub const GLOBAL_TTL: Duration = Duration::from_secs(15 * MINUTE);
pub const DATABASE_BYPASS_TTL: Duration = Duration::from_secs(12 * HOUR);

// == Static Items ==
/// A critical-path or static key populated with a literal placeholder.
#[derive(Debug)]
pub struct StaticItem {
    pub key: &'static str,
    pub category: &'static str,
    pub ttl: Duration,
    pub placeholder: fn() -> Value,
}

const fn item(
    key: &'static str,
    category: &'static str,
    ttl_secs: u64,
    placeholder: fn() -> Value,
) -> StaticItem {
    StaticItem {
        key,
        category,
        ttl: Duration::from_secs(ttl_secs),
        placeholder,
    }
}

/// Hot keys read on nearly every request. Loaded sequentially, in order.
pub static ULTRA_HIGH_FREQUENCY: &[StaticItem] = &[
    item("auth:active_sessions:count", "ultra_critical", 5 * MINUTE, || json!({ "count": 0 })),
    item("auth:online_users:count", "ultra_critical", 5 * MINUTE, || json!({ "count": 0 })),
    item("nav:main_menu", "navigation", HOUR, || json!({ "items": [] })),
    item("nav:category_menu", "navigation", HOUR, || json!({ "items": [] })),
    item("nav:footer_links", "navigation", 24 * HOUR, || json!({ "links": [] })),
    item("search:autocomplete:popular", "search", 15 * MINUTE, || json!({ "suggestions": [] })),
    item("search:trending_terms", "search", 15 * MINUTE, || json!({ "terms": [] })),
    item("live:viewer_count", "live", 5 * MINUTE, || json!({ "viewers": 0 })),
    item("live:active_streams", "live", 5 * MINUTE, || json!({ "streams": [] })),
    item("system:config", "system", 24 * HOUR, || json!({ "version": 1 })),
    item("system:feature_flags", "system", HOUR, || json!({ "flags": {} })),
    item("system:maintenance_status", "system", 10 * MINUTE, || json!({ "maintenance": false })),
];

/// Static and precomputed data that rarely changes.
pub static DATABASE_BYPASS: &[StaticItem] = &[
    item("static:shipping_options", "static", 12 * HOUR, || {
        json!({ "options": ["standard", "express", "pickup"] })
    }),
    item("static:payment_methods", "static", 12 * HOUR, || {
        json!({ "methods": ["card", "bank_transfer", "wallet"] })
    }),
    item("static:currencies", "static", 12 * HOUR, || {
        json!({ "currencies": ["USD", "EUR", "GBP"] })
    }),
    item("static:countries", "static", 12 * HOUR, || json!({ "countries": [] })),
    item("static:vendor_tiers", "static", 12 * HOUR, || {
        json!({ "tiers": ["basic", "pro", "enterprise"] })
    }),
    item("analytics:daily_snapshot", "analytics", 12 * HOUR, || {
        json!({ "orders": 0, "revenue": 0 })
    }),
    item("analytics:sales_aggregation", "analytics", 12 * HOUR, || json!({ "totals": {} })),
    item("analytics:category_performance", "analytics", 12 * HOUR, || json!({ "categories": [] })),
    item("analytics:vendor_rankings", "analytics", 12 * HOUR, || json!({ "vendors": [] })),
    item("analytics:conversion_funnel", "analytics", 12 * HOUR, || json!({ "stages": [] })),
];

// == Massive Batch ==
const MASSIVE_CATEGORIES: [&str; 4] = ["catalog", "engagement", "commerce", "content"];

/// One generically numbered key of the massive batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MassiveItem {
    pub index: usize,
    pub category: &'static str,
    pub priority: &'static str,
}

impl MassiveItem {
    /// Derives category and priority from the item's position.
    pub fn new(index: usize) -> Self {
        let priority = match index % 3 {
            0 => "high",
            1 => "medium",
            _ => "low",
        };

        Self {
            index,
            category: MASSIVE_CATEGORIES[index % MASSIVE_CATEGORIES.len()],
            priority,
        }
    }

    pub fn ttl(&self) -> Duration {
        match self.priority {
            "high" => Duration::from_secs(HOUR),
            "medium" => Duration::from_secs(30 * MINUTE),
            _ => Duration::from_secs(15 * MINUTE),
        }
    }
}
