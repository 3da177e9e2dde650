//! Product catalog collaborator
//!
//! Recommendations are enriched with real listings from an external catalog.
//! The stylist never depends on it; handlers call it after a recommendation is
//! produced and degrade to an empty product list when it fails.
use std::sync::Arc;

use serde_json::Value;

use crate::{
    config::Config,
    db::Cache,
    error::{AppError, AppResult},
    models::ProductPage,
};

pub mod hm;

pub use hm::HmCatalog;

/// Upper bound on products attached to a quiz response
pub const MAX_PRODUCTS: usize = 12;

/// Upper bound on categories queried for one response
pub const MAX_CATEGORIES: usize = 3;

/// Largest page a caller may ask a catalog for
pub const MAX_PAGE_SIZE: u32 = 100;

const FORMAL_CATEGORIES: [&str; 3] = ["men_blazerssuits", "women_blazerssuits", "men_trousers"];
const CASUAL_CATEGORIES: [&str; 3] = ["men_jeans", "women_jeans", "men_tshirtstanks"];
const GENERAL_CATEGORIES: [&str; 2] = ["men_clothing", "women_clothing"];

/// Trait for product listing sources
#[async_trait::async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Lists one page of products in a catalog category
    async fn list_products(&self, category: &str, page: u32, size: u32)
        -> AppResult<ProductPage>;

    /// First page of every category, fetched in parallel
    ///
    /// Pages come back in category order. Failed categories are logged and
    /// skipped; only a batch where every category failed is an error.
    async fn list_products_batch(
        &self,
        categories: Vec<String>,
        size: u32,
    ) -> AppResult<Vec<ProductPage>> {
        let mut tasks = Vec::new();

        for category in categories {
            let catalog = self.clone_for_task();
            let task = tokio::spawn(async move {
                let page = catalog.list_products(&category, 0, size).await;
                (category, page)
            });
            tasks.push(task);
        }

        let mut pages = Vec::new();
        let mut failures = 0usize;

        for task in tasks {
            match task.await {
                Ok((_, Ok(page))) => pages.push(page),
                Ok((category, Err(e))) => {
                    tracing::error!(error = %e, category = %category, "Product listing failed");
                    failures += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            tracing::warn!(
                success_count = pages.len(),
                error_count = failures,
                catalog = self.name(),
                "Partial product listing failure"
            );
        }

        if pages.is_empty() && failures > 0 {
            return Err(AppError::ExternalApi(
                "Failed to list products for any category".to_string(),
            ));
        }

        Ok(pages)
    }

    /// Clone the catalog so it can move into a spawned task
    fn clone_for_task(&self) -> Box<dyn ProductCatalog>;

    /// Catalog name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the H&M catalog when a RapidAPI key is configured
pub fn from_config(config: &Config, cache: Cache) -> AppResult<Option<Arc<dyn ProductCatalog>>> {
    let Some(api_key) = config
        .rapidapi_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
    else {
        tracing::info!("No RAPIDAPI_KEY configured, product enrichment disabled");
        return Ok(None);
    };

    let catalog = HmCatalog::new(
        cache,
        api_key.to_string(),
        config.rapidapi_host.clone(),
        config.hm_country.clone(),
        config.hm_lang.clone(),
    )?;

    tracing::info!(host = %config.rapidapi_host, "H&M product catalog enabled");
    Ok(Some(Arc::new(catalog)))
}

/// Rejects an empty category or a page size outside 1..=[`MAX_PAGE_SIZE`]
pub fn validate_listing(category: &str, size: u32) -> AppResult<()> {
    if category.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Product category cannot be empty".to_string(),
        ));
    }
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(AppError::InvalidInput(format!(
            "Page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(())
}

/// Catalog categories matching the requested occasions
///
/// Formal wear wins over casual when both are asked for. Matching ignores case.
pub fn categories_for(occasions: &[String]) -> Vec<String> {
    let asked_for = |wanted: &[&str]| {
        occasions
            .iter()
            .any(|o| wanted.iter().any(|w| o.trim().eq_ignore_ascii_case(w)))
    };

    let categories: &[&str] = if asked_for(&["work", "formal"]) {
        &FORMAL_CATEGORIES
    } else if asked_for(&["casual"]) {
        &CASUAL_CATEGORIES
    } else {
        &GENERAL_CATEGORIES
    };

    categories
        .iter()
        .take(MAX_CATEGORIES)
        .map(|c| c.to_string())
        .collect()
}

/// Products to show next to a recommendation
///
/// Concatenates the first page of each selected category in category order and
/// keeps at most [`MAX_PRODUCTS`]. Any catalog failure yields an empty list.
pub async fn recommended_products(catalog: &dyn ProductCatalog, occasions: &[String]) -> Vec<Value> {
    let categories = categories_for(occasions);

    let pages = match catalog
        .list_products_batch(categories.clone(), MAX_PRODUCTS as u32)
        .await
    {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!(error = %e, catalog = catalog.name(), "Product enrichment skipped");
            return Vec::new();
        }
    };

    let products: Vec<Value> = pages
        .into_iter()
        .flat_map(|page| page.results)
        .take(MAX_PRODUCTS)
        .collect();

    tracing::debug!(
        categories = ?categories,
        products = products.len(),
        "Product enrichment completed"
    );

    products
}
