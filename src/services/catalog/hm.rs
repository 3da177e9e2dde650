//! H&M product listings via RapidAPI
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::ProductPage,
    services::catalog::{validate_listing, ProductCatalog},
};

const PRODUCT_CACHE_TTL: u64 = 3600; // 1 hour
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const LIST_PATH: &str = "/products/v2/list";
const SORT_ORDER: &str = "RELEVANCE";

#[derive(Clone)]
pub struct HmCatalog {
    http_client: HttpClient,
    api_key: String,
    api_host: String,
    base_url: String,
    country: String,
    lang: String,
    cache: Cache,
}

impl HmCatalog {
    pub fn new(
        cache: Cache,
        api_key: String,
        api_host: String,
        country: String,
        lang: String,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = format!("https://{}", api_host);

        Ok(Self {
            http_client,
            api_key,
            api_host,
            base_url,
            country,
            lang,
            cache,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, LIST_PATH)
    }

    fn query_params(&self, category: &str, page: u32, size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("country", self.country.clone()),
            ("lang", self.lang.clone()),
            ("page", page.to_string()),
            ("pageSize", size.to_string()),
            ("categoryId", category.to_string()),
            ("sort", SORT_ORDER.to_string()),
        ]
    }
}

#[async_trait::async_trait]
impl ProductCatalog for HmCatalog {
    async fn list_products(
        &self,
        category: &str,
        page: u32,
        size: u32,
    ) -> AppResult<ProductPage> {
        validate_listing(category, size)?;
        let category = category.trim();

        cached!(
            self.cache,
            CacheKey::Products {
                category: category.to_string(),
                page,
                size,
            },
            PRODUCT_CACHE_TTL,
            async move {
                let response = self
                    .http_client
                    .get(self.endpoint())
                    .header("X-RapidAPI-Key", &self.api_key)
                    .header("X-RapidAPI-Host", &self.api_host)
                    .query(&self.query_params(category, page, size))
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "Catalog returned status {}: {}",
                        status, body
                    )));
                }

                let listing: ProductPage = response.json().await?;

                tracing::info!(
                    category = %category,
                    page = page,
                    results = listing.results.len(),
                    catalog = "hm",
                    "Product listing fetched"
                );

                Ok::<_, AppError>(listing)
            }
        )
    }

    fn clone_for_task(&self) -> Box<dyn ProductCatalog> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "hm"
    }
}
