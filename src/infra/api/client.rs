use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use mapping_hours::fetch::auth::ApiKey;
use mapping_hours::fetch::{BasicClient, HttpClient, fetch_all_pages};
use mapping_hours::mapping::types::{CourseMappingRecord, CourseMetadata};
use mapping_hours::parser::{courses_from_items, mappings_from_items};

use crate::infra::config::ApiConfig;
use crate::services::mapping_api::MappingApi;

/// [`MappingApi`] over the admin REST API.
pub struct RestApiClient {
    http: Box<dyn HttpClient>,
    config: ApiConfig,
}

impl RestApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let basic = BasicClient::with_timeout(config.timeout)?;
        let http: Box<dyn HttpClient> = match config.token.as_deref() {
            Some(token) => Box::new(ApiKey::bearer(basic, token)?),
            None => Box::new(basic),
        };
        Ok(Self { http, config })
    }
}

#[async_trait]
impl MappingApi for RestApiClient {
    async fn list_course_mappings(&self) -> Result<Vec<CourseMappingRecord>> {
        let items =
            fetch_all_pages(&self.http, &self.config.mappings_url(), self.config.page_size).await?;
        let records = mappings_from_items(&items);
        info!(received = items.len(), parsed = records.len(), "Course mappings fetched");
        Ok(records)
    }

    async fn list_courses(&self) -> Result<Vec<CourseMetadata>> {
        let items =
            fetch_all_pages(&self.http, &self.config.courses_url(), self.config.page_size).await?;
        let courses = courses_from_items(&items);
        info!(received = items.len(), parsed = courses.len(), "Courses fetched");
        Ok(courses)
    }
}
