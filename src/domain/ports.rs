use crate::domain::model::{Grid, ValidationOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn grid_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn workers(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Grid>;
    async fn validate(&self, grid: Grid) -> Result<ValidationOutcome>;
    async fn report(&self, outcome: &ValidationOutcome) -> Result<String>;
}
