use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        let pool = crate::db::create_pool(&config.database_url).await?;
        let orm = crate::db::create_orm_conn(&config.database_url).await?;
        Ok(Self {
            pool,
            orm,
            config: Arc::new(config),
        })
    }
}
