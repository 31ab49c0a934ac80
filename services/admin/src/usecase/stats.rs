use crate::domain::repository::StatsRepository;
use crate::domain::types::PlatformStats;
use crate::error::AdminServiceError;

pub struct PlatformStatsUseCase<S: StatsRepository> {
    pub stats: S,
}

impl<S: StatsRepository> PlatformStatsUseCase<S> {
    pub async fn execute(&self) -> Result<PlatformStats, AdminServiceError> {
        self.stats.platform_stats().await
    }
}
