use crate::modules::planning::core::ports::DirectoryReader;
use crate::modules::planning::core::schedule_resolver::{ScheduleResolver, ScheduleSubject};
use crate::modules::planning::core::scheduling::Scheduling;
use crate::modules::planning::use_cases::errors::ForecastQueryError;
use std::sync::Arc;

pub struct ResolveScheduleHandler<TDirectory>
where
    TDirectory: DirectoryReader + Send + Sync + 'static,
{
    directory: Arc<TDirectory>,
    resolver: ScheduleResolver,
}

impl<TDirectory> ResolveScheduleHandler<TDirectory>
where
    TDirectory: DirectoryReader + Send + Sync + 'static,
{
    pub fn new(directory: Arc<TDirectory>) -> Self {
        Self {
            directory,
            resolver: ScheduleResolver::new(),
        }
    }

    pub async fn handle(&self, subject: ScheduleSubject) -> Result<Scheduling, ForecastQueryError> {
        let directory = self.directory.snapshot().await?;
        Ok(self.resolver.resolve(&directory, subject)?)
    }
}
