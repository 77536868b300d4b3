use alloy_rpc_types_eth::{Filter, Log};
use futures::{stream::BoxStream, StreamExt};
use parking_lot::Mutex;
use rollup_node_providers::{L1ProviderError, LogFilterer};
use std::{collections::VecDeque, sync::Arc};

/// A mock implementation of the [`LogFilterer`] trait.
///
/// Each call to [`LogFilterer::filter_logs`] returns the next scripted response, or no logs once
/// the responses are exhausted. The filters of all the calls are recorded.
#[derive(Debug, Clone, Default)]
pub struct MockLogFilterer {
    responses: Arc<Mutex<VecDeque<Result<Vec<Log>, String>>>>,
    filters: Arc<Mutex<Vec<Filter>>>,
}

impl MockLogFilterer {
    /// Returns a new [`MockLogFilterer`] returning the provided logs, one entry per call.
    pub fn new(responses: Vec<Vec<Log>>) -> Self {
        let filterer = Self::default();
        for logs in responses {
            filterer.push_logs(logs);
        }
        filterer
    }

    /// Scripts the logs returned by the next unscripted call.
    pub fn push_logs(&self, logs: Vec<Log>) {
        self.responses.lock().push_back(Ok(logs));
    }

    /// Scripts a failure for the next unscripted call.
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses.lock().push_back(Err(message.into()));
    }

    /// Returns the filters of all the calls so far.
    pub fn filters(&self) -> Vec<Filter> {
        self.filters.lock().clone()
    }
}

#[async_trait::async_trait]
impl LogFilterer for MockLogFilterer {
    async fn filter_logs(&self, filter: &Filter) -> Result<Vec<Log>, L1ProviderError> {
        self.filters.lock().push(filter.clone());
        match self.responses.lock().pop_front() {
            Some(Ok(logs)) => Ok(logs),
            Some(Err(message)) => Err(L1ProviderError::UnexpectedResponse(message)),
            None => Ok(vec![]),
        }
    }

    async fn subscribe_filter_logs(
        &self,
        _filter: &Filter,
    ) -> Result<BoxStream<'static, Log>, L1ProviderError> {
        let logs: Vec<_> = self
            .responses
            .lock()
            .drain(..)
            .filter_map(Result::ok)
            .flatten()
            .collect();
        Ok(futures::stream::iter(logs).boxed())
    }
}
