/// Commands that can be sent to the sync service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCommand {
    /// Stop the service once the header in flight, if any, has been processed.
    Shutdown,
}
