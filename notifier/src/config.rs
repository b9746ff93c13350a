/// How observers are re-attached when a document becomes current
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttachPolicy {
    /// Attach every time, relying on the host to ignore repeated attachment. Required on hosts that
    /// reuse the same document object for a newly loaded document.
    #[default]
    Always,
    /// Skip subjects the observer is already recorded against
    SkipRecorded,
}

/// What `remove_observer` does with an observer that is not registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Fail with `NotRegistered`
    #[default]
    Strict,
    /// Do nothing
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    pub attach_policy: AttachPolicy,
    pub removal_policy: RemovalPolicy,
    /// Drop subjects of closed documents at the start of every lifecycle event
    pub purge_on_lifecycle: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self { Self { attach_policy: AttachPolicy::default(), removal_policy: RemovalPolicy::default(), purge_on_lifecycle: true } }
}

impl NotifierConfig {
    pub fn new() -> Self { Self::default() }

    pub fn attach_policy(mut self, policy: AttachPolicy) -> Self {
        self.attach_policy = policy;
        self
    }

    pub fn removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }

    pub fn purge_on_lifecycle(mut self, purge: bool) -> Self {
        self.purge_on_lifecycle = purge;
        self
    }
}
