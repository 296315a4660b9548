use crate::error::StoreError;
use crate::etcd::EtcdClient;
use etcd_client::{Client, ConnectOptions};
use private::Sealed;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Default limit for establishing the connection.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
struct EtcdConfig {
    dial_timeout: Duration,
    request_timeout: Option<Duration>,
    credentials: Option<(String, String)>,
}

impl fmt::Debug for EtcdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtcdConfig")
            .field("dial_timeout", &self.dial_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("user", &self.credentials.as_ref().map(|(user, _)| user))
            .finish_non_exhaustive()
    }
}

impl Default for EtcdConfig {
    fn default() -> Self {
        Self { dial_timeout: DEFAULT_DIAL_TIMEOUT, request_timeout: None, credentials: None }
    }
}

#[derive(Debug, Default)]
pub struct NoEndpoints;
#[derive(Debug)]
pub struct WithEndpoints(Vec<String>);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoEndpoints {}
impl Sealed for WithEndpoints {}

/// Entry point for store connections.
#[derive(Debug, Clone, Copy)]
pub struct Store;

impl Store {
    /// Starts configuring an etcd v3 connection.
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), cfgsync_store::StoreError> {
    /// use std::time::Duration;
    ///
    /// let client = cfgsync_store::Store::etcd()
    ///     .endpoints(["http://127.0.0.1:2379"])
    ///     .dial_timeout(Duration::from_secs(5))
    ///     .connect()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use = "Creates a new etcd builder with default configuration"]
    pub fn etcd() -> EtcdBuilder {
        EtcdBuilder::default()
    }
}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct EtcdBuilder<S: Sealed = NoEndpoints> {
    state: S,
    config: EtcdConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> EtcdBuilder<S> {
    /// Upper bound for establishing the connection. Defaults to 15 seconds.
    #[must_use = "Sets the dial timeout for the etcd client"]
    pub const fn dial_timeout(mut self, timeout: Duration) -> Self {
        self.config.dial_timeout = timeout;
        self
    }

    /// Upper bound for every individual request. Unbounded by default.
    #[must_use = "Sets the request timeout for the etcd client"]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// Authenticates with etcd user credentials.
    #[must_use = "Sets the credentials for the etcd client"]
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some((user.into(), password.into()));
        self
    }

    fn transition<N: Sealed>(self, state: N) -> EtcdBuilder<N> {
        EtcdBuilder { state, config: self.config }
    }
}

impl EtcdBuilder<NoEndpoints> {
    /// Sets the cluster endpoints, e.g. `http://10.0.0.1:2379`.
    #[must_use = "Sets the endpoints for the etcd client"]
    pub fn endpoints<I, E>(self, endpoints: I) -> EtcdBuilder<WithEndpoints>
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.transition(WithEndpoints(endpoints.into_iter().map(Into::into).collect()))
    }
}

impl EtcdBuilder<WithEndpoints> {
    /// Dials the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if no usable endpoint was given.
    /// Returns [`StoreError::Unavailable`] if the connection fails or the dial timeout elapses.
    pub async fn connect(self) -> Result<EtcdClient, StoreError> {
        let endpoints: Vec<String> =
            self.state.0.iter().map(|e| e.trim().to_owned()).filter(|e| !e.is_empty()).collect();

        if endpoints.is_empty() {
            return Err(StoreError::Configuration {
                message: "At least one endpoint is required".into(),
                context: None,
            });
        }

        let dial_timeout = self.config.dial_timeout;
        let mut options = ConnectOptions::new().with_connect_timeout(dial_timeout);
        if let Some(timeout) = self.config.request_timeout {
            options = options.with_timeout(timeout);
        }
        if let Some((user, password)) = self.config.credentials {
            options = options.with_user(user, password);
        }

        let client = tokio::time::timeout(dial_timeout, Client::connect(&endpoints, Some(options)))
            .await
            .map_err(|_| StoreError::Unavailable {
                message: format!("Dial timed out after {}s", dial_timeout.as_secs_f32()).into(),
                context: Some(endpoints.join(",").into()),
            })?
            .map_err(|e| StoreError::unavailable(e, endpoints.join(",")))?;

        info!(endpoints = ?endpoints, "Connected to etcd");

        Ok(EtcdClient::new(client.kv_client(), endpoints))
    }
}
