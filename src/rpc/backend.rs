//! Backend services as traits, plus their gRPC implementations.
//!
//! The client facade talks to `dyn CredentialBackend` / `dyn TaskBackend`, so
//! the transport (tonic channel + retry decorator) stays swappable.
use std::time::Duration;

use async_trait::async_trait;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Response, Status};

use super::proto::{self, paths};
use super::retry::RetryPolicy;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait CredentialBackend: Send + Sync {
    async fn register(
        &self,
        req: proto::RegisterRequest,
    ) -> Result<proto::RegisterResponse, Status>;
    async fn login(&self, req: proto::LoginRequest) -> Result<proto::LoginResponse, Status>;
}

#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn create_task(&self, req: proto::CreateRequest)
    -> Result<proto::CreateResponse, Status>;
    async fn delete_task(&self, req: proto::DeleteRequest)
    -> Result<proto::DeleteResponse, Status>;
    async fn done_task(&self, req: proto::DoneRequest) -> Result<proto::DoneResponse, Status>;
    async fn get_all_tasks(
        &self,
        req: proto::GetAllRequest,
    ) -> Result<proto::GetAllResponse, Status>;
}

/// Accepts `host:port` as well as a full URI.
pub fn normalize_endpoint(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

/// One long-lived channel with the retry decorator attached.
///
/// `Channel` multiplexes concurrent calls, so clones share the connection.
#[derive(Clone, Debug)]
pub struct RetryingChannel {
    channel: Channel,
    retry: RetryPolicy,
}

impl RetryingChannel {
    pub async fn connect(addr: &str, retry: RetryPolicy) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(normalize_endpoint(addr))?
            .connect_timeout(CONNECT_TIMEOUT)
            .connect()
            .await?;

        Ok(Self { channel, retry })
    }

    pub async fn unary<Req, Resp>(&self, path: &'static str, req: Req) -> Result<Resp, Status>
    where
        Req: prost::Message + Clone + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        // No grpc-timeout on the request: tonic would fail a slow attempt as
        // CANCELLED, so the retry decorator's timer is the only per-attempt bound.
        self.retry
            .run(path, || {
                let mut grpc = tonic::client::Grpc::new(self.channel.clone());
                let request = Request::new(req.clone());

                async move {
                    grpc.ready()
                        .await
                        .map_err(|e| Status::unavailable(format!("service was not ready: {e}")))?;

                    let codec = ProstCodec::<Req, Resp>::default();
                    grpc.unary(request, PathAndQuery::from_static(path), codec)
                        .await
                        .map(Response::into_inner)
                }
            })
            .await
    }
}

#[derive(Clone, Debug)]
pub struct GrpcCredentialBackend {
    rpc: RetryingChannel,
}

impl GrpcCredentialBackend {
    pub fn new(rpc: RetryingChannel) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl CredentialBackend for GrpcCredentialBackend {
    async fn register(
        &self,
        req: proto::RegisterRequest,
    ) -> Result<proto::RegisterResponse, Status> {
        self.rpc.unary(paths::REGISTER_USER, req).await
    }

    async fn login(&self, req: proto::LoginRequest) -> Result<proto::LoginResponse, Status> {
        self.rpc.unary(paths::LOGIN_USER, req).await
    }
}

#[derive(Clone, Debug)]
pub struct GrpcTaskBackend {
    rpc: RetryingChannel,
}

impl GrpcTaskBackend {
    pub fn new(rpc: RetryingChannel) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl TaskBackend for GrpcTaskBackend {
    async fn create_task(
        &self,
        req: proto::CreateRequest,
    ) -> Result<proto::CreateResponse, Status> {
        self.rpc.unary(paths::CREATE_TASK, req).await
    }

    async fn delete_task(
        &self,
        req: proto::DeleteRequest,
    ) -> Result<proto::DeleteResponse, Status> {
        self.rpc.unary(paths::DELETE_TASK, req).await
    }

    async fn done_task(&self, req: proto::DoneRequest) -> Result<proto::DoneResponse, Status> {
        self.rpc.unary(paths::DONE_TASK, req).await
    }

    async fn get_all_tasks(
        &self,
        req: proto::GetAllRequest,
    ) -> Result<proto::GetAllResponse, Status> {
        self.rpc.unary(paths::GET_ALL_TASK, req).await
    }
}
