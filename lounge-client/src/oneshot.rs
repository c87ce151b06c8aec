// lounge-client/src/oneshot.rs
// Oneshot HTTP 客户端 - 内存通信

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

use crate::http::{HttpClient, error_from_body};
use crate::{ClientError, ClientResult};

/// 进程内客户端: 每个请求直接交给服务端 Router 处理, 不经过 socket。
/// 前台终端与服务端同进程部署时使用, 集成测试也靠它驱动。
///
/// ```ignore
/// let router = lounge_server::api::build_app(state);
/// let client = LoungeClient::new(OneshotHttpClient::new(router));
/// let menu = client.menu_items(&MenuQuery::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Arc<RwLock<Option<String>>>,
    /// Used only to encode query strings
    encoder: reqwest::Client,
}

impl OneshotHttpClient {
    /// `router` must already have its state attached
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: Arc::new(RwLock::new(None)),
            encoder: reqwest::Client::new(),
        }
    }

    fn build(&self, method: Method, uri: &str, body: Option<Vec<u8>>) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = self.token.read().as_deref() {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(bytes) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(bytes)),
            None => builder.body(Body::empty()),
        };
        request.map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    fn build_json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> ClientResult<Request<Body>> {
        let bytes = serde_json::to_vec(body)?;
        self.build(method, path, Some(bytes))
    }

    /// Path plus the url-encoded query, as reqwest would send it
    fn with_query<Q: Serialize>(&self, path: &str, query: &Q) -> ClientResult<String> {
        let request = self
            .encoder
            .get(format!("http://in-process{}", path))
            .query(query)
            .build()?;
        let url = request.url();
        Ok(match url.query() {
            Some(q) if !q.is_empty() => format!("{}?{}", url.path(), q),
            _ => url.path().to_string(),
        })
    }

    /// 执行请求并处理响应
    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(error_from_body(
                status,
                String::from_utf8_lossy(&body_bytes).into_owned(),
            ));
        }

        serde_json::from_slice(&body_bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build(Method::GET, path, None)?;
        self.execute(request).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let uri = self.with_query(path, query)?;
        let request = self.build(Method::GET, &uri, None)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_json(Method::POST, path, body)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_json(Method::PUT, path, body)?;
        self.execute(request).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_json(Method::PATCH, path, body)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build(Method::DELETE, path, None)?;
        self.execute(request).await
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }
}
