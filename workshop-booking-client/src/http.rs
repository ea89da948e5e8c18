// https://github.com/hyperium/hyper/blob/master/examples/client.rs
// https://github.com/rustls/tokio-rustls/blob/main/examples/client.rs

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt as _, Full};
use hyper_util::rt::TokioIo;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::{debug, warn};
use url::{Host, Position, Url};
use workshop_booking_ranking::models::{NewWorkshop, UserId, Workshop, WorkshopId};

use crate::error::ServiceError;
use crate::service::WorkshopService;
use crate::session::Session;

/// `{ success, workshop }`, what the service answers on 2xx.
#[derive(Deserialize)]
struct Acknowledgement<T> {
    #[serde(default)]
    success: bool,
    workshop: Option<T>,
}

/// `{ msg }`, what the service answers otherwise.
#[derive(Deserialize)]
struct Rejection {
    msg: String,
}

/// Talks HTTP/1.1 to the workshop service, one connection per request.
#[derive(Clone)]
pub struct HttpWorkshopService {
    base: Url,
    host: String,
    port: u16,
    authority: String,
    tls: Option<TlsConnector>,
    authorization: Option<String>,
}

impl HttpWorkshopService {
    /// `base_url` is the workshop api root, e.g. `http://localhost:5000/api/workshops`.
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let base = Url::parse(base_url)?;
        let tls = match base.scheme() {
            "http" => None,
            "https" => {
                let mut root_cert_store = RootCertStore::empty();
                root_cert_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
                let config = ClientConfig::builder()
                    .with_root_certificates(root_cert_store)
                    .with_no_client_auth();
                Some(TlsConnector::from(Arc::new(config)))
            }
            other => return Err(ServiceError::UnsupportedScheme(other.to_owned())),
        };
        // Host::Ipv6 displays without the brackets the url carries
        let host = match base.host() {
            Some(Host::Domain(domain)) => domain.to_owned(),
            Some(Host::Ipv4(address)) => address.to_string(),
            Some(Host::Ipv6(address)) => address.to_string(),
            None => return Err(ServiceError::MissingHost(base_url.to_owned())),
        };
        let port = base
            .port_or_known_default()
            .unwrap_or(if tls.is_some() { 443 } else { 80 });
        let authority = base[Position::BeforeHost..Position::AfterPort].to_owned();
        Ok(Self {
            base,
            host,
            port,
            authority,
            tls,
            authorization: None,
        })
    }

    /// Sends the session token, if any, as `Authorization` header.
    #[must_use]
    pub fn with_session(self, session: &Session) -> Self {
        Self {
            authorization: session.token().map(ToOwned::to_owned),
            ..self
        }
    }

    /// Absolute path below the base url, every segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<String, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::UnsupportedScheme(self.base.scheme().to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.path().to_owned())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<Option<T>, ServiceError> {
        let path = self.endpoint(segments)?;
        let mut request = Request::builder()
            .method(method.clone())
            .uri(&path)
            .header(HOST, &self.authority);
        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization);
        }
        if body.is_some() {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        let request = request.body(Full::new(Bytes::from(body.unwrap_or_default())))?;

        debug!(%method, path, "sending request to workshop service");

        let stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        let (status, body) = if let Some(connector) = &self.tls {
            let server_name = ServerName::try_from(self.host.clone())?;
            let stream = connector.connect(server_name, stream).await?;
            exchange(TokioIo::new(stream), request).await?
        } else {
            exchange(TokioIo::new(stream), request).await?
        };

        debug!(%method, path, %status, "workshop service answered");

        if !status.is_success() {
            let message = serde_json::from_slice::<Rejection>(&body).map_or_else(
                |_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_owned()
                },
                |rejection| rejection.msg,
            );
            warn!(%method, path, %status, message, "workshop service rejected request");
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let acknowledgement: Acknowledgement<T> = serde_json::from_slice(&body)?;
        if !acknowledgement.success {
            return Err(ServiceError::Unsuccessful);
        }
        Ok(acknowledgement.workshop)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        payload: &impl Serialize,
    ) -> Result<Option<T>, ServiceError> {
        let body = serde_json::to_vec(payload)?;
        self.send(method, segments, Some(body)).await
    }
}

/// Decodes the workshops one at a time, a broken record only loses itself.
fn decode_workshops(records: Vec<Value>) -> Vec<Workshop> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("_id").cloned();
            serde_json::from_value(record)
                .map_err(|error| warn!(?id, %error, "skipping undecodable workshop"))
                .ok()
        })
        .collect()
}

async fn exchange<I>(
    io: I,
    request: Request<Full<Bytes>>,
) -> Result<(StatusCode, Bytes), ServiceError>
where
    I: hyper::rt::Read + hyper::rt::Write + Unpin + Send + 'static,
{
    let (mut sender, connection) = hyper::client::conn::http1::handshake(io).await?;
    tokio::spawn(async move {
        if let Err(error) = connection.await {
            debug!(%error, "workshop service connection failed");
        }
    });
    let response = sender.send_request(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    Ok((status, body))
}

#[async_trait]
impl WorkshopService for HttpWorkshopService {
    async fn fetch_all_workshops(&self) -> Result<Vec<Workshop>, ServiceError> {
        let records = self
            .send::<Vec<Value>>(Method::GET, &["all"], None)
            .await?
            .unwrap_or_default();
        Ok(decode_workshops(records))
    }

    async fn register_user(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<Workshop, ServiceError> {
        self.send(
            Method::PUT,
            &["register", workshop_id.0.as_str(), user_id.0.as_str()],
            None,
        )
        .await?
        .ok_or(ServiceError::MissingWorkshop)
    }

    async fn deregister_user(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<Option<Workshop>, ServiceError> {
        self.send(
            Method::PUT,
            &["deregister", workshop_id.0.as_str(), user_id.0.as_str()],
            None,
        )
        .await
    }

    async fn create_workshop(&self, workshop: &NewWorkshop) -> Result<(), ServiceError> {
        self.send_json::<IgnoredAny>(Method::POST, &["create"], workshop)
            .await?;
        Ok(())
    }

    async fn update_workshop(&self, workshop: &Workshop) -> Result<(), ServiceError> {
        self.send_json::<IgnoredAny>(Method::PUT, &["update"], workshop)
            .await?;
        Ok(())
    }

    async fn delete_workshop(&self, workshop_id: &WorkshopId) -> Result<(), ServiceError> {
        self.send::<IgnoredAny>(Method::DELETE, &["delete", workshop_id.0.as_str()], None)
            .await?;
        Ok(())
    }

    async fn remove_feedback(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<(), ServiceError> {
        self.send::<IgnoredAny>(
            Method::PUT,
            &["feedback", "remove", workshop_id.0.as_str(), user_id.0.as_str()],
            None,
        )
        .await?;
        Ok(())
    }
}
