//! reqwest-backed [`Backend`] implementation

use playtime_types::{RegisteredAccount, SearchResult, UserLibrary};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::backend::Backend;
use crate::config::BackendConfig;
use crate::error::{Error, Result};

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    steamid: &'a str,
}

/// Backend client
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Backend for BackendClient {
    async fn register(&self, steamid: &str) -> Result<RegisteredAccount> {
        let url = self.endpoint(&["register"])?;
        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .json(&RegisterRequest { steamid })
            .send()
            .await
            .map_err(Error::transport)?;
        read_json("register", response, StatusCode::CREATED).await
    }

    async fn user_lookup(&self, username: &str) -> Result<UserLibrary> {
        let url = self.endpoint(&["user", username])?;
        debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(Error::transport)?;
        read_json("user", response, StatusCode::OK).await
    }

    async fn search(&self, game: &str) -> Result<SearchResult> {
        let url = self.endpoint(&["search"])?;
        debug!(%url, game, "GET");
        let response = self
            .http
            .get(url)
            .query(&[("game", game)])
            .send()
            .await
            .map_err(Error::transport)?;
        read_json("search", response, StatusCode::OK).await
    }
}

/// Check the status, then decode the body. A wrong status keeps the body
/// text so callers can show the backend's own error message.
async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(Error::transport)?;
    debug!(endpoint, status = status.as_u16(), bytes = body.len(), "backend responded");

    if status != expected {
        return Err(Error::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendConfig::new(server.uri())).unwrap()
    }

    fn library_json() -> serde_json::Value {
        json!({
            "steamid": "76561197960287930",
            "profile_url": "https://steamcommunity.com/profiles/76561197960287930",
            "avatar_url": "https://avatars/alice.jpg",
            "games": {
                "Portal 2": {
                    "appid": 620,
                    "playtime_forever": 1260,
                    "store_url": "https://store.steampowered.com/app/620/",
                    "header_url": "https://cdn/620/header.jpg"
                },
                "Dota 2": {
                    "appid": 570,
                    "playtime_forever": 45,
                    "store_url": "https://store.steampowered.com/app/570/"
                }
            }
        })
    }

    #[test]
    fn test_new_rejects_garbage_url() {
        let err = BackendClient::new(&BackendConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_new_rejects_cannot_be_a_base_url() {
        let err = BackendClient::new(&BackendConfig::new("mailto:ops@example.com")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = BackendClient::new(&BackendConfig::new("http://localhost:5000/api/")).unwrap();
        let url = client.endpoint(&["user", "alice"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/user/alice");
    }

    #[test]
    fn test_endpoint_encodes_segment() {
        let client = BackendClient::new(&BackendConfig::default()).unwrap();
        let url = client.endpoint(&["user", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/user/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_register_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .and(body_json(json!({"steamid": "76561197960287930"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(library_json()))
            .expect(1)
            .mount(&server)
            .await;

        let account = client_for(&server)
            .register("76561197960287930")
            .await
            .unwrap();
        assert_eq!(account.steamid, "76561197960287930");
        assert_eq!(account.avatar_url, "https://avatars/alice.jpg");
    }

    #[tokio::test]
    async fn test_register_requires_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(library_json()))
            .mount(&server)
            .await;

        let err = client_for(&server).register("1").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_register_conflict_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"User already registered"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).register("1").await.unwrap_err();
        assert_eq!(
            err,
            Error::Status {
                status: 400,
                body: r#"{"error":"User already registered"}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_register_missing_field_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"steamid": "1"})))
            .mount(&server)
            .await;

        let err = client_for(&server).register("1").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_user_lookup_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(library_json()))
            .expect(1)
            .mount(&server)
            .await;

        let lib = client_for(&server).user_lookup("alice").await.unwrap();
        assert_eq!(lib.games.len(), 2);
        assert_eq!(lib.games["Portal 2"].playtime_forever, 1260);
        assert_eq!(lib.games["Dota 2"].header_url, "");
    }

    #[tokio::test]
    async fn test_user_lookup_encodes_username() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/big%20bob"))
            .respond_with(ResponseTemplate::new(200).set_body_json(library_json()))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).user_lookup("big bob").await.unwrap();
    }

    #[tokio::test]
    async fn test_user_lookup_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/ghost"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let err = client_for(&server).user_lookup("ghost").await.unwrap_err();
        assert_eq!(
            err,
            Error::Status {
                status: 500,
                body: "Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_user_lookup_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).user_lookup("alice").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_sends_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("game", "Half-Life 2 & Friends"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "img_icon_url": "https://icon",
                "header_url": "https://header",
                "users": [
                    {"username": "alice", "profile_url": "https://p/alice", "playtime": 300}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .search("Half-Life 2 & Friends")
            .await
            .unwrap();
        assert_eq!(result.users.len(), 1);
        assert_eq!(result.users[0].header_url, "");
        assert_eq!(result.header_url, "https://header");
    }

    #[tokio::test]
    async fn test_search_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error":"No users found for game 'X'"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).search("X").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(library_json())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = BackendConfig {
            base_url: server.uri(),
            timeout_secs: 1,
        };
        let err = BackendClient::new(&config)
            .unwrap()
            .user_lookup("slow")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind and drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = BackendClient::new(&BackendConfig::new(format!("http://127.0.0.1:{}", port))).unwrap();
        let err = client.user_lookup("alice").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
    }
}
