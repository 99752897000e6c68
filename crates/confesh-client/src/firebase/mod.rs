pub(crate) mod firestore;
pub(crate) mod identity_toolkit;

use crate::firebase::firestore::{Document, ListDocumentsResponse};
use crate::firebase::identity_toolkit::{AuthResponse, PasswordRequest, UpdateProfileRequest};
use crate::{ClientError, ClientResult, DocumentStore, IdentityHub, IdentityProvider};

use confesh_config::BackendConfig;
use confesh_core::{Confession, Credentials, Identity, NewConfession};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const PAGE_SIZE: &str = "300";

/// Managed backend reached over REST: Firestore for documents, Identity
/// Toolkit for accounts.
pub struct FirebaseBackend {
    api_key: String,
    documents_url: String,
    identity_url: String,
    client: ReqwestClient,
    hub: IdentityHub,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

impl FirebaseBackend {
    /// Create a new backend client from validated configuration.
    pub fn new(config: &BackendConfig) -> Self {
        let documents_url = format!(
            "{}/projects/{}/databases/{}/documents/{}",
            config.firestore_url.trim_end_matches('/'),
            config.project_id.as_deref().unwrap_or_default(),
            config.database,
            config.collection
        );

        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            documents_url,
            identity_url: config.identity_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
            hub: IdentityHub::new(),
        }
    }

    /// Collection URL every document call is built from.
    pub fn documents_url(&self) -> &str {
        &self.documents_url
    }

    fn parse_url(raw: &str) -> ClientResult<Url> {
        Url::parse(raw).map_err(|e| ClientError::decode(format!("invalid URL '{raw}': {e}")))
    }

    fn document_url(&self, id: &str) -> ClientResult<Url> {
        let mut url = Self::parse_url(&self.documents_url)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::decode("documents URL cannot be a base"))?
            .push(id);
        Ok(url)
    }

    fn accounts_url(&self, action: &str) -> ClientResult<Url> {
        let mut url = Self::parse_url(&format!("{}/accounts:{}", self.identity_url, action))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Build a store request, authorized by the current session when there is one
    fn store_request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match self.hub.session() {
            Some(session) => req.bearer_auth(session.id_token),
            None => req,
        }
    }

    /// Execute request and decode the JSON response
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let body = self.send(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute request and return the raw success body; error statuses become API errors
    async fn send(&self, req: RequestBuilder) -> ClientResult<String> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => {
                    let message = envelope
                        .error
                        .message
                        .unwrap_or_else(|| "Unknown error".to_string());
                    let code = envelope.error.status.unwrap_or_else(|| message.clone());
                    (code, message)
                }
                Err(_) => ("UNKNOWN".to_string(), body),
            };
            return Err(ClientError::api_error(status.as_u16(), code, message));
        }

        Ok(body)
    }

    async fn authenticate(&self, action: &str, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let body = PasswordRequest {
            email: &credentials.email,
            password: &credentials.password,
            return_secure_token: true,
        };
        let req = self
            .client
            .request(Method::POST, self.accounts_url(action)?)
            .json(&body);
        self.execute(req).await
    }
}

#[async_trait]
impl DocumentStore for FirebaseBackend {
    async fn list_documents(&self) -> ClientResult<Vec<Confession>> {
        let mut confessions = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = Self::parse_url(&self.documents_url)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", PAGE_SIZE);
                if let Some(token) = page_token.as_deref() {
                    query.append_pair("pageToken", token);
                }
            }

            let page: ListDocumentsResponse =
                self.execute(self.store_request(Method::GET, url)).await?;

            for document in page.documents {
                match document.into_confession() {
                    Ok(confession) => confessions.push(confession),
                    Err(e) => log::warn!("Skipping unreadable confession document: {e}"),
                }
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        log::debug!("Listed {} confessions", confessions.len());
        Ok(confessions)
    }

    async fn insert_document(&self, confession: &NewConfession) -> ClientResult<String> {
        let url = Self::parse_url(&self.documents_url)?;
        let req = self
            .store_request(Method::POST, url)
            .json(&firestore::encode_new(confession));

        let document: Document = self.execute(req).await?;
        let id = document.id()?.to_string();

        log::info!("Created confession {id}");
        Ok(id)
    }

    async fn update_content(
        &self,
        id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> ClientResult<()> {
        let mut url = self.document_url(id)?;
        url.query_pairs_mut()
            .append_pair("updateMask.fieldPaths", firestore::FIELD_CONTENT)
            .append_pair("updateMask.fieldPaths", firestore::FIELD_UPDATED_AT)
            .append_pair("currentDocument.exists", "true");

        let req = self
            .store_request(Method::PATCH, url)
            .json(&firestore::encode_content_update(content, updated_at));

        let _: Document = self.execute(req).await?;

        log::info!("Updated confession {id}");
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> ClientResult<()> {
        let url = self.document_url(id)?;
        // Success bodies are `{}` or empty; neither carries anything.
        self.send(self.store_request(Method::DELETE, url)).await?;

        log::info!("Deleted confession {id}");
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for FirebaseBackend {
    async fn sign_in(&self, credentials: &Credentials) -> ClientResult<Identity> {
        let response = self.authenticate("signInWithPassword", credentials).await?;
        let session = response.into_session();
        let identity = session.identity.clone();

        self.hub.set_session(Some(session));
        Ok(identity)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> ClientResult<Identity> {
        let response = self.authenticate("signUp", credentials).await?;
        let mut session = response.into_session();

        if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
            let body = UpdateProfileRequest {
                id_token: &session.id_token,
                display_name: name,
                return_secure_token: false,
            };
            let req = self
                .client
                .request(Method::POST, self.accounts_url("update")?)
                .json(&body);
            let _: serde_json::Value = self.execute(req).await?;
            session.identity.display_name = Some(name.to_string());
        }

        let identity = session.identity.clone();
        self.hub.set_session(Some(session));
        Ok(identity)
    }

    async fn sign_out(&self) -> ClientResult<()> {
        // Tokens are bearer-only; forgetting them ends the session.
        self.hub.set_session(None);
        Ok(())
    }

    fn identity_hub(&self) -> &IdentityHub {
        &self.hub
    }
}
