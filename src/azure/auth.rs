//! Authorizer selection and bearer token acquisition.
//!
//! The method is picked from the environment in this order:
//! 1. `AZURE_CLIENT_ID` + `AZURE_TENANT_ID` → environment credentials
//!    (client secret if `AZURE_CLIENT_SECRET` is set, managed identity otherwise)
//! 2. `AZURE_AUTH_LOCATION` → SDK auth file
//! 3. otherwise → Azure CLI login (`az account get-access-token`)

use super::cli;
use crate::config::{
    Endpoints, Env, AZURE_AUTH_LOCATION, AZURE_CLIENT_ID, AZURE_CLIENT_SECRET, AZURE_TENANT_ID,
    IMDS_API_VERSION,
};
use crate::error::{AzureError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of bearer tokens for management API requests.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn token(&self) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    Environment,
    File(PathBuf),
    Cli,
}

pub fn select_auth_method(env: &Env) -> AuthMethod {
    if env.contains(AZURE_CLIENT_ID) && env.contains(AZURE_TENANT_ID) {
        AuthMethod::Environment
    } else if let Some(path) = env.get(AZURE_AUTH_LOCATION) {
        AuthMethod::File(PathBuf::from(path))
    } else {
        AuthMethod::Cli
    }
}

/// Build the authorizer the environment asks for.
pub fn new_authorizer(env: &Env, endpoints: &Endpoints) -> Result<Arc<dyn Authorizer>> {
    let http = reqwest::Client::new();
    let method = select_auth_method(env);
    log::debug!("Using auth method {method:?}");

    let authorizer: Arc<dyn Authorizer> = match method {
        AuthMethod::Environment => {
            let client_id = env.get(AZURE_CLIENT_ID).unwrap_or_default().to_string();
            let tenant_id = env.get(AZURE_TENANT_ID).unwrap_or_default().to_string();
            match env.get(AZURE_CLIENT_SECRET) {
                Some(secret) => Arc::new(ClientSecretAuthorizer {
                    tenant_id,
                    client_id,
                    client_secret: secret.to_string(),
                    login_base: endpoints.active_directory.clone(),
                    resource: endpoints.token_resource.clone(),
                    http,
                }),
                None => Arc::new(ManagedIdentityAuthorizer {
                    client_id: Some(client_id),
                    imds_base: endpoints.imds.clone(),
                    resource: endpoints.token_resource.clone(),
                    http,
                }),
            }
        }
        AuthMethod::File(path) => {
            let file = AuthFile::read(&path)?;
            let login_base = file
                .active_directory_endpoint_url
                .clone()
                .unwrap_or_else(|| endpoints.active_directory.clone());
            Arc::new(ClientSecretAuthorizer {
                tenant_id: file.tenant_id,
                client_id: file.client_id,
                client_secret: file.client_secret,
                login_base,
                resource: endpoints.token_resource.clone(),
                http,
            })
        }
        AuthMethod::Cli => Arc::new(CliAuthorizer {
            resource: endpoints.token_resource.clone(),
        }),
    };
    Ok(authorizer)
}

/// SDK auth file as written by `az ad sp create-for-rbac --sdk-auth`.
///
/// Only the credential fields are read; the file's subscription and ARM endpoint
/// are ignored.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthFile {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    #[serde(default)]
    pub active_directory_endpoint_url: Option<String>,
}

impl AuthFile {
    pub fn read(path: &Path) -> Result<AuthFile> {
        let json = std::fs::read_to_string(path).map_err(|source| AzureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let de = &mut serde_json::Deserializer::from_str(&json);
        serde_path_to_error::deserialize(de).map_err(|e| AzureError::Parse {
            url: path.display().to_string(),
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliTokenResponse {
    access_token: String,
}

/// Service principal with a client secret (client-credentials grant).
pub struct ClientSecretAuthorizer {
    tenant_id: String,
    client_id: String,
    client_secret: String,
    login_base: String,
    resource: String,
    http: reqwest::Client,
}

#[async_trait]
impl Authorizer for ClientSecretAuthorizer {
    async fn token(&self) -> Result<String> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.login_base.trim_end_matches('/'),
            self.tenant_id
        );
        let scope = format!("{}.default", self.resource);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", scope.as_str()),
        ];
        log::debug!("Requesting service principal token from {url}");
        let resp = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|source| AzureError::Http {
                url: url.clone(),
                source,
            })?;
        read_token(resp, &url, |t: OAuthTokenResponse| t.access_token).await
    }
}

/// Managed identity via the instance metadata service.
pub struct ManagedIdentityAuthorizer {
    client_id: Option<String>,
    imds_base: String,
    resource: String,
    http: reqwest::Client,
}

#[async_trait]
impl Authorizer for ManagedIdentityAuthorizer {
    async fn token(&self) -> Result<String> {
        let url = format!(
            "{}/metadata/identity/oauth2/token",
            self.imds_base.trim_end_matches('/')
        );
        let mut query = vec![
            ("api-version", IMDS_API_VERSION),
            ("resource", self.resource.as_str()),
        ];
        if let Some(client_id) = &self.client_id {
            query.push(("client_id", client_id.as_str()));
        }
        log::debug!("Requesting managed identity token from {url}");
        let resp = self
            .http
            .get(&url)
            .header("Metadata", "true")
            .query(&query)
            .send()
            .await
            .map_err(|source| AzureError::Http {
                url: url.clone(),
                source,
            })?;
        read_token(resp, &url, |t: OAuthTokenResponse| t.access_token).await
    }
}

/// Token from the logged-in Azure CLI.
pub struct CliAuthorizer {
    resource: String,
}

#[async_trait]
impl Authorizer for CliAuthorizer {
    async fn token(&self) -> Result<String> {
        let cmd = format!(
            "az account get-access-token --resource {} --output json",
            self.resource
        );
        let output = tokio::task::spawn_blocking(move || cli::run(&cmd))
            .await
            .map_err(|e| AzureError::Command(format!("az cli task failed: {e}")))?
            .map_err(|e| AzureError::Auth(format!("{e}. Run 'az login' first.")))?;
        parse_cli_token(&output)
    }
}

fn parse_cli_token(output: &str) -> Result<String> {
    let token: CliTokenResponse = serde_json::from_str(output)
        .map_err(|e| AzureError::Auth(format!("az cli output parse: {e}")))?;
    Ok(token.access_token)
}

/// Fixed bearer token.
pub struct StaticAuthorizer(pub String);

#[async_trait]
impl Authorizer for StaticAuthorizer {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

async fn read_token<T, F>(resp: reqwest::Response, url: &str, extract: F) -> Result<String>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(T) -> String,
{
    let status = resp.status();
    let body = resp.text().await.map_err(|source| AzureError::Http {
        url: url.to_string(),
        source,
    })?;
    if !status.is_success() {
        return Err(AzureError::Auth(format!(
            "token request to {url} returned {status}: {body}"
        )));
    }
    let token: T = serde_json::from_str(&body)
        .map_err(|e| AzureError::Auth(format!("no access token in response from {url}: {e}")))?;
    Ok(extract(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::{
        matchers::{body_string_contains, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_env_pair_beats_auth_file() {
        let env = Env::from_pairs([
            (AZURE_CLIENT_ID, "cid"),
            (AZURE_TENANT_ID, "tid"),
            (AZURE_AUTH_LOCATION, "/tmp/auth.json"),
        ]);
        assert_eq!(select_auth_method(&env), AuthMethod::Environment);
    }

    #[test]
    fn test_client_id_alone_is_not_environment() {
        let env = Env::from_pairs([(AZURE_CLIENT_ID, "cid")]);
        assert_eq!(select_auth_method(&env), AuthMethod::Cli);

        let env = Env::from_pairs([(AZURE_CLIENT_ID, "cid"), (AZURE_AUTH_LOCATION, "/a.json")]);
        assert_eq!(
            select_auth_method(&env),
            AuthMethod::File(PathBuf::from("/a.json"))
        );
    }

    #[test]
    fn test_default_is_cli() {
        assert_eq!(select_auth_method(&Env::default()), AuthMethod::Cli);
    }

    #[test]
    fn test_parse_cli_token() {
        let output = r#"{
            "accessToken": "eyJ0eXAi",
            "expiresOn": "2026-10-16 12:00:00.000000",
            "subscription": "00000000-0000-0000-0000-000000000000",
            "tenant": "11111111-1111-1111-1111-111111111111",
            "tokenType": "Bearer"
        }"#;
        assert_eq!(parse_cli_token(output).unwrap(), "eyJ0eXAi");
        assert!(matches!(parse_cli_token("{}"), Err(AzureError::Auth(_))));
    }

    #[test]
    fn test_read_auth_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "clientId": "cid",
                "clientSecret": "secret",
                "subscriptionId": "sub",
                "tenantId": "tid",
                "activeDirectoryEndpointUrl": "https://login.microsoftonline.com",
                "resourceManagerEndpointUrl": "https://management.azure.com/",
                "activeDirectoryGraphResourceId": "https://graph.windows.net/"
            }}"#
        )
        .unwrap();
        let auth = AuthFile::read(file.path()).expect("auth file");
        assert_eq!(auth.client_id, "cid");
        assert_eq!(auth.client_secret, "secret");
        assert_eq!(auth.tenant_id, "tid");
        assert_eq!(
            auth.active_directory_endpoint_url.as_deref(),
            Some("https://login.microsoftonline.com")
        );
    }

    #[test]
    fn test_read_auth_file_reports_missing_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"clientId": "cid", "tenantId": "tid"}}"#).unwrap();
        let err = AuthFile::read(file.path()).unwrap_err();
        assert!(err.to_string().contains("clientSecret"), "got: {err}");
    }

    #[test]
    fn test_missing_auth_file() {
        let env = Env::from_pairs([(AZURE_AUTH_LOCATION, "/nonexistent/aztest-auth.json")]);
        let err = new_authorizer(&env, &Endpoints::default()).err().unwrap();
        assert!(matches!(err, AzureError::Io { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_client_secret_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tid/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=cid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "sp-token"
            })))
            .mount(&server)
            .await;

        let env = Env::from_pairs([
            (AZURE_CLIENT_ID, "cid"),
            (AZURE_TENANT_ID, "tid"),
            (AZURE_CLIENT_SECRET, "secret"),
        ]);
        let authorizer = new_authorizer(&env, &Endpoints::all_at(&server.uri())).unwrap();
        assert_eq!(authorizer.token().await.unwrap(), "sp-token");
    }

    #[tokio::test]
    async fn test_client_secret_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tid/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_client"
            })))
            .mount(&server)
            .await;

        let env = Env::from_pairs([
            (AZURE_CLIENT_ID, "cid"),
            (AZURE_TENANT_ID, "tid"),
            (AZURE_CLIENT_SECRET, "wrong"),
        ]);
        let authorizer = new_authorizer(&env, &Endpoints::all_at(&server.uri())).unwrap();
        let err = authorizer.token().await.unwrap_err();
        assert!(err.to_string().contains("401"), "got: {err}");
    }

    #[tokio::test]
    async fn test_managed_identity_without_secret() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metadata/identity/oauth2/token"))
            .and(header("Metadata", "true"))
            .and(query_param("client_id", "cid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "msi-token",
                "expires_in": "3599"
            })))
            .mount(&server)
            .await;

        let env = Env::from_pairs([(AZURE_CLIENT_ID, "cid"), (AZURE_TENANT_ID, "tid")]);
        let authorizer = new_authorizer(&env, &Endpoints::all_at(&server.uri())).unwrap();
        assert_eq!(authorizer.token().await.unwrap(), "msi-token");
    }

    #[tokio::test]
    async fn test_auth_file_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/file-tenant/oauth2/v2.0/token"))
            .and(body_string_contains("client_id=file-client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "file-token"
            })))
            .mount(&server)
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"clientId": "file-client", "clientSecret": "s", "tenantId": "file-tenant"}}"#
        )
        .unwrap();
        let env = Env::from_pairs([(AZURE_AUTH_LOCATION, file.path().display().to_string())]);
        let authorizer = new_authorizer(&env, &Endpoints::all_at(&server.uri())).unwrap();
        assert_eq!(authorizer.token().await.unwrap(), "file-token");
    }
}
