use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use folio_types::api::{ErrorResponse, NewProgressImage, NewProgressUpdate, ProgressImagePatch, ProgressUpdatePatch};
use folio_types::models::{ProgressImage, ProgressUpdate, RecordId};

use crate::error::ClientError;

const UPDATES: &str = "/api/progress-updates";
const IMAGES: &str = "/api/progress-images";

/// Typed client for the progress API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // -- Progress updates --

    pub async fn list_updates(&self) -> Result<Vec<ProgressUpdate>, ClientError> {
        self.fetch(Method::GET, UPDATES, None::<&()>).await
    }

    pub async fn create_update(&self, draft: &NewProgressUpdate) -> Result<ProgressUpdate, ClientError> {
        self.fetch(Method::POST, UPDATES, Some(draft)).await
    }

    pub async fn patch_update(&self, id: RecordId, patch: &ProgressUpdatePatch) -> Result<ProgressUpdate, ClientError> {
        self.fetch(Method::PATCH, &format!("{UPDATES}/{id}"), Some(patch)).await
    }

    pub async fn delete_update(&self, id: RecordId) -> Result<(), ClientError> {
        self.remove(&format!("{UPDATES}/{id}")).await
    }

    // -- Progress images --

    pub async fn list_images(&self) -> Result<Vec<ProgressImage>, ClientError> {
        self.fetch(Method::GET, IMAGES, None::<&()>).await
    }

    pub async fn create_image(&self, draft: &NewProgressImage) -> Result<ProgressImage, ClientError> {
        self.fetch(Method::POST, IMAGES, Some(draft)).await
    }

    pub async fn patch_image(&self, id: RecordId, patch: &ProgressImagePatch) -> Result<ProgressImage, ClientError> {
        self.fetch(Method::PATCH, &format!("{IMAGES}/{id}"), Some(patch)).await
    }

    pub async fn delete_image(&self, id: RecordId) -> Result<(), ClientError> {
        self.remove(&format!("{IMAGES}/{id}")).await
    }

    async fn fetch<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method.clone(), format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = checked(request.send().await?).await?;
        debug!(%method, path, status = response.status().as_u16(), "API call");
        Ok(response.json().await?)
    }

    async fn remove(&self, path: &str) -> Result<(), ClientError> {
        let response = self.http.delete(format!("{}{}", self.base_url, path)).send().await?;
        checked(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ClientError::Api`, keeping the server's message.
async fn checked(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
