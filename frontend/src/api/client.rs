use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::api::types::{
    ApiEnvelope, ApiError, CsrfData, LoginData, LoginRequest, MeData, RegisterRequest,
    UploadData, UserResponse,
};

pub const CSRF_HEADER: &str = "x-csrf-token";

fn base_url() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

pub struct ApiClient {
    client: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginData, ApiError> {
        self.post_json("/api/auth/login", request, None)
            .await?
            .ok_or_else(empty_response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ApiError> {
        self.post_json("/api/auth/register", request, None)
            .await?
            .ok_or_else(empty_response)
    }

    pub async fn me(&self) -> Result<MeData, ApiError> {
        self.get_json("/api/auth/me").await?.ok_or_else(empty_response)
    }

    pub async fn csrf_token(&self) -> Result<String, ApiError> {
        let data: CsrfData = self
            .get_json("/api/auth/csrf")
            .await?
            .ok_or_else(empty_response)?;
        Ok(data.csrf_token)
    }

    pub async fn logout(&self, csrf_token: &str) -> Result<(), ApiError> {
        self.post_json::<_, serde_json::Value>(
            "/api/auth/logout",
            &serde_json::json!({}),
            Some(csrf_token),
        )
        .await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let request = self.client.get(format!("{}{}", base_url(), path));
        send(request).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        csrf_token: Option<&str>,
    ) -> Result<Option<T>, ApiError> {
        let mut request = self
            .client
            .post(format!("{}{}", base_url(), path))
            .json(body);
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        send(request).await
    }
}

/// Sends the request and unwraps the response envelope. A `success=false`
/// envelope becomes `ApiError::Server` carrying the backend's message.
async fn send<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<Option<T>, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    let envelope: ApiEnvelope<T> = response
        .json()
        .await
        .map_err(|err| ApiError::Network(format!("Malformed response: {err}")))?;
    if envelope.success {
        Ok(envelope.data)
    } else {
        Err(ApiError::Server(envelope.message))
    }
}

fn empty_response() -> ApiError {
    ApiError::Server("Empty response".to_string())
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(format!("{value:?}"))
}

/// Uploads a file through `XMLHttpRequest` so the browser reports upload
/// progress. `on_progress` receives an integer percentage; `on_done` fires
/// once with the decoded envelope payload or the transport error.
pub fn upload_with_progress(
    file: &web_sys::File,
    csrf_token: &str,
    mut on_progress: impl FnMut(u32) + 'static,
    on_done: impl FnOnce(Result<UploadData, ApiError>) + 'static,
) -> Result<(), ApiError> {
    let xhr = web_sys::XmlHttpRequest::new().map_err(js_error)?;
    xhr.open("POST", &format!("{}/api/uploads", base_url()))
        .map_err(js_error)?;
    xhr.set_request_header(CSRF_HEADER, csrf_token)
        .map_err(js_error)?;

    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_error)?;

    let progress = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
        move |event: web_sys::ProgressEvent| {
            if event.length_computable() && event.total() > 0.0 {
                let percent = ((event.loaded() / event.total()) * 100.0).round() as u32;
                on_progress(percent.min(100));
            }
        },
    );
    xhr.upload()
        .map_err(js_error)?
        .set_onprogress(Some(progress.as_ref().unchecked_ref()));
    progress.forget();

    let xhr_for_load = xhr.clone();
    let onload = Closure::once(move || {
        on_done(parse_upload_response(&xhr_for_load));
    });
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    xhr.send_with_opt_form_data(Some(&form)).map_err(js_error)?;
    Ok(())
}

fn parse_upload_response(xhr: &web_sys::XmlHttpRequest) -> Result<UploadData, ApiError> {
    let text = xhr.response_text().ok().flatten().unwrap_or_default();
    let envelope: ApiEnvelope<UploadData> = serde_json::from_str(&text)
        .map_err(|err| ApiError::Network(format!("Malformed response: {err}")))?;
    if envelope.success {
        envelope.data.ok_or_else(empty_response)
    } else {
        Err(ApiError::Server(envelope.message))
    }
}
