use std::rc::Rc;

use async_trait::async_trait;
use billed_client::{BillStore, BillUpload, SessionContext, StoreError};
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{ApiErrorBody, Bill, CreatedBill};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::services::config::ApiConfig;

/// Bills store backed by the Billed REST API
#[derive(Clone)]
pub struct HttpBillStore {
    config: ApiConfig,
    session: Rc<dyn SessionContext>,
}

impl HttpBillStore {
    pub fn new(config: ApiConfig, session: Rc<dyn SessionContext>) -> Self {
        Self { config, session }
    }

    fn bills_url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self.config.url(&format!("bills/{}", id)),
            None => self.config.url("bills"),
        }
    }

    /// Add the bearer token of the logged-in user, if any
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }
}

#[async_trait(?Send)]
impl BillStore for HttpBillStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let response = self
            .authorize(Request::get(&self.bills_url(None)))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }

    async fn create(&self, upload: BillUpload) -> Result<CreatedBill, StoreError> {
        let form = multipart_form(&upload).map_err(js_error)?;

        // No Content-Type: the browser adds the multipart boundary itself
        let response = self
            .authorize(Request::post(&self.bills_url(None)))
            .body(form)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }

    async fn update(&self, id: &str, bill: &Bill) -> Result<Bill, StoreError> {
        let response = self
            .authorize(Request::patch(&self.bills_url(Some(id))))
            .json(bill)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }
}

fn multipart_form(upload: &BillUpload) -> Result<FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(upload.file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    if let Some(content_type) = &upload.file.content_type {
        options.set_type(content_type);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename("file", &blob, &upload.file.file_name)?;
    form.append_with_str("email", &upload.email)?;
    Ok(form)
}

/// Decode a successful response, or turn an error response into the
/// message the API sent back
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    if !response.ok() {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Erreur {}", status));
        return Err(StoreError::Remote(message));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

fn transport_error(error: gloo::net::Error) -> StoreError {
    StoreError::Transport(error.to_string())
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Transport(format!("{:?}", value))
}
