use crate::upload::types::{DroppedFile, FileStatus, UploadStatus};
use reqwest::header::LOCATION;
use reqwest::multipart::{Form, Part};
use reqwest::redirect;
use reqwest::Url;
use std::sync::mpsc::Sender;
use tracing::info;

/// Form field the upload endpoint reads the file from.
pub const UPLOAD_FIELD: &str = "odmFile";

#[derive(Clone)]
pub struct FormSubmitter {
    endpoint: Url,
}

impl FormSubmitter {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts the file to the endpoint and reports progress through the
    /// channel. On success, returns the status page URL the server named
    /// in its redirect, if any.
    pub async fn submit(
        &self,
        file: &DroppedFile,
        status_sender: &Sender<FileStatus>,
    ) -> Result<Option<String>, String> {
        status_sender
            .send(FileStatus {
                name: file.name.clone(),
                status: UploadStatus::Processing,
            })
            .unwrap_or_default();

        let content = match file.read() {
            Ok(content) => content,
            Err(e) => {
                return self.report(file, Err(format!("Failed to read file: {}", e)), status_sender)
            }
        };

        // Redirects stay unfollowed so the Location header can be captured.
        let client = match reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                return self.report(
                    file,
                    Err(format!("Failed to build HTTP client: {}", e)),
                    status_sender,
                )
            }
        };

        let part = Part::bytes(content).file_name(file.name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = match client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return self.report(
                    file,
                    Err(format!("Failed to send request: {}", e)),
                    status_sender,
                )
            }
        };

        let status = response.status();
        let result = if status.is_success() || status.is_redirection() {
            let status_url = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(|location| resolve_location(&self.endpoint, location));
            info!(name = %file.name, status = %status, "upload accepted");
            Ok(status_url)
        } else if status.as_u16() == 406 {
            Err("Server rejected the file. Check the name and size and try again.".to_string())
        } else {
            Err(format!("Upload failed with status: {}", status))
        };

        self.report(file, result, status_sender)
    }

    fn report(
        &self,
        file: &DroppedFile,
        result: Result<Option<String>, String>,
        status_sender: &Sender<FileStatus>,
    ) -> Result<Option<String>, String> {
        let file_status = FileStatus {
            name: file.name.clone(),
            status: match &result {
                Ok(status_url) => UploadStatus::Success {
                    status_url: status_url.clone(),
                },
                Err(e) => UploadStatus::Error(e.clone()),
            },
        };
        status_sender.send(file_status).unwrap_or_default();
        result
    }
}

/// Resolves a Location header against the upload endpoint. The server
/// answers with a relative `/status?id=<hash>` redirect.
fn resolve_location(endpoint: &Url, location: &str) -> String {
    match endpoint.join(location) {
        Ok(url) => url.to_string(),
        Err(_) => location.to_string(),
    }
}
