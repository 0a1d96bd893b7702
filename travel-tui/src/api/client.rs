use anyhow::Context;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::dev_backend::DevBackend;
use crate::api::dto::{
    BusinessTripRequest, EmployeeRequest, ErrorDto, ExpenseRequest, ExpenseTypeRequest,
};
use crate::types::{
    AnalyticsData, BusinessTrip, Employee, Expense, ExpenseType, ReportDataset, ReportFile,
    ReportFormat,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status. `detail` is the server's
    /// message when one was sent.
    #[error("{detail}")]
    Server { status: StatusCode, detail: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub(crate) fn server(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::Server {
            status,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;

        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            dev_backend: None,
        })
    }

    pub fn dev() -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: "http://localhost".to_string(),
            dev_backend: Some(DevBackend::new()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|err| {
            tracing::error!(call = call_name, error = %err, "request did not complete");
            ClientError::Transport(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let detail = serde_json::from_slice::<ErrorDto>(&body)
            .map(ErrorDto::into_message)
            .unwrap_or_else(|_| format!("{} returned {}", call_name, status));
        tracing::warn!(call = call_name, %status, %detail, "API call failed");

        Err(ClientError::server(status, detail))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ClientError> {
        let response = self.send(request, call_name).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| {
            tracing::error!(call = call_name, error = %err, "failed to parse response");
            ClientError::Decode(err)
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ClientError> {
        let response = self.send(request, call_name).await?;
        response.bytes().await?;
        Ok(())
    }

    // Employees

    pub async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.employees());
        }

        self.get_json(self.client.get(self.endpoint("/employees")), "GET /employees")
            .await
    }

    pub async fn create_employee(&self, body: &EmployeeRequest) -> Result<Employee, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_employee(body);
        }

        self.get_json(
            self.client.post(self.endpoint("/employees")).json(body),
            "POST /employees",
        )
        .await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        body: &EmployeeRequest,
    ) -> Result<Employee, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_employee(id, body);
        }

        self.get_json(
            self.client
                .put(self.endpoint(&format!("/employees/{}", id)))
                .json(body),
            "PUT /employees",
        )
        .await
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_employee(id);
        }

        self.send_without_body(
            self.client
                .delete(self.endpoint(&format!("/employees/{}", id))),
            "DELETE /employees",
        )
        .await
    }

    // Expense types

    pub async fn list_expense_types(&self) -> Result<Vec<ExpenseType>, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.expense_types());
        }

        self.get_json(
            self.client.get(self.endpoint("/expense_types")),
            "GET /expense_types",
        )
        .await
    }

    pub async fn create_expense_type(
        &self,
        body: &ExpenseTypeRequest,
    ) -> Result<ExpenseType, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_expense_type(body);
        }

        self.get_json(
            self.client.post(self.endpoint("/expense_types")).json(body),
            "POST /expense_types",
        )
        .await
    }

    pub async fn update_expense_type(
        &self,
        id: i64,
        body: &ExpenseTypeRequest,
    ) -> Result<ExpenseType, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_expense_type(id, body);
        }

        self.get_json(
            self.client
                .put(self.endpoint(&format!("/expense_types/{}", id)))
                .json(body),
            "PUT /expense_types",
        )
        .await
    }

    /// The API answers a delete with the removed type.
    pub async fn delete_expense_type(&self, id: i64) -> Result<ExpenseType, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_expense_type(id);
        }

        self.get_json(
            self.client
                .delete(self.endpoint(&format!("/expense_types/{}", id))),
            "DELETE /expense_types",
        )
        .await
    }

    // Business trips

    pub async fn list_business_trips(&self) -> Result<Vec<BusinessTrip>, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.business_trips());
        }

        self.get_json(
            self.client.get(self.endpoint("/business_trips")),
            "GET /business_trips",
        )
        .await
    }

    pub async fn create_business_trip(
        &self,
        body: &BusinessTripRequest,
    ) -> Result<BusinessTrip, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_business_trip(body);
        }

        self.get_json(
            self.client.post(self.endpoint("/business_trips")).json(body),
            "POST /business_trips",
        )
        .await
    }

    pub async fn update_business_trip(
        &self,
        id: i64,
        body: &BusinessTripRequest,
    ) -> Result<BusinessTrip, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_business_trip(id, body);
        }

        self.get_json(
            self.client
                .put(self.endpoint(&format!("/business_trips/{}", id)))
                .json(body),
            "PUT /business_trips",
        )
        .await
    }

    pub async fn delete_business_trip(&self, id: i64) -> Result<(), ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_business_trip(id);
        }

        self.send_without_body(
            self.client
                .delete(self.endpoint(&format!("/business_trips/{}", id))),
            "DELETE /business_trips",
        )
        .await
    }

    // Expenses

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.expenses());
        }

        self.get_json(self.client.get(self.endpoint("/expenses")), "GET /expenses")
            .await
    }

    pub async fn create_expense(&self, body: &ExpenseRequest) -> Result<Expense, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_expense(body);
        }

        self.get_json(
            self.client.post(self.endpoint("/expenses")).json(body),
            "POST /expenses",
        )
        .await
    }

    pub async fn update_expense(
        &self,
        id: i64,
        body: &ExpenseRequest,
    ) -> Result<Expense, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_expense(id, body);
        }

        self.get_json(
            self.client
                .put(self.endpoint(&format!("/expenses/{}", id)))
                .json(body),
            "PUT /expenses",
        )
        .await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<(), ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_expense(id);
        }

        self.send_without_body(
            self.client
                .delete(self.endpoint(&format!("/expenses/{}", id))),
            "DELETE /expenses",
        )
        .await
    }

    // Analytics

    pub async fn all_analytics(&self) -> Result<AnalyticsData, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.analytics());
        }

        self.get_json(
            self.client.get(self.endpoint("/analytics/all_analytics")),
            "GET /analytics/all_analytics",
        )
        .await
    }

    pub async fn download_report(
        &self,
        format: ReportFormat,
        dataset: ReportDataset,
    ) -> Result<ReportFile, ClientError> {
        if let Some(dev) = &self.dev_backend {
            return dev.report(format, dataset);
        }

        let url = self.endpoint(&format!(
            "/analytics/report/{}/{}",
            format.as_str(),
            dataset.as_str()
        ));
        let response = self
            .send(self.client.get(url), "GET /analytics/report")
            .await?;

        let file_name = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(file_name_from_disposition)
            .unwrap_or_else(|| format.file_name().to_string());
        let content = response.bytes().await?.to_vec();

        Ok(ReportFile { file_name, content })
    }
}

/// Extracts `filename` from a `Content-Disposition` value such as
/// `attachment;filename=report.txt`.
fn file_name_from_disposition(value: &str) -> Option<String> {
    value.split(';').find_map(|part| {
        let (key, name) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = name.trim().trim_matches('"');
        // Never let a header pick a directory.
        let name = Path::new(name).file_name()?.to_str()?;
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// Writes a downloaded report into `dir`, returning the full path.
pub async fn save_report(report: &ReportFile, dir: &Path) -> Result<PathBuf, ClientError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&report.file_name);
    tokio::fs::write(&path, &report.content).await?;
    tracing::info!(path = %path.display(), bytes = report.content.len(), "report saved");
    Ok(path)
}
