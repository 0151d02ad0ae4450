use super::{ExpenseBackend, RemoteError};
use crate::{
    config::BackendConfig,
    expense::{Expense, ExpenseData, ExpenseId, ExpenseUpdate},
};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Stores expenses in a Firebase Realtime Database over its REST API.
///
/// Each expense lives at `{base_url}/{collection}/{id}.json`. Ids are Firebase push
/// ids, which sort in creation order.
#[derive(Clone, Debug)]
pub struct FirebaseBackend {
    client: Client,
    config: BackendConfig,
}

// Body of a successful POST
#[derive(Deserialize)]
struct Created {
    name: String,
}

impl FirebaseBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: BackendConfig) -> Self {
        FirebaseBackend { client, config }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}.json", self.base_url(), self.config.collection)
    }

    fn expense_url(&self, id: &ExpenseId) -> String {
        format!("{}/{}/{}.json", self.base_url(), self.config.collection, id)
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

#[async_trait]
impl ExpenseBackend for FirebaseBackend {
    async fn create(&self, data: &ExpenseData) -> Result<ExpenseId, RemoteError> {
        let url = self.collection_url();
        debug!("POST {}", url);

        let response = check_status(self.client.post(&url).json(data).send().await?)?;
        let body = response.text().await?;

        decode_created(&body)
    }

    async fn read_all(&self) -> Result<Vec<Expense>, RemoteError> {
        let url = self.collection_url();
        debug!("GET {}", url);

        let response = check_status(self.client.get(&url).send().await?)?;
        let body = response.text().await?;

        decode_collection(&body)
    }

    async fn update(&self, id: &ExpenseId, update: &ExpenseUpdate) -> Result<(), RemoteError> {
        let url = self.expense_url(id);
        debug!("PATCH {}", url);

        check_status(self.client.patch(&url).json(update).send().await?)?;
        Ok(())
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), RemoteError> {
        let url = self.expense_url(id);
        debug!("DELETE {}", url);

        check_status(self.client.delete(&url).send().await?)?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, RemoteError> {
    match status_error(response.status()) {
        None => Ok(response),
        Some(e) => {
            error!("{} responded with {}", response.url(), response.status());
            Err(e)
        }
    }
}

// Anything outside 2xx is a failure, whatever the body says
fn status_error(status: StatusCode) -> Option<RemoteError> {
    if status.is_success() {
        None
    } else {
        Some(RemoteError::Status(status.as_u16()))
    }
}

/// Decode the body of a successful POST, which names the new push id
fn decode_created(body: &str) -> Result<ExpenseId, RemoteError> {
    let created: Created =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    Ok(ExpenseId::new(created.name))
}

/// Decode a collection listing. An empty collection comes back as `null`.
fn decode_collection(body: &str) -> Result<Vec<Expense>, RemoteError> {
    let records: Option<BTreeMap<String, ExpenseData>> =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(|(id, data)| Expense::new(ExpenseId::new(id), data))
        .collect())
}
