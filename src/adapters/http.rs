use crate::domain::model::{LookupResponse, RawAddressRecord};
use crate::domain::ports::{AddressLookup, ConfigProvider};
use crate::utils::error::{AppError, Result, FETCH_FAILED_MESSAGE};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_LOOKUP_PATH: &str = "/api/getAddresses";

/// `GET {base_url}{path}?postcode=..&streetnumber=..`
#[derive(Debug, Clone)]
pub struct HttpAddressLookup {
    client: Client,
    endpoint: String,
}

impl HttpAddressLookup {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!(
                "{}{}",
                config.base_url().trim_end_matches('/'),
                config.lookup_path()
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AddressLookup for HttpAddressLookup {
    async fn find_addresses(
        &self,
        post_code: &str,
        house_number: &str,
    ) -> Result<Vec<RawAddressRecord>> {
        tracing::debug!("Making lookup request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("postcode", post_code), ("streetnumber", house_number)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Lookup response status: {}", status);
        let body = response.text().await?;

        // An explicit error payload is the service talking, whatever the status code.
        let parsed = serde_json::from_str::<LookupResponse>(&body);
        if let Ok(payload) = &parsed {
            if payload.status.as_deref() == Some("error") {
                let message = payload
                    .errormessage
                    .clone()
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string());
                return Err(AppError::Service { message });
            }
        }

        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let details = parsed?.details.ok_or_else(|| AppError::InvalidResponse {
            message: "response has no `details` list".to_string(),
        })?;

        tracing::debug!("Lookup returned {} candidate(s)", details.len());
        details
            .into_iter()
            .enumerate()
            .map(|(index, value)| raw_record(index, value))
            .collect()
    }
}

/// Only non-objects are rejected here; field checks belong to the transformer.
fn raw_record(index: usize, value: serde_json::Value) -> Result<RawAddressRecord> {
    if !value.is_object() {
        return Err(AppError::MalformedAddress {
            index,
            field: "record",
        });
    }
    serde_json::from_value(value).map_err(|_| AppError::MalformedAddress {
        index,
        field: "record",
    })
}
