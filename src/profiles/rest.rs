// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hosted record store client.
//!
//! The store exposes each table at `{base_url}/{table}` with PostgREST-style
//! filters (`?column=eq.value`). Writes ask for the affected rows back with
//! `Prefer: return=representation`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use super::{LocalProfile, NewProfile, ProfileStore, ProfileUpdate, RecordError};
use crate::auth::Identity;

/// Request timeout for record store calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Equality filter on a single column.
#[derive(Debug, Clone, Copy)]
pub struct Filter<'a> {
    pub column: &'a str,
    pub value: &'a str,
}

impl<'a> Filter<'a> {
    pub fn eq(column: &'a str, value: &'a str) -> Self {
        Self { column, value }
    }
}

/// Thin get/create/update/delete-by-filter client for the record store.
#[derive(Debug, Clone)]
pub struct RecordStoreClient {
    base_url: Url,
    api_key: Option<String>,
    http: Client,
}

impl RecordStoreClient {
    pub fn new(base_url: Url, api_key: Option<String>) -> Result<Self, RecordError> {
        if base_url.cannot_be_a_base() {
            return Err(RecordError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }

    fn table_url(&self, table: &str, filter: Option<Filter<'_>>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(table);
        }
        if let Some(filter) = filter {
            url.query_pairs_mut()
                .append_pair(filter.column, &format!("eq.{}", filter.value));
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    /// Rows of `table` matching `filter`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: Filter<'_>,
    ) -> Result<Vec<T>, RecordError> {
        let mut url = self.table_url(table, Some(filter));
        url.query_pairs_mut().append_pair("select", "*");

        let response = self.authorize(self.http.get(url)).send().await?;
        read_rows(response).await
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, RecordError> {
        let response = self
            .authorize(self.http.post(self.table_url(table, None)))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RecordError::InvalidResponse(format!("insert into {table} returned no rows")))
    }

    /// Update rows matching `filter`; at least one must match.
    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        filter: Filter<'_>,
        body: &B,
    ) -> Result<Vec<T>, RecordError> {
        let response = self
            .authorize(self.http.patch(self.table_url(table, Some(filter))))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = read_rows(response).await?;
        if rows.is_empty() {
            return Err(not_found(table, filter));
        }
        Ok(rows)
    }

    /// Delete rows matching `filter`; at least one must match.
    pub async fn delete(&self, table: &str, filter: Filter<'_>) -> Result<(), RecordError> {
        let response = self
            .authorize(self.http.delete(self.table_url(table, Some(filter))))
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = read_rows(response).await?;
        if rows.is_empty() {
            return Err(not_found(table, filter));
        }
        Ok(())
    }

    /// Cheapest possible read against `table`.
    pub async fn probe(&self, table: &str) -> Result<(), RecordError> {
        let mut url = self.table_url(table, None);
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("limit", "1");

        let response = self.authorize(self.http.get(url)).send().await?;
        let _: Vec<serde_json::Value> = read_rows(response).await?;
        Ok(())
    }
}

fn not_found(table: &str, filter: Filter<'_>) -> RecordError {
    RecordError::NotFound(format!("{table} where {} = {}", filter.column, filter.value))
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, RecordError> {
    let status = response.status();
    if status == StatusCode::CONFLICT {
        return Err(RecordError::Conflict(response.text().await.unwrap_or_default()));
    }
    if !status.is_success() {
        return Err(RecordError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| RecordError::InvalidResponse(e.to_string()))
}

/// Profiles kept in a record store table, keyed by identity id.
#[derive(Debug, Clone)]
pub struct RestProfileStore {
    client: RecordStoreClient,
    table: String,
}

impl RestProfileStore {
    pub fn new(client: RecordStoreClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    async fn find(&self, id: &str) -> Result<Option<LocalProfile>, RecordError> {
        let rows: Vec<LocalProfile> = self.client.select(&self.table, Filter::eq("id", id)).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn get_or_create(&self, identity: &Identity) -> Result<LocalProfile, RecordError> {
        if let Some(profile) = self.find(identity.id()).await? {
            return Ok(profile);
        }

        let new = NewProfile::from_identity(identity);
        match self.client.insert(&self.table, &new).await {
            Ok(profile) => {
                tracing::info!(user_id = %identity.id(), "Created local profile");
                Ok(profile)
            }
            // Another request created the row between our lookup and insert.
            Err(RecordError::Conflict(_)) => self
                .find(identity.id())
                .await?
                .ok_or_else(|| RecordError::NotFound(format!("Profile {}", identity.id()))),
            Err(e) => Err(e),
        }
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<LocalProfile, RecordError> {
        let rows: Vec<LocalProfile> = self
            .client
            .update(&self.table, Filter::eq("id", id), update)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RecordError::NotFound(format!("Profile {id}")))
    }

    async fn delete(&self, id: &str) -> Result<(), RecordError> {
        self.client.delete(&self.table, Filter::eq("id", id)).await
    }

    async fn ping(&self) -> Result<(), RecordError> {
        self.client.probe(&self.table).await
    }
}
