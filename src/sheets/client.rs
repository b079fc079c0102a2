//! Spreadsheet service client
//!
//! Thin REST client over the Drive and Sheets v4 APIs: resolve a
//! spreadsheet by title, open its first worksheet, clear it, and bulk
//! write the combined table from the A1 origin.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::auth;
use super::types::*;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Authenticated Sheets/Drive client
pub struct SheetsClient {
    client: Client,
    token: String,
}

impl SheetsClient {
    /// Authenticate with the service-account key file.
    pub async fn connect(key_path: &str) -> Result<Self, SheetsError> {
        let key = auth::load_key(key_path)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SheetsError::NetworkError(e.to_string()))?;

        let token = auth::fetch_token(&client, &key).await?;
        info!("Google Sheets connected as {}", key.client_email);

        Ok(Self {
            client,
            token: token.access_token,
        })
    }

    /// Open the first worksheet of the spreadsheet with the given title.
    pub async fn open_first_worksheet(&self, title: &str) -> Result<Worksheet<'_>, SheetsError> {
        let spreadsheet_id = self.find_spreadsheet_id(title).await?;
        debug!("Spreadsheet '{}' resolved to {}", title, spreadsheet_id);

        let url = format!("{}/{}", SHEETS_BASE_URL, spreadsheet_id);
        let spreadsheet: Spreadsheet = self
            .api_get(&url, &[("fields", "sheets.properties")])
            .await?;

        let first = spreadsheet
            .sheets
            .into_iter()
            .next()
            .ok_or_else(|| SheetsError::NoWorksheet(title.to_string()))?;

        info!(
            "Opened worksheet '{}' of spreadsheet '{}'",
            first.properties.title, title
        );

        Ok(Worksheet {
            client: self,
            spreadsheet_id,
            title: first.properties.title,
        })
    }

    /// Resolve a spreadsheet title to its file id via the Drive API.
    async fn find_spreadsheet_id(&self, title: &str) -> Result<String, SheetsError> {
        let query = drive_title_query(title);
        let list: DriveFileList = self
            .api_get(
                DRIVE_FILES_URL,
                &[
                    ("q", query.as_str()),
                    ("fields", "files(id,name)"),
                    ("pageSize", "10"),
                ],
            )
            .await?;

        // Exact-title match only; Drive's contains-style matching is not wanted here
        list.files
            .into_iter()
            .find(|f| f.name == title)
            .map(|f| f.id)
            .ok_or_else(|| SheetsError::SpreadsheetNotFound(title.to_string()))
    }

    async fn api_get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SheetsError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| SheetsError::NetworkError(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| SheetsError::NetworkError(e.to_string()))
    }
}

/// Handle to one worksheet of an opened spreadsheet
pub struct Worksheet<'a> {
    client: &'a SheetsClient,
    spreadsheet_id: String,
    title: String,
}

impl Worksheet<'_> {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Clear the entire worksheet.
    pub async fn clear(&self) -> Result<(), SheetsError> {
        let range = quote_sheet_title(&self.title);
        let url = format!(
            "{}/{}/values/{}:clear",
            SHEETS_BASE_URL,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );

        let response = self
            .client
            .client
            .post(&url)
            .bearer_auth(&self.client.token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| SheetsError::NetworkError(e.to_string()))?;

        check_status(response).await?;
        debug!("Worksheet '{}' cleared", self.title);
        Ok(())
    }

    /// Write the value grid starting at the A1 origin, replacing what
    /// the earlier clear removed. If the anchored call shape is
    /// rejected, retry once without the origin anchor (older API
    /// frontends differ on the accepted range form).
    pub async fn update(&self, values: Vec<Vec<String>>) -> Result<UpdateResponse, SheetsError> {
        let anchored = anchored_range(&self.title);

        match self.update_range(&anchored, values.clone()).await {
            Ok(response) => Ok(response),
            Err(SheetsError::Api { status: 400, message }) => {
                warn!("Anchored write rejected ({}), retrying without origin", message);
                let unanchored = quote_sheet_title(&self.title);
                self.update_range(&unanchored, values).await
            }
            Err(e) => Err(e),
        }
    }

    async fn update_range(
        &self,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<UpdateResponse, SheetsError> {
        let url = format!(
            "{}/{}/values/{}",
            SHEETS_BASE_URL,
            self.spreadsheet_id,
            urlencoding::encode(range)
        );

        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: "ROWS",
            values,
        };

        let response = self
            .client
            .client
            .put(&url)
            .bearer_auth(&self.client.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::NetworkError(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| SheetsError::NetworkError(e.to_string()))
    }
}

/// Map non-success responses to the API error envelope.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| body.chars().take(300).collect());

    Err(SheetsError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Quote a sheet title for A1 notation, doubling embedded quotes.
fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// The anchored write range: the worksheet's top-left cell.
fn anchored_range(title: &str) -> String {
    format!("{}!A1", quote_sheet_title(title))
}

/// Drive query matching a spreadsheet by exact title.
fn drive_title_query(title: &str) -> String {
    let escaped = title.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
        escaped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_sheet_title() {
        assert_eq!(quote_sheet_title("Sheet1"), "'Sheet1'");
        assert_eq!(quote_sheet_title("Bob's Data"), "'Bob''s Data'");
    }

    #[test]
    fn test_anchored_range() {
        assert_eq!(anchored_range("Sheet1"), "'Sheet1'!A1");
    }

    #[test]
    fn test_drive_title_query_escapes_quotes() {
        let q = drive_title_query("Bob's Data");
        assert!(q.contains(r"name = 'Bob\'s Data'"));
        assert!(q.contains("mimeType = 'application/vnd.google-apps.spreadsheet'"));
        assert!(q.contains("trashed = false"));
    }

    #[test]
    fn test_value_range_serializes_camel_case() {
        let body = ValueRange {
            range: Some("'Sheet1'!A1".to_string()),
            major_dimension: "ROWS",
            values: vec![vec!["Name".to_string()], vec!["Asha".to_string()]],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["majorDimension"], "ROWS");
        assert_eq!(json["range"], "'Sheet1'!A1");
        assert_eq!(json["values"][1][0], "Asha");
    }
}
