//! services/client/src/adapters/http.rs
//!
//! This module contains the HTTP adapter, which is the concrete implementation
//! of the `JournalApi` port from the `core` crate. It talks to the journaling
//! REST backend using `reqwest` and converts the wire records into pure
//! domain types.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use journal_core::domain::{
    AdviceCard, EmotionCatalog, EmotionVector, Entry, EntryStimulus, Insight, StimulusSeries,
    StimulusSnapshot, TopStimulus,
};
use journal_core::ports::{JournalApi, PortError, PortResult};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An HTTP adapter that implements the `JournalApi` port.
#[derive(Clone)]
pub struct HttpJournalApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJournalApi {
    /// Creates a new `HttpJournalApi` for the given backend base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PortResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortError::NotFound(format!("GET {} returned 404", path)));
        }
        if !response.status().is_success() {
            return Err(PortError::Network(format!(
                "GET {} returned {}",
                path,
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

/// Parses the backend's assorted timestamp renderings.
///
/// Fields serialized with `isoformat()` arrive as RFC 3339; raw datetimes
/// passed through Flask's jsonify arrive as RFC 2822; a plain SQL text dump
/// has neither offset nor zone and is taken as UTC.
fn parse_timestamp(raw: &str) -> PortResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    Err(PortError::Unexpected(format!(
        "Unparseable timestamp: {raw}"
    )))
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

#[derive(Deserialize)]
struct EmotionRecord {
    #[serde(default)]
    anger: Option<f64>,
    #[serde(default)]
    fear: Option<f64>,
    #[serde(default)]
    joy: Option<f64>,
    #[serde(default)]
    love: Option<f64>,
    #[serde(default)]
    sadness: Option<f64>,
    #[serde(default)]
    surprise: Option<f64>,
}

impl EmotionRecord {
    fn to_domain(&self) -> EmotionVector {
        EmotionVector {
            anger: self.anger.unwrap_or(0.0),
            fear: self.fear.unwrap_or(0.0),
            joy: self.joy.unwrap_or(0.0),
            love: self.love.unwrap_or(0.0),
            sadness: self.sadness.unwrap_or(0.0),
            surprise: self.surprise.unwrap_or(0.0),
        }
    }
}

#[derive(Deserialize)]
struct EntryRecord {
    id: i64,
    raw_text: String,
    insight: String,
    created_at: String,
}

impl EntryRecord {
    fn to_domain(self) -> PortResult<Entry> {
        Ok(Entry {
            id: self.id,
            created_at: parse_timestamp(&self.created_at)?,
            raw_text: self.raw_text,
            insight: self.insight,
        })
    }
}

#[derive(Deserialize)]
struct EntriesResponse {
    #[serde(default)]
    entries: Vec<EntryRecord>,
}

#[derive(Deserialize)]
struct SnapshotRecord {
    stim_id: i64,
    created_at: Option<String>,
    emotions: EmotionRecord,
}

#[derive(Deserialize)]
struct InsightRecord {
    created_at: Option<String>,
    insight: String,
}

#[derive(Deserialize)]
struct InsightsResponse {
    #[serde(default)]
    entries: Vec<InsightRecord>,
}

#[derive(Deserialize)]
struct EntryStimulusRecord {
    name: String,
    emotions: EmotionRecord,
}

impl EntryStimulusRecord {
    fn to_domain(self) -> EntryStimulus {
        EntryStimulus {
            emotions: self.emotions.to_domain(),
            name: self.name,
        }
    }
}

#[derive(Deserialize)]
struct EntryStimuliResponse {
    #[serde(default)]
    stims: Vec<EntryStimulusRecord>,
}

#[derive(Deserialize)]
struct TopStimulusRecord {
    name: Option<String>,
    mentions: u32,
    emotions: EmotionRecord,
}

#[derive(Deserialize)]
struct TopStimuliResponse {
    #[serde(default)]
    top_stims: Vec<TopStimulusRecord>,
}

#[derive(Deserialize)]
struct AffirmationResponse {
    #[serde(default)]
    affirmation: String,
}

#[derive(Deserialize)]
struct RemindersResponse {
    #[serde(default)]
    reminders: String,
}

#[derive(Deserialize)]
struct AdviceResponse {
    #[serde(default)]
    advice: BTreeMap<String, String>,
}

//=========================================================================================
// `JournalApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl JournalApi for HttpJournalApi {
    async fn entries_by_date(&self, date: NaiveDate) -> PortResult<Vec<Entry>> {
        let response: EntriesResponse = self
            .get_json(
                "/call_logs/by_date",
                &[("date", date.format("%Y-%m-%d").to_string())],
            )
            .await?;
        response
            .entries
            .into_iter()
            .map(EntryRecord::to_domain)
            .collect()
    }

    async fn entry_by_id(&self, entry_id: i64) -> PortResult<Entry> {
        let response: EntriesResponse = self
            .get_json("/call_logs/by_id", &[("id", entry_id.to_string())])
            .await?;
        match response.entries.into_iter().next() {
            Some(record) => record.to_domain(),
            None => Err(PortError::NotFound(format!("Entry {} not found", entry_id))),
        }
    }

    async fn emotion_mapping(&self) -> PortResult<EmotionCatalog> {
        // The backend groups snapshots under stimulus names ordered by name,
        // so a BTreeMap reproduces its ordering.
        let response: BTreeMap<String, Vec<SnapshotRecord>> =
            self.get_json("/stimulus/emotion-mapping", &[]).await?;

        let mut stimuli = Vec::with_capacity(response.len());
        for (name, records) in response {
            let mut snapshots = Vec::with_capacity(records.len());
            for record in records {
                let Some(raw) = record.created_at else {
                    debug!(stimulus = %name, "skipping snapshot without timestamp");
                    continue;
                };
                snapshots.push(StimulusSnapshot {
                    stim_id: record.stim_id,
                    created_at: parse_timestamp(&raw)?,
                    emotions: record.emotions.to_domain(),
                });
            }
            stimuli.push(StimulusSeries { name, snapshots });
        }
        Ok(EmotionCatalog { stimuli })
    }

    async fn insights_by_stim_id(&self, stim_id: i64) -> PortResult<Vec<Insight>> {
        let response: InsightsResponse = self
            .get_json("/insight/get-by-stim-id", &[("id", stim_id.to_string())])
            .await?;
        let mut insights = Vec::with_capacity(response.entries.len());
        for record in response.entries {
            let Some(raw) = record.created_at else {
                debug!(stim_id, "skipping insight without timestamp");
                continue;
            };
            insights.push(Insight {
                created_at: parse_timestamp(&raw)?,
                text: record.insight,
            });
        }
        Ok(insights)
    }

    async fn stimuli_by_call_id(&self, call_id: i64) -> PortResult<Vec<EntryStimulus>> {
        let response: EntryStimuliResponse = self
            .get_json(
                "/stimulus/get-by-call-id",
                &[("call_id", call_id.to_string())],
            )
            .await?;
        Ok(response
            .stims
            .into_iter()
            .map(EntryStimulusRecord::to_domain)
            .collect())
    }

    async fn top_stimuli_this_week(&self) -> PortResult<Vec<TopStimulus>> {
        let response: TopStimuliResponse =
            self.get_json("/stimulus/week-top-emotions", &[]).await?;
        Ok(response
            .top_stims
            .into_iter()
            .filter_map(|record| {
                // Unnamed aggregates cannot be linked anywhere; drop them.
                let name = record.name?;
                Some(TopStimulus {
                    name,
                    mentions: record.mentions,
                    emotions: record.emotions.to_domain(),
                })
            })
            .collect())
    }

    async fn todays_affirmation(&self) -> PortResult<String> {
        let response: AffirmationResponse = self.get_json("/get-todays-affirmation", &[]).await?;
        Ok(response.affirmation)
    }

    async fn todays_reminders(&self) -> PortResult<String> {
        let response: RemindersResponse = self.get_json("/get-todays-reminders", &[]).await?;
        Ok(response.reminders)
    }

    async fn todays_advice(&self) -> PortResult<Vec<AdviceCard>> {
        let response: AdviceResponse = self.get_json("/get-todays-advice", &[]).await?;
        Ok(response
            .advice
            .into_iter()
            .map(|(title, body)| AdviceCard { title, body })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_timestamps() {
        let ts = parse_timestamp("2024-03-06T14:32:05+00:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-06T14:32:05+00:00");
    }

    #[test]
    fn parses_rfc2822_timestamps() {
        // Flask's jsonify renders raw datetimes this way.
        let ts = parse_timestamp("Wed, 06 Mar 2024 14:32:05 GMT").unwrap();
        assert_eq!(ts.timestamp(), 1_709_735_525);
    }

    #[test]
    fn parses_bare_sql_timestamps_as_utc() {
        let ts = parse_timestamp("2024-03-06 14:32:05").unwrap();
        assert_eq!(ts.timestamp(), 1_709_735_525);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(parse_timestamp("not a time").is_err());
    }

    #[test]
    fn decodes_an_emotion_mapping_body() {
        let body = r#"{
            "rain": [
                {
                    "stim_id": 12,
                    "created_at": "Wed, 06 Mar 2024 14:32:05 GMT",
                    "emotions": {"joy": 0.1, "sadness": 0.7}
                }
            ],
            "work": []
        }"#;
        let decoded: BTreeMap<String, Vec<SnapshotRecord>> = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.len(), 2);
        let record = &decoded["rain"][0];
        assert_eq!(record.stim_id, 12);
        let emotions = record.emotions.to_domain();
        assert_eq!(emotions.sadness, 0.7);
        // Absent labels decode to zero intensity.
        assert_eq!(emotions.anger, 0.0);
    }

    #[test]
    fn decodes_an_entries_body() {
        let body = r#"{
            "entries": [
                {
                    "id": 3,
                    "raw_text": "walked in the rain",
                    "insight": "rain keeps coming up",
                    "created_at": "2024-03-06T14:32:05+00:00"
                }
            ]
        }"#;
        let decoded: EntriesResponse = serde_json::from_str(body).unwrap();
        let entry = decoded.entries.into_iter().next().unwrap().to_domain().unwrap();
        assert_eq!(entry.id, 3);
        assert_eq!(entry.created_at.timestamp(), 1_709_735_525);
    }
}
