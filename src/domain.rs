use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Response from `GET /helix/users`.
///
/// Snapshots of this payload are compared with `PartialEq`, so "changed"
/// means deep structural inequality of the decoded payload, never string
/// comparison of serialized forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub data: Vec<UserRecord>,
}

/// A Helix user profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: CompactString,
    pub login: CompactString,
    pub display_name: CompactString,
    #[serde(rename = "type", default)]
    pub user_type: CompactString,
    #[serde(default)]
    pub broadcaster_type: CompactString,
    #[serde(default)]
    pub description: CompactString,
    #[serde(default)]
    pub profile_image_url: CompactString,
    #[serde(default)]
    pub offline_image_url: CompactString,
    #[serde(default)]
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Response from `GET /helix/streams`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamsResponse {
    #[serde(default)]
    pub data: Vec<StreamRecord>,
}

/// A live broadcast session.
///
/// Identity for diffing purposes is `started_at`: Twitch keeps the same
/// stream id across title/category changes within a session, while a fresh
/// session always carries a fresh start timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub id: CompactString,
    pub user_id: CompactString,
    #[serde(default)]
    pub user_login: CompactString,
    #[serde(default)]
    pub user_name: CompactString,
    #[serde(default)]
    pub game_id: CompactString,
    #[serde(default)]
    pub game_name: CompactString,
    #[serde(rename = "type", default)]
    pub stream_type: CompactString,
    #[serde(default)]
    pub title: CompactString,
    #[serde(default)]
    pub viewer_count: u64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub language: CompactString,
    #[serde(default)]
    pub thumbnail_url: CompactString,
    #[serde(default)]
    pub is_mature: bool,
}

impl StreamsResponse {
    /// Records not present in `prior`, detected by `started_at`.
    ///
    /// With no prior snapshot every record is new: the first observation
    /// reports all currently-live streams.
    pub fn new_records<'a>(&'a self, prior: Option<&StreamsResponse>) -> Vec<&'a StreamRecord> {
        match prior {
            None => self.data.iter().collect(),
            Some(prior) => self
                .data
                .iter()
                .filter(|stream| {
                    !prior
                        .data
                        .iter()
                        .any(|seen| seen.started_at == stream.started_at)
                })
                .collect(),
        }
    }
}

/// Response from `POST /oauth2/token` (client credentials grant)
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: CompactString,
    /// Token lifetime in seconds
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: CompactString,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(started_at: &str) -> StreamRecord {
        StreamRecord {
            id: "40952121085".into(),
            user_id: "101051819".into(),
            started_at: started_at.parse().unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn deserializes_helix_users_payload() {
        let body = r#"{
            "data": [{
                "id": "187039841",
                "login": "xtivalia",
                "display_name": "xTivalia",
                "type": "",
                "broadcaster_type": "affiliate",
                "description": "Streameuse multigaming",
                "profile_image_url": "https://static-cdn.jtvnw.net/profile.png",
                "offline_image_url": "https://static-cdn.jtvnw.net/offline.jpeg",
                "view_count": 1227,
                "created_at": "2017-12-23T18:56:07Z"
            }]
        }"#;

        let payload: UserResponse = serde_json::from_str(body).unwrap();
        assert_eq!(payload.data.len(), 1);
        assert_eq!(payload.data[0].login, "xtivalia");
        assert_eq!(payload.data[0].broadcaster_type, "affiliate");
        assert_eq!(payload.data[0].view_count, 1227);
    }

    #[test]
    fn deserializes_helix_streams_payload() {
        let body = r#"{
            "data": [{
                "id": "40952121085",
                "user_id": "101051819",
                "user_login": "afro",
                "user_name": "Afro",
                "game_id": "32982",
                "game_name": "Grand Theft Auto V",
                "type": "live",
                "title": "Jacob: Digital Den Laptops",
                "viewer_count": 1490,
                "started_at": "2021-03-10T03:18:11Z",
                "language": "en",
                "thumbnail_url": "https://static-cdn.jtvnw.net/preview.jpg",
                "tag_ids": [],
                "is_mature": false
            }]
        }"#;

        let payload: StreamsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(payload.data.len(), 1);
        assert_eq!(payload.data[0].stream_type, "live");
        assert_eq!(
            payload.data[0].started_at,
            "2021-03-10T03:18:11Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn structural_equality_survives_serde_round_trip() {
        let payload = StreamsResponse { data: vec![stream("2024-01-01T00:00:00Z")] };
        let json = serde_json::to_value(&payload).unwrap();
        let restored: StreamsResponse = serde_json::from_value(json).unwrap();
        assert_eq!(payload, restored);
    }

    #[test]
    fn every_record_is_new_without_prior_snapshot() {
        let payload = StreamsResponse {
            data: vec![
                stream("2024-01-01T00:00:00Z"),
                stream("2024-01-02T00:00:00Z"),
                stream("2024-01-03T00:00:00Z"),
            ],
        };
        assert_eq!(payload.new_records(None).len(), 3);
    }

    #[test]
    fn new_records_diff_by_started_at() {
        let prior = StreamsResponse { data: vec![stream("2024-01-01T00:00:00Z")] };
        let payload = StreamsResponse {
            data: vec![stream("2024-01-01T00:00:00Z"), stream("2024-01-02T00:00:00Z")],
        };

        let new_records = payload.new_records(Some(&prior));
        assert_eq!(new_records.len(), 1);
        assert_eq!(
            new_records[0].started_at,
            "2024-01-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn no_new_records_for_identical_sessions() {
        let prior = StreamsResponse { data: vec![stream("2024-01-01T00:00:00Z")] };
        let payload = StreamsResponse { data: vec![stream("2024-01-01T00:00:00Z")] };
        assert!(payload.new_records(Some(&prior)).is_empty());
    }
}
