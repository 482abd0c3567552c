//! Wire types for the metadata-service HTTP contracts. Field names follow
//! the server's camelCase JSON; unknown reply fields are ignored.

use serde::{Deserialize, Serialize};

/// Body of `POST /metadata/upload-url`. The `uuid` is generated fresh for
/// every request so the metadata service can correlate log lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub uuid: String,
    pub filename: String,
    pub target_dir: String,
    pub owner: String,
}

/// Reply to `POST /metadata/upload-url`. When `exists` is set the file is
/// already present at the requested location and `node_url` carries no
/// meaning; otherwise `node_url` is the storage node chosen for the bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub exists: bool,
    #[serde(default)]
    pub node_url: String,
}

/// Body of `POST /metadata/file/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDirectoryRequest {
    pub directory: String,
    pub owner: String,
}

/// One file as the metadata service knows it. Read-only snapshot; the
/// client never mutates or caches these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileEntry {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub directory: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_request_uses_wire_field_names() {
        let request = UploadUrlRequest {
            uuid: "u-1".into(),
            filename: "a.txt".into(),
            target_dir: "/backup".into(),
            owner: "alice".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "uuid": "u-1",
                "filename": "a.txt",
                "targetDir": "/backup",
                "owner": "alice",
            })
        );
    }

    #[test]
    fn upload_response_parses_node_url() {
        let response: UploadUrlResponse = serde_json::from_str(
            r#"{"exists":false,"nodeUrl":"http://node-1:8081/dfs/upload"}"#,
        )
        .unwrap();
        assert!(!response.exists);
        assert_eq!(response.node_url, "http://node-1:8081/dfs/upload");
    }

    #[test]
    fn upload_response_tolerates_unknown_fields() {
        let response: UploadUrlResponse =
            serde_json::from_str(r#"{"exists":true,"extra":42}"#).unwrap();
        assert!(response.exists);
        assert!(response.node_url.is_empty());
    }

    #[test]
    fn list_request_uses_wire_field_names() {
        let request = ListDirectoryRequest {
            directory: "/backup".into(),
            owner: "alice".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"directory": "/backup", "owner": "alice"})
        );
    }

    #[test]
    fn file_entries_parse_from_a_server_array() {
        let entries: Vec<RemoteFileEntry> = serde_json::from_str(
            r#"[{"name":"a.txt","size":3,"owner":"alice","directory":"/backup"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].size, 3);
    }
}
