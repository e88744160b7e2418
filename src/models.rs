/*
 * Responsibility
 * - HTTP 呼び出し元に返す Domain Task
 * - 所有者は domain-data サービス、gateway は運ぶだけ
 */
use serde::Serialize;

use crate::rpc::proto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
    #[serde(rename = "uid")]
    pub owner_id: i64,
}

impl From<proto::Task> for Task {
    fn from(t: proto::Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            done: t.done,
            owner_id: t.uid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_owner_as_uid() {
        let task = Task {
            id: 1,
            title: "x".into(),
            description: "y".into(),
            done: false,
            owner_id: 7,
        };

        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({ "id": 1, "title": "x", "description": "y", "done": false, "uid": 7 })
        );
    }
}
