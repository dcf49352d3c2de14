//! Server-to-client frames.

use serde::Serialize;

use crate::{PlayerId, PrivateView, PublicView, RoomCode};

/// Every message the server sends.
///
/// `State` is re-broadcast after each processed intent; the other
/// frames acknowledge connection-level requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerFrame {
    Created {
        code: RoomCode,
        player_id: PlayerId,
        resume_token: String,
    },
    Joined {
        code: RoomCode,
        player_id: PlayerId,
        resume_token: String,
    },
    Spectating {
        code: RoomCode,
    },
    Resumed {
        code: RoomCode,
        player_id: PlayerId,
    },
    State {
        code: RoomCode,
        public: PublicView,
        #[serde(skip_serializing_if = "Option::is_none")]
        private: Option<PrivateView>,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_frame_shape() {
        let frame = ServerFrame::Created {
            code: RoomCode::new("AB2X"),
            player_id: PlayerId::new(1),
            resume_token: "deadbeef".into(),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "created");
        assert_eq!(json["code"], "AB2X");
        assert_eq!(json["playerId"], 1);
        assert_eq!(json["resumeToken"], "deadbeef");
    }

    #[test]
    fn test_error_frame_shape() {
        let frame = ServerFrame::Error {
            message: "not your turn".into(),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"not your turn"}"#);
    }
}
