//! JSON codec for the Dropfour wire format.
//!
//! Inbound frames cannot be decoded with a plain derived tagged enum: the
//! `error` field outranks the `status` tag, unknown tags must map to
//! [`ServerFrame::Unrecognized`] instead of failing, and two fields need a
//! second decoding stage (the board travels as a JSON-encoded *string*
//! inside the outer object, and the winner may arrive stringified). So the
//! decoder goes through `serde_json::Value` first and only then into the
//! typed per-frame shapes.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Board, ProtocolError, ServerFrame, StartRequest};

/// Serializes a start request into a single outbound text frame.
///
/// # Errors
/// Returns [`ProtocolError::Encode`] if serialization fails.
pub fn encode_start_request(request: &StartRequest) -> Result<String, ProtocolError> {
    serde_json::to_string(request).map_err(ProtocolError::Encode)
}

/// Decodes one inbound text frame.
///
/// # Errors
/// - [`ProtocolError::Decode`] — the payload is not JSON, a known tag's
///   fields are missing or mistyped, or the nested board is malformed.
/// - [`ProtocolError::InvalidFrame`] — valid JSON that carries neither a
///   `status` tag nor an `error` field, or a winner that is not an integer.
pub fn decode_frame(raw: &str) -> Result<ServerFrame, ProtocolError> {
    let value: Value = serde_json::from_str(raw).map_err(ProtocolError::Decode)?;

    // The error field takes precedence over the status tag.
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Ok(ServerFrame::ServerError {
            message: message.to_owned(),
        });
    }

    let Some(status) = value.get("status").and_then(Value::as_str) else {
        return Err(ProtocolError::InvalidFrame(
            "frame carries neither a status tag nor an error field".into(),
        ));
    };

    match status {
        "connection_established" => {
            let fields: HandshakeFields = from_value(value)?;
            Ok(ServerFrame::ConnectionEstablished {
                algorithms: fields.algorithms,
            })
        }
        "game_started" => {
            let fields: StartedFields = from_value(value)?;
            Ok(ServerFrame::GameStarted {
                algorithm: fields.algorithm,
                difficulty: fields.difficulty,
            })
        }
        "human_move" => {
            let fields: MoveFields = from_value(value)?;
            Ok(ServerFrame::HumanMove {
                board: parse_board(&fields.board)?,
                column: fields.position,
            })
        }
        "computer_move" => {
            let fields: MoveFields = from_value(value)?;
            Ok(ServerFrame::ComputerMove {
                board: parse_board(&fields.board)?,
                column: fields.position,
            })
        }
        "end" => {
            let fields: EndFields = from_value(value)?;
            Ok(ServerFrame::GameOver {
                board: parse_board(&fields.board)?,
                winner: parse_winner(&fields.winner)?,
            })
        }
        other => Ok(ServerFrame::Unrecognized {
            status: other.to_owned(),
        }),
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(value).map_err(ProtocolError::Decode)
}

/// Second decoding stage for the board: the grid arrives JSON-encoded as a
/// string inside the outer object.
fn parse_board(raw: &str) -> Result<Board, ProtocolError> {
    serde_json::from_str(raw).map_err(ProtocolError::Decode)
}

/// The server stringifies the winner field, so accept both a JSON number
/// and a numeric string.
fn parse_winner(value: &Value) -> Result<i64, ProtocolError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ProtocolError::InvalidFrame(format!("winner is not an integer: {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| ProtocolError::InvalidFrame(format!("winner is not an integer: {s:?}"))),
        other => Err(ProtocolError::InvalidFrame(format!(
            "winner has an unexpected type: {other}"
        ))),
    }
}

#[derive(serde::Deserialize)]
struct HandshakeFields {
    algorithms: Vec<String>,
}

#[derive(serde::Deserialize)]
struct StartedFields {
    algorithm: String,
    difficulty: u32,
}

#[derive(serde::Deserialize)]
struct MoveFields {
    board: String,
    position: usize,
}

#[derive(serde::Deserialize)]
struct EndFields {
    board: String,
    winner: Value,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, COLUMNS, ROWS};

    /// An empty grid, JSON-encoded once (the nested form the server sends).
    fn nested_board() -> String {
        serde_json::to_string(&vec![vec![0u8; COLUMNS]; ROWS]).unwrap()
    }

    #[test]
    fn test_decode_handshake() {
        let raw = r#"{"status":"connection_established","algorithms":["MiniMax","MCTS","AI_Mode"]}"#;
        let frame = decode_frame(raw).unwrap();
        assert_eq!(
            frame,
            ServerFrame::ConnectionEstablished {
                algorithms: vec!["MiniMax".into(), "MCTS".into(), "AI_Mode".into()],
            }
        );
    }

    #[test]
    fn test_decode_human_move_parses_nested_board() {
        let raw = serde_json::json!({
            "status": "human_move",
            "board": nested_board(),
            "position": 3,
        })
        .to_string();

        match decode_frame(&raw).unwrap() {
            ServerFrame::HumanMove { board, column } => {
                assert_eq!(column, 3);
                assert_eq!(board.cell(0, 0), Cell::Empty);
            }
            other => panic!("expected HumanMove, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_computer_move() {
        let raw = serde_json::json!({
            "status": "computer_move",
            "board": nested_board(),
            "position": 6,
        })
        .to_string();

        assert!(matches!(
            decode_frame(&raw).unwrap(),
            ServerFrame::ComputerMove { column: 6, .. }
        ));
    }

    #[test]
    fn test_decode_end_with_numeric_winner() {
        let raw = serde_json::json!({
            "status": "end",
            "board": nested_board(),
            "winner": 1,
        })
        .to_string();

        assert!(matches!(
            decode_frame(&raw).unwrap(),
            ServerFrame::GameOver { winner: 1, .. }
        ));
    }

    #[test]
    fn test_decode_end_with_stringified_winner() {
        // The server sends `"winner": str(winner)`.
        let raw = serde_json::json!({
            "status": "end",
            "board": nested_board(),
            "winner": "2",
        })
        .to_string();

        assert!(matches!(
            decode_frame(&raw).unwrap(),
            ServerFrame::GameOver { winner: 2, .. }
        ));
    }

    #[test]
    fn test_decode_end_rejects_non_integer_winner() {
        let raw = serde_json::json!({
            "status": "end",
            "board": nested_board(),
            "winner": "nobody",
        })
        .to_string();

        assert!(matches!(
            decode_frame(&raw),
            Err(ProtocolError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_decode_game_started() {
        let raw = r#"{"status":"game_started","algorithm":"MCTS","difficulty":3}"#;
        let frame = decode_frame(raw).unwrap();
        assert_eq!(
            frame,
            ServerFrame::GameStarted {
                algorithm: "MCTS".into(),
                difficulty: 3,
            }
        );
    }

    #[test]
    fn test_error_field_outranks_status_tag() {
        let raw = r#"{"status":"human_move","error":"Invalid input."}"#;
        let frame = decode_frame(raw).unwrap();
        assert_eq!(
            frame,
            ServerFrame::ServerError {
                message: "Invalid input.".into(),
            }
        );
    }

    #[test]
    fn test_unknown_status_is_unrecognized_not_fatal() {
        let raw = r#"{"status":"tournament_over","bracket":3}"#;
        let frame = decode_frame(raw).unwrap();
        assert_eq!(
            frame,
            ServerFrame::Unrecognized {
                status: "tournament_over".into(),
            }
        );
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        assert!(matches!(
            decode_frame("not json at all"),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_untagged_object_returns_error() {
        assert!(matches!(
            decode_frame(r#"{"name":"hello"}"#),
            Err(ProtocolError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_move_frame_with_malformed_nested_board_fails() {
        let raw = serde_json::json!({
            "status": "human_move",
            "board": "[[0,0,0]",
            "position": 0,
        })
        .to_string();

        assert!(matches!(decode_frame(&raw), Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_move_frame_missing_position_fails() {
        let raw = serde_json::json!({
            "status": "human_move",
            "board": nested_board(),
        })
        .to_string();

        assert!(matches!(decode_frame(&raw), Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_start_request_shape() {
        let text = encode_start_request(&StartRequest {
            algorithm: "MiniMax".into(),
            difficulty: 2,
        })
        .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["algorithm"], "MiniMax");
        assert_eq!(value["difficulty"], 2);
    }
}
