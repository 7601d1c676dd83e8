//! Messages exchanged over the `/socket` WebSocket.

use std::collections::BTreeMap;

use jellyfin_codec::{DecodeError, json, record, wire_enum};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;
use uuid::Uuid;

use crate::items::UserItemDataDto;
use crate::session::{GeneralCommand, PlayRequest, PlaystateRequest, SessionInfoDto};
use crate::sync_play::{GroupUpdate, SendCommand};

wire_enum! {
    /// Discriminator of every WebSocket message, in both directions.
    pub enum SessionMessageType {
        ForceKeepAlive => "ForceKeepAlive",
        GeneralCommand => "GeneralCommand",
        UserDataChanged => "UserDataChanged",
        Sessions => "Sessions",
        Play => "Play",
        SyncPlayCommand => "SyncPlayCommand",
        SyncPlayGroupUpdate => "SyncPlayGroupUpdate",
        Playstate => "Playstate",
        RestartRequired => "RestartRequired",
        ServerShuttingDown => "ServerShuttingDown",
        ServerRestarting => "ServerRestarting",
        LibraryChanged => "LibraryChanged",
        UserDeleted => "UserDeleted",
        UserUpdated => "UserUpdated",
        SeriesTimerCreated => "SeriesTimerCreated",
        TimerCreated => "TimerCreated",
        SeriesTimerCancelled => "SeriesTimerCancelled",
        TimerCancelled => "TimerCancelled",
        RefreshProgress => "RefreshProgress",
        ScheduledTaskEnded => "ScheduledTaskEnded",
        PackageInstallationCancelled => "PackageInstallationCancelled",
        PackageInstallationFailed => "PackageInstallationFailed",
        PackageInstallationCompleted => "PackageInstallationCompleted",
        PackageInstalling => "PackageInstalling",
        PackageUninstalled => "PackageUninstalled",
        ActivityLogEntry => "ActivityLogEntry",
        ScheduledTasksInfo => "ScheduledTasksInfo",
        ActivityLogEntryStart => "ActivityLogEntryStart",
        ActivityLogEntryStop => "ActivityLogEntryStop",
        SessionsStart => "SessionsStart",
        SessionsStop => "SessionsStop",
        ScheduledTasksInfoStart => "ScheduledTasksInfoStart",
        ScheduledTasksInfoStop => "ScheduledTasksInfoStop",
        KeepAlive => "KeepAlive",
    }
}

record! {
    pub struct UserDataChangeInfo {
        user_id: Uuid => "UserId",
        user_data_list: Vec<UserItemDataDto> => "UserDataList",
    }
}

record! {
    /// Items and folders touched by a library scan.
    pub struct LibraryUpdateInfo {
        folders_added_to: Vec<String> => "FoldersAddedTo",
        folders_removed_from: Vec<String> => "FoldersRemovedFrom",
        items_added: Vec<String> => "ItemsAdded",
        items_removed: Vec<String> => "ItemsRemoved",
        items_updated: Vec<String> => "ItemsUpdated",
        collection_folders: Vec<String> => "CollectionFolders",
        is_empty: bool => "IsEmpty",
    }
}

/// Members shared by every message variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBody<T> {
    #[serde(rename = "MessageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Uuid>,
    #[serde(rename = "Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> MessageBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            message_id: None,
            data: Some(data),
        }
    }

    /// A body with no `Data` member.
    pub fn empty() -> Self {
        Self {
            message_id: None,
            data: None,
        }
    }
}

/// Server-to-client message, discriminated by `MessageType`.
///
/// Payloads without a typed model here stay raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "MessageType")]
pub enum OutboundWebSocketMessage {
    ActivityLogEntry(MessageBody<Vec<Value>>),
    ForceKeepAlive(MessageBody<i32>),
    GeneralCommand(MessageBody<GeneralCommand>),
    KeepAlive(MessageBody<Value>),
    LibraryChanged(MessageBody<LibraryUpdateInfo>),
    PackageInstallationCancelled(MessageBody<Value>),
    PackageInstallationCompleted(MessageBody<Value>),
    PackageInstallationFailed(MessageBody<Value>),
    PackageInstalling(MessageBody<Value>),
    PackageUninstalled(MessageBody<Value>),
    Play(MessageBody<PlayRequest>),
    Playstate(MessageBody<PlaystateRequest>),
    RefreshProgress(MessageBody<BTreeMap<String, String>>),
    RestartRequired(MessageBody<Value>),
    ScheduledTaskEnded(MessageBody<Value>),
    ScheduledTasksInfo(MessageBody<Vec<Value>>),
    SeriesTimerCancelled(MessageBody<Value>),
    SeriesTimerCreated(MessageBody<Value>),
    ServerRestarting(MessageBody<Value>),
    ServerShuttingDown(MessageBody<Value>),
    Sessions(MessageBody<Vec<SessionInfoDto>>),
    SyncPlayCommand(MessageBody<SendCommand>),
    SyncPlayGroupUpdate(MessageBody<GroupUpdate>),
    TimerCancelled(MessageBody<Value>),
    TimerCreated(MessageBody<Value>),
    UserDataChanged(MessageBody<UserDataChangeInfo>),
    UserDeleted(MessageBody<String>),
    UserUpdated(MessageBody<Value>),
}

impl OutboundWebSocketMessage {
    pub fn message_type(&self) -> SessionMessageType {
        use OutboundWebSocketMessage as M;
        use SessionMessageType as T;
        match self {
            M::ActivityLogEntry(_) => T::ActivityLogEntry,
            M::ForceKeepAlive(_) => T::ForceKeepAlive,
            M::GeneralCommand(_) => T::GeneralCommand,
            M::KeepAlive(_) => T::KeepAlive,
            M::LibraryChanged(_) => T::LibraryChanged,
            M::PackageInstallationCancelled(_) => T::PackageInstallationCancelled,
            M::PackageInstallationCompleted(_) => T::PackageInstallationCompleted,
            M::PackageInstallationFailed(_) => T::PackageInstallationFailed,
            M::PackageInstalling(_) => T::PackageInstalling,
            M::PackageUninstalled(_) => T::PackageUninstalled,
            M::Play(_) => T::Play,
            M::Playstate(_) => T::Playstate,
            M::RefreshProgress(_) => T::RefreshProgress,
            M::RestartRequired(_) => T::RestartRequired,
            M::ScheduledTaskEnded(_) => T::ScheduledTaskEnded,
            M::ScheduledTasksInfo(_) => T::ScheduledTasksInfo,
            M::SeriesTimerCancelled(_) => T::SeriesTimerCancelled,
            M::SeriesTimerCreated(_) => T::SeriesTimerCreated,
            M::ServerRestarting(_) => T::ServerRestarting,
            M::ServerShuttingDown(_) => T::ServerShuttingDown,
            M::Sessions(_) => T::Sessions,
            M::SyncPlayCommand(_) => T::SyncPlayCommand,
            M::SyncPlayGroupUpdate(_) => T::SyncPlayGroupUpdate,
            M::TimerCancelled(_) => T::TimerCancelled,
            M::TimerCreated(_) => T::TimerCreated,
            M::UserDataChanged(_) => T::UserDataChanged,
            M::UserDeleted(_) => T::UserDeleted,
            M::UserUpdated(_) => T::UserUpdated,
        }
    }

    /// Decodes one text frame.
    pub fn from_json_str(text: &str) -> Result<Self, DecodeError> {
        let message: Self = json::from_str(text)?;
        trace!(message_type = %message.message_type(), "websocket message in");
        Ok(message)
    }
}

/// Client-to-server message, discriminated by `MessageType`.
///
/// `*Start` messages carry the `"initialDelayMs,intervalMs"` pair the server
/// uses to schedule periodic pushes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "MessageType")]
pub enum InboundWebSocketMessage {
    ActivityLogEntryStart(MessageBody<String>),
    ActivityLogEntryStop(MessageBody<Value>),
    KeepAlive(MessageBody<Value>),
    ScheduledTasksInfoStart(MessageBody<String>),
    ScheduledTasksInfoStop(MessageBody<Value>),
    SessionsStart(MessageBody<String>),
    SessionsStop(MessageBody<Value>),
}

impl InboundWebSocketMessage {
    pub fn message_type(&self) -> SessionMessageType {
        use SessionMessageType as T;
        match self {
            Self::ActivityLogEntryStart(_) => T::ActivityLogEntryStart,
            Self::ActivityLogEntryStop(_) => T::ActivityLogEntryStop,
            Self::KeepAlive(_) => T::KeepAlive,
            Self::ScheduledTasksInfoStart(_) => T::ScheduledTasksInfoStart,
            Self::ScheduledTasksInfoStop(_) => T::ScheduledTasksInfoStop,
            Self::SessionsStart(_) => T::SessionsStart,
            Self::SessionsStop(_) => T::SessionsStop,
        }
    }

    /// Subscribes to session pushes every `interval_ms`, after `initial_delay_ms`.
    pub fn sessions_start(initial_delay_ms: u64, interval_ms: u64) -> Self {
        let schedule = format!("{initial_delay_ms},{interval_ms}");
        Self::SessionsStart(MessageBody::new(schedule))
    }

    /// Encodes one text frame.
    pub fn to_json_string(&self) -> String {
        match serde_json::to_string(self) {
            Ok(text) => text,
            // Every payload is string-keyed.
            Err(err) => panic!("websocket message is not JSON-encodable: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::session::{GeneralCommandType, PlaystateCommand};
    use crate::sync_play::{
        GroupStateType, GroupUpdateType, PlaybackRequestType,
    };

    #[test]
    fn keep_alive_without_data() {
        let message = OutboundWebSocketMessage::from_json_str(concat!(
            r#"{"MessageType":"KeepAlive","#,
            r#""MessageId":"00000000-0000-0000-0000-000000000007"}"#
        ))
        .expect("decode");
        let OutboundWebSocketMessage::KeepAlive(body) = message else {
            panic!("expected keep-alive");
        };
        assert_eq!(body.message_id, Some(Uuid::from_u128(7)));
        assert_eq!(body.data, None);
    }

    #[test]
    fn force_keep_alive_carries_timeout() {
        let message = OutboundWebSocketMessage::from_json_str(
            r#"{"MessageType":"ForceKeepAlive","Data":60}"#,
        )
        .expect("decode");
        assert_eq!(message.message_type(), SessionMessageType::ForceKeepAlive);
        assert_eq!(
            message,
            OutboundWebSocketMessage::ForceKeepAlive(MessageBody::new(60))
        );
    }

    #[test]
    fn playstate_payload_is_typed() {
        let message = OutboundWebSocketMessage::from_json_str(concat!(
            r#"{"MessageType":"Playstate","#,
            r#""Data":{"Command":"Seek","SeekPositionTicks":300000000}}"#
        ))
        .expect("decode");
        let OutboundWebSocketMessage::Playstate(MessageBody {
            data: Some(request),
            ..
        }) = message
        else {
            panic!("expected playstate");
        };
        assert_eq!(request.command, Some(PlaystateCommand::Seek));
        assert_eq!(request.seek_position_ticks, Some(300_000_000));
    }

    #[test]
    fn nested_group_update() {
        let message: OutboundWebSocketMessage = json::from_value(&json!({
            "MessageType": "SyncPlayGroupUpdate",
            "Data": {"Type": "NotInGroup", "Data": "none"}
        }))
        .expect("decode");
        let OutboundWebSocketMessage::SyncPlayGroupUpdate(body) = message else {
            panic!("expected group update");
        };
        assert_eq!(
            body.data.map(|update| update.update_type()),
            Some(GroupUpdateType::NotInGroup)
        );
    }

    #[test]
    fn group_state_update_frame() {
        let message = OutboundWebSocketMessage::from_json_str(concat!(
            r#"{"MessageType":"SyncPlayGroupUpdate","#,
            r#""Data":{"Type":"StateUpdate","#,
            r#""GroupId":"00000000-0000-0000-0000-000000000009","#,
            r#""Data":{"State":"Paused","Reason":"Pause"}}}"#
        ))
        .expect("decode");
        assert_eq!(message.message_type(), SessionMessageType::SyncPlayGroupUpdate);
        let OutboundWebSocketMessage::SyncPlayGroupUpdate(MessageBody {
            message_id: None,
            data: Some(GroupUpdate::StateUpdate(body)),
        }) = message
        else {
            panic!("expected a state update");
        };
        assert_eq!(body.group_id, Some(Uuid::from_u128(9)));
        let state = body.data.expect("state payload");
        assert_eq!(state.state, Some(GroupStateType::Paused));
        assert_eq!(state.reason, Some(PlaybackRequestType::Pause));
    }

    #[test]
    fn general_command_encodes_with_tag() {
        let command = GeneralCommand {
            name: Some(GeneralCommandType::SetVolume),
            arguments: Some(BTreeMap::from([("Volume".to_owned(), "40".to_owned())])),
            ..GeneralCommand::default()
        };
        let message = OutboundWebSocketMessage::GeneralCommand(MessageBody::new(command));
        assert_eq!(
            serde_json::to_value(&message).expect("encode"),
            json!({
                "MessageType": "GeneralCommand",
                "Data": {"Name": "SetVolume", "Arguments": {"Volume": "40"}}
            })
        );
    }

    #[test]
    fn inbound_subscription_frame() {
        assert_eq!(
            InboundWebSocketMessage::sessions_start(0, 1500).to_json_string(),
            r#"{"MessageType":"SessionsStart","Data":"0,1500"}"#
        );
        let stop: InboundWebSocketMessage =
            json::from_str(r#"{"MessageType":"SessionsStop"}"#).expect("decode");
        assert_eq!(stop, InboundWebSocketMessage::SessionsStop(MessageBody::empty()));
        assert_eq!(stop.message_type(), SessionMessageType::SessionsStop);
    }

    #[test]
    fn outbound_tag_is_case_sensitive() {
        let err = OutboundWebSocketMessage::from_json_str(
            r#"{"MessageType":"keepalive"}"#,
        )
        .expect_err("lowercase tag");
        assert!(err.is_unknown_enum_token());
    }
}
