//! SyncPlay group state and the updates broadcast to group members.

use chrono::{DateTime, Utc};
use jellyfin_codec::{record, wire_enum};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

wire_enum! {
    pub enum GroupStateType {
        Idle => "Idle",
        Waiting => "Waiting",
        Paused => "Paused",
        Playing => "Playing",
    }
}

wire_enum! {
    /// Discriminator of a [`GroupUpdate`].
    pub enum GroupUpdateType {
        UserJoined => "UserJoined",
        UserLeft => "UserLeft",
        GroupJoined => "GroupJoined",
        GroupLeft => "GroupLeft",
        StateUpdate => "StateUpdate",
        PlayQueue => "PlayQueue",
        NotInGroup => "NotInGroup",
        GroupDoesNotExist => "GroupDoesNotExist",
        CreateGroupDenied => "CreateGroupDenied",
        JoinGroupDenied => "JoinGroupDenied",
        LibraryAccessDenied => "LibraryAccessDenied",
    }
}

wire_enum! {
    pub enum PlayQueueUpdateReason {
        NewPlaylist => "NewPlaylist",
        SetCurrentItem => "SetCurrentItem",
        RemoveItems => "RemoveItems",
        MoveItem => "MoveItem",
        Queue => "Queue",
        QueueNext => "QueueNext",
        NextItem => "NextItem",
        PreviousItem => "PreviousItem",
        RepeatMode => "RepeatMode",
        ShuffleMode => "ShuffleMode",
    }
}

wire_enum! {
    pub enum GroupShuffleMode {
        Sorted => "Sorted",
        Shuffle => "Shuffle",
    }
}

wire_enum! {
    pub enum GroupRepeatMode {
        RepeatOne => "RepeatOne",
        RepeatAll => "RepeatAll",
        RepeatNone => "RepeatNone",
    }
}

wire_enum! {
    pub enum PlaybackRequestType {
        Play => "Play",
        SetPlaylistItem => "SetPlaylistItem",
        RemoveFromPlaylist => "RemoveFromPlaylist",
        MovePlaylistItem => "MovePlaylistItem",
        Queue => "Queue",
        Unpause => "Unpause",
        Pause => "Pause",
        Stop => "Stop",
        Seek => "Seek",
        Buffer => "Buffer",
        Ready => "Ready",
        NextItem => "NextItem",
        PreviousItem => "PreviousItem",
        SetRepeatMode => "SetRepeatMode",
        SetShuffleMode => "SetShuffleMode",
        Ping => "Ping",
        IgnoreWait => "IgnoreWait",
    }
}

wire_enum! {
    pub enum SendCommandType {
        Unpause => "Unpause",
        Pause => "Pause",
        Stop => "Stop",
        Seek => "Seek",
    }
}

record! {
    pub struct GroupInfoDto {
        group_id: Uuid => "GroupId",
        group_name: String => "GroupName",
        state: GroupStateType => "State",
        participants: Vec<String> => "Participants",
        last_updated_at: DateTime<Utc> => "LastUpdatedAt",
    }
}

record! {
    pub struct SyncPlayQueueItem {
        item_id: Uuid => "ItemId",
        playlist_item_id: Uuid => "PlaylistItemId",
    }
}

record! {
    /// The group's play queue after a change.
    pub struct PlayQueueUpdate {
        reason: PlayQueueUpdateReason => "Reason",
        last_update: DateTime<Utc> => "LastUpdate",
        playlist: Vec<SyncPlayQueueItem> => "Playlist",
        playing_item_index: i32 => "PlayingItemIndex",
        start_position_ticks: i64 => "StartPositionTicks",
        is_playing: bool => "IsPlaying",
        shuffle_mode: GroupShuffleMode => "ShuffleMode",
        repeat_mode: GroupRepeatMode => "RepeatMode",
    }
}

impl PlayQueueUpdate {
    pub fn playing_item(&self) -> Option<&SyncPlayQueueItem> {
        let index = usize::try_from(self.playing_item_index?).ok()?;
        self.playlist.as_ref()?.get(index)
    }
}

record! {
    pub struct GroupStateUpdate {
        state: GroupStateType => "State",
        reason: PlaybackRequestType => "Reason",
    }
}

record! {
    /// A timed playback command for every member of a group.
    pub struct SendCommand {
        group_id: Uuid => "GroupId",
        playlist_item_id: Uuid => "PlaylistItemId",
        when: DateTime<Utc> => "When",
        position_ticks: i64 => "PositionTicks",
        command: SendCommandType => "Command",
        emitted_at: DateTime<Utc> => "EmittedAt",
    }
}

/// Fields shared by every [`GroupUpdate`] variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupUpdateBody<T> {
    #[serde(rename = "GroupId", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(rename = "Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> GroupUpdateBody<T> {
    pub fn new(group_id: Uuid, data: T) -> Self {
        Self {
            group_id: Some(group_id),
            data: Some(data),
        }
    }
}

/// A SyncPlay group update, discriminated by its `Type` member.
///
/// Payload errors are reported at the root of the update: the tag has to be
/// read before the payload can be typed, so the payload is decoded from a
/// buffered copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum GroupUpdate {
    GroupDoesNotExist(GroupUpdateBody<String>),
    GroupJoined(GroupUpdateBody<GroupInfoDto>),
    GroupLeft(GroupUpdateBody<String>),
    LibraryAccessDenied(GroupUpdateBody<String>),
    NotInGroup(GroupUpdateBody<String>),
    PlayQueue(GroupUpdateBody<PlayQueueUpdate>),
    StateUpdate(GroupUpdateBody<GroupStateUpdate>),
    UserJoined(GroupUpdateBody<String>),
    UserLeft(GroupUpdateBody<String>),
    CreateGroupDenied(GroupUpdateBody<String>),
    JoinGroupDenied(GroupUpdateBody<String>),
}

impl GroupUpdate {
    pub fn update_type(&self) -> GroupUpdateType {
        match self {
            GroupUpdate::GroupDoesNotExist(_) => {
                GroupUpdateType::GroupDoesNotExist
            }
            GroupUpdate::GroupJoined(_) => GroupUpdateType::GroupJoined,
            GroupUpdate::GroupLeft(_) => GroupUpdateType::GroupLeft,
            GroupUpdate::LibraryAccessDenied(_) => {
                GroupUpdateType::LibraryAccessDenied
            }
            GroupUpdate::NotInGroup(_) => GroupUpdateType::NotInGroup,
            GroupUpdate::PlayQueue(_) => GroupUpdateType::PlayQueue,
            GroupUpdate::StateUpdate(_) => GroupUpdateType::StateUpdate,
            GroupUpdate::UserJoined(_) => GroupUpdateType::UserJoined,
            GroupUpdate::UserLeft(_) => GroupUpdateType::UserLeft,
            GroupUpdate::CreateGroupDenied(_) => {
                GroupUpdateType::CreateGroupDenied
            }
            GroupUpdate::JoinGroupDenied(_) => GroupUpdateType::JoinGroupDenied,
        }
    }

    pub fn group_id(&self) -> Option<Uuid> {
        match self {
            GroupUpdate::GroupJoined(body) => body.group_id,
            GroupUpdate::PlayQueue(body) => body.group_id,
            GroupUpdate::StateUpdate(body) => body.group_id,
            GroupUpdate::GroupDoesNotExist(body)
            | GroupUpdate::GroupLeft(body)
            | GroupUpdate::LibraryAccessDenied(body)
            | GroupUpdate::NotInGroup(body)
            | GroupUpdate::UserJoined(body)
            | GroupUpdate::UserLeft(body)
            | GroupUpdate::CreateGroupDenied(body)
            | GroupUpdate::JoinGroupDenied(body) => body.group_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use jellyfin_codec::{Builder, DecodeErrorKind, Record, json};
    use serde_json::json;

    use super::*;

    const GROUP: &str = "3c4d5e6f-0000-4000-8000-000000000001";

    #[test]
    fn decodes_by_type_token() {
        let update: GroupUpdate = json::from_value(&json!({
            "GroupId": GROUP,
            "Type": "UserJoined",
            "Data": "alice"
        }))
        .expect("decode");
        assert_eq!(update.update_type(), GroupUpdateType::UserJoined);
        assert_eq!(
            update.group_id().map(|id| id.to_string()).as_deref(),
            Some(GROUP)
        );
        match update {
            GroupUpdate::UserJoined(body) => {
                assert_eq!(body.data.as_deref(), Some("alice"));
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn play_queue_payload_is_typed() {
        let update: GroupUpdate = json::from_value(&json!({
            "Type": "PlayQueue",
            "Data": {
                "Reason": "NewPlaylist",
                "PlayingItemIndex": 1,
                "IsPlaying": true,
                "Playlist": [
                    {"ItemId": GROUP, "PlaylistItemId": GROUP},
                    {
                        "ItemId": GROUP,
                        "PlaylistItemId": "3c4d5e6f-0000-4000-8000-000000000002"
                    }
                ]
            }
        }))
        .expect("decode");

        let GroupUpdate::PlayQueue(body) = update else {
            panic!("expected a play queue update");
        };
        let queue = body.data.expect("payload");
        assert_eq!(queue.reason, Some(PlayQueueUpdateReason::NewPlaylist));
        assert_eq!(
            queue.playing_item().and_then(|item| item.playlist_item_id),
            Some(Uuid::from_u128(0x3c4d5e6f_0000_4000_8000_000000000002))
        );
    }

    #[test]
    fn encodes_tag_first() {
        let update = GroupUpdate::StateUpdate(GroupUpdateBody::new(
            Uuid::nil(),
            GroupStateUpdate::builder()
                .state(GroupStateType::Waiting)
                .reason(PlaybackRequestType::Buffer)
                .build(),
        ));
        let text = serde_json::to_string(&update).expect("encode");
        assert_eq!(
            text,
            concat!(
                r#"{"Type":"StateUpdate","#,
                r#""GroupId":"00000000-0000-0000-0000-000000000000","#,
                r#""Data":{"State":"Waiting","Reason":"Buffer"}}"#
            )
        );
        let back: GroupUpdate = json::from_str(&text).expect("decode");
        assert_eq!(back, update);
    }

    #[test]
    fn unknown_type_token() {
        let err =
            json::from_value::<GroupUpdate>(&json!({"Type": "GroupExploded"}))
                .expect_err("unknown tag");
        match err.kind {
            DecodeErrorKind::UnknownEnumToken { token, expected } => {
                assert_eq!(token, "GroupExploded");
                assert!(expected.contains(&"PlayQueue"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_type_token() {
        let err = json::from_value::<GroupUpdate>(&json!({"Data": "x"}))
            .expect_err("no tag");
        assert_eq!(err.kind, DecodeErrorKind::MissingField { field: "Type" });
    }

    #[test]
    fn send_command_round_trip() {
        let command = SendCommand::from_json(&json!({
            "GroupId": GROUP,
            "Command": "Seek",
            "PositionTicks": 900_000_000i64,
            "When": "2024-06-01T20:00:00.5Z"
        }))
        .expect("decode");
        assert_eq!(command.command, Some(SendCommandType::Seek));
        assert_eq!(SendCommand::from_json(&command.to_json()).expect("again"), command);
    }
}
