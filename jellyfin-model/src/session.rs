//! Sessions and the remote-control commands sent to them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jellyfin_codec::{record, wire_enum};
use serde_json::Value;
use uuid::Uuid;

use crate::items::{BaseItemDto, MediaType};
use crate::playback::{PlayerStateInfo, QueueItem};

wire_enum! {
    /// Remote-control commands a client may advertise and receive.
    pub enum GeneralCommandType {
        MoveUp => "MoveUp",
        MoveDown => "MoveDown",
        MoveLeft => "MoveLeft",
        MoveRight => "MoveRight",
        PageUp => "PageUp",
        PageDown => "PageDown",
        PreviousLetter => "PreviousLetter",
        NextLetter => "NextLetter",
        ToggleOsd => "ToggleOsd",
        ToggleContextMenu => "ToggleContextMenu",
        Select => "Select",
        Back => "Back",
        TakeScreenshot => "TakeScreenshot",
        SendKey => "SendKey",
        SendString => "SendString",
        GoHome => "GoHome",
        GoToSettings => "GoToSettings",
        VolumeUp => "VolumeUp",
        VolumeDown => "VolumeDown",
        Mute => "Mute",
        Unmute => "Unmute",
        ToggleMute => "ToggleMute",
        SetVolume => "SetVolume",
        SetAudioStreamIndex => "SetAudioStreamIndex",
        SetSubtitleStreamIndex => "SetSubtitleStreamIndex",
        ToggleFullscreen => "ToggleFullscreen",
        DisplayContent => "DisplayContent",
        GoToSearch => "GoToSearch",
        DisplayMessage => "DisplayMessage",
        SetRepeatMode => "SetRepeatMode",
        ChannelUp => "ChannelUp",
        ChannelDown => "ChannelDown",
        Guide => "Guide",
        ToggleStats => "ToggleStats",
        PlayMediaSource => "PlayMediaSource",
        PlayTrailers => "PlayTrailers",
        SetShuffleQueue => "SetShuffleQueue",
        PlayState => "PlayState",
        PlayNext => "PlayNext",
        ToggleOsdMenu => "ToggleOsdMenu",
        Play => "Play",
        SetMaxStreamingBitrate => "SetMaxStreamingBitrate",
        SetPlaybackOrder => "SetPlaybackOrder",
    }
}

wire_enum! {
    pub enum PlayCommand {
        PlayNow => "PlayNow",
        PlayNext => "PlayNext",
        PlayLast => "PlayLast",
        PlayInstantMix => "PlayInstantMix",
        PlayShuffle => "PlayShuffle",
    }
}

wire_enum! {
    pub enum PlaystateCommand {
        Stop => "Stop",
        Pause => "Pause",
        Unpause => "Unpause",
        NextTrack => "NextTrack",
        PreviousTrack => "PreviousTrack",
        Seek => "Seek",
        Rewind => "Rewind",
        FastForward => "FastForward",
        PlayPause => "PlayPause",
    }
}

record! {
    pub struct SessionUserInfo {
        user_id: Uuid => "UserId",
        user_name: String => "UserName",
    }
}

record! {
    /// A connected client session.
    pub struct SessionInfoDto {
        play_state: PlayerStateInfo => "PlayState",
        additional_users: Vec<SessionUserInfo> => "AdditionalUsers",
        capabilities: Value => "Capabilities",
        remote_end_point: String => "RemoteEndPoint",
        playable_media_types: Vec<MediaType> => "PlayableMediaTypes",
        id: String => "Id",
        user_id: Uuid => "UserId",
        user_name: String => "UserName",
        client: String => "Client",
        last_activity_date: DateTime<Utc> => "LastActivityDate",
        last_playback_check_in: DateTime<Utc> => "LastPlaybackCheckIn",
        last_paused_date: DateTime<Utc> => "LastPausedDate",
        device_name: String => "DeviceName",
        device_type: String => "DeviceType",
        now_playing_item: BaseItemDto => "NowPlayingItem",
        now_viewing_item: BaseItemDto => "NowViewingItem",
        device_id: String => "DeviceId",
        application_version: String => "ApplicationVersion",
        transcoding_info: Value => "TranscodingInfo",
        is_active: bool => "IsActive",
        supports_media_control: bool => "SupportsMediaControl",
        supports_remote_control: bool => "SupportsRemoteControl",
        now_playing_queue: Vec<QueueItem> => "NowPlayingQueue",
        now_playing_queue_full_items: Vec<BaseItemDto> => "NowPlayingQueueFullItems",
        has_custom_device_name: bool => "HasCustomDeviceName",
        playlist_item_id: String => "PlaylistItemId",
        server_id: String => "ServerId",
        user_primary_image_tag: String => "UserPrimaryImageTag",
        supported_commands: Vec<GeneralCommandType> => "SupportedCommands",
    }
}

impl SessionInfoDto {
    pub fn supports(&self, command: GeneralCommandType) -> bool {
        self.supported_commands
            .as_ref()
            .is_some_and(|commands| commands.contains(&command))
    }
}

record! {
    pub struct GeneralCommand {
        name: GeneralCommandType => "Name",
        controlling_user_id: Uuid => "ControllingUserId",
        arguments: BTreeMap<String, String> => "Arguments",
    }
}

impl GeneralCommand {
    /// Adds one argument, keeping any already present.
    pub fn with_argument(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.arguments
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

record! {
    pub struct PlayRequest {
        item_ids: Vec<Uuid> => "ItemIds",
        start_position_ticks: i64 => "StartPositionTicks",
        play_command: PlayCommand => "PlayCommand",
        controlling_user_id: Uuid => "ControllingUserId",
        subtitle_stream_index: i32 => "SubtitleStreamIndex",
        audio_stream_index: i32 => "AudioStreamIndex",
        media_source_id: String => "MediaSourceId",
        start_index: i32 => "StartIndex",
    }
}

record! {
    pub struct PlaystateRequest {
        command: PlaystateCommand => "Command",
        seek_position_ticks: i64 => "SeekPositionTicks",
        controlling_user_id: String => "ControllingUserId",
    }
}

#[cfg(test)]
mod tests {
    use jellyfin_codec::{Builder, Record};
    use serde_json::json;

    use super::*;

    #[test]
    fn general_command_arguments_key_by_entry() {
        let command = GeneralCommand::builder()
            .name(GeneralCommandType::DisplayMessage)
            .build()
            .with_argument("Header", "Hello")
            .with_argument("TimeoutMs", "5000");

        assert_eq!(
            command.to_query_string(None),
            "Name=DisplayMessage&Arguments[Header]=Hello&Arguments[TimeoutMs]=5000"
        );
        assert_eq!(
            command.to_query_string(Some("command")),
            "command[Name]=DisplayMessage\
             &command[Arguments][Header]=Hello\
             &command[Arguments][TimeoutMs]=5000"
        );
    }

    #[test]
    fn session_capabilities_stay_raw() {
        let session = SessionInfoDto::from_json(&json!({
            "Id": "s1",
            "Capabilities": {"PlayableMediaTypes": ["Video"], "SupportsSync": false},
            "SupportedCommands": ["VolumeUp", "SetVolume"],
            "PlayState": {"IsPaused": true, "RepeatMode": "RepeatNone"}
        }))
        .expect("decode");

        assert!(session.supports(GeneralCommandType::SetVolume));
        assert!(!session.supports(GeneralCommandType::GoHome));
        assert_eq!(
            session.capabilities,
            Some(json!({"PlayableMediaTypes": ["Video"], "SupportsSync": false}))
        );
        assert_eq!(
            session.play_state.and_then(|state| state.is_paused),
            Some(true)
        );
    }

    #[test]
    fn unknown_command_in_list_is_indexed() {
        let err = SessionInfoDto::from_json(&json!({
            "SupportedCommands": ["VolumeUp", "Teleport"]
        }))
        .expect_err("unknown command");
        assert!(err.is_unknown_enum_token());
        assert_eq!(err.path.to_string(), "SupportedCommands[1]");
    }

    #[test]
    fn play_request_repeats_flat_ids() {
        let request = PlayRequest::builder()
            .item_ids(vec![Uuid::nil(), Uuid::from_u128(u128::MAX)])
            .play_command(PlayCommand::PlayShuffle)
            .build();
        assert_eq!(
            request.to_query_string(None),
            "ItemIds=00000000-0000-0000-0000-000000000000\
             &ItemIds=ffffffff-ffff-ffff-ffff-ffffffffffff\
             &PlayCommand=PlayShuffle"
        );
    }
}
