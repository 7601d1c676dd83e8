//! Playback reporting: start, progress and stop notifications.

use jellyfin_codec::{record, wire_enum};
use uuid::Uuid;

use crate::items::{BaseItemDto, MediaType};
use crate::profiles::DeviceProfile;

wire_enum! {
    pub enum PlayMethod {
        Transcode => "Transcode",
        DirectStream => "DirectStream",
        DirectPlay => "DirectPlay",
    }
}

wire_enum! {
    pub enum RepeatMode {
        RepeatNone => "RepeatNone",
        RepeatAll => "RepeatAll",
        RepeatOne => "RepeatOne",
    }
}

wire_enum! {
    pub enum PlaybackOrder {
        Default => "Default",
        Shuffle => "Shuffle",
    }
}

record! {
    pub struct QueueItem {
        id: Uuid => "Id",
        playlist_item_id: String => "PlaylistItemId",
    }
}

record! {
    /// What a session's player is doing right now.
    pub struct PlayerStateInfo {
        position_ticks: i64 => "PositionTicks",
        can_seek: bool => "CanSeek",
        is_paused: bool => "IsPaused",
        is_muted: bool => "IsMuted",
        volume_level: i32 => "VolumeLevel",
        audio_stream_index: i32 => "AudioStreamIndex",
        subtitle_stream_index: i32 => "SubtitleStreamIndex",
        media_source_id: String => "MediaSourceId",
        play_method: PlayMethod => "PlayMethod",
        repeat_mode: RepeatMode => "RepeatMode",
        playback_order: PlaybackOrder => "PlaybackOrder",
        live_stream_id: String => "LiveStreamId",
    }
}

record! {
    /// Sent by a client when playback begins.
    pub struct PlaybackStartInfo {
        can_seek: bool => "CanSeek",
        item: BaseItemDto => "Item",
        item_id: Uuid => "ItemId",
        session_id: String => "SessionId",
        media_source_id: String => "MediaSourceId",
        audio_stream_index: i32 => "AudioStreamIndex",
        subtitle_stream_index: i32 => "SubtitleStreamIndex",
        is_paused: bool => "IsPaused",
        is_muted: bool => "IsMuted",
        position_ticks: i64 => "PositionTicks",
        playback_start_time_ticks: i64 => "PlaybackStartTimeTicks",
        volume_level: i32 => "VolumeLevel",
        brightness: i32 => "Brightness",
        aspect_ratio: String => "AspectRatio",
        play_method: PlayMethod => "PlayMethod",
        live_stream_id: String => "LiveStreamId",
        play_session_id: String => "PlaySessionId",
        repeat_mode: RepeatMode => "RepeatMode",
        playback_order: PlaybackOrder => "PlaybackOrder",
        now_playing_queue: Vec<QueueItem> => "NowPlayingQueue",
        playlist_item_id: String => "PlaylistItemId",
    }
}

record! {
    /// Sent periodically while playing.
    pub struct PlaybackProgressInfo {
        can_seek: bool => "CanSeek",
        item: BaseItemDto => "Item",
        item_id: Uuid => "ItemId",
        session_id: String => "SessionId",
        media_source_id: String => "MediaSourceId",
        audio_stream_index: i32 => "AudioStreamIndex",
        subtitle_stream_index: i32 => "SubtitleStreamIndex",
        is_paused: bool => "IsPaused",
        is_muted: bool => "IsMuted",
        position_ticks: i64 => "PositionTicks",
        playback_start_time_ticks: i64 => "PlaybackStartTimeTicks",
        volume_level: i32 => "VolumeLevel",
        brightness: i32 => "Brightness",
        aspect_ratio: String => "AspectRatio",
        play_method: PlayMethod => "PlayMethod",
        live_stream_id: String => "LiveStreamId",
        play_session_id: String => "PlaySessionId",
        repeat_mode: RepeatMode => "RepeatMode",
        playback_order: PlaybackOrder => "PlaybackOrder",
        now_playing_queue: Vec<QueueItem> => "NowPlayingQueue",
        playlist_item_id: String => "PlaylistItemId",
    }
}

record! {
    pub struct PlaybackStopInfo {
        item: BaseItemDto => "Item",
        item_id: Uuid => "ItemId",
        session_id: String => "SessionId",
        media_source_id: String => "MediaSourceId",
        position_ticks: i64 => "PositionTicks",
        live_stream_id: String => "LiveStreamId",
        play_session_id: String => "PlaySessionId",
        failed: bool => "Failed",
        next_media_type: MediaType => "NextMediaType",
        playlist_item_id: String => "PlaylistItemId",
        now_playing_queue: Vec<QueueItem> => "NowPlayingQueue",
    }
}

record! {
    /// Request body for `POST /Items/{itemId}/PlaybackInfo`.
    pub struct PlaybackInfoDto {
        user_id: Uuid => "UserId",
        max_streaming_bitrate: i32 => "MaxStreamingBitrate",
        start_time_ticks: i64 => "StartTimeTicks",
        audio_stream_index: i32 => "AudioStreamIndex",
        subtitle_stream_index: i32 => "SubtitleStreamIndex",
        max_audio_channels: i32 => "MaxAudioChannels",
        media_source_id: String => "MediaSourceId",
        live_stream_id: String => "LiveStreamId",
        device_profile: DeviceProfile => "DeviceProfile",
        enable_direct_play: bool => "EnableDirectPlay",
        enable_direct_stream: bool => "EnableDirectStream",
        enable_transcoding: bool => "EnableTranscoding",
        allow_video_stream_copy: bool => "AllowVideoStreamCopy",
        allow_audio_stream_copy: bool => "AllowAudioStreamCopy",
        auto_open_live_stream: bool => "AutoOpenLiveStream",
        always_burn_in_subtitle_when_transcoding: bool =>
            "AlwaysBurnInSubtitleWhenTranscoding",
    }
}

impl PlaybackInfoDto {
    /// Streaming bitrate cap: the request's own, else the device profile's.
    pub fn effective_max_bitrate(&self) -> Option<i32> {
        self.max_streaming_bitrate.or_else(|| {
            self.device_profile
                .as_ref()
                .and_then(|profile| profile.max_streaming_bitrate)
        })
    }
}

impl From<PlaybackStartInfo> for PlaybackProgressInfo {
    fn from(start: PlaybackStartInfo) -> Self {
        Self {
            can_seek: start.can_seek,
            item: start.item,
            item_id: start.item_id,
            session_id: start.session_id,
            media_source_id: start.media_source_id,
            audio_stream_index: start.audio_stream_index,
            subtitle_stream_index: start.subtitle_stream_index,
            is_paused: start.is_paused,
            is_muted: start.is_muted,
            position_ticks: start.position_ticks,
            playback_start_time_ticks: start.playback_start_time_ticks,
            volume_level: start.volume_level,
            brightness: start.brightness,
            aspect_ratio: start.aspect_ratio,
            play_method: start.play_method,
            live_stream_id: start.live_stream_id,
            play_session_id: start.play_session_id,
            repeat_mode: start.repeat_mode,
            playback_order: start.playback_order,
            now_playing_queue: start.now_playing_queue,
            playlist_item_id: start.playlist_item_id,
        }
    }
}

impl PlaybackProgressInfo {
    /// Stop report for the same play session, at the last known position.
    pub fn to_stop(&self, failed: bool) -> PlaybackStopInfo {
        PlaybackStopInfo {
            item: self.item.clone(),
            item_id: self.item_id,
            session_id: self.session_id.clone(),
            media_source_id: self.media_source_id.clone(),
            position_ticks: self.position_ticks,
            live_stream_id: self.live_stream_id.clone(),
            play_session_id: self.play_session_id.clone(),
            failed: Some(failed),
            next_media_type: None,
            playlist_item_id: self.playlist_item_id.clone(),
            now_playing_queue: self.now_playing_queue.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jellyfin_codec::{Builder, Record};
    use serde_json::json;

    use super::*;
    use crate::profiles::{
        DlnaProfileType, MediaStreamProtocol, TranscodingProfile,
    };

    #[test]
    fn playback_info_request_carries_device_profile() {
        let request = PlaybackInfoDto::builder()
            .start_time_ticks(0i64)
            .enable_direct_play(false)
            .device_profile(
                DeviceProfile::builder()
                    .max_streaming_bitrate(8_000_000)
                    .transcoding_profiles(vec![
                        TranscodingProfile::builder()
                            .container("ts")
                            .profile_type(DlnaProfileType::Video)
                            .protocol(MediaStreamProtocol::Hls)
                            .build(),
                    ])
                    .build(),
            )
            .build();
        assert_eq!(request.effective_max_bitrate(), Some(8_000_000));
        assert_eq!(
            request.to_json(),
            json!({
                "StartTimeTicks": 0,
                "DeviceProfile": {
                    "MaxStreamingBitrate": 8_000_000,
                    "TranscodingProfiles": [
                        {"Container": "ts", "Type": "Video", "Protocol": "hls"}
                    ]
                },
                "EnableDirectPlay": false
            })
        );
        assert_eq!(
            PlaybackInfoDto::from_json(&request.to_json()).expect("decode"),
            request
        );

        let capped = PlaybackInfoDto {
            max_streaming_bitrate: Some(1_000_000),
            ..request
        };
        assert_eq!(capped.effective_max_bitrate(), Some(1_000_000));
    }

    #[test]
    fn playback_info_error_reaches_into_profile() {
        let err = PlaybackInfoDto::from_json(&json!({
            "DeviceProfile": {
                "TranscodingProfiles": [{"Protocol": "rtsp"}]
            }
        }))
        .expect_err("bad protocol");
        assert_eq!(
            err.path.to_string(),
            "DeviceProfile.TranscodingProfiles[0].Protocol"
        );
    }

    #[test]
    fn progress_report_query() {
        let item_id = Uuid::parse_str("0f0e0d0c-0b0a-0908-0706-050403020100")
            .expect("uuid");
        let progress = PlaybackProgressInfo::builder()
            .item_id(item_id)
            .position_ticks(1_200_000_000i64)
            .is_paused(false)
            .play_method(PlayMethod::DirectStream)
            .now_playing_queue(vec![
                QueueItem::builder()
                    .id(item_id)
                    .playlist_item_id("playlistItem0")
                    .build(),
            ])
            .build();

        assert_eq!(
            progress.to_query_string(None),
            "ItemId=0f0e0d0c-0b0a-0908-0706-050403020100\
             &IsPaused=false\
             &PositionTicks=1200000000\
             &PlayMethod=DirectStream\
             &NowPlayingQueue[0][Id]=0f0e0d0c-0b0a-0908-0706-050403020100\
             &NowPlayingQueue[0][PlaylistItemId]=playlistItem0"
        );
    }

    #[test]
    fn start_to_stop_keeps_session() {
        let start = PlaybackStartInfo::from_json(&json!({
            "PlaySessionId": "abc123",
            "PositionTicks": 42,
            "RepeatMode": "RepeatAll"
        }))
        .expect("decode");
        let progress = PlaybackProgressInfo::from(start);
        assert_eq!(progress.repeat_mode, Some(RepeatMode::RepeatAll));

        let stop = progress.to_stop(true);
        assert_eq!(
            stop.to_json(),
            json!({
                "PositionTicks": 42,
                "PlaySessionId": "abc123",
                "Failed": true
            })
        );
    }

    #[test]
    fn embedded_item_errors_carry_full_path() {
        let err = PlaybackStopInfo::from_json(&json!({
            "Item": {"MediaStreams": [{"Index": 0}, {"Index": "one"}]}
        }))
        .expect_err("string index");
        assert_eq!(err.path.to_string(), "Item.MediaStreams[1].Index");
    }
}
