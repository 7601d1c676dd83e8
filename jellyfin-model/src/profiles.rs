//! Device profile pieces sent with playback requests.

use jellyfin_codec::{record, wire_enum};

use crate::media::SubtitleDeliveryMethod;

wire_enum! {
    pub enum DlnaProfileType {
        Audio => "Audio",
        Video => "Video",
        Photo => "Photo",
        Subtitle => "Subtitle",
        Lyric => "Lyric",
    }
}

wire_enum! {
    /// Delivery protocol of a transcoded stream.
    pub enum MediaStreamProtocol {
        Http => "http",
        Hls => "hls",
    }
}

wire_enum! {
    pub enum TranscodeSeekInfo {
        Auto => "Auto",
        Bytes => "Bytes",
    }
}

wire_enum! {
    pub enum EncodingContext {
        Streaming => "Streaming",
        Static => "Static",
    }
}

wire_enum! {
    /// Comparison applied by a [`ProfileCondition`].
    pub enum ProfileConditionType {
        Equals => "Equals",
        NotEquals => "NotEquals",
        LessThanEqual => "LessThanEqual",
        GreaterThanEqual => "GreaterThanEqual",
        EqualsAny => "EqualsAny",
    }
}

wire_enum! {
    /// Stream property a [`ProfileCondition`] inspects.
    pub enum ProfileConditionValue {
        AudioChannels => "AudioChannels",
        AudioBitrate => "AudioBitrate",
        AudioProfile => "AudioProfile",
        Width => "Width",
        Height => "Height",
        Has64BitOffsets => "Has64BitOffsets",
        PacketLength => "PacketLength",
        VideoBitDepth => "VideoBitDepth",
        VideoBitrate => "VideoBitrate",
        VideoFramerate => "VideoFramerate",
        VideoLevel => "VideoLevel",
        VideoProfile => "VideoProfile",
        VideoTimestamp => "VideoTimestamp",
        IsAnamorphic => "IsAnamorphic",
        RefFrames => "RefFrames",
        NumAudioStreams => "NumAudioStreams",
        NumVideoStreams => "NumVideoStreams",
        IsSecondaryAudio => "IsSecondaryAudio",
        VideoCodecTag => "VideoCodecTag",
        IsAvc => "IsAvc",
        IsInterlaced => "IsInterlaced",
        AudioSampleRate => "AudioSampleRate",
        AudioBitDepth => "AudioBitDepth",
        VideoRangeType => "VideoRangeType",
        NumStreams => "NumStreams",
    }
}

record! {
    /// `Property Condition Value`, e.g. `Width LessThanEqual 1920`.
    pub struct ProfileCondition {
        condition: ProfileConditionType => "Condition",
        property: ProfileConditionValue => "Property",
        value: String => "Value",
        is_required: bool => "IsRequired",
    }
}

impl ProfileCondition {
    pub fn new(
        property: ProfileConditionValue,
        condition: ProfileConditionType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            condition: Some(condition),
            property: Some(property),
            value: Some(value.into()),
            is_required: None,
        }
    }
}

record! {
    /// A target the server may transcode to.
    pub struct TranscodingProfile {
        container: String => "Container",
        profile_type: DlnaProfileType => "Type",
        video_codec: String => "VideoCodec",
        audio_codec: String => "AudioCodec",
        protocol: MediaStreamProtocol => "Protocol",
        estimate_content_length: bool => "EstimateContentLength",
        enable_mpegts_m2ts_mode: bool => "EnableMpegtsM2TsMode",
        transcode_seek_info: TranscodeSeekInfo => "TranscodeSeekInfo",
        copy_timestamps: bool => "CopyTimestamps",
        context: EncodingContext => "Context",
        enable_subtitles_in_manifest: bool => "EnableSubtitlesInManifest",
        max_audio_channels: String => "MaxAudioChannels",
        min_segments: i32 => "MinSegments",
        segment_length: i32 => "SegmentLength",
        break_on_non_key_frames: bool => "BreakOnNonKeyFrames",
        conditions: Vec<ProfileCondition> => "Conditions",
        enable_audio_vbr_encoding: bool => "EnableAudioVbrEncoding",
    }
}

impl TranscodingProfile {
    /// A profile carrying the defaults the server schema declares.
    pub fn with_schema_defaults() -> Self {
        Self {
            estimate_content_length: Some(false),
            enable_mpegts_m2ts_mode: Some(false),
            transcode_seek_info: Some(TranscodeSeekInfo::Auto),
            copy_timestamps: Some(false),
            context: Some(EncodingContext::Streaming),
            enable_subtitles_in_manifest: Some(false),
            min_segments: Some(0),
            segment_length: Some(0),
            break_on_non_key_frames: Some(false),
            conditions: Some(Vec::new()),
            enable_audio_vbr_encoding: Some(true),
            ..Self::default()
        }
    }
}

wire_enum! {
    /// What a [`CodecProfile`] constrains.
    pub enum CodecType {
        Video => "Video",
        VideoAudio => "VideoAudio",
        Audio => "Audio",
    }
}

wire_enum! {
    pub enum HeaderMatchType {
        Equals => "Equals",
        Regex => "Regex",
        Substring => "Substring",
    }
}

record! {
    /// Container and codecs a client plays without server help.
    pub struct DirectPlayProfile {
        container: String => "Container",
        audio_codec: String => "AudioCodec",
        video_codec: String => "VideoCodec",
        profile_type: DlnaProfileType => "Type",
    }
}

record! {
    pub struct ContainerProfile {
        profile_type: DlnaProfileType => "Type",
        conditions: Vec<ProfileCondition> => "Conditions",
        container: String => "Container",
    }
}

record! {
    /// Limits applied to one codec, optionally only when
    /// `ApplyConditions` hold.
    pub struct CodecProfile {
        codec_type: CodecType => "Type",
        conditions: Vec<ProfileCondition> => "Conditions",
        apply_conditions: Vec<ProfileCondition> => "ApplyConditions",
        codec: String => "Codec",
        container: String => "Container",
    }
}

record! {
    pub struct SubtitleProfile {
        format: String => "Format",
        method: SubtitleDeliveryMethod => "Method",
        didl_mode: String => "DidlMode",
        language: String => "Language",
        container: String => "Container",
    }
}

record! {
    pub struct ResponseProfile {
        container: String => "Container",
        audio_codec: String => "AudioCodec",
        video_codec: String => "VideoCodec",
        profile_type: DlnaProfileType => "Type",
        org_pn: String => "OrgPn",
        mime_type: String => "MimeType",
        conditions: Vec<ProfileCondition> => "Conditions",
    }
}

record! {
    pub struct XmlAttribute {
        name: String => "Name",
        value: String => "Value",
    }
}

record! {
    pub struct HttpHeaderInfo {
        name: String => "Name",
        value: String => "Value",
        match_type: HeaderMatchType => "Match",
    }
}

record! {
    /// How a DLNA renderer announces itself.
    pub struct DeviceIdentification {
        friendly_name: String => "FriendlyName",
        model_number: String => "ModelNumber",
        serial_number: String => "SerialNumber",
        model_name: String => "ModelName",
        model_description: String => "ModelDescription",
        model_url: String => "ModelUrl",
        manufacturer: String => "Manufacturer",
        manufacturer_url: String => "ManufacturerUrl",
        headers: Vec<HttpHeaderInfo> => "Headers",
    }
}

record! {
    /// Everything a client can play, and what the server should transcode
    /// to otherwise.
    pub struct DeviceProfile {
        name: String => "Name",
        id: String => "Id",
        identification: DeviceIdentification => "Identification",
        friendly_name: String => "FriendlyName",
        manufacturer: String => "Manufacturer",
        manufacturer_url: String => "ManufacturerUrl",
        model_name: String => "ModelName",
        model_description: String => "ModelDescription",
        model_number: String => "ModelNumber",
        model_url: String => "ModelUrl",
        serial_number: String => "SerialNumber",
        enable_album_art_in_didl: bool => "EnableAlbumArtInDidl",
        enable_single_album_art_limit: bool => "EnableSingleAlbumArtLimit",
        enable_single_subtitle_limit: bool => "EnableSingleSubtitleLimit",
        supported_media_types: String => "SupportedMediaTypes",
        user_id: String => "UserId",
        album_art_pn: String => "AlbumArtPn",
        max_album_art_width: i32 => "MaxAlbumArtWidth",
        max_album_art_height: i32 => "MaxAlbumArtHeight",
        max_icon_width: i32 => "MaxIconWidth",
        max_icon_height: i32 => "MaxIconHeight",
        max_streaming_bitrate: i32 => "MaxStreamingBitrate",
        max_static_bitrate: i32 => "MaxStaticBitrate",
        music_streaming_transcoding_bitrate: i32 =>
            "MusicStreamingTranscodingBitrate",
        max_static_music_bitrate: i32 => "MaxStaticMusicBitrate",
        sony_aggregation_flags: String => "SonyAggregationFlags",
        protocol_info: String => "ProtocolInfo",
        timeline_offset_seconds: i32 => "TimelineOffsetSeconds",
        requires_plain_video_items: bool => "RequiresPlainVideoItems",
        requires_plain_folders: bool => "RequiresPlainFolders",
        enable_ms_media_receiver_registrar: bool =>
            "EnableMSMediaReceiverRegistrar",
        ignore_transcode_byte_range_requests: bool =>
            "IgnoreTranscodeByteRangeRequests",
        xml_root_attributes: Vec<XmlAttribute> => "XmlRootAttributes",
        direct_play_profiles: Vec<DirectPlayProfile> => "DirectPlayProfiles",
        transcoding_profiles: Vec<TranscodingProfile> => "TranscodingProfiles",
        container_profiles: Vec<ContainerProfile> => "ContainerProfiles",
        codec_profiles: Vec<CodecProfile> => "CodecProfiles",
        response_profiles: Vec<ResponseProfile> => "ResponseProfiles",
        subtitle_profiles: Vec<SubtitleProfile> => "SubtitleProfiles",
    }
}

impl DeviceProfile {
    pub fn with_schema_defaults() -> Self {
        Self {
            enable_album_art_in_didl: Some(false),
            enable_single_album_art_limit: Some(false),
            enable_single_subtitle_limit: Some(false),
            timeline_offset_seconds: Some(0),
            requires_plain_video_items: Some(false),
            requires_plain_folders: Some(false),
            enable_ms_media_receiver_registrar: Some(false),
            ignore_transcode_byte_range_requests: Some(false),
            xml_root_attributes: Some(Vec::new()),
            direct_play_profiles: Some(Vec::new()),
            transcoding_profiles: Some(Vec::new()),
            container_profiles: Some(Vec::new()),
            codec_profiles: Some(Vec::new()),
            response_profiles: Some(Vec::new()),
            subtitle_profiles: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// First transcoding target for `kind` in `context`, in declared order.
    pub fn transcoding_target(
        &self,
        kind: DlnaProfileType,
        context: EncodingContext,
    ) -> Option<&TranscodingProfile> {
        self.transcoding_profiles.as_deref()?.iter().find(|profile| {
            profile.profile_type == Some(kind)
                && profile.context.unwrap_or(EncodingContext::Streaming)
                    == context
        })
    }

    /// Whether a direct-play profile of `kind` lists `container`.
    ///
    /// Profile containers are comma-separated; a profile without one
    /// accepts any container.
    pub fn can_direct_play(&self, kind: DlnaProfileType, container: &str) -> bool {
        self.direct_play_profiles.iter().flatten().any(|profile| {
            profile.profile_type == Some(kind)
                && profile.container.as_deref().is_none_or(|list| {
                    list.split(',')
                        .any(|entry| entry.trim().eq_ignore_ascii_case(container))
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use jellyfin_codec::{Builder, Record};

    use super::*;

    #[test]
    fn conditions_render_under_prefix() {
        let profile = TranscodingProfile::builder()
            .container("ts")
            .conditions(vec![
                ProfileCondition::new(
                    ProfileConditionValue::Width,
                    ProfileConditionType::LessThanEqual,
                    "1920",
                ),
                ProfileCondition::new(
                    ProfileConditionValue::IsInterlaced,
                    ProfileConditionType::NotEquals,
                    "true",
                ),
            ])
            .build();

        assert_eq!(
            profile.to_query_string(Some("Filter")),
            "Filter[Container]=ts\
             &Filter[Conditions][0][Condition]=LessThanEqual\
             &Filter[Conditions][0][Property]=Width\
             &Filter[Conditions][0][Value]=1920\
             &Filter[Conditions][1][Condition]=NotEquals\
             &Filter[Conditions][1][Property]=IsInterlaced\
             &Filter[Conditions][1][Value]=true"
        );
    }

    #[test]
    fn schema_defaults_encode_in_declared_order() {
        let profile = TranscodingProfile::with_schema_defaults();
        assert_eq!(
            profile.to_query_string(None),
            "EstimateContentLength=false\
             &EnableMpegtsM2TsMode=false\
             &TranscodeSeekInfo=Auto\
             &CopyTimestamps=false\
             &Context=Streaming\
             &EnableSubtitlesInManifest=false\
             &MinSegments=0\
             &SegmentLength=0\
             &BreakOnNonKeyFrames=false\
             &EnableAudioVbrEncoding=true"
        );
        assert_eq!(profile.protocol, None);
        assert_eq!(profile.conditions.as_deref(), Some(&[][..]));
        assert_eq!(profile.to_json()["Conditions"], serde_json::json!([]));
    }

    #[test]
    fn lowercase_protocol_tokens() {
        let profile = TranscodingProfile::builder()
            .protocol(MediaStreamProtocol::Hls)
            .build();
        assert_eq!(profile.to_json_string(), r#"{"Protocol":"hls"}"#);
        assert!(TranscodingProfile::from_json_str(r#"{"Protocol":"HLS"}"#)
            .expect_err("case-sensitive")
            .is_unknown_enum_token());
    }

    fn browser_profile() -> DeviceProfile {
        DeviceProfile::builder()
            .name("Browser")
            .max_streaming_bitrate(120_000_000)
            .direct_play_profiles(vec![
                DirectPlayProfile::builder()
                    .container("mp4,m4v")
                    .profile_type(DlnaProfileType::Video)
                    .video_codec("h264")
                    .build(),
                DirectPlayProfile::builder()
                    .profile_type(DlnaProfileType::Audio)
                    .build(),
            ])
            .transcoding_profiles(vec![
                TranscodingProfile::builder()
                    .container("mp3")
                    .profile_type(DlnaProfileType::Audio)
                    .context(EncodingContext::Static)
                    .build(),
                TranscodingProfile::builder()
                    .container("ts")
                    .profile_type(DlnaProfileType::Video)
                    .protocol(MediaStreamProtocol::Hls)
                    .build(),
            ])
            .build()
    }

    #[test]
    fn device_profile_picks_targets() {
        let profile = browser_profile();
        assert!(profile.can_direct_play(DlnaProfileType::Video, "M4V"));
        assert!(!profile.can_direct_play(DlnaProfileType::Video, "mkv"));
        assert!(profile.can_direct_play(DlnaProfileType::Audio, "flac"));
        assert!(!profile.can_direct_play(DlnaProfileType::Photo, "jpg"));

        let video = profile
            .transcoding_target(DlnaProfileType::Video, EncodingContext::Streaming)
            .expect("video target");
        assert_eq!(video.container.as_deref(), Some("ts"));
        assert!(profile
            .transcoding_target(DlnaProfileType::Audio, EncodingContext::Streaming)
            .is_none());
    }

    #[test]
    fn device_profile_json_nests_profiles() {
        let json = browser_profile().to_json();
        assert_eq!(json["TranscodingProfiles"][1]["Protocol"], "hls");
        assert_eq!(json["DirectPlayProfiles"][1], serde_json::json!({"Type": "Audio"}));
        assert_eq!(DeviceProfile::from_json(&json).expect("decode"), browser_profile());

        let err = DeviceProfile::from_json(&serde_json::json!({
            "CodecProfiles": [{"Type": "Subtitle", "Codec": "srt"}]
        }))
        .expect_err("bad codec type");
        assert_eq!(err.path.to_string(), "CodecProfiles[0].Type");
        assert!(err.is_unknown_enum_token());
    }

    #[test]
    fn device_profile_defaults_keep_empty_lists() {
        let profile = DeviceProfile::with_schema_defaults();
        let json = profile.to_json();
        assert_eq!(json["TimelineOffsetSeconds"], 0);
        assert_eq!(json["SubtitleProfiles"], serde_json::json!([]));
        assert_eq!(
            profile.to_query_string(None),
            "EnableAlbumArtInDidl=false\
             &EnableSingleAlbumArtLimit=false\
             &EnableSingleSubtitleLimit=false\
             &TimelineOffsetSeconds=0\
             &RequiresPlainVideoItems=false\
             &RequiresPlainFolders=false\
             &EnableMSMediaReceiverRegistrar=false\
             &IgnoreTranscodeByteRangeRequests=false"
        );
    }
}
