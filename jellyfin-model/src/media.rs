//! Media sources and the streams inside them.

use std::collections::BTreeMap;

use jellyfin_codec::{record, wire_enum};

use crate::profiles::MediaStreamProtocol;

wire_enum! {
    /// Transport a media source is read over.
    pub enum MediaProtocol {
        File => "File",
        Http => "Http",
        Rtmp => "Rtmp",
        Rtsp => "Rtsp",
        Udp => "Udp",
        Rtp => "Rtp",
        Ftp => "Ftp",
    }
}

wire_enum! {
    pub enum MediaSourceType {
        Default => "Default",
        Grouping => "Grouping",
        Placeholder => "Placeholder",
    }
}

wire_enum! {
    pub enum VideoType {
        VideoFile => "VideoFile",
        Iso => "Iso",
        Dvd => "Dvd",
        BluRay => "BluRay",
    }
}

wire_enum! {
    pub enum IsoType {
        Dvd => "Dvd",
        BluRay => "BluRay",
    }
}

wire_enum! {
    pub enum Video3DFormat {
        HalfSideBySide => "HalfSideBySide",
        FullSideBySide => "FullSideBySide",
        FullTopAndBottom => "FullTopAndBottom",
        HalfTopAndBottom => "HalfTopAndBottom",
        Mvc => "MVC",
    }
}

wire_enum! {
    pub enum TransportStreamTimestamp {
        None => "None",
        Zero => "Zero",
        Valid => "Valid",
    }
}

wire_enum! {
    pub enum MediaStreamType {
        Audio => "Audio",
        Video => "Video",
        Subtitle => "Subtitle",
        EmbeddedImage => "EmbeddedImage",
        Data => "Data",
        Lyric => "Lyric",
    }
}

wire_enum! {
    /// Dynamic range class of a video stream.
    pub enum VideoRange {
        Unknown => "Unknown",
        Sdr => "SDR",
        Hdr => "HDR",
    }
}

wire_enum! {
    /// Concrete HDR format of a video stream.
    pub enum VideoRangeType {
        Unknown => "Unknown",
        Sdr => "SDR",
        Hdr10 => "HDR10",
        Hlg => "HLG",
        Dovi => "DOVI",
        DoviWithHdr10 => "DOVIWithHDR10",
        DoviWithHlg => "DOVIWithHLG",
        DoviWithSdr => "DOVIWithSDR",
        DoviWithEl => "DOVIWithEL",
        DoviWithHdr10Plus => "DOVIWithHDR10Plus",
        DoviWithElHdr10Plus => "DOVIWithELHDR10Plus",
        DoviInvalid => "DOVIInvalid",
        Hdr10Plus => "HDR10Plus",
    }
}

wire_enum! {
    pub enum AudioSpatialFormat {
        None => "None",
        DolbyAtmos => "DolbyAtmos",
        Dtsx => "DTSX",
    }
}

wire_enum! {
    /// How a subtitle stream reaches the client.
    pub enum SubtitleDeliveryMethod {
        Encode => "Encode",
        Embed => "Embed",
        External => "External",
        Hls => "Hls",
        Drop => "Drop",
    }
}

record! {
    /// One audio, video, subtitle or data stream of a media source.
    pub struct MediaStream {
        codec: String => "Codec",
        codec_tag: String => "CodecTag",
        language: String => "Language",
        color_range: String => "ColorRange",
        color_space: String => "ColorSpace",
        color_transfer: String => "ColorTransfer",
        color_primaries: String => "ColorPrimaries",
        dv_version_major: i32 => "DvVersionMajor",
        dv_version_minor: i32 => "DvVersionMinor",
        dv_profile: i32 => "DvProfile",
        dv_level: i32 => "DvLevel",
        rpu_present_flag: i32 => "RpuPresentFlag",
        el_present_flag: i32 => "ElPresentFlag",
        bl_present_flag: i32 => "BlPresentFlag",
        dv_bl_signal_compatibility_id: i32 => "DvBlSignalCompatibilityId",
        rotation: i32 => "Rotation",
        comment: String => "Comment",
        time_base: String => "TimeBase",
        codec_time_base: String => "CodecTimeBase",
        title: String => "Title",
        hdr10_plus_present_flag: bool => "Hdr10PlusPresentFlag",
        video_range: VideoRange => "VideoRange",
        video_range_type: VideoRangeType => "VideoRangeType",
        video_dovi_title: String => "VideoDoViTitle",
        audio_spatial_format: AudioSpatialFormat => "AudioSpatialFormat",
        localized_undefined: String => "LocalizedUndefined",
        localized_default: String => "LocalizedDefault",
        localized_forced: String => "LocalizedForced",
        localized_external: String => "LocalizedExternal",
        localized_hearing_impaired: String => "LocalizedHearingImpaired",
        display_title: String => "DisplayTitle",
        nal_length_size: String => "NalLengthSize",
        is_interlaced: bool => "IsInterlaced",
        is_avc: bool => "IsAVC",
        channel_layout: String => "ChannelLayout",
        bit_rate: i32 => "BitRate",
        bit_depth: i32 => "BitDepth",
        ref_frames: i32 => "RefFrames",
        packet_length: i32 => "PacketLength",
        channels: i32 => "Channels",
        sample_rate: i32 => "SampleRate",
        is_default: bool => "IsDefault",
        is_forced: bool => "IsForced",
        is_hearing_impaired: bool => "IsHearingImpaired",
        height: i32 => "Height",
        width: i32 => "Width",
        average_frame_rate: f32 => "AverageFrameRate",
        real_frame_rate: f32 => "RealFrameRate",
        reference_frame_rate: f32 => "ReferenceFrameRate",
        profile: String => "Profile",
        stream_type: MediaStreamType => "Type",
        aspect_ratio: String => "AspectRatio",
        index: i32 => "Index",
        score: i32 => "Score",
        is_external: bool => "IsExternal",
        delivery_method: SubtitleDeliveryMethod => "DeliveryMethod",
        delivery_url: String => "DeliveryUrl",
        is_external_url: bool => "IsExternalUrl",
        is_text_subtitle_stream: bool => "IsTextSubtitleStream",
        supports_external_stream: bool => "SupportsExternalStream",
        path: String => "Path",
        pixel_format: String => "PixelFormat",
        level: f64 => "Level",
        is_anamorphic: bool => "IsAnamorphic",
    }
}

impl MediaStream {
    /// A stream carrying the defaults the server schema declares.
    pub fn with_schema_defaults() -> Self {
        Self {
            video_range: Some(VideoRange::Unknown),
            video_range_type: Some(VideoRangeType::Unknown),
            audio_spatial_format: Some(AudioSpatialFormat::None),
            ..Self::default()
        }
    }
}

record! {
    /// A font or other file attached to a container.
    pub struct MediaAttachment {
        codec: String => "Codec",
        codec_tag: String => "CodecTag",
        comment: String => "Comment",
        index: i32 => "Index",
        file_name: String => "FileName",
        mime_type: String => "MimeType",
        delivery_url: String => "DeliveryUrl",
    }
}

record! {
    /// A playable version of an item, with its streams.
    pub struct MediaSourceInfo {
        protocol: MediaProtocol => "Protocol",
        id: String => "Id",
        path: String => "Path",
        encoder_path: String => "EncoderPath",
        encoder_protocol: MediaProtocol => "EncoderProtocol",
        source_type: MediaSourceType => "Type",
        container: String => "Container",
        size: i64 => "Size",
        name: String => "Name",
        is_remote: bool => "IsRemote",
        etag: String => "ETag",
        run_time_ticks: i64 => "RunTimeTicks",
        read_at_native_framerate: bool => "ReadAtNativeFramerate",
        ignore_dts: bool => "IgnoreDts",
        ignore_index: bool => "IgnoreIndex",
        gen_pts_input: bool => "GenPtsInput",
        supports_transcoding: bool => "SupportsTranscoding",
        supports_direct_stream: bool => "SupportsDirectStream",
        supports_direct_play: bool => "SupportsDirectPlay",
        is_infinite_stream: bool => "IsInfiniteStream",
        use_most_compatible_transcoding_profile: bool => "UseMostCompatibleTranscodingProfile",
        requires_opening: bool => "RequiresOpening",
        open_token: String => "OpenToken",
        requires_closing: bool => "RequiresClosing",
        live_stream_id: String => "LiveStreamId",
        buffer_ms: i32 => "BufferMs",
        requires_looping: bool => "RequiresLooping",
        supports_probing: bool => "SupportsProbing",
        video_type: VideoType => "VideoType",
        iso_type: IsoType => "IsoType",
        video_3d_format: Video3DFormat => "Video3DFormat",
        media_streams: Vec<MediaStream> => "MediaStreams",
        media_attachments: Vec<MediaAttachment> => "MediaAttachments",
        formats: Vec<String> => "Formats",
        bitrate: i32 => "Bitrate",
        fallback_max_streaming_bitrate: i32 => "FallbackMaxStreamingBitrate",
        timestamp: TransportStreamTimestamp => "Timestamp",
        required_http_headers: BTreeMap<String, String> => "RequiredHttpHeaders",
        transcoding_url: String => "TranscodingUrl",
        transcoding_sub_protocol: MediaStreamProtocol => "TranscodingSubProtocol",
        transcoding_container: String => "TranscodingContainer",
        analyze_duration_ms: i32 => "AnalyzeDurationMs",
        default_audio_stream_index: i32 => "DefaultAudioStreamIndex",
        default_subtitle_stream_index: i32 => "DefaultSubtitleStreamIndex",
        has_segments: bool => "HasSegments",
    }
}

impl MediaSourceInfo {
    pub fn with_schema_defaults() -> Self {
        Self {
            use_most_compatible_transcoding_profile: Some(false),
            ..Self::default()
        }
    }

    /// Streams of one kind, in server order.
    pub fn streams_of(
        &self,
        kind: MediaStreamType,
    ) -> impl Iterator<Item = &MediaStream> {
        self.media_streams
            .iter()
            .flatten()
            .filter(move |stream| stream.stream_type == Some(kind))
    }

    /// The stream the server plays when the client does not choose one.
    pub fn default_audio_stream(&self) -> Option<&MediaStream> {
        let index = self.default_audio_stream_index?;
        self.streams_of(MediaStreamType::Audio)
            .find(|stream| stream.index == Some(index))
    }
}

#[cfg(test)]
mod tests {
    use jellyfin_codec::Record;
    use serde_json::json;

    use super::*;

    #[test]
    fn stream_type_uses_type_wire_name() {
        let stream = MediaStream::from_json(&json!({
            "Type": "Subtitle",
            "IsAVC": false,
            "DeliveryMethod": "External"
        }))
        .expect("decode");
        assert_eq!(stream.stream_type, Some(MediaStreamType::Subtitle));
        assert_eq!(stream.is_avc, Some(false));
        assert_eq!(
            stream.delivery_method,
            Some(SubtitleDeliveryMethod::External)
        );
    }

    #[test]
    fn default_audio_stream_matches_index() {
        let source = MediaSourceInfo::from_json(&json!({
            "DefaultAudioStreamIndex": 2,
            "MediaStreams": [
                {"Type": "Video", "Index": 0},
                {"Type": "Audio", "Index": 1, "Language": "eng"},
                {"Type": "Audio", "Index": 2, "Language": "jpn"}
            ]
        }))
        .expect("decode");
        let audio = source.default_audio_stream().expect("audio stream");
        assert_eq!(audio.language.as_deref(), Some("jpn"));
        assert_eq!(source.streams_of(MediaStreamType::Audio).count(), 2);
    }

    #[test]
    fn schema_defaults_only_touch_declared_fields() {
        let stream = MediaStream::with_schema_defaults();
        assert_eq!(
            stream.to_json(),
            json!({
                "VideoRange": "Unknown",
                "VideoRangeType": "Unknown",
                "AudioSpatialFormat": "None"
            })
        );
    }
}
